use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Monotonic request counter. Handing out a new token cancels every token
/// issued before it.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its token.
    pub fn advance(&self) -> CancelToken {
        let generation = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        CancelToken {
            current: Arc::clone(&self.counter),
            generation,
        }
    }

    /// Cancel the outstanding token without issuing a new one.
    pub fn cancel_all(&self) {
        self.counter.fetch_add(1, Ordering::AcqRel);
    }

    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }
}

/// Cooperative cancellation flag checked between units of work.
#[derive(Debug, Clone)]
pub struct CancelToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl CancelToken {
    /// A token nobody else can cancel.
    pub fn never() -> Self {
        Generation::new().advance()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}
