use std::sync::{Arc, Mutex, PoisonError};

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::{Coordinate, Destination};
use crate::routing::haversine_km;

const FEED_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Position(Coordinate),
    PermissionDenied,
    /// Platform failure, e.g. no fix or a timeout.
    Failed(String),
}

/// Fan-out of device location events. Dropping a receiver unsubscribes it.
#[derive(Debug, Clone)]
pub struct LocationFeed {
    sender: broadcast::Sender<LocationEvent>,
}

impl Default for LocationFeed {
    fn default() -> Self {
        Self::new(FEED_CAPACITY)
    }
}

impl LocationFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: LocationEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LocationEvent> {
        self.sender.subscribe()
    }
}

/// Location state as flags; failures never propagate as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationTracker {
    pub last_position: Option<Coordinate>,
    pub permission_denied: bool,
    pub last_error: Option<String>,
}

impl LocationTracker {
    pub fn apply(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::Position(coordinate) => {
                self.last_position = Some(coordinate);
                self.permission_denied = false;
                self.last_error = None;
            }
            LocationEvent::PermissionDenied => {
                self.permission_denied = true;
            }
            LocationEvent::Failed(reason) => {
                self.last_error = Some(reason);
            }
        }
    }

    /// Fold events from `events` into `tracker` until the feed closes.
    pub async fn follow(
        tracker: Arc<Mutex<LocationTracker>>,
        mut events: broadcast::Receiver<LocationEvent>,
    ) {
        loop {
            match events.recv().await {
                Ok(event) => tracker
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .apply(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!("location tracker missed {} events", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("location feed closed");
    }
}

/// Nearest-stage lookup over the itinerary's end-of-day towns.
///
/// Stages are indexed as points on the unit sphere, where chord length grows
/// with great-circle distance, so the closest hit is the closest town.
pub struct StageLocator {
    stages: Vec<Destination>,
    index: KdTree<f64, usize, [f64; 3]>,
}

fn unit_vector(coordinate: Coordinate) -> [f64; 3] {
    let (lat, lon) = (coordinate.lat.to_radians(), coordinate.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

impl StageLocator {
    pub fn new(stages: &[Destination]) -> Self {
        let mut index = KdTree::new(3);
        for (idx, stage) in stages.iter().enumerate() {
            if let Err(err) = index.add(unit_vector(stage.coordinate), idx) {
                tracing::warn!("stage {} not indexed: {:?}", stage.name, err);
            }
        }
        Self {
            stages: stages.to_vec(),
            index,
        }
    }

    /// Closest stage with its great-circle distance in kilometres.
    pub fn nearest(&self, coordinate: Coordinate) -> Option<(&Destination, f64)> {
        let hits = self
            .index
            .nearest(&unit_vector(coordinate), 1, &squared_euclidean)
            .ok()?;
        let (_, &idx) = hits.first()?;
        let stage = self.stages.get(idx)?;
        Some((stage, haversine_km(coordinate, stage.coordinate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary;

    #[test]
    fn tracker_folds_events_into_flags() {
        let mut tracker = LocationTracker::default();
        tracker.apply(LocationEvent::PermissionDenied);
        assert!(tracker.permission_denied);

        tracker.apply(LocationEvent::Failed("no fix".into()));
        assert_eq!(tracker.last_error.as_deref(), Some("no fix"));
        assert!(tracker.last_position.is_none());

        let leon = Coordinate::new(42.5987, -5.5671);
        tracker.apply(LocationEvent::Position(leon));
        assert_eq!(
            tracker,
            LocationTracker {
                last_position: Some(leon),
                permission_denied: false,
                last_error: None,
            }
        );
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let feed = LocationFeed::default();
        assert_eq!(feed.publish(LocationEvent::PermissionDenied), 0);
    }

    #[tokio::test]
    async fn follow_applies_published_events_until_closed() {
        let feed = LocationFeed::new(4);
        let tracker = Arc::new(Mutex::new(LocationTracker::default()));
        let task = tokio::spawn(LocationTracker::follow(tracker.clone(), feed.subscribe()));

        let sahagun = Coordinate::new(42.3711, -5.0294);
        assert_eq!(feed.publish(LocationEvent::Position(sahagun)), 1);
        drop(feed);
        task.await.unwrap();

        assert_eq!(tracker.lock().unwrap().last_position, Some(sahagun));
    }

    #[tokio::test]
    async fn dropped_receiver_unsubscribes() {
        let feed = LocationFeed::default();
        let receiver = feed.subscribe();
        assert_eq!(feed.publish(LocationEvent::Failed("timeout".into())), 1);
        drop(receiver);
        assert_eq!(feed.publish(LocationEvent::Failed("timeout".into())), 0);
    }

    #[test]
    fn nearest_stage_in_a_town_is_that_town() {
        let locator = StageLocator::new(itinerary::itinerary());
        let burgos = itinerary::itinerary()
            .iter()
            .find(|d| d.name == "Burgos")
            .unwrap();

        let (stage, km) = locator.nearest(burgos.coordinate).unwrap();
        assert_eq!(stage.day, burgos.day);
        assert!(km < 1e-6);
    }

    #[test]
    fn nearest_stage_from_the_trail() {
        let locator = StageLocator::new(itinerary::itinerary());
        // Monte do Gozo, about 5 km before the cathedral
        let (stage, km) = locator.nearest(Coordinate::new(42.8868, -8.4938)).unwrap();
        assert_eq!(stage.name, "Santiago de Compostela");
        assert!(km > 2.0 && km < 8.0, "{km}");
    }

    #[tokio::test]
    async fn follow_recovers_a_poisoned_tracker() {
        let feed = LocationFeed::new(4);
        let tracker = Arc::new(Mutex::new(LocationTracker::default()));
        let poisoner = tracker.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("tracker poisoned");
        })
        .join();
        assert!(tracker.is_poisoned());

        let task = tokio::spawn(LocationTracker::follow(tracker.clone(), feed.subscribe()));
        feed.publish(LocationEvent::PermissionDenied);
        drop(feed);
        task.await.unwrap();

        let state = tracker.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(state.permission_denied);
    }

    fn stage(day: u32, name: &str, lat: f64, lon: f64) -> Destination {
        Destination {
            day,
            name: name.into(),
            lodging: String::new(),
            coordinate: Coordinate::new(lat, lon),
            day_distance_km: 0.0,
            cumulative_distance_km: 0.0,
            description: String::new(),
        }
    }

    #[test]
    fn nearest_ranks_by_ground_distance_not_degrees() {
        // 1.0 degree north is about 111 km, 1.25 degrees east at 42N about 103 km
        let stages = [stage(1, "North", 43.0, 0.0), stage(2, "East", 42.0, 1.25)];
        let locator = StageLocator::new(&stages);
        let position = Coordinate::new(42.0, 0.0);

        let (nearest, km) = locator.nearest(position).unwrap();
        assert_eq!(nearest.name, "East");
        assert!(km < haversine_km(position, stages[0].coordinate));
    }

    #[test]
    fn empty_locator_finds_nothing() {
        let locator = StageLocator::new(&[]);
        assert!(locator.nearest(Coordinate::new(42.0, -3.0)).is_none());
    }
}
