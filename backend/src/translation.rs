use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::phrasebook::{ENGLISH_FRENCH, ENGLISH_PORTUGUESE, ENGLISH_SPANISH, Phrasebook};

const MAX_PHRASE_WORDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Portuguese,
    ];

    /// Accepts bare ISO 639-1 codes as well as region-tagged ones (`es-ES`, `pt_BR`).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::English),
            "es" => Some(Language::Spanish),
            "fr" => Some(Language::French),
            "pt" => Some(Language::Portuguese),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Portuguese => "pt",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Portuguese => "Portuguese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lookup tables for one direction, keys normalized.
#[derive(Debug, Default)]
struct DirectedTable {
    phrases: HashMap<String, String>,
    words: HashMap<String, String>,
    /// Longest prefix first.
    idioms: Vec<(String, String)>,
}

impl DirectedTable {
    fn build<'a>(
        phrases: impl Iterator<Item = (&'a str, &'a str)>,
        words: impl Iterator<Item = (&'a str, &'a str)>,
        idioms: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut table = DirectedTable::default();
        // First entry wins when several sources share a normalized key.
        for (from, to) in phrases {
            table.phrases.entry(normalize(from)).or_insert_with(|| to.to_string());
        }
        for (from, to) in words {
            table.words.entry(normalize(from)).or_insert_with(|| to.to_string());
        }
        table.idioms = idioms
            .map(|(from, to)| (normalize(from), to.to_string()))
            .collect();
        table
            .idioms
            .sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.split(' ').count()));
        table
    }

    fn forward(book: &Phrasebook) -> Self {
        Self::build(
            book.phrases.iter().copied(),
            book.words.iter().copied(),
            book.idioms.iter().copied(),
        )
    }

    fn reverse(book: &Phrasebook) -> Self {
        Self::build(
            book.phrases.iter().map(|&(en, other)| (other, en)),
            book.words.iter().map(|&(en, other)| (other, en)),
            book.idioms.iter().map(|&(en, other)| (other, en)),
        )
    }

    /// `normalized` must already be the output of [`normalize`].
    fn lookup(&self, normalized: &str) -> Option<String> {
        if let Some(hit) = self.phrases.get(normalized) {
            return Some(hit.clone());
        }

        for (prefix, replacement) in &self.idioms {
            let rest = normalized
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(' '));
            if let Some(rest) = rest {
                if let Some(translated) = self.lookup(rest) {
                    return Some(format!("{replacement} {translated}"));
                }
            }
        }

        self.greedy(normalized)
    }

    fn greedy(&self, normalized: &str) -> Option<String> {
        let tokens: Vec<&str> = normalized.split(' ').collect();
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        let mut matched = false;
        let mut i = 0;

        while i < tokens.len() {
            let longest = MAX_PHRASE_WORDS.min(tokens.len() - i);
            let window = (2..=longest).rev().find_map(|len| {
                self.phrases
                    .get(&tokens[i..i + len].join(" "))
                    .map(|hit| (len, hit))
            });
            if let Some((len, hit)) = window {
                out.push(hit.clone());
                matched = true;
                i += len;
                continue;
            }

            let token = tokens[i];
            match self.phrases.get(token).or_else(|| self.words.get(token)) {
                Some(hit) => {
                    out.push(hit.clone());
                    matched = true;
                }
                None => out.push(token.to_string()),
            }
            i += 1;
        }

        matched.then(|| out.join(" "))
    }
}

/// Offline phrasebook translator.
///
/// Never fails: text that cannot be matched comes back annotated with the
/// target language name, e.g. `[Spanish] quantum chromodynamics`.
#[derive(Debug)]
pub struct Translator {
    tables: HashMap<(Language, Language), DirectedTable>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        for (other, book) in [
            (Language::Spanish, &ENGLISH_SPANISH),
            (Language::French, &ENGLISH_FRENCH),
            (Language::Portuguese, &ENGLISH_PORTUGUESE),
        ] {
            tables.insert((Language::English, other), DirectedTable::forward(book));
            tables.insert((other, Language::English), DirectedTable::reverse(book));
        }
        Self { tables }
    }

    pub fn translate(&self, text: &str, source: Language, target: Language) -> String {
        if source == target {
            return text.to_string();
        }
        let normalized = normalize(text);
        if normalized.is_empty() {
            return text.to_string();
        }

        match self.lookup(&normalized, source, target) {
            Some(translation) => translation,
            None => {
                tracing::debug!(
                    "no phrasebook match {} -> {}: {:?}",
                    source.code(),
                    target.code(),
                    text
                );
                annotate(text, target)
            }
        }
    }

    fn lookup(&self, normalized: &str, source: Language, target: Language) -> Option<String> {
        if let Some(table) = self.tables.get(&(source, target)) {
            return table.lookup(normalized);
        }
        // No direct table: go through English.
        let english = self.tables.get(&(source, Language::English))?.lookup(normalized)?;
        self.tables
            .get(&(Language::English, target))?
            .lookup(&normalize(&english))
    }
}

fn annotate(text: &str, target: Language) -> String {
    format!("[{}] {}", target.display_name(), text.trim())
}

/// Lowercase, punctuation stripped, single spaces. Apostrophes survive only
/// inside words (`i'm`, `l'addition`).
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' {
                c
            } else if c == '\u{2019}' {
                '\''
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared translator with the lookup delay the mobile UI showed.
#[derive(Debug, Clone)]
pub struct TranslationService {
    translator: Arc<Translator>,
    latency: Duration,
}

impl TranslationService {
    pub fn new(translator: Arc<Translator>, latency: Duration) -> Self {
        Self {
            translator,
            latency,
        }
    }

    pub async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.translator.translate(text, source, target)
    }
}
