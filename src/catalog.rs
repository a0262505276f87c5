//! Word catalog
//!
//! Vocabulary entries with two text forms and a difficulty level. The built-in
//! list ships with the game; a custom list can be supplied as JSON.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Which text form bubbles display and the speaker reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Primary,
    Secondary,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Primary => "primary",
            Mode::Secondary => "secondary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "primary" | "en" => Some(Mode::Primary),
            "secondary" | "ja" => Some(Mode::Secondary),
            _ => None,
        }
    }
}

/// A single vocabulary entry (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Identity of the word; two entries with the same primary text are the same word
    pub primary: String,
    pub secondary: String,
    pub level: u8,
}

impl WordEntry {
    pub fn new(primary: &str, secondary: &str, level: u8) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            level,
        }
    }

    /// Text shown on the bubble and spoken for the given mode
    pub fn text(&self, mode: Mode) -> &str {
        match mode {
            Mode::Primary => &self.primary,
            Mode::Secondary => &self.secondary,
        }
    }

    /// Primary-text identity check
    pub fn same_word(&self, other: &WordEntry) -> bool {
        self.primary == other.primary
    }
}

/// Built-in vocabulary: (english, japanese, level)
pub const BUILTIN_WORDS: &[(&str, &str, u8)] = &[
    // Level 1: animals and everyday things
    ("cat", "ねこ", 1), ("dog", "いぬ", 1), ("bird", "とり", 1), ("fish", "さかな", 1),
    ("apple", "りんご", 1), ("banana", "バナナ", 1), ("milk", "ぎゅうにゅう", 1), ("water", "みず", 1),
    ("book", "ほん", 1), ("pen", "ペン", 1), ("desk", "つくえ", 1), ("chair", "いす", 1),
    ("sun", "たいよう", 1), ("moon", "つき", 1), ("star", "ほし", 1), ("tree", "き", 1),
    ("flower", "はな", 1), ("car", "くるま", 1),
    // Level 2: colours, family, school
    ("red", "あか", 2), ("blue", "あお", 2), ("yellow", "きいろ", 2), ("green", "みどり", 2),
    ("white", "しろ", 2), ("black", "くろ", 2), ("mother", "おかあさん", 2), ("father", "おとうさん", 2),
    ("sister", "いもうと", 2), ("brother", "おとうと", 2), ("teacher", "せんせい", 2), ("student", "がくせい", 2),
    ("school", "がっこう", 2), ("library", "としょかん", 2), ("station", "えき", 2), ("hospital", "びょういん", 2),
    // Level 3: verbs
    ("run", "はしる", 3), ("swim", "およぐ", 3), ("read", "よむ", 3), ("write", "かく", 3),
    ("sing", "うたう", 3), ("sleep", "ねる", 3), ("eat", "たべる", 3),
];

/// The full list of vocabulary the game can draw from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Rc<WordEntry>>,
}

impl Catalog {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(Rc::new).collect(),
        }
    }

    /// The list compiled into the game
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_WORDS
                .iter()
                .map(|&(primary, secondary, level)| WordEntry::new(primary, secondary, level))
                .collect(),
        )
    }

    /// Parse a JSON array of `{ "primary", "secondary", "level" }` objects
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Parse a custom list, falling back to the built-in one on bad input
    pub fn from_json_or_builtin(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(catalog) if !catalog.is_empty() => {
                log::info!("Loaded custom word catalog ({} entries)", catalog.len());
                catalog
            }
            Ok(_) => {
                log::warn!("Custom word catalog is empty, using built-in words");
                Self::builtin()
            }
            Err(e) => {
                log::warn!("Invalid word catalog ({}), using built-in words", e);
                Self::builtin()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Rc<WordEntry>] {
        &self.entries
    }

    /// Entries at `level`, unique by primary text, in catalog order
    pub fn eligible(&self, level: u8) -> Vec<Rc<WordEntry>> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| e.level == level)
            .filter(|e| seen.insert(e.primary.as_str()))
            .cloned()
            .collect()
    }

    /// Distinct levels present, ascending
    pub fn levels(&self) -> Vec<u8> {
        self.entries
            .iter()
            .map(|e| e.level)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
