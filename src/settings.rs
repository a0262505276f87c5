//! Game settings
//!
//! Read once at startup; never written back.

use serde::{Deserialize, Serialize};

use crate::catalog::Mode;
use crate::consts::*;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preselected language mode on the start screen
    pub mode: Mode,
    /// Preselected difficulty level
    pub level: u8,

    // === Playfield ===
    /// Height of the header zone bubbles never enter (px)
    pub header_inset: f32,

    // === Speech ===
    /// BCP-47 tag used when speaking primary text
    pub primary_lang: String,
    /// BCP-47 tag used when speaking secondary text
    pub secondary_lang: String,
    /// Utterance rate (1.0 = normal)
    pub speech_rate: f32,

    // === Audio ===
    /// Tone volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Timing (simulation ticks) ===
    pub speak_delay_ticks: u32,
    pub pop_delay_ticks: u32,

    // === Rounds ===
    pub min_round_words: usize,
    pub max_round_words: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Primary,
            level: 1,

            header_inset: HEADER_INSET,

            primary_lang: "en-US".to_string(),
            secondary_lang: "ja-JP".to_string(),
            speech_rate: 0.9,

            master_volume: 0.8,
            muted: false,

            speak_delay_ticks: SPEAK_DELAY_TICKS,
            pop_delay_ticks: POP_DELAY_TICKS,

            min_round_words: ROUND_MIN_WORDS,
            max_round_words: ROUND_MAX_WORDS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse settings, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values into something playable
    pub(crate) fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.speech_rate = self.speech_rate.clamp(0.1, 10.0);
        self.header_inset = self.header_inset.max(0.0);
        self.min_round_words = self.min_round_words.max(1);
        self.max_round_words = self.max_round_words.max(self.min_round_words);
        self
    }

    /// Speech language tag for the given mode
    pub fn lang_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Primary => &self.primary_lang,
            Mode::Secondary => &self.secondary_lang,
        }
    }

    /// Effective tone volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Id of the inline JSON element holding settings
    pub const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Load settings from the page's inline config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("No inline config, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an optional JSON file path (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read settings file {} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"level": 2, "mode": "secondary"}"#).unwrap();
        assert_eq!(settings.level, 2);
        assert_eq!(settings.mode, Mode::Secondary);
        assert_eq!(settings.primary_lang, "en-US");
        assert_eq!(settings.min_round_words, ROUND_MIN_WORDS);
    }

    #[test]
    fn test_sanitize() {
        let settings = Settings::from_json(
            r#"{"master_volume": 3.0, "min_round_words": 12, "max_round_words": 4}"#,
        )
        .unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.max_round_words, 12);
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        assert_eq!(Settings::from_json_or_default("nope"), Settings::default());
    }

    #[test]
    fn test_lang_and_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.lang_for(Mode::Secondary), "ja-JP");
        assert!((settings.effective_volume() - 0.8).abs() < f32::EPSILON);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
