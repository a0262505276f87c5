//! Text-to-speech via the Web Speech API
//!
//! Browsers without speech synthesis simply stay silent.

use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

pub struct Speaker {
    synth: Option<SpeechSynthesis>,
    rate: f32,
}

impl Speaker {
    pub fn new(rate: f32) -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("Speech synthesis unavailable - words will not be spoken");
        }
        Self { synth, rate }
    }

    /// Speak `text`, cutting off whatever is currently being said
    pub fn speak(&self, text: &str, lang: &str) {
        let Some(synth) = &self.synth else { return };
        synth.cancel();

        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            log::warn!("Could not create utterance for '{}'", text);
            return;
        };
        utterance.set_lang(lang);
        utterance.set_rate(self.rate);
        synth.speak(&utterance);
    }

    pub fn cancel(&self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
