//! Presentation layer
//!
//! Carries out simulation commands:
//! - `dom`: bubbles as absolutely positioned elements, screens, confetti (web)
//! - `speech`: Web Speech API text-to-speech (web)
//! - `LogPresenter`: writes commands to the log (native/headless)

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod speech;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
#[cfg(target_arch = "wasm32")]
pub use speech::Speaker;

use crate::sim::{Command, Presenter};

/// Headless presenter: logs every command as a JSON line, movement at trace
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Movement commands seen
    pub moves: u64,
    /// Other commands seen
    pub events: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, command: &Command) {
        if let Command::BubbleMoved { id, pos } = command {
            self.moves += 1;
            log::trace!("bubble {} -> ({:.1}, {:.1})", id, pos.x, pos.y);
            return;
        }
        self.events += 1;
        match serde_json::to_string(command) {
            Ok(json) => log::info!("{}", json),
            Err(e) => log::warn!("Unserializable command {:?}: {}", command, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_log_presenter_counts() {
        let mut presenter = LogPresenter::default();
        presenter.present(&Command::BubbleMoved {
            id: 1,
            pos: Vec2::new(1.0, 2.0),
        });
        presenter.present(&Command::UpdateRemainingCount(3));
        presenter.present(&Command::Celebrate);
        assert_eq!(presenter.moves, 1);
        assert_eq!(presenter.events, 2);
    }
}
