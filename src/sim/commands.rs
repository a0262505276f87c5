//! Boundary between the simulation and the presentation layer
//!
//! The simulation never touches the DOM, audio or speech. It queues
//! `Command`s; a `Presenter` carries them out. Player actions come back in as
//! `UserInput`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::BubbleId;
use crate::catalog::Mode;

/// Short feedback tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Right bubble popped
    Correct,
    /// Wrong bubble clicked
    Incorrect,
    /// Every word found
    Clear,
}

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Game,
    Clear,
}

/// Side effects requested by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    BubbleCreated {
        id: BubbleId,
        label: String,
        pos: Vec2,
        size: f32,
    },
    BubbleMoved {
        id: BubbleId,
        pos: Vec2,
    },
    /// Word solved; play the pop animation (view removal follows)
    BubblePopped {
        id: BubbleId,
    },
    /// Wrong bubble; play a short shake
    BubbleRejected {
        id: BubbleId,
    },
    BubbleRemoved {
        id: BubbleId,
    },
    PlayTone(Tone),
    /// Speak `text` in `lang`, cancelling any utterance in progress
    Speak {
        text: String,
        lang: String,
    },
    ShowScreen(Screen),
    UpdateRemainingCount(usize),
    Celebrate,
}

/// Player actions forwarded by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UserInput {
    ClickedBubble(BubbleId),
    RequestedStart { mode: Mode, level: u8 },
    RequestedExit,
    RequestedReplay,
    ViewportResized { width: f32, height: f32 },
}

/// Something that can carry out simulation commands
pub trait Presenter {
    fn present(&mut self, command: &Command);
}

/// Collects commands instead of acting on them
#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<Command>,
}

impl Presenter for CommandLog {
    fn present(&mut self, command: &Command) {
        self.commands.push(command.clone());
    }
}

impl CommandLog {
    /// Commands other than per-tick movement
    pub fn significant(&self) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, Command::BubbleMoved { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
