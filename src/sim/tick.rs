//! Fixed timestep simulation tick
//!
//! The frame loop calls `tick` once per step while the session is ticking,
//! and feeds player actions through `handle_input` between ticks.

use super::commands::UserInput;
use super::state::Session;

/// Advance the session by one step: fire due timers, then move every bubble
pub fn tick(session: &mut Session) {
    if !session.is_ticking() {
        return;
    }
    session.advance_clock();
    session.fire_timers();
    session.advance_bubbles();
}

/// Apply a player action
pub fn handle_input(session: &mut Session, input: UserInput) {
    match input {
        UserInput::ClickedBubble(id) => {
            if let Some(outcome) = session.on_bubble_clicked(id) {
                log::debug!("Bubble {} clicked: {:?}", id, outcome);
            }
        }
        UserInput::RequestedStart { mode, level } => session.start(mode, level),
        UserInput::RequestedExit => session.stop(),
        UserInput::RequestedReplay => session.replay_listen(),
        UserInput::ViewportResized { width, height } => session.resize(width, height),
    }
}
