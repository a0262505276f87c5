//! Round state machine
//!
//! A `Session` owns everything one player's game needs: the catalog, the
//! words still to find, the live bubbles, pending timers and the queue of
//! commands for the presentation layer. Nothing here is global.

use std::collections::BTreeMap;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, BubbleId, ClickOutcome, Playfield};
use super::commands::{Command, Presenter, Screen, Tone};
use super::timer::{Scheduler, TimerTask};
use crate::catalog::{Catalog, Mode, WordEntry};
use crate::settings::Settings;

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round running (initial, and after exit)
    NotStarted,
    /// Target chosen, waiting for a click
    AwaitingGuess,
    /// Every word found
    RoundComplete,
}

/// One player's game session
#[derive(Debug)]
pub struct Session {
    phase: RoundPhase,
    mode: Mode,
    level: u8,
    /// Words not yet found, keyed by primary text
    remaining: BTreeMap<String, Rc<WordEntry>>,
    /// Always one of `remaining` while awaiting a guess
    target: Option<Rc<WordEntry>>,
    /// Guards ticking and click handling
    active: bool,
    bubbles: BTreeMap<BubbleId, Bubble>,
    playfield: Playfield,
    /// Simulation tick counter
    time_ticks: u64,
    /// Bumped whenever a round is torn down; stamps timers
    round_id: u32,
    catalog: Catalog,
    settings: Settings,
    rng: Pcg32,
    timers: Scheduler,
    outbox: Vec<Command>,
    next_id: BubbleId,
}

impl Session {
    /// Create an idle session showing the start screen
    ///
    /// Out-of-range settings are clamped the same way parsed ones are.
    pub fn new(seed: u64, catalog: Catalog, settings: Settings, width: f32, height: f32) -> Self {
        let settings = settings.sanitized();
        let playfield = Playfield::new(width, height, settings.header_inset);
        Self {
            phase: RoundPhase::NotStarted,
            mode: settings.mode,
            level: settings.level,
            remaining: BTreeMap::new(),
            target: None,
            active: false,
            bubbles: BTreeMap::new(),
            playfield,
            time_ticks: 0,
            round_id: 0,
            catalog,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            timers: Scheduler::new(),
            outbox: vec![Command::ShowScreen(Screen::Start)],
            next_id: 1,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn remaining(&self) -> &BTreeMap<String, Rc<WordEntry>> {
        &self.remaining
    }

    pub fn target(&self) -> Option<&WordEntry> {
        self.target.as_deref()
    }

    pub fn bubbles(&self) -> &BTreeMap<BubbleId, Bubble> {
        &self.bubbles
    }

    pub fn bubble(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.get(&id)
    }

    /// Live bubble showing `word`, if any
    pub fn bubble_for(&self, word: &WordEntry) -> Option<&Bubble> {
        self.bubbles.values().find(|b| b.word.same_word(word))
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Whether the frame loop should keep calling `tick`
    pub fn is_ticking(&self) -> bool {
        self.active
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // === Command queue ===

    fn emit(&mut self, command: Command) {
        self.outbox.push(command);
    }

    /// Take all queued commands
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    /// Hand all queued commands to `presenter`, in order
    pub fn flush(&mut self, presenter: &mut impl Presenter) {
        for command in self.outbox.drain(..) {
            presenter.present(&command);
        }
    }

    fn next_entity_id(&mut self) -> BubbleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Transitions ===

    /// Begin a round with words from `level`, shown and spoken per `mode`
    pub fn start(&mut self, mode: Mode, level: u8) {
        self.teardown();
        self.mode = mode;
        self.level = level;

        let mut words = self.catalog.eligible(level);
        words.shuffle(&mut self.rng);
        let count = self.round_size(words.len());
        words.truncate(count);
        self.remaining = words
            .iter()
            .map(|w| (w.primary.clone(), Rc::clone(w)))
            .collect();

        log::info!(
            "Round {} started: level {}, {} mode, {} words",
            self.round_id,
            level,
            mode.as_str(),
            self.remaining.len()
        );

        self.emit(Command::ShowScreen(Screen::Game));
        for word in words {
            let id = self.next_entity_id();
            let bubble = Bubble::spawn(id, word, &self.playfield, &mut self.rng);
            self.emit(Command::BubbleCreated {
                id,
                label: bubble.word.text(mode).to_string(),
                pos: bubble.pos,
                size: bubble.size,
            });
            self.bubbles.insert(id, bubble);
        }
        self.emit(Command::UpdateRemainingCount(self.remaining.len()));

        if self.remaining.is_empty() {
            log::warn!("No words at level {}, round is over before it began", level);
            self.complete_round(false);
            return;
        }

        self.phase = RoundPhase::AwaitingGuess;
        self.active = true;
        self.pick_target();
    }

    /// How many of `available` words go into a round
    fn round_size(&mut self, available: usize) -> usize {
        let min = self.settings.min_round_words;
        let max = self.settings.max_round_words;
        if available < min {
            available
        } else {
            self.rng.random_range(min..=max).min(available)
        }
    }

    /// Choose a new target uniformly from the remaining words and queue it to
    /// be spoken after the settle delay. Does nothing when no words remain.
    pub fn pick_target(&mut self) {
        if self.remaining.is_empty() {
            return;
        }
        let idx = self.rng.random_range(0..self.remaining.len());
        let Some(word) = self.remaining.values().nth(idx).cloned() else {
            return;
        };
        log::debug!("Target: {}", word.primary);

        let task = TimerTask::Speak {
            text: word.text(self.mode).to_string(),
            lang: self.settings.lang_for(self.mode).to_string(),
        };
        self.timers.schedule(
            self.time_ticks,
            self.settings.speak_delay_ticks,
            self.round_id,
            task,
        );
        self.target = Some(word);
    }

    /// Resolve a click on bubble `id`
    ///
    /// Returns `None` when the click was ignored (no round running, or the
    /// bubble is already gone).
    pub fn on_bubble_clicked(&mut self, id: BubbleId) -> Option<ClickOutcome> {
        if !self.active || self.phase != RoundPhase::AwaitingGuess {
            return None;
        }
        let outcome = self.bubbles.get(&id)?.resolve_click(self.target.as_deref());

        match outcome {
            ClickOutcome::Correct => {
                if let Some(bubble) = self.bubbles.remove(&id) {
                    self.remaining.remove(&bubble.word.primary);
                    log::debug!("Found '{}', {} left", bubble.word.primary, self.remaining.len());
                }
                self.target = None;

                self.emit(Command::PlayTone(Tone::Correct));
                self.emit(Command::BubblePopped { id });
                self.timers.schedule(
                    self.time_ticks,
                    self.settings.pop_delay_ticks,
                    self.round_id,
                    TimerTask::RemoveView { id },
                );
                self.emit(Command::UpdateRemainingCount(self.remaining.len()));

                if self.remaining.is_empty() {
                    self.complete_round(true);
                } else {
                    self.pick_target();
                }
            }
            ClickOutcome::Incorrect => {
                self.emit(Command::PlayTone(Tone::Incorrect));
                self.emit(Command::BubbleRejected { id });
            }
        }
        Some(outcome)
    }

    /// Speak the current target again right away
    pub fn replay_listen(&mut self) {
        if !self.active {
            return;
        }
        let Some(word) = self.target.as_deref() else {
            return;
        };
        let command = Command::Speak {
            text: word.text(self.mode).to_string(),
            lang: self.settings.lang_for(self.mode).to_string(),
        };
        self.timers.cancel_speech();
        self.emit(command);
    }

    /// Abandon whatever is running and return to the start screen
    pub fn stop(&mut self) {
        if self.phase != RoundPhase::NotStarted {
            log::info!("Round {} stopped", self.round_id);
        }
        self.teardown();
        self.emit(Command::ShowScreen(Screen::Start));
    }

    /// Adopt new viewport dimensions, pulling every bubble back inside
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield.width = width;
        self.playfield.height = height;
        for bubble in self.bubbles.values_mut() {
            bubble.clamp_to(&self.playfield);
            self.outbox.push(Command::BubbleMoved {
                id: bubble.id,
                pos: bubble.pos,
            });
        }
    }

    fn complete_round(&mut self, celebrate: bool) {
        self.active = false;
        self.phase = RoundPhase::RoundComplete;
        self.target = None;
        self.flush_timers();
        log::info!("Round {} complete", self.round_id);

        if celebrate {
            self.emit(Command::PlayTone(Tone::Clear));
        }
        self.emit(Command::ShowScreen(Screen::Clear));
        if celebrate {
            self.emit(Command::Celebrate);
        }
    }

    /// Drop every bubble, word and pending timer; invalidate the round id
    fn teardown(&mut self) {
        for id in self.bubbles.keys() {
            self.outbox.push(Command::BubbleRemoved { id: *id });
        }
        self.bubbles.clear();
        self.flush_timers();
        self.remaining.clear();
        self.target = None;
        self.active = false;
        self.phase = RoundPhase::NotStarted;
        self.round_id = self.round_id.wrapping_add(1);
    }

    /// Cancel timers, finishing view removals immediately
    fn flush_timers(&mut self) {
        for task in self.timers.cancel_all() {
            if let TimerTask::RemoveView { id } = task {
                self.emit(Command::BubbleRemoved { id });
            }
        }
    }

    // === Per-tick work (driven by `tick`) ===

    pub(super) fn advance_clock(&mut self) {
        self.time_ticks += 1;
    }

    pub(super) fn fire_timers(&mut self) {
        for task in self.timers.take_due(self.time_ticks, self.round_id) {
            match task {
                TimerTask::Speak { text, lang } => {
                    if self.active {
                        self.emit(Command::Speak { text, lang });
                    }
                }
                TimerTask::RemoveView { id } => self.emit(Command::BubbleRemoved { id }),
            }
        }
    }

    pub(super) fn advance_bubbles(&mut self) {
        for bubble in self.bubbles.values_mut() {
            bubble.advance(&self.playfield);
            self.outbox.push(Command::BubbleMoved {
                id: bubble.id,
                pos: bubble.pos,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog(level_counts: &[(u8, usize)]) -> Catalog {
        let mut entries = Vec::new();
        for &(level, count) in level_counts {
            for i in 0..count {
                let word = format!("w{}-{}", level, i);
                entries.push(WordEntry::new(&word, &word.to_uppercase(), level));
            }
        }
        Catalog::new(entries)
    }

    fn session(seed: u64, catalog: Catalog) -> Session {
        Session::new(seed, catalog, Settings::default(), 1024.0, 768.0)
    }

    fn assert_invariants(s: &Session) {
        if s.phase() == RoundPhase::AwaitingGuess {
            let target = s.target().expect("target while awaiting guess");
            assert!(s.remaining().values().any(|w| w.same_word(target)));
            assert!(s.is_ticking());
        }
        if s.is_ticking() {
            assert_eq!(s.remaining().len(), s.bubbles().len());
        }
    }

    fn click_target(s: &mut Session) -> Option<ClickOutcome> {
        let target = s.target()?.clone();
        let id = s.bubble_for(&target)?.id;
        s.on_bubble_clicked(id)
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut s = session(1, Catalog::builtin());
        assert_eq!(s.phase(), RoundPhase::NotStarted);
        assert!(!s.is_ticking());
        assert_eq!(s.drain_commands(), vec![Command::ShowScreen(Screen::Start)]);
    }

    #[test]
    fn test_new_session_preselects_from_settings() {
        let settings = Settings {
            mode: Mode::Secondary,
            level: 2,
            ..Settings::default()
        };
        let mut s = Session::new(1, Catalog::builtin(), settings, 1024.0, 768.0);
        assert_eq!(s.mode(), Mode::Secondary);
        assert_eq!(s.level(), 2);

        s.start(Mode::Primary, 3);
        s.stop();
        // The last played level stays selected
        assert_eq!(s.level(), 3);
        assert_eq!(s.mode(), Mode::Primary);
    }

    #[test]
    fn test_start_creates_one_bubble_per_word() {
        let mut s = session(7, catalog(&[(1, 20), (2, 5)]));
        s.drain_commands();
        s.start(Mode::Secondary, 1);

        assert_eq!(s.phase(), RoundPhase::AwaitingGuess);
        assert!((10..=15).contains(&s.remaining().len()));
        assert!(s.remaining().values().all(|w| w.level == 1));
        assert_invariants(&s);

        let commands = s.drain_commands();
        assert_eq!(commands[0], Command::ShowScreen(Screen::Game));
        let labels: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                Command::BubbleCreated { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), s.remaining().len());
        assert!(labels.iter().all(|l| l.starts_with("W1-")));
        assert!(commands.contains(&Command::UpdateRemainingCount(s.remaining().len())));
    }

    #[test]
    fn test_target_spoken_after_delay() {
        let mut s = session(3, Catalog::builtin());
        s.start(Mode::Primary, 1);
        s.drain_commands();
        let target = s.target().unwrap().primary.clone();

        for _ in 0..(s.settings().speak_delay_ticks - 1) {
            crate::sim::tick(&mut s);
        }
        assert!(!s.drain_commands().iter().any(|c| matches!(c, Command::Speak { .. })));

        crate::sim::tick(&mut s);
        let spoken: Vec<_> = s
            .drain_commands()
            .into_iter()
            .filter(|c| matches!(c, Command::Speak { .. }))
            .collect();
        assert_eq!(
            spoken,
            vec![Command::Speak {
                text: target,
                lang: "en-US".to_string()
            }]
        );
    }

    #[test]
    fn test_correct_click_pops_and_retargets() {
        let mut s = session(11, Catalog::builtin());
        s.start(Mode::Primary, 1);
        let before = s.remaining().len();
        let target = s.target().unwrap().clone();
        let id = s.bubble_for(&target).unwrap().id;
        s.drain_commands();

        assert_eq!(s.on_bubble_clicked(id), Some(ClickOutcome::Correct));
        assert_eq!(s.remaining().len(), before - 1);
        assert!(s.bubble(id).is_none());
        assert!(!s.remaining().values().any(|w| w.same_word(&target)));
        assert_invariants(&s);

        let commands = s.drain_commands();
        assert_eq!(commands[0], Command::PlayTone(Tone::Correct));
        assert_eq!(commands[1], Command::BubblePopped { id });

        // View removal follows the pop animation
        for _ in 0..s.settings().pop_delay_ticks {
            crate::sim::tick(&mut s);
        }
        assert!(s.drain_commands().contains(&Command::BubbleRemoved { id }));
    }

    #[test]
    fn test_incorrect_click_changes_nothing() {
        let mut s = session(5, Catalog::builtin());
        s.start(Mode::Primary, 2);
        let before = s.remaining().len();
        let target = s.target().unwrap().clone();
        let wrong = s
            .bubbles()
            .values()
            .find(|b| !b.word.same_word(&target))
            .unwrap()
            .id;
        s.drain_commands();

        assert_eq!(s.on_bubble_clicked(wrong), Some(ClickOutcome::Incorrect));
        assert_eq!(s.remaining().len(), before);
        assert_eq!(s.target(), Some(&target));
        assert_eq!(
            s.drain_commands(),
            vec![
                Command::PlayTone(Tone::Incorrect),
                Command::BubbleRejected { id: wrong }
            ]
        );
    }

    #[test]
    fn test_exhausting_words_completes_round() {
        let mut s = session(21, Catalog::builtin());
        s.start(Mode::Primary, 3);
        let total = s.remaining().len();
        for _ in 0..total {
            assert_eq!(click_target(&mut s), Some(ClickOutcome::Correct));
            assert_invariants(&s);
        }
        assert_eq!(s.phase(), RoundPhase::RoundComplete);
        assert!(!s.is_ticking());
        assert_eq!(s.pending_timers(), 0);

        let commands = s.drain_commands();
        let tail = &commands[commands.len() - 3..];
        assert_eq!(
            tail,
            &[
                Command::PlayTone(Tone::Clear),
                Command::ShowScreen(Screen::Clear),
                Command::Celebrate
            ]
        );
        // The last popped bubble's view is removed right away
        let removed = commands
            .iter()
            .filter(|c| matches!(c, Command::BubbleRemoved { .. }))
            .count();
        assert!(removed >= 1);

        // Ticking a finished round does nothing
        let ticks = s.time_ticks();
        crate::sim::tick(&mut s);
        assert_eq!(s.time_ticks(), ticks);
        assert!(s.drain_commands().is_empty());
    }

    #[test]
    fn test_empty_level_goes_straight_to_clear() {
        let mut s = session(1, catalog(&[(1, 12)]));
        s.drain_commands();
        s.start(Mode::Primary, 4);
        assert_eq!(s.phase(), RoundPhase::RoundComplete);
        assert!(s.target().is_none());
        assert!(!s.is_ticking());
        assert_eq!(
            s.drain_commands(),
            vec![
                Command::ShowScreen(Screen::Game),
                Command::UpdateRemainingCount(0),
                Command::ShowScreen(Screen::Clear)
            ]
        );
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut s = session(9, Catalog::builtin());
        s.start(Mode::Primary, 1);
        let live = s.bubbles().len();
        click_target(&mut s);
        s.drain_commands();

        s.stop();
        assert_eq!(s.phase(), RoundPhase::NotStarted);
        assert!(!s.is_ticking());
        assert!(s.remaining().is_empty());
        assert!(s.bubbles().is_empty());
        assert_eq!(s.pending_timers(), 0);

        let commands = s.drain_commands();
        // Every live bubble plus the one still popping
        let removed = commands
            .iter()
            .filter(|c| matches!(c, Command::BubbleRemoved { .. }))
            .count();
        assert_eq!(removed, live);
        assert_eq!(commands.last(), Some(&Command::ShowScreen(Screen::Start)));

        // No speech leaks out of the stopped round
        for _ in 0..120 {
            crate::sim::tick(&mut s);
        }
        assert!(s.drain_commands().is_empty());
    }

    #[test]
    fn test_stop_is_always_legal() {
        let mut s = session(2, Catalog::builtin());
        s.stop();
        s.stop();
        assert_eq!(s.phase(), RoundPhase::NotStarted);
        s.start(Mode::Primary, 3);
        while click_target(&mut s).is_some() {}
        assert_eq!(s.phase(), RoundPhase::RoundComplete);
        s.stop();
        assert_eq!(s.phase(), RoundPhase::NotStarted);
    }

    #[test]
    fn test_restart_replaces_round() {
        let mut s = session(4, Catalog::builtin());
        s.start(Mode::Primary, 1);
        let old_ids: Vec<_> = s.bubbles().keys().copied().collect();
        s.start(Mode::Secondary, 3);
        assert!(old_ids.iter().all(|id| s.bubble(*id).is_none()));
        assert_eq!(s.mode(), Mode::Secondary);
        assert_eq!(s.level(), 3);
        assert_invariants(&s);
    }

    #[test]
    fn test_replay_speaks_now() {
        let mut s = session(6, Catalog::builtin());
        s.replay_listen();
        assert!(!s.drain_commands().iter().any(|c| matches!(c, Command::Speak { .. })));

        s.start(Mode::Secondary, 1);
        s.drain_commands();
        let text = s.target().unwrap().secondary.clone();
        s.replay_listen();
        assert_eq!(
            s.drain_commands(),
            vec![Command::Speak {
                text,
                lang: "ja-JP".to_string()
            }]
        );
        // The delayed speak was superseded
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn test_click_ignored_when_idle_or_unknown() {
        let mut s = session(8, Catalog::builtin());
        assert_eq!(s.on_bubble_clicked(1), None);
        s.start(Mode::Primary, 1);
        assert_eq!(s.on_bubble_clicked(9999), None);
    }

    #[test]
    fn test_resize_clamps_bubbles() {
        let mut s = session(12, Catalog::builtin());
        s.start(Mode::Primary, 1);
        s.drain_commands();
        s.resize(300.0, 400.0);
        for b in s.bubbles().values() {
            assert!(b.pos.x >= 0.0 && b.pos.x <= 300.0 - b.size);
            assert!(b.pos.y >= s.playfield().top_inset && b.pos.y <= 400.0 - b.size);
        }
        let moved = s
            .drain_commands()
            .iter()
            .filter(|c| matches!(c, Command::BubbleMoved { .. }))
            .count();
        assert_eq!(moved, s.bubbles().len());
    }

    #[test]
    fn test_determinism() {
        let mut a = session(99, Catalog::builtin());
        let mut b = session(99, Catalog::builtin());
        a.start(Mode::Primary, 1);
        b.start(Mode::Primary, 1);
        for _ in 0..50 {
            crate::sim::tick(&mut a);
            crate::sim::tick(&mut b);
        }
        assert_eq!(a.drain_commands(), b.drain_commands());
    }

    #[test]
    fn test_hand_built_settings_are_clamped() {
        let settings = Settings {
            min_round_words: 12,
            max_round_words: 4,
            ..Settings::default()
        };
        let mut s = Session::new(5, catalog(&[(1, 20)]), settings, 1024.0, 768.0);
        assert_eq!(s.settings().max_round_words, 12);
        s.start(Mode::Primary, 1);
        assert_eq!(s.remaining().len(), 12);

        let settings = Settings {
            min_round_words: 0,
            max_round_words: 0,
            ..Settings::default()
        };
        let mut s = Session::new(5, catalog(&[(1, 3)]), settings, 1024.0, 768.0);
        s.start(Mode::Primary, 1);
        assert_eq!(s.phase(), RoundPhase::AwaitingGuess);
        assert_eq!(s.remaining().len(), 1);
    }

    #[test]
    fn test_remaining_keyed_by_primary_text() {
        let mut s = session(21, catalog(&[(1, 4)]));
        s.start(Mode::Primary, 1);
        for (key, word) in s.remaining() {
            assert_eq!(key, &word.primary);
        }
        let target = s.target().unwrap().primary.clone();
        click_target(&mut s);
        assert!(!s.remaining().contains_key(&target));
        assert_eq!(s.remaining().len(), 3);
    }

    proptest! {
        #[test]
        fn round_size_within_range(seed in any::<u64>(), available in 0usize..40) {
            let mut s = session(seed, catalog(&[(1, available), (2, 3)]));
            s.start(Mode::Primary, 1);
            let picked = s.remaining().len();
            if available < 10 {
                prop_assert_eq!(picked, available);
            } else {
                prop_assert!((10..=15).contains(&picked) && picked <= available);
            }
            prop_assert!(s.remaining().values().all(|w| w.level == 1));
        }

        #[test]
        fn invariants_hold_through_play(seed in any::<u64>(), clicks in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut s = session(seed, Catalog::builtin());
            s.start(Mode::Primary, 1);
            for hit in clicks {
                crate::sim::tick(&mut s);
                if hit {
                    click_target(&mut s);
                } else if let Some(target) = s.target().cloned() {
                    let wrong = s.bubbles().values().find(|b| !b.word.same_word(&target)).map(|b| b.id);
                    let before = s.remaining().len();
                    if let Some(id) = wrong {
                        prop_assert_eq!(s.on_bubble_clicked(id), Some(ClickOutcome::Incorrect));
                    }
                    prop_assert_eq!(s.remaining().len(), before);
                    prop_assert_eq!(s.target(), Some(&target));
                }
                assert_invariants(&s);
            }
        }
    }
}
