//! DOM presenter
//!
//! Each bubble is a `div.bubble` inside `#playfield`, positioned with a CSS
//! transform and tagged with `data-id` so clicks can be routed back. Screens
//! are `#start-screen`, `#game-screen` and `#clear-screen`; the visible one
//! carries the `active` class.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::audio::AudioManager;
use crate::catalog::Mode;
use crate::settings::Settings;
use crate::sim::{BubbleId, Command, Presenter, Screen};

use super::speech::Speaker;

const SCREENS: [(Screen, &str); 3] = [
    (Screen::Start, "start-screen"),
    (Screen::Game, "game-screen"),
    (Screen::Clear, "clear-screen"),
];

/// Confetti pieces per celebration
const CONFETTI_COUNT: usize = 80;

pub struct DomPresenter {
    document: Document,
    playfield: HtmlElement,
    views: HashMap<BubbleId, HtmlElement>,
    audio: AudioManager,
    speaker: Speaker,
}

impl DomPresenter {
    /// Returns `None` if the page has no `#playfield`
    pub fn new(document: Document, settings: &Settings) -> Option<Self> {
        let playfield = document
            .get_element_by_id("playfield")?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self {
            document,
            playfield,
            views: HashMap::new(),
            audio: AudioManager::new(settings.effective_volume()),
            speaker: Speaker::new(settings.speech_rate),
        })
    }

    /// Current playfield size in CSS pixels
    ///
    /// The playfield is hidden (zero-sized) outside the game screen, so fall
    /// back to the viewport it fills.
    pub fn playfield_size(&self) -> (f32, f32) {
        let (w, h) = (self.playfield.client_width(), self.playfield.client_height());
        if w > 0 && h > 0 {
            return (w as f32, h as f32);
        }
        self.document
            .document_element()
            .map(|root| (root.client_width() as f32, root.client_height() as f32))
            .unwrap_or((0.0, 0.0))
    }

    /// Audio must be resumed from inside a user gesture
    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    /// Fill `#level-buttons` with one button per level
    pub fn build_level_buttons(&self, levels: &[u8]) {
        let Some(container) = self.document.get_element_by_id("level-buttons") else {
            log::warn!("No #level-buttons element");
            return;
        };
        container.set_inner_html("");
        for level in levels {
            let Ok(btn) = self.document.create_element("button") else {
                continue;
            };
            let _ = btn.set_attribute("class", "level-btn");
            let _ = btn.set_attribute("data-level", &level.to_string());
            btn.set_text_content(Some(&format!("Level {}", level)));
            let _ = container.append_child(&btn);
        }
    }

    /// Highlight the selected language button
    pub fn mark_mode(&self, mode: Mode) {
        self.mark_selected("data-mode", mode.as_str());
    }

    /// Highlight the preselected (or last played) level button
    pub fn mark_level(&self, level: u8) {
        self.mark_selected("data-level", &level.to_string());
    }

    /// Mark the `[attr]` element whose value matches as `selected`
    fn mark_selected(&self, attr: &str, value: &str) {
        let Ok(buttons) = self.document.query_selector_all(&format!("[{}]", attr)) else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let selected = btn.get_attribute(attr).as_deref() == Some(value);
            let _ = btn.class_list().toggle_with_force("selected", selected);
        }
    }

    fn create_bubble(&mut self, id: BubbleId, label: &str, pos: Vec2, size: f32) {
        let Some(el) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = el.set_attribute("class", "bubble");
        let _ = el.set_attribute("data-id", &id.to_string());
        el.set_text_content(Some(label));

        let style = el.style();
        let _ = style.set_property("width", &format!("{:.1}px", size));
        let _ = style.set_property("height", &format!("{:.1}px", size));
        let _ = style.set_property("font-size", &format!("{:.1}px", size * 0.2));
        set_position(&el, pos);

        let _ = self.playfield.append_child(&el);
        self.views.insert(id, el);
    }

    fn show_screen(&self, screen: Screen) {
        for (s, id) in SCREENS {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("active", s == screen);
            }
        }
    }

    fn set_remaining(&self, n: usize) {
        if let Some(el) = self.document.get_element_by_id("remaining") {
            el.set_text_content(Some(&n.to_string()));
        }
    }

    /// Restart a CSS animation class on a view
    fn flash_class(el: &HtmlElement, class: &str) {
        let _ = el.class_list().remove_1(class);
        // Reading layout forces a reflow so the animation replays
        let _ = el.offset_width();
        let _ = el.class_list().add_1(class);
    }

    fn celebrate(&self) {
        let Some(container) = self.document.get_element_by_id("confetti") else {
            return;
        };
        container.set_inner_html("");
        for _ in 0..CONFETTI_COUNT {
            let Some(piece) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let _ = piece.set_attribute("class", "confetti");
            let style = piece.style();
            let _ = style.set_property("left", &format!("{:.1}%", js_sys::Math::random() * 100.0));
            let _ = style.set_property(
                "background",
                &format!("hsl({:.0}, 90%, 60%)", js_sys::Math::random() * 360.0),
            );
            let _ = style.set_property(
                "animation-delay",
                &format!("{:.2}s", js_sys::Math::random() * 1.5),
            );
            let _ = container.append_child(&piece);
        }
    }
}

fn set_position(el: &HtmlElement, pos: Vec2) {
    let _ = el
        .style()
        .set_property("transform", &format!("translate({:.1}px, {:.1}px)", pos.x, pos.y));
}

impl Presenter for DomPresenter {
    fn present(&mut self, command: &Command) {
        match command {
            Command::BubbleCreated {
                id,
                label,
                pos,
                size,
            } => self.create_bubble(*id, label, *pos, *size),
            Command::BubbleMoved { id, pos } => {
                if let Some(el) = self.views.get(id) {
                    set_position(el, *pos);
                }
            }
            Command::BubblePopped { id } => {
                if let Some(el) = self.views.get(id) {
                    let _ = el.class_list().add_1("pop");
                }
            }
            Command::BubbleRejected { id } => {
                if let Some(el) = self.views.get(id) {
                    Self::flash_class(el, "shake");
                }
            }
            Command::BubbleRemoved { id } => {
                if let Some(el) = self.views.remove(id) {
                    el.remove();
                }
            }
            Command::PlayTone(tone) => self.audio.play(*tone),
            Command::Speak { text, lang } => self.speaker.speak(text, lang),
            Command::ShowScreen(screen) => {
                if *screen == Screen::Start {
                    self.speaker.cancel();
                }
                self.show_screen(*screen);
            }
            Command::UpdateRemainingCount(n) => self.set_remaining(*n),
            Command::Celebrate => self.celebrate(),
        }
    }
}
