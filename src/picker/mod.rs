//! Selection state machine: Idle, Armed, Popup-Open.
//!
//! Every pointer and UI event arrives as a typed [`Command`]; the machine
//! mutates its own flags and answers with [`Effect`]s for the session to
//! interpret against the live page. The machine never touches a DOM, which
//! keeps the whole interaction testable in-process.
//!
//! Invariants held here:
//! - at most one popup exists at any time;
//! - a popup never outlives deactivation;
//! - a completed commit always lands back in Idle with the default cursor.

pub mod popup;

use crate::extract::ContentKind;
pub use popup::Popup;

/// Opaque handle for a page element, assigned by the page binding.
pub type ElementId = u64;

/// Pointer cursor affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Crosshair,
    Default,
}

/// A UI event, translated into the machine's vocabulary.
#[derive(Debug, Clone)]
pub enum Command {
    /// Activation toggle from the relay.
    Toggle,
    /// Pointer entered an element.
    HoverEnter(ElementId),
    /// Pointer left an element.
    HoverLeave(ElementId),
    /// Pointer click at page coordinates.
    Click {
        target: ElementId,
        x: f64,
        y: f64,
        inside_popup: bool,
    },
    /// The popup's confirm control was pressed with the given choice.
    /// `None` means the user confirmed without choosing a kind.
    Commit { kind: Option<ContentKind> },
}

/// What the session must do to the page (or clipboard) after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetCursor(Cursor),
    AddHoverClass(ElementId),
    RemoveHoverClass(ElementId),
    OpenPopup(Popup),
    ClosePopup,
    /// Run the extraction policy against the selected element, then copy
    /// or alert. Emitted before `ClosePopup` so the acknowledgment shows
    /// while the popup is still on screen, as the original did.
    Extract {
        target: ElementId,
        kind: Option<ContentKind>,
    },
}

/// Observable state, derived from the machine's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Armed,
    PopupOpen,
}

/// The page-scoped picker machine.
#[derive(Debug, Default)]
pub struct Picker {
    active: bool,
    selected: Option<ElementId>,
    popup: Option<Popup>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether pointer events are currently intercepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn state(&self) -> State {
        match (self.active, self.popup.is_some()) {
            (false, _) => State::Idle,
            (true, false) => State::Armed,
            (true, true) => State::PopupOpen,
        }
    }

    /// Feed one command through the machine.
    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Toggle => self.on_toggle(),
            Command::HoverEnter(id) => self.on_hover(id, true),
            Command::HoverLeave(id) => self.on_hover(id, false),
            Command::Click {
                target,
                x,
                y,
                inside_popup,
            } => self.on_click(target, x, y, inside_popup),
            Command::Commit { kind } => self.on_commit(kind),
        }
    }

    fn on_toggle(&mut self) -> Vec<Effect> {
        self.active = !self.active;
        let mut effects = vec![Effect::SetCursor(if self.active {
            Cursor::Crosshair
        } else {
            Cursor::Default
        })];
        if !self.active {
            // Popup must never outlive deactivation.
            effects.extend(self.dispose_popup());
        }
        effects
    }

    fn on_hover(&mut self, id: ElementId, enter: bool) -> Vec<Effect> {
        // Cosmetic only, and only while armed.
        if !self.active {
            return Vec::new();
        }
        if enter {
            vec![Effect::AddHoverClass(id)]
        } else {
            vec![Effect::RemoveHoverClass(id)]
        }
    }

    fn on_click(&mut self, target: ElementId, x: f64, y: f64, inside_popup: bool) -> Vec<Effect> {
        if inside_popup {
            // Clicks on the popup surface belong to its own controls.
            return Vec::new();
        }
        if self.active {
            if self.popup.is_some() {
                // Dismiss, not select; no new popup from the same click.
                self.selected = None;
                return self.dispose_popup();
            }
            self.selected = Some(target);
            let popup = Popup::at(x, y);
            self.popup = Some(popup.clone());
            vec![Effect::OpenPopup(popup)]
        } else if self.popup.is_some() {
            // Stale popup left over from before deactivation.
            self.selected = None;
            self.dispose_popup()
        } else {
            Vec::new()
        }
    }

    fn on_commit(&mut self, kind: Option<ContentKind>) -> Vec<Effect> {
        if self.popup.is_none() {
            return Vec::new();
        }
        // One grab per arming: commit always fully deactivates.
        self.active = false;
        self.popup = None;
        let mut effects = Vec::new();
        if let Some(target) = self.selected.take() {
            effects.push(Effect::Extract { target, kind });
        }
        effects.push(Effect::ClosePopup);
        effects.push(Effect::SetCursor(Cursor::Default));
        effects
    }

    fn dispose_popup(&mut self) -> Vec<Effect> {
        if self.popup.take().is_some() {
            vec![Effect::ClosePopup]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(target: ElementId) -> Command {
        Command::Click {
            target,
            x: 10.0,
            y: 20.0,
            inside_popup: false,
        }
    }

    #[test]
    fn test_toggle_parity() {
        let mut p = Picker::new();
        assert!(!p.is_active());
        for i in 1..=5 {
            p.handle(Command::Toggle);
            assert_eq!(p.is_active(), i % 2 == 1);
        }
    }

    #[test]
    fn test_arm_sets_crosshair_disarm_restores() {
        let mut p = Picker::new();
        assert_eq!(
            p.handle(Command::Toggle),
            vec![Effect::SetCursor(Cursor::Crosshair)]
        );
        assert_eq!(
            p.handle(Command::Toggle),
            vec![Effect::SetCursor(Cursor::Default)]
        );
    }

    #[test]
    fn test_click_while_armed_opens_popup() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        let effects = p.handle(click(7));
        assert_eq!(effects, vec![Effect::OpenPopup(Popup::at(10.0, 20.0))]);
        assert_eq!(p.state(), State::PopupOpen);
        assert_eq!(p.selected(), Some(7));
    }

    #[test]
    fn test_click_outside_open_popup_dismisses_without_reopening() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        p.handle(click(7));
        let effects = p.handle(click(8));
        assert_eq!(effects, vec![Effect::ClosePopup]);
        assert_eq!(p.state(), State::Armed);
        assert_eq!(p.selected(), None);
    }

    #[test]
    fn test_click_inside_popup_is_ignored() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        p.handle(click(7));
        let effects = p.handle(Command::Click {
            target: 9,
            x: 11.0,
            y: 21.0,
            inside_popup: true,
        });
        assert!(effects.is_empty());
        assert_eq!(p.state(), State::PopupOpen);
        assert_eq!(p.selected(), Some(7));
    }

    #[test]
    fn test_deactivate_disposes_popup() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        p.handle(click(7));
        let effects = p.handle(Command::Toggle);
        assert_eq!(
            effects,
            vec![Effect::SetCursor(Cursor::Default), Effect::ClosePopup]
        );
        assert_eq!(p.state(), State::Idle);
        assert!(p.popup().is_none());
    }

    #[test]
    fn test_stale_popup_dismissed_while_idle() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        p.handle(click(7));
        // Deactivation normally disposes the popup; model the stale case
        // by re-opening through a fresh arm/click, then toggling twice so
        // the machine passes through Idle with the popup intact.
        p.handle(Command::Toggle); // Idle, popup disposed
        p.handle(Command::Toggle); // Armed
        p.handle(click(7)); // PopupOpen
        p.popup_leak_for_test();
        assert!(!p.is_active());
        assert!(p.popup().is_some());
        let effects = p.handle(click(8));
        assert_eq!(effects, vec![Effect::ClosePopup]);
        assert!(p.popup().is_none());
    }

    #[test]
    fn test_hover_only_while_armed() {
        let mut p = Picker::new();
        assert!(p.handle(Command::HoverEnter(3)).is_empty());
        p.handle(Command::Toggle);
        assert_eq!(
            p.handle(Command::HoverEnter(3)),
            vec![Effect::AddHoverClass(3)]
        );
        assert_eq!(
            p.handle(Command::HoverLeave(3)),
            vec![Effect::RemoveHoverClass(3)]
        );
    }

    #[test]
    fn test_commit_extracts_then_fully_deactivates() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        p.handle(click(7));
        let effects = p.handle(Command::Commit {
            kind: Some(crate::extract::ContentKind::Text),
        });
        assert_eq!(
            effects,
            vec![
                Effect::Extract {
                    target: 7,
                    kind: Some(crate::extract::ContentKind::Text)
                },
                Effect::ClosePopup,
                Effect::SetCursor(Cursor::Default),
            ]
        );
        assert_eq!(p.state(), State::Idle);
        assert_eq!(p.selected(), None);
        assert!(p.popup().is_none());
    }

    #[test]
    fn test_commit_without_popup_is_ignored() {
        let mut p = Picker::new();
        p.handle(Command::Toggle);
        let effects = p.handle(Command::Commit { kind: None });
        assert!(effects.is_empty());
        assert!(p.is_active());
    }

    #[test]
    fn test_at_most_one_popup_over_arbitrary_sequence() {
        let mut p = Picker::new();
        let sequence = [
            Command::Toggle,
            click(1),
            click(2),
            click(3),
            Command::Toggle,
            Command::Toggle,
            click(4),
            Command::Commit { kind: None },
            click(5),
        ];
        let mut opens = 0usize;
        let mut closes = 0usize;
        for cmd in sequence {
            for effect in p.handle(cmd) {
                match effect {
                    Effect::OpenPopup(_) => opens += 1,
                    Effect::ClosePopup => closes += 1,
                    _ => {}
                }
                // Never more than one popup open at once.
                assert!(opens <= closes + 1);
            }
        }
        assert!(p.popup().is_none() || opens == closes + 1);
    }

    impl Picker {
        /// Force the inactive-with-popup state that deactivation paths
        /// normally prevent, so the stale-popup click rule is coverable.
        fn popup_leak_for_test(&mut self) {
            self.active = false;
        }
    }
}
