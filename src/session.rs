//! Picker session: wires the state machine to a live page.
//!
//! The session drains overlay events, translates them into machine
//! commands, and interprets the resulting effects against the page, the
//! clipboard, and the event bus. All mutation happens inside one task, so
//! the shared interaction state needs no locking.

use crate::browser::{OverlayEvent, PagePort};
use crate::clipboard::Clipboard;
use crate::events::{EventBus, PickerEvent};
use crate::extract::{extract, ContentKind, Extraction};
use crate::i18n::{Locale, MessageKey};
use crate::picker::{Command, Cursor, Effect, ElementId, Picker};
use crate::relay::ToggleSignal;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often the session drains overlay events.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One page-scoped picker session.
pub struct PickerSession {
    machine: Picker,
    page: Box<dyn PagePort>,
    clipboard: Box<dyn Clipboard>,
    locale: Locale,
    bus: EventBus,
}

impl PickerSession {
    pub fn new(
        page: Box<dyn PagePort>,
        clipboard: Box<dyn Clipboard>,
        locale: Locale,
        bus: EventBus,
    ) -> Self {
        Self {
            machine: Picker::new(),
            page,
            clipboard,
            locale,
            bus,
        }
    }

    /// Observable machine state, for callers and tests.
    pub fn picker(&self) -> &Picker {
        &self.machine
    }

    /// Drive the session until the toggle channel closes or the page goes
    /// away.
    pub async fn run(mut self, mut toggles: mpsc::UnboundedReceiver<ToggleSignal>) -> Result<()> {
        let mut poll = tokio::time::interval(POLL_INTERVAL);
        loop {
            tokio::select! {
                signal = toggles.recv() => match signal {
                    Some(ToggleSignal) => self.dispatch(Command::Toggle).await?,
                    None => break,
                },
                _ = poll.tick() => {
                    if let Err(e) = self.pump().await {
                        tracing::info!(error = %e, "page went away, closing session");
                        break;
                    }
                }
            }
        }
        self.bus.publish(PickerEvent::SessionClosed);
        self.page.close().await
    }

    /// Drain queued overlay events and feed them through the machine.
    pub async fn pump(&mut self) -> Result<()> {
        let events = self.page.poll_events().await?;
        for event in events {
            self.dispatch(command_from_overlay(event)).await?;
        }
        Ok(())
    }

    /// Feed one command through the machine and interpret its effects.
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        for effect in self.machine.handle(command) {
            self.apply(effect).await?;
        }
        Ok(())
    }

    async fn apply(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::SetCursor(cursor) => {
                self.page.set_cursor(cursor).await?;
                self.bus.publish(match cursor {
                    Cursor::Crosshair => PickerEvent::Armed,
                    Cursor::Default => PickerEvent::Disarmed,
                });
            }
            Effect::AddHoverClass(id) => self.page.set_hover(id, true).await?,
            Effect::RemoveHoverClass(id) => self.page.set_hover(id, false).await?,
            Effect::OpenPopup(popup) => {
                self.bus.publish(PickerEvent::PopupOpened {
                    x: popup.x,
                    y: popup.y,
                });
                self.page.show_popup(&popup, self.locale).await?;
            }
            Effect::ClosePopup => {
                self.page.close_popup().await?;
                self.bus.publish(PickerEvent::PopupDismissed);
            }
            Effect::Extract { target, kind } => self.commit(target, kind).await?,
        }
        Ok(())
    }

    /// Run the extraction policy for one commit and acknowledge the user.
    ///
    /// Extraction outcomes never escape as errors; only page and clipboard
    /// failures propagate.
    async fn commit(&mut self, target: ElementId, kind: Option<ContentKind>) -> Result<()> {
        let custom = kind.as_ref().and_then(|k| match k {
            ContentKind::Custom(name) => Some(name.as_str()),
            _ => None,
        });
        let capture = match self.page.capture_element(target, custom).await {
            Ok(capture) => capture,
            Err(e) => {
                tracing::warn!(error = %e, element = target, "element capture failed");
                None
            }
        };
        let outcome = match (&kind, &capture) {
            (None, _) => Extraction::NoKindChosen,
            // Selected element vanished between click and commit.
            (Some(_), None) => Extraction::MissingProperty,
            (Some(kind), Some(capture)) => extract(Some(kind), capture),
        };
        let kind_label = kind
            .as_ref()
            .map(|k| k.label().to_string())
            .unwrap_or_else(|| "none".to_string());
        match outcome {
            Extraction::Content(content) => {
                self.clipboard.copy(&content)?;
                tracing::debug!(kind = %kind_label, content = %content, "copied");
                self.bus.publish(PickerEvent::Copied {
                    kind: kind_label,
                    chars: content.chars().count(),
                });
                self.page
                    .alert(self.locale.message(MessageKey::Copied))
                    .await?;
            }
            Extraction::MissingProperty => {
                tracing::debug!(kind = %kind_label, element = target, "no such property on element");
                self.bus
                    .publish(PickerEvent::MissingProperty { kind: kind_label });
                self.page
                    .alert(self.locale.message(MessageKey::NoProperty))
                    .await?;
            }
            Extraction::NoKindChosen => {
                self.bus.publish(PickerEvent::NoKindChosen);
                self.page
                    .alert(self.locale.message(MessageKey::NeedSelectProperty))
                    .await?;
            }
        }
        Ok(())
    }
}

/// Translate a raw overlay event into the machine's vocabulary.
pub fn command_from_overlay(event: OverlayEvent) -> Command {
    match event {
        OverlayEvent::Hover { element, enter } => {
            if enter {
                Command::HoverEnter(element)
            } else {
                Command::HoverLeave(element)
            }
        }
        OverlayEvent::Click {
            element,
            x,
            y,
            inside_popup,
        } => Command::Click {
            target: element,
            x,
            y,
            inside_popup,
        },
        OverlayEvent::Commit { choice, custom } => Command::Commit {
            kind: ContentKind::from_popup_choice(&choice, &custom),
        },
    }
}
