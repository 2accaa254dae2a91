// Copyright 2026 Magpie Contributors
// SPDX-License-Identifier: Apache-2.0

//! Magpie event bus: typed events from the picker session.
//!
//! A `tokio::sync::broadcast` channel carrying [`PickerEvent`] values. The
//! CLI subscribes for progress output; when no subscribers exist, events
//! are silently dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Every event the picker session emits. Serialized to JSON for machine
/// consumers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PickerEvent {
    /// The picker was armed; pointer events are now intercepted.
    Armed,
    /// The picker returned to idle.
    Disarmed,
    /// The options popup opened at the given page coordinates.
    PopupOpened { x: f64, y: f64 },
    /// The options popup was disposed without a commit.
    PopupDismissed,
    /// Content was extracted and copied.
    Copied { kind: String, chars: usize },
    /// The selected element lacked the requested property.
    MissingProperty { kind: String },
    /// Commit with no kind chosen.
    NoKindChosen,
    /// The session closed.
    SessionClosed,
}

/// Broadcast bus for [`PickerEvent`] values.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PickerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Publish an event. Dropped silently when nobody is listening.
    pub fn publish(&self, event: PickerEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PickerEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(PickerEvent::Armed);
        let ev = rx.recv().await.unwrap();
        assert!(matches!(ev, PickerEvent::Armed));
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(PickerEvent::Disarmed);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_value(PickerEvent::Copied {
            kind: "text".into(),
            chars: 5,
        })
        .unwrap();
        assert_eq!(json["type"], "Copied");
        assert_eq!(json["chars"], 5);
    }
}
