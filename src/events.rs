//! Live-refresh notifications for browser clients.
//!
//! The bus is created with the application state and closed during shutdown; closing
//! ends every open Server-Sent-Events stream so graceful shutdown is not held up by
//! idle subscribers. Notifications are advisory only.

use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::design::Design;

const CHANNEL_CAPACITY: usize = 64;
pub const DESIGN_UPDATED: &str = "designUpdated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DesignAction {
    Created,
    Updated,
    Deleted,
    /// Quantity changed by an order or a cancellation.
    Stock,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DesignUpdated {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub action: DesignAction,
    pub design_id: Uuid,
    pub design: Option<Design>,
}

#[derive(Debug, Clone)]
enum BusMessage {
    Design(DesignUpdated),
    Closing,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BusMessage>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish_design(&self, action: DesignAction, design_id: Uuid, design: Option<Design>) {
        let event = DesignUpdated {
            kind: DESIGN_UPDATED,
            action,
            design_id,
            design,
        };
        // No subscribers is the normal idle case.
        if self.sender.send(BusMessage::Design(event)).is_err() {
            tracing::trace!(%design_id, "design event dropped, no subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Ends every subscriber stream.
    pub fn close(&self) {
        let _ = self.sender.send(BusMessage::Closing);
    }

    pub fn subscribe(&self) -> impl Stream<Item = DesignUpdated> + Send + use<> {
        BroadcastStream::new(self.sender.subscribe())
            .take_while(|msg| !matches!(msg, Ok(BusMessage::Closing)))
            .filter_map(|msg| match msg {
                Ok(BusMessage::Design(event)) => Some(event),
                Ok(BusMessage::Closing) => None,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "sse subscriber lagged");
                    None
                }
            })
    }

    pub fn sse(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + use<>> {
        let stream = self.subscribe().map(|event| {
            let sse_event = Event::default()
                .event(DESIGN_UPDATED)
                .json_data(&event)
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "failed to encode design event");
                    Event::default().comment("encode error")
                });
            Ok(sse_event)
        });
        Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut stream = Box::pin(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 1);

        let id = Uuid::new_v4();
        bus.publish_design(DesignAction::Deleted, id, None);

        let event = stream.next().await.expect("event");
        assert_eq!(event.design_id, id);
        assert_eq!(event.action, DesignAction::Deleted);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "designUpdated");
        assert_eq!(json["action"], "deleted");
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish_design(DesignAction::Created, Uuid::new_v4(), None);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn streams_outlive_the_bus_handle() {
        let bus = EventBus::new();
        let _sse = {
            let handle = bus.clone();
            handle.sse()
        };
        let mut stream = {
            let handle = bus.clone();
            Box::pin(handle.subscribe())
        };
        let id = Uuid::new_v4();
        bus.publish_design(DesignAction::Updated, id, None);
        assert_eq!(stream.next().await.map(|e| e.design_id), Some(id));
    }

    #[tokio::test]
    async fn close_ends_streams() {
        let bus = EventBus::new();
        let mut stream = Box::pin(bus.subscribe());
        bus.publish_design(DesignAction::Stock, Uuid::new_v4(), None);
        bus.close();

        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }
}
