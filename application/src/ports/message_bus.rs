//! Message bus ports
//!
//! [`MessageSource`] is the inbound side (subscribe / poll / unsubscribe),
//! [`MessageSink`] the outbound side (connect / send-and-confirm / close).
//! Both speak raw bytes; event encoding stays in the use cases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by bus adapters
#[derive(Error, Debug)]
pub enum BusError {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Receive failed: {0}")]
    Receive(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// A raw message taken off the inbound topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub timestamp: Option<DateTime<Utc>>,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            partition: 0,
            offset: 0,
            timestamp: None,
            payload: payload.into(),
        }
    }

    pub fn with_position(mut self, partition: i32, offset: i64) -> Self {
        self.partition = partition;
        self.offset = offset;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Where the broker stored a sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub partition: i32,
    pub offset: i64,
}

/// Inbound side of the bus.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Join `group_id` and subscribe to `topic`.
    async fn subscribe(&self, topic: &str, group_id: &str) -> Result<(), BusError>;

    /// Wait for the next message.
    ///
    /// `Ok(None)` means the source is exhausted and will never yield again.
    async fn poll(&self) -> Result<Option<InboundMessage>, BusError>;

    /// Leave the group and release the subscription.
    async fn unsubscribe(&self) -> Result<(), BusError>;
}

/// Outbound side of the bus.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn connect(&self) -> Result<(), BusError>;

    /// Send one message and wait for the broker acknowledgement.
    async fn send(
        &self,
        topic: &str,
        key: &[u8],
        payload: &[u8],
    ) -> Result<DeliveryReceipt, BusError>;

    /// Flush pending messages and release the connection.
    async fn close(&self) -> Result<(), BusError>;
}
