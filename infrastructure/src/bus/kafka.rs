//! Kafka connector over `rdkafka`.
//!
//! [`KafkaMessageSource`] wraps a `StreamConsumer` with offset auto-commit,
//! giving at-least-once delivery. [`KafkaMessageSink`] wraps a
//! `FutureProducer` and waits for the broker acknowledgement of each send.

use crate::config::FileKafkaConfig;
use answerer_application::ports::message_bus::{
    BusError, DeliveryReceipt, InboundMessage, MessageSink, MessageSource,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rdkafka::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

fn consumer_config(config: &FileKafkaConfig, group_id: &str) -> ClientConfig {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", &config.bootstrap_servers)
        .set("group.id", group_id)
        .set("enable.auto.commit", "true")
        .set(
            "auto.commit.interval.ms",
            config.auto_commit_interval_ms.to_string(),
        )
        .set("auto.offset.reset", &config.auto_offset_reset);
    client
}

fn producer_config(config: &FileKafkaConfig) -> ClientConfig {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", &config.bootstrap_servers)
        .set("message.timeout.ms", config.request_timeout_ms.to_string())
        .set("retry.backoff.ms", config.retry_backoff_ms.to_string());
    client
}

/// Copy an rdkafka message into the bus-neutral representation.
fn to_inbound<M: Message>(message: &M) -> InboundMessage {
    let mut inbound = InboundMessage::new(message.topic(), message.payload().unwrap_or_default())
        .with_position(message.partition(), message.offset());
    if let Some(timestamp) = message
        .timestamp()
        .to_millis()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    {
        inbound = inbound.with_timestamp(timestamp);
    }
    inbound
}

// ==================== Source ====================

pub struct KafkaMessageSource {
    config: FileKafkaConfig,
    consumer: RwLock<Option<StreamConsumer>>,
}

impl KafkaMessageSource {
    pub fn new(config: FileKafkaConfig) -> Self {
        Self {
            config,
            consumer: RwLock::new(None),
        }
    }
}

#[async_trait]
impl MessageSource for KafkaMessageSource {
    async fn subscribe(&self, topic: &str, group_id: &str) -> Result<(), BusError> {
        let consumer: StreamConsumer = consumer_config(&self.config, group_id)
            .create()
            .map_err(|e| BusError::Connection(format!("creating kafka consumer: {}", e)))?;
        consumer
            .subscribe(&[topic])
            .map_err(|e| BusError::Connection(format!("subscribing to {}: {}", topic, e)))?;

        info!(
            topic,
            group_id,
            bootstrap_servers = %self.config.bootstrap_servers,
            "Kafka consumer subscribed"
        );
        *self.consumer.write().await = Some(consumer);
        Ok(())
    }

    async fn poll(&self) -> Result<Option<InboundMessage>, BusError> {
        let guard = self.consumer.read().await;
        let consumer = guard.as_ref().ok_or(BusError::NotConnected)?;

        match consumer.recv().await {
            Ok(message) => {
                let inbound = to_inbound(&message);
                debug!(
                    topic = %inbound.topic,
                    partition = inbound.partition,
                    offset = inbound.offset,
                    "Kafka message received"
                );
                Ok(Some(inbound))
            }
            Err(e) => Err(BusError::Receive(e.to_string())),
        }
    }

    async fn unsubscribe(&self) -> Result<(), BusError> {
        if let Some(consumer) = self.consumer.write().await.take() {
            consumer.unsubscribe();
            info!("Kafka consumer closed");
        }
        Ok(())
    }
}

// ==================== Sink ====================

pub struct KafkaMessageSink {
    config: FileKafkaConfig,
    producer: RwLock<Option<FutureProducer>>,
}

impl KafkaMessageSink {
    pub fn new(config: FileKafkaConfig) -> Self {
        Self {
            config,
            producer: RwLock::new(None),
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }
}

#[async_trait]
impl MessageSink for KafkaMessageSink {
    async fn connect(&self) -> Result<(), BusError> {
        let producer: FutureProducer = producer_config(&self.config)
            .create()
            .map_err(|e| BusError::Connection(format!("creating kafka producer: {}", e)))?;
        *self.producer.write().await = Some(producer);
        info!(bootstrap_servers = %self.config.bootstrap_servers, "Kafka producer connected");
        Ok(())
    }

    async fn send(
        &self,
        topic: &str,
        key: &[u8],
        payload: &[u8],
    ) -> Result<DeliveryReceipt, BusError> {
        // FutureProducer is a cheap handle; clone it out of the lock before awaiting.
        let producer = self
            .producer
            .read()
            .await
            .clone()
            .ok_or(BusError::NotConnected)?;

        let record = FutureRecord::to(topic).key(key).payload(payload);
        match producer
            .send(record, Timeout::After(self.request_timeout()))
            .await
        {
            Ok((partition, offset)) => Ok(DeliveryReceipt { partition, offset }),
            Err((e, _message)) => Err(BusError::Delivery(e.to_string())),
        }
    }

    async fn close(&self) -> Result<(), BusError> {
        let Some(producer) = self.producer.write().await.take() else {
            return Ok(());
        };

        let timeout = self.request_timeout();
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| BusError::Delivery(format!("flush task failed: {}", e)))?
            .map_err(|e| {
                warn!(error = %e, "Kafka producer flush incomplete");
                BusError::Delivery(e.to_string())
            })
    }
}
