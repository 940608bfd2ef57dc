//! Consume Questions use case.
//!
//! [`EventConsumer`] owns the long-running consumption loop: it polls the
//! inbound [`MessageSource`], decodes each payload into a [`QuestionEvent`]
//! and hands it to a [`QuestionHandler`] one at a time.
//!
//! The loop runs under a supervisor task. A bus failure ends the current
//! loop; the supervisor logs it, waits `restart_backoff` and starts a new
//! loop, up to `max_restarts` times when a cap is configured. Cancellation
//! is observed between messages, so a question already being answered runs
//! to completion before the consumer stops.

use crate::config::ConsumerParams;
use crate::ports::message_bus::{BusError, InboundMessage, MessageSource};
use crate::use_cases::process_question::{AnswerProcessor, ProcessQuestionError};
use answerer_domain::{AnswerStatus, ConsumerState, ConsumerStats, QuestionEvent};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors from starting or stopping the consumer.
#[derive(Error, Debug)]
pub enum ConsumerError {
    #[error("Consumer is already running")]
    AlreadyRunning,

    #[error("Failed to subscribe: {0}")]
    Subscribe(#[source] BusError),

    #[error("Failed to unsubscribe: {0}")]
    Unsubscribe(#[source] BusError),
}

/// Receives every successfully decoded question event.
///
/// Returns the status of the answer that was published for it.
#[async_trait]
pub trait QuestionHandler: Send + Sync {
    async fn handle(&self, event: QuestionEvent) -> Result<AnswerStatus, ProcessQuestionError>;
}

#[async_trait]
impl QuestionHandler for AnswerProcessor {
    async fn handle(&self, event: QuestionEvent) -> Result<AnswerStatus, ProcessQuestionError> {
        self.process_question(&event).await.map(|answer| answer.status)
    }
}

struct LoopControl {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Everything the spawned loop needs, detached from the consumer handle.
#[derive(Clone)]
struct Worker {
    source: Arc<dyn MessageSource>,
    handler: Arc<dyn QuestionHandler>,
    params: ConsumerParams,
    stats: Arc<watch::Sender<ConsumerStats>>,
}

pub struct EventConsumer {
    worker: Worker,
    control: Mutex<Option<LoopControl>>,
}

impl EventConsumer {
    pub fn new(
        source: Arc<dyn MessageSource>,
        handler: Arc<dyn QuestionHandler>,
        params: ConsumerParams,
    ) -> Self {
        let stats = ConsumerStats::new(&params.topic, &params.consumer_group);
        Self {
            worker: Worker {
                source,
                handler,
                params,
                stats: Arc::new(watch::Sender::new(stats)),
            },
            control: Mutex::new(None),
        }
    }

    /// Subscribe and spawn the supervised consumption loop.
    pub async fn start(&self) -> Result<(), ConsumerError> {
        let mut control = self.control.lock().await;
        if let Some(existing) = control.as_ref() {
            if !existing.task.is_finished() {
                return Err(ConsumerError::AlreadyRunning);
            }
        }

        let params = &self.worker.params;
        if let Err(e) = self
            .worker
            .source
            .subscribe(&params.topic, &params.consumer_group)
            .await
        {
            error!(topic = %params.topic, error = %e, "Failed to start event consumer");
            return Err(ConsumerError::Subscribe(e));
        }

        self.worker
            .stats
            .send_modify(|stats| stats.set_state(ConsumerState::Running));

        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.worker.clone().supervise(cancel.clone()));
        *control = Some(LoopControl { cancel, task });

        info!(
            topic = %params.topic,
            group_id = %params.consumer_group,
            "Event consumer started"
        );
        Ok(())
    }

    /// Stop the loop, wait for the in-flight message and leave the group.
    ///
    /// Stopping a consumer that was never started is a no-op.
    pub async fn stop(&self) -> Result<(), ConsumerError> {
        let Some(control) = self.control.lock().await.take() else {
            return Ok(());
        };

        control.cancel.cancel();
        if let Err(e) = control.task.await {
            error!(error = %e, "Consumer task ended abnormally");
        }

        let result = self
            .worker
            .source
            .unsubscribe()
            .await
            .map_err(ConsumerError::Unsubscribe);
        self.worker
            .stats
            .send_modify(|stats| stats.set_state(ConsumerState::Stopped));

        match &result {
            Ok(()) => info!("Event consumer stopped"),
            Err(e) => error!(error = %e, "Error stopping event consumer"),
        }
        result
    }

    pub fn is_running(&self) -> bool {
        self.worker.stats.borrow().running
    }

    /// Snapshot of the consumer counters.
    pub fn stats(&self) -> ConsumerStats {
        self.worker.stats.borrow().clone()
    }

    pub fn subscribe_stats(&self) -> watch::Receiver<ConsumerStats> {
        self.worker.stats.subscribe()
    }
}

impl Worker {
    async fn supervise(self, cancel: CancellationToken) {
        let mut restarts: u32 = 0;

        loop {
            let Err(e) = self.run(&cancel).await else {
                break;
            };
            error!(error = %e, restarts, "Error in consumer loop");

            if cancel.is_cancelled() {
                break;
            }
            if let Some(max) = self.params.max_restarts {
                if restarts >= max {
                    error!(max_restarts = max, "Consumer restart limit reached, giving up");
                    break;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.params.restart_backoff) => {}
            }

            restarts += 1;
            self.stats.send_modify(|stats| stats.restarts += 1);
            warn!(restarts, "Restarting consumer loop");
        }

        self.stats
            .send_modify(|stats| stats.set_state(ConsumerState::Stopped));
        debug!("Consumer supervisor exited");
    }

    /// Poll until cancelled, exhausted or the bus fails.
    async fn run(&self, cancel: &CancellationToken) -> Result<(), BusError> {
        loop {
            let polled = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                polled = self.source.poll() => polled?,
            };

            let Some(message) = polled else {
                info!(topic = %self.params.topic, "Message source exhausted");
                return Ok(());
            };

            self.dispatch(message).await;
        }
    }

    async fn dispatch(&self, message: InboundMessage) {
        let event = match QuestionEvent::from_slice(&message.payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    topic = %message.topic,
                    partition = message.partition,
                    offset = message.offset,
                    error = %e,
                    "Skipping malformed question event"
                );
                self.stats.send_modify(|stats| stats.record_failed());
                return;
            }
        };

        debug!(
            partition = message.partition,
            offset = message.offset,
            execution_id = %event.execution_id,
            question_id = %event.question_id,
            "Received question event"
        );

        let received_at = message.timestamp.unwrap_or_else(Utc::now);
        let question_id = event.question_id.clone();
        match self.handler.handle(event).await {
            Ok(AnswerStatus::Completed) => self
                .stats
                .send_modify(|stats| stats.record_processed(received_at)),
            Ok(AnswerStatus::Failed) => {
                debug!(question_id = %question_id, "Question answered with a failure marker");
                self.stats.send_modify(|stats| stats.record_failed());
            }
            Err(e) => {
                error!(question_id = %question_id, error = %e, "Error processing message");
                self.stats.send_modify(|stats| stats.record_failed());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::answer_publisher::{AnswerPublisher, PublishError};
    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use crate::ports::objective_repository::{ObjectiveRepository, RepositoryError};
    use answerer_domain::{AnswerEvent, ModelConfig, ObjectiveDocument};
    use chrono::{DateTime, TimeZone};
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    // -- Mock MessageSource ----------------------------------------------------

    struct ChannelSource {
        rx: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
        failures: AtomicU32,
        subscribes: AtomicU32,
        unsubscribes: AtomicU32,
        offset: AtomicU32,
    }

    impl ChannelSource {
        /// The first `failures` polls fail before messages are delivered.
        fn new(failures: u32) -> (Arc<Self>, mpsc::UnboundedSender<Vec<u8>>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let source = Arc::new(Self {
                rx: Mutex::new(rx),
                failures: AtomicU32::new(failures),
                subscribes: AtomicU32::new(0),
                unsubscribes: AtomicU32::new(0),
                offset: AtomicU32::new(0),
            });
            (source, tx)
        }
    }

    #[async_trait]
    impl MessageSource for ChannelSource {
        async fn subscribe(&self, _topic: &str, _group_id: &str) -> Result<(), BusError> {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn poll(&self) -> Result<Option<InboundMessage>, BusError> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(BusError::Receive("broker transport failure".to_string()));
            }

            let payload = self.rx.lock().await.recv().await;
            Ok(payload.map(|payload| {
                let offset = self.offset.fetch_add(1, Ordering::SeqCst);
                InboundMessage::new("question-events", payload)
                    .with_position(0, offset as i64)
                    .with_timestamp(broker_time())
            }))
        }

        async fn unsubscribe(&self) -> Result<(), BusError> {
            self.unsubscribes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    // -- Mock QuestionHandler --------------------------------------------------

    #[derive(Default)]
    struct RecordingHandler {
        handled: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl QuestionHandler for RecordingHandler {
        async fn handle(&self, event: QuestionEvent) -> Result<AnswerStatus, ProcessQuestionError> {
            match event.question_id.as_str() {
                "undeliverable" => return Err(PublishError::NotStarted.into()),
                "unanswerable" => return Ok(AnswerStatus::Failed),
                _ => {}
            }
            self.handled.lock().unwrap().push(event.question_id);
            Ok(AnswerStatus::Completed)
        }
    }

    // -- Ports for a real AnswerProcessor --------------------------------------

    struct EmptyRepository;

    #[async_trait]
    impl ObjectiveRepository for EmptyRepository {
        async fn get_objective(
            &self,
            _id: &str,
        ) -> Result<Option<ObjectiveDocument>, RepositoryError> {
            Ok(None)
        }
    }

    struct UnreachableGateway;

    #[async_trait]
    impl LlmGateway for UnreachableGateway {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &ModelConfig,
        ) -> Result<String, GatewayError> {
            Err(GatewayError::ConnectionError("no provider in this test".to_string()))
        }
    }

    #[derive(Default)]
    struct CollectingPublisher {
        published: StdMutex<Vec<AnswerEvent>>,
    }

    #[async_trait]
    impl AnswerPublisher for CollectingPublisher {
        async fn publish_answer(&self, event: &AnswerEvent) -> Result<(), PublishError> {
            self.published.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    // -- Helpers ---------------------------------------------------------------

    fn broker_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn question_payload(question_id: &str) -> Vec<u8> {
        question_payload_for("obj-1", question_id)
    }

    fn question_payload_for(objective_id: &str, question_id: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "manifest_id": "m-1",
            "execution_id": "exec-1",
            "objective_id": objective_id,
            "question_id": question_id,
            "persona": {"role": "analyst"},
            "language": "EN",
            "model": "gpt-4o-mini"
        }))
        .unwrap()
    }

    fn consumer(
        source: Arc<ChannelSource>,
        handler: Arc<RecordingHandler>,
        params: ConsumerParams,
    ) -> EventConsumer {
        EventConsumer::new(source, handler, params)
    }

    fn fast_params() -> ConsumerParams {
        ConsumerParams::default().with_restart_backoff(Duration::from_millis(20))
    }

    async fn wait_for_stats(consumer: &EventConsumer, done: impl FnMut(&ConsumerStats) -> bool) {
        let mut rx = consumer.subscribe_stats();
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(done))
            .await
            .expect("timed out waiting for consumer stats")
            .expect("stats channel closed");
    }

    // -- Tests -----------------------------------------------------------------

    #[tokio::test]
    async fn processes_events_and_skips_malformed_ones() {
        let (source, tx) = ChannelSource::new(0);
        let handler = Arc::new(RecordingHandler::default());
        let consumer = consumer(source.clone(), handler.clone(), fast_params());

        consumer.start().await.unwrap();
        assert!(consumer.is_running());

        tx.send(question_payload("q-1")).unwrap();
        tx.send(b"not json".to_vec()).unwrap();
        tx.send(question_payload("")).unwrap();
        tx.send(question_payload("q-2")).unwrap();

        wait_for_stats(&consumer, |s| s.messages_processed == 2 && s.messages_failed == 2).await;
        assert_eq!(*handler.handled.lock().unwrap(), vec!["q-1", "q-2"]);

        let stats = consumer.stats();
        assert_eq!(stats.last_processed_at, Some(broker_time()));
        assert_eq!(stats.topic, "question-events");
        assert_eq!(stats.consumer_group, "llm-service-group");

        consumer.stop().await.unwrap();
        assert_eq!(source.subscribes.load(Ordering::SeqCst), 1);
        assert_eq!(source.unsubscribes.load(Ordering::SeqCst), 1);
        assert_eq!(consumer.stats().state, ConsumerState::Stopped);
        assert!(!consumer.is_running());
    }

    #[tokio::test]
    async fn handler_error_counts_as_failed_and_loop_continues() {
        let (source, tx) = ChannelSource::new(0);
        let handler = Arc::new(RecordingHandler::default());
        let consumer = consumer(source, handler.clone(), fast_params());
        consumer.start().await.unwrap();

        tx.send(question_payload("undeliverable")).unwrap();
        tx.send(question_payload("q-1")).unwrap();

        wait_for_stats(&consumer, |s| s.messages_processed == 1 && s.messages_failed == 1).await;
        assert_eq!(*handler.handled.lock().unwrap(), vec!["q-1"]);
        consumer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn failed_answer_counts_as_failed() {
        let (source, tx) = ChannelSource::new(0);
        let handler = Arc::new(RecordingHandler::default());
        let consumer = consumer(source, handler.clone(), fast_params());
        consumer.start().await.unwrap();

        tx.send(question_payload("unanswerable")).unwrap();
        tx.send(question_payload("q-1")).unwrap();

        wait_for_stats(&consumer, |s| s.messages_processed == 1 && s.messages_failed == 1).await;
        assert_eq!(*handler.handled.lock().unwrap(), vec!["q-1"]);
        consumer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn missing_objective_is_failed_in_both_counters() {
        let (source, tx) = ChannelSource::new(0);
        let publisher = Arc::new(CollectingPublisher::default());
        let processor = Arc::new(AnswerProcessor::new(
            Arc::new(EmptyRepository),
            Arc::new(UnreachableGateway),
            publisher.clone(),
        ));
        let consumer = EventConsumer::new(source, processor.clone(), fast_params());
        consumer.start().await.unwrap();

        tx.send(question_payload_for("missing", "q-1")).unwrap();

        wait_for_stats(&consumer, |s| s.messages_failed == 1).await;
        let stats = consumer.stats();
        assert_eq!(stats.messages_processed, 0);
        assert!(stats.last_processed_at.is_none());

        let processing = processor.stats();
        assert_eq!(processing.questions_processed, 0);
        assert_eq!(processing.questions_failed, 1);

        let published = publisher.published.lock().unwrap().clone();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].status, AnswerStatus::Failed);
        assert_eq!(published[0].answer, "");
        consumer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn bus_failures_restart_the_loop() {
        let (source, tx) = ChannelSource::new(2);
        let handler = Arc::new(RecordingHandler::default());
        let consumer = consumer(source, handler.clone(), fast_params());
        consumer.start().await.unwrap();

        tx.send(question_payload("q-1")).unwrap();

        wait_for_stats(&consumer, |s| s.messages_processed == 1).await;
        let stats = consumer.stats();
        assert_eq!(stats.restarts, 2);
        assert_eq!(stats.state, ConsumerState::Running);
        consumer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn restart_cap_stops_the_consumer() {
        let (source, _tx) = ChannelSource::new(10);
        let handler = Arc::new(RecordingHandler::default());
        let params = ConsumerParams::default()
            .with_restart_backoff(Duration::from_millis(5))
            .with_max_restarts(Some(1));
        let consumer = consumer(source, handler, params);
        consumer.start().await.unwrap();

        wait_for_stats(&consumer, |s| s.state == ConsumerState::Stopped).await;
        assert_eq!(consumer.stats().restarts, 1);
        assert!(!consumer.is_running());
    }

    #[tokio::test]
    async fn exhausted_source_stops_the_consumer() {
        let (source, tx) = ChannelSource::new(0);
        let handler = Arc::new(RecordingHandler::default());
        let consumer = consumer(source, handler, fast_params());
        consumer.start().await.unwrap();

        tx.send(question_payload("q-1")).unwrap();
        drop(tx);

        wait_for_stats(&consumer, |s| s.state == ConsumerState::Stopped).await;
        assert_eq!(consumer.stats().messages_processed, 1);
    }

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let (source, _tx) = ChannelSource::new(0);
        let consumer = consumer(source.clone(), Arc::new(RecordingHandler::default()), fast_params());

        consumer.start().await.unwrap();
        assert!(matches!(
            consumer.start().await,
            Err(ConsumerError::AlreadyRunning)
        ));
        assert_eq!(source.subscribes.load(Ordering::SeqCst), 1);

        consumer.stop().await.unwrap();
        consumer.start().await.unwrap();
        assert!(consumer.is_running());
        consumer.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let (source, _tx) = ChannelSource::new(0);
        let consumer = consumer(source.clone(), Arc::new(RecordingHandler::default()), fast_params());

        consumer.stop().await.unwrap();
        assert_eq!(source.unsubscribes.load(Ordering::SeqCst), 0);
        assert_eq!(consumer.stats().state, ConsumerState::Idle);
    }
}
