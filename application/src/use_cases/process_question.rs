//! Process Question use case.
//!
//! Answers one [`QuestionEvent`] end to end:
//!
//! 1. Look up the objective in the [`ObjectiveRepository`]
//! 2. Resolve the prompt strategy for the objective type
//! 3. Render the prompt from question text, targets, persona and language
//! 4. Generate the answer through the [`LlmGateway`], bounded by a timeout
//! 5. Package a `completed` or `failed` [`AnswerEvent`]
//! 6. Publish it and record [`ProcessingStats`]
//!
//! Failures in steps 1–4 never escape: they become a `failed` answer so the
//! requester always gets a record back. Only a publish failure is returned
//! to the caller, since there is no other channel left to report it on.

use crate::config::ProcessingParams;
use crate::ports::answer_publisher::{AnswerPublisher, PublishError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::objective_repository::{ObjectiveRepository, RepositoryError};
use answerer_domain::{
    AnswerEvent, DomainError, Model, ProcessingStats, PromptRequest, PromptStrategyRegistry,
    QuestionEvent,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Why a question could not be answered.
///
/// These are expected outcomes, converted into a `failed` answer rather
/// than propagated.
#[derive(Error, Debug)]
pub enum AnswerFailure {
    #[error("Objective not found: {0}")]
    ObjectiveNotFound(String),

    #[error("Objective lookup failed: {0}")]
    Lookup(#[from] RepositoryError),

    #[error(transparent)]
    Dispatch(#[from] DomainError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GatewayError),

    #[error("Model returned an empty answer")]
    EmptyResponse,
}

impl AnswerFailure {
    /// Short machine-readable category for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerFailure::ObjectiveNotFound(_) => "lookup_miss",
            AnswerFailure::Lookup(_) => "lookup_error",
            AnswerFailure::Dispatch(DomainError::UnknownObjectiveType(_)) => "unknown_objective_type",
            AnswerFailure::Dispatch(DomainError::UnsupportedModel(_)) => "unsupported_model",
            AnswerFailure::Dispatch(_) => "dispatch",
            AnswerFailure::Generation(GatewayError::Timeout) => "generation_timeout",
            AnswerFailure::Generation(_) => "generation_error",
            AnswerFailure::EmptyResponse => "empty_response",
        }
    }
}

/// Errors that escape [`AnswerProcessor::process_question`].
#[derive(Error, Debug)]
pub enum ProcessQuestionError {
    #[error("Failed to publish answer: {0}")]
    Publish(#[from] PublishError),
}

/// Orchestrates one question from lookup to published answer.
pub struct AnswerProcessor {
    repository: Arc<dyn ObjectiveRepository>,
    gateway: Arc<dyn LlmGateway>,
    publisher: Arc<dyn AnswerPublisher>,
    strategies: PromptStrategyRegistry,
    params: ProcessingParams,
    stats: watch::Sender<ProcessingStats>,
}

impl AnswerProcessor {
    pub fn new(
        repository: Arc<dyn ObjectiveRepository>,
        gateway: Arc<dyn LlmGateway>,
        publisher: Arc<dyn AnswerPublisher>,
    ) -> Self {
        Self {
            repository,
            gateway,
            publisher,
            strategies: PromptStrategyRegistry::default(),
            params: ProcessingParams::default(),
            stats: watch::Sender::new(ProcessingStats::default()),
        }
    }

    pub fn with_params(mut self, params: ProcessingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_strategies(mut self, strategies: PromptStrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    /// Snapshot of the processing counters.
    pub fn stats(&self) -> ProcessingStats {
        self.stats.borrow().clone()
    }

    /// Watch the processing counters.
    pub fn subscribe_stats(&self) -> watch::Receiver<ProcessingStats> {
        self.stats.subscribe()
    }

    /// Answer `event`, publish the result and return it.
    pub async fn process_question(
        &self,
        event: &QuestionEvent,
    ) -> Result<AnswerEvent, ProcessQuestionError> {
        let started = Instant::now();

        info!(
            manifest_id = %event.manifest_id,
            execution_id = %event.execution_id,
            objective_id = %event.objective_id,
            question_id = %event.question_id,
            model = %event.model,
            "Starting question processing"
        );

        let outcome = self.answer(event).await;
        let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let answer = match outcome {
            Ok(text) => AnswerEvent::completed(event, text, processing_time_ms),
            Err(failure) => {
                warn!(
                    execution_id = %event.execution_id,
                    question_id = %event.question_id,
                    objective_id = %event.objective_id,
                    kind = failure.kind(),
                    error = %failure,
                    "Question processing failed"
                );
                AnswerEvent::failed(event, processing_time_ms)
            }
        };

        let published = self.publisher.publish_answer(&answer).await;
        let success = answer.is_completed() && published.is_ok();
        self.stats
            .send_modify(|stats| stats.record(processing_time_ms, success));

        match published {
            Ok(()) => {
                if answer.is_completed() {
                    info!(
                        execution_id = %event.execution_id,
                        question_id = %event.question_id,
                        processing_time_ms,
                        "Question processed successfully"
                    );
                } else {
                    info!(
                        execution_id = %event.execution_id,
                        question_id = %event.question_id,
                        "Published failed answer event"
                    );
                }
                Ok(answer)
            }
            Err(e) => {
                error!(
                    execution_id = %event.execution_id,
                    question_id = %event.question_id,
                    status = %answer.status,
                    error = %e,
                    "Answer could not be published"
                );
                Err(e.into())
            }
        }
    }

    /// Steps 1–4: everything that can fail without breaking correlation.
    async fn answer(&self, event: &QuestionEvent) -> Result<String, AnswerFailure> {
        let objective = self
            .repository
            .get_objective(&event.objective_id)
            .await?
            .ok_or_else(|| AnswerFailure::ObjectiveNotFound(event.objective_id.clone()))?;

        info!(
            objective_id = %event.objective_id,
            objective_title = %objective.title,
            objective_type = %objective.objective_type,
            "Objective retrieved"
        );

        let strategy = self.strategies.resolve(&objective.objective_type)?;
        let model: Model = event.model.parse()?;

        let question = objective.question_text(self.params.content_excerpt_chars);
        let request = PromptRequest::new(&question)
            .with_target_product(objective.target_product())
            .with_target_category(objective.target_category())
            .with_persona(&event.persona)
            .with_language(&event.language);
        let prompt = strategy.render(&request);

        debug!(
            question_id = %event.question_id,
            strategy = %strategy,
            model = %model,
            prompt_len = prompt.len(),
            "Prompt rendered"
        );

        let config = self.params.model_config(model);
        let text = tokio::time::timeout(
            self.params.generation_timeout,
            self.gateway.generate(&prompt, &config),
        )
        .await
        .map_err(|_| GatewayError::Timeout)??;

        if text.trim().is_empty() {
            return Err(AnswerFailure::EmptyResponse);
        }
        Ok(text)
    }
}
