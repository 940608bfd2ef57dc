//! Application layer for objective-answerer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConsumerParams, ProcessingParams};
pub use ports::{
    answer_publisher::{AnswerPublisher, PublishError},
    llm_gateway::{GatewayError, LlmGateway},
    message_bus::{BusError, DeliveryReceipt, InboundMessage, MessageSink, MessageSource},
    objective_repository::{ObjectiveRepository, RepositoryError},
};
pub use use_cases::consume_questions::{ConsumerError, EventConsumer, QuestionHandler};
pub use use_cases::process_question::{AnswerFailure, AnswerProcessor, ProcessQuestionError};
pub use use_cases::publish_answer::EventProducer;
