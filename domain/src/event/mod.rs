//! Bus events: what comes in ([`QuestionEvent`]) and what goes out ([`AnswerEvent`]).

pub mod answer;
pub mod persona;
pub mod question;

pub use answer::{AnswerEvent, AnswerStatus};
pub use persona::Persona;
pub use question::{DEFAULT_LANGUAGE, QuestionEvent};
