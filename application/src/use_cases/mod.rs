//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod consume_questions;
pub mod process_question;
pub mod publish_answer;
