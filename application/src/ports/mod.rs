//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod answer_publisher;
pub mod llm_gateway;
pub mod message_bus;
pub mod objective_repository;
