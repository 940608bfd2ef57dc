//! Objective store adapters
//!
//! - [`JsonFileObjectiveRepository`]: objectives loaded from a JSON file
//! - `MongoObjectiveRepository`: MongoDB collection (`mongodb` feature)

mod file;
#[cfg(feature = "mongodb")]
mod mongo;

pub use file::JsonFileObjectiveRepository;
#[cfg(feature = "mongodb")]
pub use mongo::MongoObjectiveRepository;
