//! Recommendation engine - scoring, session state, and the suggestion loop.

#![warn(missing_docs)]

pub mod scorer;
pub mod source;
pub mod session;
pub mod orchestrator;

pub use scorer::RecommendationScorer;
pub use source::{TaskSource, InMemoryTaskSource};
pub use session::Session;
pub use orchestrator::ReflectiveOrchestrator;
