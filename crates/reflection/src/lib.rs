//! Reflection layer - learning from how tasks went.
//!
//! The pattern store folds each post-task reflection into per-category
//! statistics; the guidance generator turns a reflection plus those
//! statistics into coaching text.

#![warn(missing_docs, unused_crate_dependencies)]

mod store;
mod guidance;

pub use store::PatternStore;
pub use guidance::GuidanceGenerator;
