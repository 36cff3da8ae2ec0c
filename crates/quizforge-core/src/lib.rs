//! quizforge-core — Question model, store, selection, and session engine.
//!
//! This crate defines the question bank data model, the flat-file store,
//! the practice/test selection policies, and the session runners that the
//! rest of quizforge builds on.

pub mod error;
pub mod evaluator;
pub mod model;
pub mod selector;
pub mod session;
pub mod stats;
pub mod store;
pub mod traits;
