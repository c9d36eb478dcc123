//! AI narrative report modules.
//!
//! Prompt construction and delegation to the Gemini text-generation API.

pub mod provider;
pub mod requester;

pub use requester::{ReportError, ReportRequester};
