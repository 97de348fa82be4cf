//! AI cover-letter generator
//!
//! Collects an applicant's background and a target job description, asks a
//! text-generation provider for a tailored cover letter, and offers the result
//! for copying or PDF export. The reusable part of the applicant profile can
//! be saved between sessions.

pub mod ai;
pub mod app;
pub mod clipboard;
pub mod credentials;
pub mod error;
mod fsutil;
pub mod models;
pub mod pdf;
pub mod profile;
pub mod prompts;

pub use error::{Error, GenerationError, GenerationErrorKind, Result};
