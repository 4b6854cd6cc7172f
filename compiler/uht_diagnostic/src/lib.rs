//! Diagnostic system for header parsing and resolution.
//!
//! Every problem surfaced to the user is a [`Diagnostic`]:
//! - Error code for searchability
//! - Binary severity (warning or hard error)
//! - Header file and 1-based line of the offending token
//! - A context string assembled from the active scope stack
//!   (e.g. `class 'UWidget'`, `Variable specifiers`)
//!
//! Hard errors never stop the current header's parse on their own; they are
//! collected and fail the run once the current phase completes.

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
