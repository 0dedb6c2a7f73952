//! Error and diagnostic system for the Sieve parser.
//!
//! Problems in a source list are reported as [`Diagnostic`]s carrying an
//! [`ErrorCode`], a [`Severity`], and labeled [`Span`](crate::Span)s pointing
//! into the list text. All diagnostics from one list are gathered into a
//! single [`ParseError`].

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
