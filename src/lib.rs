//! # reckon
//!
//! reckon is an interactive arithmetic expression evaluator written in Rust.
//! It reads statements separated by `;` or newlines, evaluates expressions
//! with named mutable variables, and supports a small set of session
//! commands (quit, help, display, delete). Statements are evaluated
//! immediately, one at a time; a failure aborts only the statement that
//! raised it.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Fault,
    interpreter::{input::ScriptSource, lexer::TokenStream, session::Session},
};

/// Provides unified error types for lexing, parsing, and evaluation.
///
/// This module defines all errors that can be raised while running a
/// statement. It separates the recoverable classes (parse and runtime
/// errors, caught at the statement boundary) from the unrecoverable internal
/// faults, and carries source line numbers for diagnostics.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, evaluator, store).
/// - Attaches line numbers and detailed messages for user feedback.
/// - Distinguishes statement-level failures from fatal internal faults.
pub mod error;
/// Orchestrates the entire process of statement execution.
///
/// This module ties together the input layer, lexer, evaluator, variable
/// store, reserved-name tables, and the session loop to provide a complete
/// runtime for interactive evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: input, lexer, evaluator, store,
///   session.
/// - Provides the entry points for running scripts and interactive
///   sessions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Everything a finished session printed, by channel.
#[derive(Debug)]
pub struct SessionOutput {
    /// Results and command status lines (the stdout channel).
    pub results:     String,
    /// Failure messages (the stderr channel).
    pub diagnostics: String,
}

/// Runs `source` as a complete non-interactive session.
///
/// Every statement is evaluated in order; recoverable failures are reported
/// on the diagnostic channel and the session continues with the next
/// statement, exactly as it would interactively.
///
/// # Errors
/// Only an unrecoverable internal [`Fault`] is returned as an error;
/// user-level failures end up in [`SessionOutput::diagnostics`].
///
/// # Examples
/// ```
/// use reckon::run_script;
///
/// // The power operator is right-associative: 2^(3^2).
/// let output = run_script("2 ^ 3 ^ 2;").unwrap();
/// assert!(output.results.contains("= 512"));
///
/// // A failing statement does not take the session down with it.
/// let output = run_script("5 / 0; 1 + 1;").unwrap();
/// assert!(output.diagnostics.contains("Division by zero"));
/// assert!(output.results.contains("= 2"));
/// ```
pub fn run_script(source: &str) -> Result<SessionOutput, Fault> {
    let mut results = Vec::new();
    let mut diagnostics = Vec::new();

    Session::new(TokenStream::new(ScriptSource::new(source)),
                 &mut results,
                 &mut diagnostics).run()?;

    Ok(SessionOutput { results:     String::from_utf8_lossy(&results).into_owned(),
                       diagnostics: String::from_utf8_lossy(&diagnostics).into_owned(), })
}
