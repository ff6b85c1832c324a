/// Unrecoverable internal faults.
///
/// Defines the failure class that is never caught at the statement boundary:
/// lookahead-contract violations and output-channel failures. These terminate
/// the session with a distinct exit status.
pub mod fault;
/// Parsing errors.
///
/// Defines all error types that can occur while lexing and parsing a
/// statement: malformed tokens, unexpected tokens, missing parentheses,
/// undeclared variables, and invalid command targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a statement:
/// division or modulo by zero and variable-store failures.
pub mod runtime_error;

pub use fault::Fault;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Result type used throughout the lexer, evaluator, and session loop.
///
/// Lexing and evaluation interleave here (identifier classification reads the
/// variable store), so a single alias carries all three error classes rather
/// than one alias per phase.
pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug)]
/// Any failure a statement can produce, recoverable or not.
///
/// The session loop catches the `Parse` and `Runtime` classes, reports them,
/// and resynchronizes to the next statement boundary. A `Fault` propagates
/// out of the loop and terminates the process.
pub enum CalcError {
    /// A lexing or grammar failure.
    Parse(ParseError),
    /// An evaluation or variable-store failure.
    Runtime(RuntimeError),
    /// An unrecoverable internal failure.
    Fault(Fault),
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::Runtime(error) => write!(f, "{error}"),
            Self::Fault(fault) => write!(f, "{fault}"),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<ParseError> for CalcError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for CalcError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl From<Fault> for CalcError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl From<std::io::Error> for CalcError {
    fn from(error: std::io::Error) -> Self {
        Self::Fault(Fault::Io(error))
    }
}
