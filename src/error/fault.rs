#[derive(Debug)]
/// Represents unrecoverable internal failures.
///
/// A `Fault` never results from user input: it signals either a broken
/// lookahead contract between the evaluator and the token stream, or a failed
/// write on an output channel. The session loop does not attempt recovery;
/// the process terminates with a distinct exit status.
pub enum Fault {
    /// A second pushback was attempted while the single buffer slot was
    /// still occupied, at either the token or the raw-character tier.
    PushbackBufferFull,
    /// Writing to the result or diagnostic channel failed.
    Io(std::io::Error),
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PushbackBufferFull => write!(f, "Internal error: putback() into a full buffer."),
            Self::Io(error) => write!(f, "Internal error: output channel failed: {error}."),
        }
    }
}

impl std::error::Error for Fault {}

impl From<std::io::Error> for Fault {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
