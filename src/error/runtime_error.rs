#[derive(Debug)]
/// Represents all errors that can be raised while evaluating a statement.
pub enum RuntimeError {
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted modulo by zero.
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to declare a variable that already exists.
    DuplicateDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Referred to a variable that does not exist.
    VariableNotFound {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::ModuloByZero { line } => write!(f, "Error on line {line}: Modulo by zero."),
            Self::DuplicateDeclaration { name, line } => write!(f,
                                                                "Error on line {line}: Variable '{name}' already exists."),
            Self::VariableNotFound { name, line } => {
                write!(f, "Error on line {line}: No variable named '{name}' exists.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
