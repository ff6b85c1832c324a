/// The evaluator module computes expression results directly from tokens.
///
/// Three mutually recursive grammar levels (`expression`, `term`, `primary`)
/// pull tokens from the stream and produce a numeric result immediately; no
/// intermediate tree is built or retained. Precedence, the right-associative
/// power operator, unary minus, and the floor-convention modulo all live
/// here.
///
/// # Responsibilities
/// - Evaluates the grammar `expression → term → primary` over the token
///   stream.
/// - Enforces the one-token lookahead contract: every peeked-but-unused token
///   is pushed back before returning.
/// - Reports runtime errors such as division or modulo by zero.
pub mod evaluator;
/// The input module supplies raw characters to the lexer.
///
/// Declares the blocking character-source abstraction and its two
/// implementations (in-memory script, interactive line editor), plus the
/// character stream that adds single-slot pushback, peeking, and line
/// counting on top of any source.
///
/// # Responsibilities
/// - Abstracts over scripted, piped, and interactive input.
/// - Provides the raw-character tier of the two-tier lookahead.
/// - Tracks line numbers for error reporting.
pub mod input;
/// The lexer module tokenizes the character stream.
///
/// Declares the `Token` enum and the `TokenStream`, which classifies raw
/// characters into tokens and provides exactly one token of pushback.
/// Identifier classification resolves reserved names and consults the
/// variable store, so commands, constants, and assignments are all decided
/// here, token by token, without backtracking more than one token.
///
/// # Responsibilities
/// - Converts the raw character stream into tokens.
/// - Resolves identifiers against the reserved tables and the variable
///   store.
/// - Enforces the single-slot pushback invariant and supports
///   error-recovery resynchronization.
pub mod lexer;
/// Static tables of reserved names and operators.
///
/// System constants, command names, display/delete target keywords with
/// their bit flags, and the operator descriptions, all fixed at compile
/// time and matched case-insensitively.
pub mod reserved;
/// The session module runs the read-dispatch-print loop.
///
/// Owns the token stream and variable store, dispatches each statement's
/// leading token to a command handler or the evaluator, prints results and
/// status lines, and recovers from statement-level failures by discarding
/// input to the next statement boundary.
///
/// # Responsibilities
/// - Drives the `AwaitStatement → Dispatch → (Success | Failure)` cycle.
/// - Separates results from diagnostics across two output channels.
/// - Treats internal faults as fatal rather than recoverable.
pub mod session;
/// The variable store.
///
/// A linear-searched, case-sensitive mapping from variable name to numeric
/// value, with declaration, assignment, deletion, and listing operations.
pub mod vars;
