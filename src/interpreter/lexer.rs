use std::fmt;

use crate::{
    error::{CalcResult, Fault, ParseError, RuntimeError},
    interpreter::{
        input::{CharSource, CharStream},
        reserved::{self, Command},
        vars::VarStore,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// One lexical unit of the input stream.
///
/// Tokens are immutable once constructed. The closed enum keeps session
/// dispatch exhaustive, and the pushback buffer is an `Option`, so no
/// uninitialized sentinel value can ever be observed.
pub enum Token {
    /// A numeric value: a literal, a resolved system constant, or a resolved
    /// variable reference.
    Number(f64),
    /// A single-character operator from the accepted set.
    Operator(char),
    /// A statement boundary: `;`, newline, or end of input.
    Print,
    /// The quit command.
    Quit,
    /// The help command.
    Help,
    /// The display command with its resolved target flag.
    Display(u8),
    /// The delete command with its resolved target.
    Delete(DeleteTarget),
    /// A variable-assignment directive.
    Assign {
        /// How the directive came about.
        mode: AssignMode,
        /// The variable being declared or assigned.
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a delete token applies to.
pub enum DeleteTarget {
    /// Every user variable.
    All,
    /// One named user variable.
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How an assignment directive was formed.
pub enum AssignMode {
    /// A bare mention of an unknown identifier: declare it at zero.
    DeclareZero,
    /// The identifier was followed by `=`: an expression supplies the value.
    AssignFollows,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "number {value}"),
            Self::Operator(ch) => write!(f, "'{ch}'"),
            Self::Print => write!(f, "end of statement"),
            Self::Quit => write!(f, "'quit'"),
            Self::Help => write!(f, "'help'"),
            Self::Display(_) => write!(f, "'display'"),
            Self::Delete(_) => write!(f, "'delete'"),
            Self::Assign { name, .. } => write!(f, "assignment to '{name}'"),
        }
    }
}

/// The token stream: classifies raw characters into [`Token`]s and provides
/// exactly one token of pushback.
///
/// Identifier classification consults the variable store, so [`get`] takes
/// the store by reference; the store itself is owned by the session loop.
/// The single-slot buffer is shared hidden state between the evaluator and
/// the session loop: any component that peeks a token it does not consume
/// must push it back before returning control. A second pushback before the
/// buffer drains is a [`Fault`], not a user error.
///
/// [`get`]: TokenStream::get
pub struct TokenStream<S: CharSource> {
    chars:  CharStream<S>,
    buffer: Option<Token>,
}

impl<S: CharSource> TokenStream<S> {
    pub fn new(source: S) -> Self {
        Self { chars:  CharStream::new(source),
               buffer: None, }
    }

    /// The current 1-based source line, for error reporting.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.chars.line()
    }

    /// True once the input is drained and no token is buffered.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.buffer.is_none() && self.chars.exhausted()
    }

    /// Returns `token` to the stream so the next [`get`] reproduces it.
    ///
    /// # Errors
    /// [`Fault::PushbackBufferFull`] if a token is already buffered; this
    /// signals a grammar bug, not a user-input error.
    ///
    /// [`get`]: TokenStream::get
    pub fn putback(&mut self, token: Token) -> CalcResult<()> {
        if self.buffer.is_some() {
            return Err(Fault::PushbackBufferFull.into());
        }
        self.buffer = Some(token);
        Ok(())
    }

    /// Produces the next token, consuming the buffered one if present.
    ///
    /// Classification order for fresh input: statement boundaries, operator
    /// characters, numeric literals, then identifiers (commands, system
    /// constants, existing variables, unknown names), with anything left over
    /// a malformed token.
    ///
    /// # Errors
    /// Any [`ParseError`] the input can provoke, plus the store errors a
    /// delete target can raise.
    pub fn get(&mut self, vars: &VarStore) -> CalcResult<Token> {
        if let Some(token) = self.buffer.take() {
            return Ok(token);
        }

        let Some(ch) = self.next_nonblank() else {
            return Ok(Token::Print); // end of input is a statement boundary
        };

        if is_statement_end(ch) {
            return Ok(Token::Print);
        }
        if reserved::is_operator(ch) {
            return Ok(Token::Operator(ch));
        }
        if ch.is_ascii_digit() || ch == '.' {
            self.chars.putback(ch)?;
            return Ok(Token::Number(self.read_number()?));
        }
        if ch.is_alphabetic() {
            self.chars.putback(ch)?;
            let word = self.read_word();
            return self.classify_word(word, vars);
        }

        Err(ParseError::MalformedToken { lexeme: ch.to_string(),
                                         line:   self.chars.line(), }.into())
    }

    /// Discards input until and including a character matching `sentinel`.
    ///
    /// The buffered token is checked first: a buffered statement boundary
    /// satisfies the scan outright, and any other buffered token is dropped.
    /// The raw scan also stops at a newline or end of input, both statement
    /// boundaries. Used only for error recovery.
    pub fn ignore(&mut self, sentinel: char) {
        if let Some(token) = self.buffer.take() {
            if matches!(token, Token::Print) {
                return;
            }
        }
        while let Some(ch) = self.chars.next() {
            if ch == sentinel || ch == '\n' {
                return;
            }
        }
    }

    /// Inspects the next non-blank raw character without consuming it.
    ///
    /// This is the documented second lookahead tier: the unary-minus rule
    /// decides between a parenthesized expression, a numeric literal, and an
    /// identifier before tokenization. Blanks are consumed; the returned
    /// character is not.
    pub(crate) fn peek_raw_char(&mut self) -> Option<char> {
        self.skip_blanks();
        self.chars.peek()
    }

    /// Consumes one raw character previously seen via [`peek_raw_char`].
    ///
    /// [`peek_raw_char`]: TokenStream::peek_raw_char
    pub(crate) fn consume_raw_char(&mut self) {
        self.chars.next();
    }

    /// Consumes a full floating-point literal from the raw stream.
    ///
    /// Digits, an optional fraction, and an optional exponent. An `e`/`E` is
    /// only taken as an exponent marker when a digit or sign follows it, so
    /// `2e` lexes as the number `2` with the `e` left for the next token.
    ///
    /// # Errors
    /// `ParseError::MalformedToken` when the collected literal does not parse.
    pub(crate) fn read_number(&mut self) -> CalcResult<f64> {
        let mut literal = String::new();
        while let Some(ch) = self.chars.peek() {
            if !ch.is_ascii_digit() && ch != '.' {
                break;
            }
            literal.push(ch);
            self.chars.next();
        }

        if let Some(marker) = self.chars.peek() {
            if marker == 'e' || marker == 'E' {
                self.chars.next();
                match self.chars.peek() {
                    Some(next) if next.is_ascii_digit() || next == '+' || next == '-' => {
                        literal.push(marker);
                        if next == '+' || next == '-' {
                            literal.push(next);
                            self.chars.next();
                        }
                        let mut saw_digit = false;
                        while let Some(digit) = self.chars.peek() {
                            if !digit.is_ascii_digit() {
                                break;
                            }
                            literal.push(digit);
                            self.chars.next();
                            saw_digit = true;
                        }
                        if !saw_digit {
                            return Err(ParseError::MalformedToken { lexeme: literal,
                                                                    line:   self.chars.line(), }.into());
                        }
                    },
                    _ => self.chars.putback(marker)?,
                }
            }
        }

        match literal.parse::<f64>() {
            Ok(value) => Ok(value),
            Err(_) => Err(ParseError::MalformedToken { lexeme: literal,
                                                       line:   self.chars.line(), }.into()),
        }
    }

    /// Consumes a maximal run of alphabetic characters.
    pub(crate) fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.chars.peek() {
            if !ch.is_alphabetic() {
                break;
            }
            word.push(ch);
            self.chars.next();
        }
        word
    }

    fn classify_word(&mut self, word: String, vars: &VarStore) -> CalcResult<Token> {
        let folded = word.to_lowercase();

        if let Some(command) = reserved::lookup_command(&folded) {
            return self.finish_command(command, vars);
        }
        if let Some(value) = reserved::system_constant(&folded) {
            // constants are not preserved as named tokens past this point
            return Ok(Token::Number(value));
        }

        if vars.exists(&word) {
            if self.peek_raw_char() == Some('=') {
                self.consume_raw_char();
                return Ok(Token::Assign { mode: AssignMode::AssignFollows,
                                          name: word, });
            }
            return Ok(Token::Number(vars.get(&word, self.chars.line())?));
        }

        // an identifier no table knows: declaration, assignment, or misuse
        match self.peek_raw_char() {
            None => Ok(Token::Assign { mode: AssignMode::DeclareZero,
                                       name: word, }),
            Some(ch) if is_statement_end(ch) => Ok(Token::Assign { mode: AssignMode::DeclareZero,
                                                                   name: word, }),
            Some('=') => {
                self.consume_raw_char();
                Ok(Token::Assign { mode: AssignMode::AssignFollows,
                                   name: word, })
            },
            // the offending character stays in the stream for resynchronization
            Some(_) => Err(ParseError::UndeclaredVariable { name: word,
                                                            line: self.chars.line(), }.into()),
        }
    }

    fn finish_command(&mut self, command: Command, vars: &VarStore) -> CalcResult<Token> {
        match command {
            Command::Quit => Ok(Token::Quit),
            Command::Help => Ok(Token::Help),
            Command::Display => {
                let target = self.read_target("display")?;
                match reserved::option_flag(&target.to_lowercase()) {
                    Some(flag) => Ok(Token::Display(flag)),
                    None => Err(ParseError::UnknownCommandTarget { command: "display",
                                                                   target,
                                                                   line: self.chars.line(), }.into()),
                }
            },
            Command::Delete => {
                let mut target = self.read_target("delete")?;
                if target.to_lowercase() == "uvars" {
                    // tolerated as a no-op separator before the real target
                    target = self.read_target("delete")?;
                }
                if target.to_lowercase() == "all" {
                    Ok(Token::Delete(DeleteTarget::All))
                } else if vars.exists(&target) {
                    Ok(Token::Delete(DeleteTarget::Name(target)))
                } else {
                    Err(RuntimeError::VariableNotFound { name: target,
                                                         line: self.chars.line(), }.into())
                }
            },
        }
    }

    fn read_target(&mut self, command: &'static str) -> CalcResult<String> {
        match self.peek_raw_char() {
            Some(ch) if ch.is_alphabetic() => Ok(self.read_word()),
            _ => Err(ParseError::UnknownCommandTarget { command,
                                                        target: String::new(),
                                                        line: self.chars.line(), }.into()),
        }
    }

    fn next_nonblank(&mut self) -> Option<char> {
        self.skip_blanks();
        self.chars.next()
    }

    fn skip_blanks(&mut self) {
        while self.chars.peek().is_some_and(is_blank) {
            self.chars.next();
        }
    }
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

const fn is_statement_end(ch: char) -> bool {
    matches!(ch, ';' | '\n')
}
