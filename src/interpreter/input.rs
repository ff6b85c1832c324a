use rustyline::{error::ReadlineError, DefaultEditor};

use crate::error::Fault;

/// A blocking supplier of raw input characters.
///
/// The token stream pulls characters through this trait one at a time, so the
/// same lexer serves in-memory scripts, piped input, and an interactive line
/// editor. `next_char` blocks until a character is available and returns
/// `None` exactly once the input is exhausted.
pub trait CharSource {
    /// Produces the next raw character, or `None` at end of input.
    fn next_char(&mut self) -> Option<char>;
}

impl CharSource for Box<dyn CharSource> {
    fn next_char(&mut self) -> Option<char> {
        self.as_mut().next_char()
    }
}

/// Characters drawn from a complete in-memory script.
///
/// Backs inline statements, file contents, and piped standard input (which is
/// read to a string up front).
pub struct ScriptSource {
    chars: std::vec::IntoIter<char>,
}

impl ScriptSource {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { chars: source.chars().collect::<Vec<_>>().into_iter(), }
    }
}

impl CharSource for ScriptSource {
    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }
}

/// Characters drawn line by line from an interactive editor.
///
/// Each line the user submits is replayed character by character with a
/// trailing newline, so the lexer sees the same stream shape as a script.
/// `Ctrl-D` and `Ctrl-C` end the session like end of input.
pub struct LineEditorSource {
    editor:   DefaultEditor,
    prompt:   String,
    pending:  Vec<char>,
    cursor:   usize,
    finished: bool,
}

impl LineEditorSource {
    /// Creates an editor-backed source that shows `prompt` before each line.
    ///
    /// # Errors
    /// Returns the editor's own error if the terminal cannot be initialized.
    pub fn new(prompt: &str) -> Result<Self, ReadlineError> {
        Ok(Self { editor:   DefaultEditor::new()?,
                  prompt:   prompt.to_string(),
                  pending:  Vec::new(),
                  cursor:   0,
                  finished: false, })
    }
}

impl CharSource for LineEditorSource {
    fn next_char(&mut self) -> Option<char> {
        loop {
            if self.cursor < self.pending.len() {
                let ch = self.pending[self.cursor];
                self.cursor += 1;
                return Some(ch);
            }
            if self.finished {
                return None;
            }
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.pending = line.chars().collect();
                    self.pending.push('\n');
                    self.cursor = 0;
                },
                // any editor failure ends the session like end of input
                Err(_) => {
                    self.finished = true;
                    return None;
                },
            }
        }
    }
}

/// A character stream with a single slot of pushback.
///
/// This is the lower tier of the two-tier lookahead: the lexer builds tokens
/// from it, and the unary-minus rule in the evaluator peeks it directly to
/// disambiguate literal negation before tokenization. The buffer holds at
/// most one character; a second pushback is an internal fault. Line numbers
/// are counted here so every error can carry one.
pub struct CharStream<S: CharSource> {
    source: S,
    buffer: Option<char>,
    eof:    bool,
    line:   usize,
}

impl<S: CharSource> CharStream<S> {
    pub fn new(source: S) -> Self {
        Self { source,
               buffer: None,
               eof: false,
               line: 1, }
    }

    /// Consumes and returns the next character, draining the buffer first.
    pub fn next(&mut self) -> Option<char> {
        if let Some(ch) = self.buffer.take() {
            return Some(ch);
        }
        self.pull()
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        if self.buffer.is_none() {
            self.buffer = self.pull();
        }
        self.buffer
    }

    /// Returns `ch` to the stream so the next read reproduces it.
    ///
    /// # Errors
    /// `Fault::PushbackBufferFull` if a character is already buffered.
    pub fn putback(&mut self, ch: char) -> Result<(), Fault> {
        if self.buffer.is_some() {
            return Err(Fault::PushbackBufferFull);
        }
        self.buffer = Some(ch);
        Ok(())
    }

    /// True once the source is drained and no character is buffered.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.buffer.is_none() && self.eof
    }

    /// The current 1-based source line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    fn pull(&mut self) -> Option<char> {
        match self.source.next_char() {
            Some(ch) => {
                if ch == '\n' {
                    self.line += 1;
                }
                Some(ch)
            },
            None => {
                self.eof = true;
                None
            },
        }
    }
}
