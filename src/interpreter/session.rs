use std::io::{self, Write};

use crate::{
    error::{CalcError, CalcResult, Fault, ParseError},
    interpreter::{
        evaluator,
        input::CharSource,
        lexer::{AssignMode, DeleteTarget, Token, TokenStream},
        reserved,
        vars::VarStore,
    },
};

/// The banner printed once when an interactive session starts.
pub const BANNER: &str = "Enter one or more statements, ending each with ';' ('q;' or 'quit;' \
                          exits, 'help;' shows the command list).";

/// The per-line prompt shown by the interactive editor.
pub const PROMPT: &str = "> ";

/// The static text printed by the help command.
pub const HELP_TEXT: &str = "Symbols and commands:
  ;                    End a statement and evaluate everything entered so far
  q or quit            Quit
  help                 Display this help text
  display sysvars      List the built-in system constants
  display uvars        List the current user variables
  display all          List both
  display operators    List the accepted operators
  delete uvars all     Delete all user variables
  delete uvars NAME    Delete the user variable called NAME

Variable names contain only alphabetic characters. User variable names are
case sensitive; system constants and commands are not. Assign with
'name = expression;'; a bare unknown name declares a new variable at 0.";

/// What a dispatched statement tells the loop to do next.
enum Flow {
    Continue,
    Quit,
}

/// One interactive or scripted evaluation session.
///
/// Owns the token stream and the variable store and passes them by reference
/// into the evaluator; there is no ambient state. Results and command status
/// go to the result writer, diagnostics to the separate diagnostic writer.
pub struct Session<S, W, E>
    where S: CharSource,
          W: Write,
          E: Write
{
    tokens:      TokenStream<S>,
    vars:        VarStore,
    out:         W,
    diagnostics: E,
    interactive: bool,
}

impl<S, W, E> Session<S, W, E>
    where S: CharSource,
          W: Write,
          E: Write
{
    pub fn new(tokens: TokenStream<S>, out: W, diagnostics: E) -> Self {
        Self { tokens,
               vars: VarStore::new(),
               out,
               diagnostics,
               interactive: false, }
    }

    /// Marks the session interactive, so the banner prints at startup.
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Runs statements until quit or end of input.
    ///
    /// Every recoverable failure is reported to the diagnostic writer and
    /// followed by resynchronization to the next statement boundary; the
    /// session then continues cleanly.
    ///
    /// # Errors
    /// Only the unrecoverable [`Fault`] class escapes this loop.
    pub fn run(&mut self) -> Result<(), Fault> {
        if self.interactive {
            writeln!(self.out, "{BANNER}").map_err(Fault::Io)?;
        }
        loop {
            if self.tokens.exhausted() {
                return Ok(());
            }
            match self.statement() {
                Ok(Flow::Continue) => {},
                Ok(Flow::Quit) => return Ok(()),
                Err(CalcError::Fault(fault)) => return Err(fault),
                Err(error) => {
                    writeln!(self.diagnostics, "{error}").map_err(Fault::Io)?;
                    self.tokens.ignore(';');
                },
            }
        }
    }

    /// Reads and dispatches one statement.
    fn statement(&mut self) -> CalcResult<Flow> {
        let mut token = self.tokens.get(&self.vars)?;
        while token == Token::Print {
            if self.tokens.exhausted() {
                return Ok(Flow::Quit);
            }
            token = self.tokens.get(&self.vars)?;
        }

        match token {
            Token::Quit => Ok(Flow::Quit),

            Token::Help => {
                writeln!(self.out, "{HELP_TEXT}")?;
                Ok(Flow::Continue)
            },

            Token::Display(flag) => self.display(flag),

            Token::Delete(target) => self.delete(target),

            Token::Assign { mode: AssignMode::DeclareZero,
                            name, } => self.declare(&name),

            Token::Assign { mode: AssignMode::AssignFollows,
                            name, } => self.assign(&name),

            Token::Operator('(') | Token::Operator('-') | Token::Number(_) => {
                self.tokens.putback(token)?;
                let value = evaluator::expression(&mut self.tokens, &self.vars)?;
                writeln!(self.out, "= {value}")?;
                Ok(Flow::Continue)
            },

            Token::Print => Ok(Flow::Continue), // drained above

            other => Err(ParseError::UnexpectedToken { found: other.to_string(),
                                                       line:  self.tokens.line(), }.into()),
        }
    }

    fn display(&mut self, flag: u8) -> CalcResult<Flow> {
        match flag {
            reserved::DISP_SYS => self.list_system_constants()?,
            reserved::DISP_USER => self.list_user_variables()?,
            reserved::DISP_ALL => {
                self.list_system_constants()?;
                self.list_user_variables()?;
            },
            reserved::DISP_OP => self.list_operators()?,
            // the lexer only emits table flags; anything else is a bug caught here
            _ => {
                return Err(ParseError::UnknownCommandTarget { command: "display",
                                                              target:  flag.to_string(),
                                                              line:    self.tokens.line(), }.into());
            },
        }
        Ok(Flow::Continue)
    }

    fn list_system_constants(&mut self) -> io::Result<()> {
        writeln!(self.out, "System constants:")?;
        for (name, value) in reserved::SYSTEM_CONSTANTS {
            writeln!(self.out, "  {name} = {value}")?;
        }
        Ok(())
    }

    fn list_user_variables(&mut self) -> io::Result<()> {
        if self.vars.is_empty() {
            return writeln!(self.out, "No user variables to display.");
        }
        writeln!(self.out, "Displaying all {} user variables:", self.vars.len())?;
        for var in self.vars.iter() {
            writeln!(self.out, "  {} = {}", var.name(), var.value())?;
        }
        Ok(())
    }

    fn list_operators(&mut self) -> io::Result<()> {
        writeln!(self.out, "Accepted operators:")?;
        for (symbol, description) in reserved::OPERATORS {
            writeln!(self.out, "  {symbol} : {description}")?;
        }
        Ok(())
    }

    fn delete(&mut self, target: DeleteTarget) -> CalcResult<Flow> {
        match target {
            DeleteTarget::All => {
                self.vars.delete_all();
                writeln!(self.out, "Cleared all user variables.")?;
            },
            DeleteTarget::Name(name) => {
                self.vars.delete(&name, self.tokens.line())?;
                writeln!(self.out, "Deleted user variable {name}.")?;
            },
        }
        Ok(Flow::Continue)
    }

    fn declare(&mut self, name: &str) -> CalcResult<Flow> {
        self.vars.declare_zero(name, self.tokens.line())?;
        writeln!(self.out, "Created new user variable {name} with value 0.")?;
        Ok(Flow::Continue)
    }

    fn assign(&mut self, name: &str) -> CalcResult<Flow> {
        let value = evaluator::expression(&mut self.tokens, &self.vars)?;
        match self.vars.assign(name, value) {
            Some(previous) => writeln!(self.out,
                                       "User variable {name} updated, was {previous}, now {name} = {value}.")?,
            None => writeln!(self.out, "Created new user variable {name} with value {value}.")?,
        }
        Ok(Flow::Continue)
    }
}
