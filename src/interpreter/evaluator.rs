use crate::{
    error::{CalcResult, ParseError, RuntimeError},
    interpreter::{
        input::CharSource,
        lexer::{AssignMode, Token, TokenStream},
        reserved,
        vars::VarStore,
    },
};

/// Evaluates a full expression.
///
/// This is the entry point for expression evaluation. The grammar is
/// evaluated as it is parsed; no tree is built. Each level pulls tokens from
/// the stream and pushes back the first token it cannot use, leaving it for
/// the caller.
///
/// Grammar: `expression := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: The session's token stream.
/// - `vars`: The variable store, read during identifier classification.
///
/// # Returns
/// The numeric value of the expression.
pub fn expression<S>(tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<f64>
    where S: CharSource
{
    let mut left = term(tokens, vars)?;
    loop {
        let token = tokens.get(vars)?;
        match token {
            Token::Operator('+') => left += term(tokens, vars)?,
            Token::Operator('-') => left -= term(tokens, vars)?,
            _ => {
                tokens.putback(token)?;
                return Ok(left);
            },
        }
    }
}

/// Evaluates a term.
///
/// Grammar: `term := primary (("*" | "/" | "%") primary)*`, except that a
/// `^` inside the loop evaluates one more primary and returns the combined
/// result immediately: whatever follows a power expression is left unconsumed
/// in the stream.
///
/// # Errors
/// Division and modulo by zero, plus anything a primary can raise.
pub fn term<S>(tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<f64>
    where S: CharSource
{
    let mut left = primary(tokens, vars)?;
    loop {
        let token = tokens.get(vars)?;
        match token {
            Token::Operator('*') => left *= primary(tokens, vars)?,
            Token::Operator('/') => {
                let divisor = primary(tokens, vars)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero { line: tokens.line() }.into());
                }
                left /= divisor;
            },
            Token::Operator('%') => {
                let divisor = primary(tokens, vars)?;
                left = floor_modulo(left, divisor, tokens.line())?;
            },
            Token::Operator('^') => {
                let exponent = primary(tokens, vars)?;
                return Ok(left.powf(exponent));
            },
            _ => {
                tokens.putback(token)?;
                return Ok(left);
            },
        }
    }
}

/// Evaluates a primary.
///
/// Handles `(` expression `)`, numbers with a one-token power lookahead
/// (right-associative: the exponent recurses into another primary, not a
/// term), assignment directives that reach expression position, and the
/// unary-minus rule.
pub fn primary<S>(tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<f64>
    where S: CharSource
{
    let token = tokens.get(vars)?;
    match token {
        Token::Operator('(') => {
            let value = expression(tokens, vars)?;
            expect_closing_paren(tokens, vars)?;
            Ok(value)
        },
        Token::Operator('-') => negative_primary(tokens, vars),
        Token::Number(value) => power_lookahead(value, tokens, vars),
        Token::Assign { mode, .. } => {
            // the directive's numeric payload: 0 for a bare declaration,
            // 1 when an assignment expression follows
            Ok(match mode {
                AssignMode::DeclareZero => 0.0,
                AssignMode::AssignFollows => 1.0,
            })
        },
        other => Err(ParseError::UnexpectedToken { found: other.to_string(),
                                                   line:  tokens.line(), }.into()),
    }
}

/// Resolves the operand of a unary minus.
///
/// The next non-blank raw character is inspected before tokenization to
/// decide between a parenthesized expression, a numeric literal, and an
/// identifier. The resolved value is negated and then the usual one-token
/// power lookahead applies, so unary minus binds tighter than any binary
/// operator while `^` keeps its right-associativity.
fn negative_primary<S>(tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<f64>
    where S: CharSource
{
    match tokens.peek_raw_char() {
        Some('(') => {
            tokens.consume_raw_char();
            let value = expression(tokens, vars)?;
            expect_closing_paren(tokens, vars)?;
            power_lookahead(-value, tokens, vars)
        },

        Some(ch) if ch.is_ascii_digit() || ch == '.' => {
            let value = tokens.read_number()?;
            power_lookahead(-value, tokens, vars)
        },

        Some(ch) if ch.is_alphabetic() => {
            let word = tokens.read_word();
            let folded = word.to_lowercase();
            if reserved::lookup_command(&folded).is_some() {
                return Err(ParseError::UnexpectedToken { found: format!("command '{word}'"),
                                                         line:  tokens.line(), }.into());
            }
            let value = if let Some(constant) = reserved::system_constant(&folded) {
                constant
            } else if vars.exists(&word) {
                vars.get(&word, tokens.line())?
            } else {
                return Err(ParseError::UndeclaredVariable { name: word,
                                                            line: tokens.line(), }.into());
            };
            power_lookahead(-value, tokens, vars)
        },

        _ => Err(ParseError::UnexpectedToken { found: "end of statement after '-'".to_string(),
                                               line:  tokens.line(), }.into()),
    }
}

/// Applies the one-token power lookahead to a resolved primary value.
///
/// If the next token is `^`, the exponent is one more primary and the result
/// is `value ^ exponent`; otherwise the peeked token goes back into the
/// stream.
fn power_lookahead<S>(value: f64, tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<f64>
    where S: CharSource
{
    let next = tokens.get(vars)?;
    if next == Token::Operator('^') {
        let exponent = primary(tokens, vars)?;
        Ok(value.powf(exponent))
    } else {
        tokens.putback(next)?;
        Ok(value)
    }
}

fn expect_closing_paren<S>(tokens: &mut TokenStream<S>, vars: &VarStore) -> CalcResult<()>
    where S: CharSource
{
    let token = tokens.get(vars)?;
    if token == Token::Operator(')') {
        Ok(())
    } else {
        Err(ParseError::ExpectedClosingParen { line: tokens.line() }.into())
    }
}

/// Floor-convention modulo: the result always carries the divisor's sign.
///
/// Computed by repeated addition or subtraction rather than a native
/// remainder, stepping the dividend into the half-open interval bounded by
/// the divisor and zero.
///
/// # Errors
/// `RuntimeError::ModuloByZero` for a zero divisor. A zero dividend
/// short-circuits to zero.
fn floor_modulo(mut left: f64, divisor: f64, line: usize) -> Result<f64, RuntimeError> {
    if divisor == 0.0 {
        return Err(RuntimeError::ModuloByZero { line });
    }
    if left == 0.0 {
        return Ok(0.0);
    }
    if left < 0.0 {
        if divisor < 0.0 {
            while left <= divisor {
                left -= divisor;
            }
        } else {
            while left < 0.0 {
                left += divisor;
            }
        }
    } else if divisor < 0.0 {
        while left > 0.0 {
            left += divisor;
        }
    } else {
        while left >= divisor {
            left -= divisor;
        }
    }
    Ok(left)
}
