//! Player expression evaluation for the Numbers round
//!
//! Expressions are normalized from their display notation, checked against the
//! drawn numbers, and evaluated with standard precedence. Unlike the target
//! search, intermediate division need not be exact: the final value is rounded.

use std::fmt;

/// Error type for rejected expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    Empty,
    InvalidCharacter(char),
    UnexpectedToken(String),
    UnexpectedEnd,
    UnbalancedParentheses,
    /// `++` or `--` written without a space between the signs
    DoubledSign(char),
    /// A multi-digit number starting with `0`
    LeadingZero(String),
    NonFinite,
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Expression is empty"),
            Self::InvalidCharacter(c) => write!(f, "Invalid character '{c}' in expression"),
            Self::UnexpectedToken(token) => write!(f, "Unexpected '{token}' in expression"),
            Self::UnexpectedEnd => write!(f, "Expression ends unexpectedly"),
            Self::UnbalancedParentheses => write!(f, "Unbalanced parentheses"),
            Self::DoubledSign(c) => write!(f, "'{c}{c}' is not allowed in expression"),
            Self::LeadingZero(literal) => {
                write!(f, "Number '{literal}' must not start with a zero")
            }
            Self::NonFinite => write!(f, "Expression does not produce a finite number"),
        }
    }
}

impl std::error::Error for ExpressionError {}

/// Convert display notation to plain arithmetic
///
/// `[`/`]` become parentheses, `x`, `X` and `×` become `*`, `÷` becomes `/`,
/// and `=` becomes `+` so that a trailing "= result" style entry still parses.
///
/// # Examples
/// ```
/// use countdown::solver::normalize;
///
/// assert_eq!(normalize(" [100 + 75] x 3 "), "(100 + 75) * 3");
/// assert_eq!(normalize("50 ÷ 2 × 4"), "50 / 2 * 4");
/// ```
#[must_use]
pub fn normalize(expr: &str) -> String {
    expr.chars()
        .map(|c| match c {
            '[' => '(',
            ']' => ')',
            'x' | 'X' | '×' => '*',
            '÷' => '/',
            '=' => '+',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check that every number literal is one of the available tiles
///
/// Each tile may be used once; using a number not drawn, or drawn fewer times
/// than it appears, fails. An expression without literals passes here and is
/// rejected by [`evaluate`].
///
/// # Examples
/// ```
/// use countdown::solver::validate_numbers_used;
///
/// assert!(validate_numbers_used("5 + 10", &[5, 10, 25]));
/// assert!(!validate_numbers_used("5 + 5", &[5, 10, 25]));
/// ```
#[must_use]
pub fn validate_numbers_used(expr: &str, available: &[u32]) -> bool {
    let normalized = normalize(expr);
    let mut remaining = available.to_vec();

    for literal in normalized
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
    {
        let Ok(value) = literal.parse::<u32>() else {
            return false;
        };
        match remaining.iter().position(|&n| n == value) {
            Some(index) => {
                remaining.remove(index);
            }
            None => return false,
        }
    }

    true
}

/// Normalize and evaluate an expression, rounding to the nearest integer
///
/// Only digits, `+ - * / ( )` and spaces are accepted after normalization.
/// Halves round towards positive infinity.
///
/// # Errors
/// Returns an `ExpressionError` for empty input, characters outside the
/// allowed set, malformed syntax, or a non-finite result such as division by
/// zero.
///
/// # Examples
/// ```
/// use countdown::solver::evaluate;
///
/// assert_eq!(evaluate("(4 + 6) x 10"), Ok(100));
/// assert_eq!(evaluate("7 / 2"), Ok(4));
/// assert!(evaluate("7 / 0").is_err());
/// ```
pub fn evaluate(expr: &str) -> Result<i64, ExpressionError> {
    let normalized = normalize(expr);
    if normalized.is_empty() {
        return Err(ExpressionError::Empty);
    }
    if let Some(bad) = normalized
        .chars()
        .find(|&c| !(c.is_ascii_digit() || "+-*/() ".contains(c)))
    {
        return Err(ExpressionError::InvalidCharacter(bad));
    }

    let tokens = tokenize(&normalized)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let value = parser.expression()?;
    if let Some(token) = parser.peek() {
        return Err(if *token == Token::RParen {
            ExpressionError::UnbalancedParentheses
        } else {
            ExpressionError::UnexpectedToken(token.to_string())
        });
    }

    let rounded = (value + 0.5).floor();
    if !rounded.is_finite() || rounded.abs() > i64::MAX as f64 {
        return Err(ExpressionError::NonFinite);
    }
    Ok(rounded as i64)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// Split a validated expression into tokens
///
/// Callers have already rejected characters outside the allowed set. Signs
/// may only repeat with a space between them (`5 - -3`), and numbers other
/// than `0` itself may not start with a zero.
fn tokenize(expr: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            ' ' => continue,
            '+' | '-' if chars.peek() == Some(&c) => {
                return Err(ExpressionError::DoubledSign(c));
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            digit => {
                let mut literal = String::from(digit);
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    literal.push(next);
                    chars.next();
                }
                if literal.len() > 1 && literal.starts_with('0') {
                    return Err(ExpressionError::LeadingZero(literal));
                }
                // Digit strings always parse as f64
                Token::Number(literal.parse().unwrap_or(f64::INFINITY))
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Recursive-descent parser over
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := unary (('*' | '/') unary)*
/// unary      := ('+' | '-') unary | primary
/// primary    := number | '(' expression ')'
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expression(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
                    None => Err(ExpressionError::UnbalancedParentheses),
                }
            }
            Some(Token::RParen) => Err(ExpressionError::UnbalancedParentheses),
            Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}
