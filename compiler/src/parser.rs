//! Builds an expression tree from a postfix token stream.

use automata_runtime::Symbol;

use super::ast::Expr;
use super::normalize::Token;

/// Represents the kind of failure encountered while building a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrKind {
    /// A character that is neither a literal nor a primitive operator.
    UnexpectedToken(char),
    /// An operator found fewer operands than it requires.
    MissingOperand {
        operator: char,
        required: usize,
        found: usize,
    },
    /// The stream did not reduce to exactly one tree, holding the number of
    /// trees left over.
    MalformedExpression(usize),
}

/// A failure to build a tree, including the kind of error and any optional
/// enriching data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErr {
    /// The type of triggered error.
    kind: ParseErrKind,
    /// Additional error data.
    data: Option<String>,
}

impl ParseErr {
    /// Instantiates a new error.
    pub fn new(kind: ParseErrKind) -> Self {
        Self { kind, data: None }
    }

    /// Associates additional data with the error, returning the modified error.
    pub fn with_data(mut self, data: String) -> Self {
        self.with_data_mut(data);
        self
    }

    /// Associates additional data with the error.
    pub fn with_data_mut(&mut self, data: String) {
        self.data = Some(data);
    }

    pub fn kind(&self) -> &ParseErrKind {
        &self.kind
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (data, padding) = if let Some(data) = &self.data {
            (data.as_str(), " ")
        } else {
            ("", "")
        };
        match &self.kind {
            ParseErrKind::UnexpectedToken(c) => {
                write!(f, "unexpected token {:?}{}{}", c, padding, data)
            }
            ParseErrKind::MissingOperand {
                operator,
                required,
                found,
            } => write!(
                f,
                "operator '{}' requires {} operand(s), found {}{}{}",
                operator, required, found, padding, data
            ),
            ParseErrKind::MalformedExpression(remaining) => write!(
                f,
                "malformed expression, {} subexpressions remain{}{}",
                remaining, padding, data
            ),
        }
    }
}

impl std::error::Error for ParseErr {}

/// Reduces a postfix stream to a single tree using an operand stack.
/// Whitespace is skipped.
///
/// # Example
///
/// ```
/// use automata_compiler::ast::Expr;
/// use automata_compiler::normalize::normalize;
/// use automata_compiler::parser::parse;
///
/// let normalized = normalize("ab*").unwrap();
///
/// assert_eq!(
///     Ok(Expr::concat(Expr::literal('a'), Expr::star(Expr::literal('b')))),
///     parse(normalized.postfix.as_slice())
/// );
/// ```
pub fn parse(postfix: &[Token]) -> Result<Expr, ParseErr> {
    let mut stack: Vec<Expr> = Vec::new();

    for (pos, &token) in postfix.iter().enumerate() {
        let at = || format!("at postfix position {}", pos);

        match token {
            Token::Symbol(c) | Token::Escaped(c) => stack.push(Expr::Literal(Symbol::from(c))),
            Token::Epsilon => stack.push(Expr::epsilon()),
            Token::Whitespace(_) => continue,
            Token::Star => {
                let [child] =
                    pop_operands::<1>(&mut stack, '*').map_err(|e| e.with_data(at()))?;
                stack.push(Expr::star(child));
            }
            Token::Concat | Token::Union => {
                let operator = if token == Token::Concat { '.' } else { '|' };
                let [lhs, rhs] =
                    pop_operands::<2>(&mut stack, operator).map_err(|e| e.with_data(at()))?;

                stack.push(match token {
                    Token::Concat => Expr::concat(lhs, rhs),
                    _ => Expr::union(lhs, rhs),
                });
            }
            Token::Plus
            | Token::Optional
            | Token::OpenGroup
            | Token::CloseGroup
            | Token::Invalid(_) => {
                let c = token.to_string().chars().next().unwrap_or_default();
                return Err(ParseErr::new(ParseErrKind::UnexpectedToken(c)).with_data(at()));
            }
        }
    }

    match (stack.pop(), stack.len()) {
        (Some(root), 0) => Ok(root),
        (None, _) => Err(ParseErr::new(ParseErrKind::MalformedExpression(0))),
        (Some(_), remaining) => Err(ParseErr::new(ParseErrKind::MalformedExpression(
            remaining + 1,
        ))),
    }
}

/// Pops the `N` most recent operands, returned in the order they were pushed.
fn pop_operands<const N: usize>(stack: &mut Vec<Expr>, operator: char) -> Result<[Expr; N], ParseErr> {
    let found = stack.len();
    if found < N {
        return Err(ParseErr::new(ParseErrKind::MissingOperand {
            operator,
            required: N,
            found,
        }));
    }

    let operands = stack.split_off(found - N);
    operands.try_into().map_err(|operands: Vec<Expr>| {
        ParseErr::new(ParseErrKind::MissingOperand {
            operator,
            required: N,
            found: operands.len(),
        })
    })
}
