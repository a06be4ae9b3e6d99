//! Tokenizes a raw expression and rewrites it into explicit postfix form.
//!
//! Normalization runs in three passes over a token stream: `+`/`?` sugar
//! expansion, explicit concatenation insertion and infix to postfix
//! reduction.

use std::collections::HashSet;
use std::fmt::Display;

use automata_runtime::EPSILON_CHAR;
use parcel::parsers::character::expect_character;
use parcel::prelude::v1::*;

/// An alternate spelling of epsilon accepted in expressions.
pub const MATHEMATICAL_EPSILON: char = '𝜀';

/// A lexical unit of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A letter or digit.
    Symbol(char),
    /// Any character following a backslash, always a literal.
    Escaped(char),
    Epsilon,
    Union,
    Concat,
    Star,
    Plus,
    Optional,
    OpenGroup,
    CloseGroup,
    Whitespace(char),
    /// A character with no meaning in an expression.
    Invalid(char),
}

impl Token {
    /// Maps an operator character to its token.
    pub fn from_operator(c: char) -> Option<Self> {
        match c {
            '|' => Some(Token::Union),
            '.' => Some(Token::Concat),
            '*' => Some(Token::Star),
            '+' => Some(Token::Plus),
            '?' => Some(Token::Optional),
            '(' => Some(Token::OpenGroup),
            ')' => Some(Token::CloseGroup),
            _ => None,
        }
    }

    /// Returns `true` for tokens that stand for a single literal.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Escaped(_) | Token::Epsilon)
    }

    /// The binding strength of operators placed on the reduction stack.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Token::OpenGroup => Some(1),
            Token::Union => Some(2),
            Token::Concat => Some(3),
            Token::Star => Some(4),
            _ => None,
        }
    }

    /// Returns the literal character a token matches, if any. Epsilon
    /// matches no character, escaped or not.
    pub fn as_literal(&self) -> Option<char> {
        match self {
            Token::Symbol(c) | Token::Escaped(c) if *c != EPSILON_CHAR => Some(*c),
            _ => None,
        }
    }

    /// Returns `true` if a concatenation may follow this token.
    fn ends_operand(&self) -> bool {
        self.is_operand() || matches!(self, Token::Star | Token::CloseGroup)
    }

    /// Returns `true` if a concatenation may precede this token.
    fn begins_operand(&self) -> bool {
        self.is_operand() || matches!(self, Token::OpenGroup)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Symbol(c) | Token::Whitespace(c) | Token::Invalid(c) => write!(f, "{}", c),
            Token::Escaped(c) => write!(f, "\\{}", c),
            Token::Epsilon => write!(f, "{}", EPSILON_CHAR),
            Token::Union => write!(f, "|"),
            Token::Concat => write!(f, "."),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
            Token::Optional => write!(f, "?"),
            Token::OpenGroup => write!(f, "("),
            Token::CloseGroup => write!(f, ")"),
        }
    }
}

/// An ordered sequence of tokens that renders back to expression text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream(Vec<Token>);

impl TokenStream {
    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.0.iter()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl AsRef<[Token]> for TokenStream {
    fn as_ref(&self) -> &[Token] {
        self.as_slice()
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|token| write!(f, "{}", token))
    }
}

/// Represents the kind of failure to tokenize an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeErr {
    /// Input was left unconsumed, starting at the contained position.
    Unconsumed(usize),
    Undefined(String),
}

impl std::fmt::Display for TokenizeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconsumed(pos) => write!(f, "unable to tokenize input at position {}", pos),
            Self::Undefined(err) => write!(f, "undefined tokenizer error: {}", err),
        }
    }
}

impl std::error::Error for TokenizeErr {}

/// Splits an expression into tokens. The mathematical epsilon is read as
/// `ε`, and a trailing lone backslash becomes [Token::Invalid].
///
/// # Example
///
/// ```
/// use automata_compiler::normalize::{tokenize, Token};
///
/// assert_eq!(
///     Ok(vec![Token::Symbol('a'), Token::Escaped('*'), Token::Epsilon]),
///     tokenize("a\\*𝜀")
/// );
/// ```
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, TokenizeErr> {
    let input = pattern
        .chars()
        .map(|c| match c {
            MATHEMATICAL_EPSILON => EPSILON_CHAR,
            other => other,
        })
        .enumerate()
        .collect::<Vec<(usize, char)>>();

    tokens()
        .parse(&input)
        .map_err(|err| TokenizeErr::Undefined(format!("{}", err)))
        .and_then(|ms| match ms {
            MatchStatus::Match {
                remainder, inner, ..
            } => match remainder.first() {
                Some(&(pos, _)) => Err(TokenizeErr::Unconsumed(pos)),
                None => Ok(inner),
            },
            MatchStatus::NoMatch(remainder) => Err(TokenizeErr::Unconsumed(
                remainder.first().map_or(0, |&(pos, _)| pos),
            )),
        })
}

fn tokens<'a>() -> impl Parser<'a, &'a [(usize, char)], Vec<Token>> {
    parcel::zero_or_more(token())
}

fn token<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(escaped(), || {
        parcel::or(operator(), || {
            parcel::or(epsilon(), || parcel::or(whitespace(), literal))
        })
    })
}

fn escaped<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::right(parcel::join(expect_character('\\'), any_character())).map(Token::Escaped)
}

fn operator<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    parcel::or(expect_character('|').map(|_| Token::Union), || {
        parcel::or(expect_character('.').map(|_| Token::Concat), || {
            parcel::or(expect_character('*').map(|_| Token::Star), || {
                parcel::or(expect_character('+').map(|_| Token::Plus), || {
                    parcel::or(expect_character('?').map(|_| Token::Optional), || {
                        parcel::or(expect_character('(').map(|_| Token::OpenGroup), || {
                            expect_character(')').map(|_| Token::CloseGroup)
                        })
                    })
                })
            })
        })
    })
}

fn epsilon<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    expect_character(EPSILON_CHAR).map(|_| Token::Epsilon)
}

fn whitespace<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    any_character()
        .predicate(|c: &char| c.is_whitespace())
        .map(Token::Whitespace)
}

fn literal<'a>() -> impl Parser<'a, &'a [(usize, char)], Token> {
    any_character().map(|c| {
        if c.is_alphanumeric() {
            Token::Symbol(c)
        } else {
            Token::Invalid(c)
        }
    })
}

fn any_character<'a>() -> impl Parser<'a, &'a [(usize, char)], char> {
    move |input: &'a [(usize, char)]| match input.first() {
        Some(&(pos, next)) => Ok(MatchStatus::Match {
            span: pos..pos + 1,
            remainder: &input[1..],
            inner: next,
        }),
        None => Ok(MatchStatus::NoMatch(input)),
    }
}

/// Rewrites `X+` as `X.X*` and `X?` as `(X|ε)`.
///
/// The operand `X` is the last literal, group or starred operand written so
/// far. Operand boundaries are tracked while scanning forward, so chains such
/// as `a*+` and `a+?` expand over the whole preceding operand. Sugar with no
/// preceding operand expands over an empty operand.
pub fn expand_sugar(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut groups: Vec<usize> = vec![];
    let mut last_operand: Option<usize> = None;

    for &token in tokens {
        match token {
            Token::Plus | Token::Optional => {
                let start = last_operand.unwrap_or(out.len());
                let operand = out.split_off(start);

                if token == Token::Plus {
                    out.extend(operand.iter().copied());
                    out.push(Token::Concat);
                    out.extend(operand);
                    out.push(Token::Star);
                } else {
                    out.push(Token::OpenGroup);
                    out.extend(operand);
                    out.extend([Token::Union, Token::Epsilon, Token::CloseGroup]);
                }

                last_operand = Some(start);
            }
            Token::OpenGroup => {
                groups.push(out.len());
                out.push(token);
                last_operand = None;
            }
            Token::CloseGroup => {
                // an unbalanced closer spans everything before it.
                last_operand = Some(groups.pop().unwrap_or(0));
                out.push(token);
            }
            Token::Star => out.push(token),
            Token::Union | Token::Concat => {
                out.push(token);
                last_operand = None;
            }
            _ => {
                last_operand = Some(out.len());
                out.push(token);
            }
        }
    }

    out
}

/// Inserts an explicit [Token::Concat] between every adjacent pair where the
/// first ends an operand and the second begins one.
pub fn insert_concatenation(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);

    for (idx, &token) in tokens.iter().enumerate() {
        out.push(token);

        match tokens.get(idx + 1) {
            Some(next) if token.ends_operand() && next.begins_operand() => {
                out.push(Token::Concat)
            }
            _ => (),
        }
    }

    out
}

/// Reduces an infix stream to postfix by operator precedence.
///
/// Operators already on the stack are emitted while their precedence is
/// greater than or equal to the incoming operator, grouping chains of equal
/// operators to the left. Unmatched closers are discarded and unmatched
/// openers are emitted at the end of the stream.
///
/// # Example
///
/// ```
/// use automata_compiler::normalize::{to_postfix, tokenize, TokenStream};
///
/// let infix = tokenize("a|b|c").unwrap();
/// assert_eq!("ab|c|", TokenStream::from(to_postfix(&infix)).to_string());
/// ```
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = vec![];

    for &token in tokens {
        match (token, token.precedence()) {
            (Token::OpenGroup, _) => stack.push(token),
            (Token::CloseGroup, _) => {
                while let Some(top) = stack.pop() {
                    if top == Token::OpenGroup {
                        break;
                    }
                    output.push(top);
                }
            }
            (_, Some(precedence)) => {
                while let Some(top) = stack.last().copied() {
                    if top.precedence() < Some(precedence) {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(token);
            }
            (_, None) => output.push(token),
        }
    }

    while let Some(top) = stack.pop() {
        output.push(top);
    }

    output
}

/// The intermediate forms of one normalized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The expression with its sugar expanded.
    pub expanded: TokenStream,
    /// The expanded expression with explicit concatenation.
    pub formatted: TokenStream,
    pub postfix: TokenStream,
}

impl Normalized {
    /// Returns the literal characters of the expression in order of first
    /// occurrence. Epsilon is never part of the alphabet.
    pub fn alphabet(&self) -> Vec<char> {
        let mut seen = HashSet::new();

        self.formatted
            .iter()
            .filter_map(Token::as_literal)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

/// Runs every normalization pass over a raw expression.
///
/// # Example
///
/// ```
/// use automata_compiler::normalize::normalize;
///
/// let normalized = normalize("(a|b)+").unwrap();
///
/// assert_eq!("(a|b).(a|b)*", normalized.expanded.to_string());
/// assert_eq!("ab|ab|*.", normalized.postfix.to_string());
/// assert_eq!(vec!['a', 'b'], normalized.alphabet());
/// ```
pub fn normalize(pattern: &str) -> Result<Normalized, TokenizeErr> {
    let tokens = tokenize(pattern)?;
    let expanded = expand_sugar(&tokens);
    let formatted = insert_concatenation(&expanded);
    let postfix = to_postfix(&formatted);

    Ok(Normalized {
        expanded: expanded.into(),
        formatted: formatted.into(),
        postfix: postfix.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(pattern: &str) -> (String, String, String) {
        let normalized = normalize(pattern).unwrap();

        (
            normalized.expanded.to_string(),
            normalized.formatted.to_string(),
            normalized.postfix.to_string(),
        )
    }

    #[test]
    fn should_tokenize_escapes_and_invalid_characters() {
        assert_eq!(
            Ok(vec![
                Token::Escaped('('),
                Token::Symbol('1'),
                Token::Whitespace(' '),
                Token::Invalid('$'),
                Token::Invalid('\\'),
            ]),
            tokenize("\\(1 $\\")
        );
    }

    #[test]
    fn should_treat_escaped_operators_as_literals() {
        let (expanded, formatted, postfix) = normalized("a\\+");

        assert_eq!("a\\+", expanded);
        assert_eq!("a.\\+", formatted);
        assert_eq!("a\\+.", postfix);
    }

    #[test]
    fn should_expand_plus_and_optional_sugar() {
        assert_eq!("a.a*", normalized("a+").0);
        assert_eq!("(a|ε)", normalized("a?").0);
        assert_eq!("b(a|c).(a|c)*", normalized("b(a|c)+").0);
        assert_eq!("x(\\?|ε)", normalized("x\\??").0);
    }

    #[test]
    fn should_extend_operand_over_preceding_stars_and_expansions() {
        assert_eq!("a*.a**", normalized("a*+").0);
        assert_eq!("(a.a*|ε)", normalized("a+?").0);
        assert_eq!("(((a|b)|ε)|ε)", normalized("(a|b)??").0);
    }

    #[test]
    fn should_expand_sugar_without_operand_over_nothing() {
        assert_eq!(".*", normalized("+").0);
        assert_eq!("a|(|ε)", normalized("a|?").0);
    }

    #[test]
    fn should_insert_explicit_concatenation() {
        assert_eq!("a.b", normalized("ab").1);
        assert_eq!("a*.(b|c).d", normalized("a*(b|c)d").1);
        assert_eq!("(a).(b)", normalized("(a)(b)").1);
        assert_eq!("a|b", normalized("a|b").1);
    }

    #[test]
    fn should_group_chained_operators_to_the_left() {
        assert_eq!("ab|c|", normalized("a|b|c").2);
        assert_eq!("ab.c.", normalized("a.b.c").2);
        assert_eq!("ab.c.", normalized("abc").2);
        assert_eq!("ab*.c.", normalized("ab*c").2);
        assert_eq!("ab.c|", normalized("ab|c").2);
        assert_eq!("abc|.", normalized("a(b|c)").2);
    }

    #[test]
    fn should_degrade_gracefully_on_unbalanced_groups() {
        assert_eq!("ab|", normalized("a|b)").2);
        assert_eq!("a(", normalized("(a").2);
    }

    #[test]
    fn should_derive_alphabet_in_first_occurrence_order() {
        let normalized = normalize("b(a|ε)\\.b?").unwrap();

        assert_eq!(vec!['b', 'a', '.'], normalized.alphabet());
    }
}
