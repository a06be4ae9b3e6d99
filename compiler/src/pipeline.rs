//! Drives an expression through every stage, keeping each intermediate.

use automata_runtime::{simulate_dfa, simulate_nfa, Dfa, Nfa};
use log::debug;

use super::ast::Expr;
use super::minimize::minimize;
use super::normalize::{normalize, Normalized, TokenizeErr};
use super::parser::{parse, ParseErr};
use super::subset::subset_construction;
use super::thompson::{compile, CompileErr};

/// Any failure that stops an expression from reaching an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineErr {
    Tokenize(TokenizeErr),
    Parse(ParseErr),
    Compile(CompileErr),
}

impl std::fmt::Display for PipelineErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenize(err) => write!(f, "tokenizer error: {}", err),
            Self::Parse(err) => write!(f, "parse error: {}", err),
            Self::Compile(err) => write!(f, "compile error: {}", err),
        }
    }
}

impl std::error::Error for PipelineErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tokenize(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Compile(err) => Some(err),
        }
    }
}

impl From<TokenizeErr> for PipelineErr {
    fn from(src: TokenizeErr) -> Self {
        Self::Tokenize(src)
    }
}

impl From<ParseErr> for PipelineErr {
    fn from(src: ParseErr) -> Self {
        Self::Parse(src)
    }
}

impl From<CompileErr> for PipelineErr {
    fn from(src: CompileErr) -> Self {
        Self::Compile(src)
    }
}

/// The verdict of each simulator for a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub nfa: bool,
    pub dfa: bool,
    pub minimized: bool,
}

impl Verdict {
    /// Returns `true` if every simulator reached the same verdict.
    pub fn is_consistent(&self) -> bool {
        self.nfa == self.dfa && self.dfa == self.minimized
    }
}

/// Every artifact built from one expression.
#[derive(Debug, Clone)]
pub struct Automata {
    pub normalized: Normalized,
    pub expression: Expr,
    pub alphabet: Vec<char>,
    pub nfa: Nfa,
    pub dfa: Dfa,
    pub minimized: Dfa,
}

impl Automata {
    /// Runs a raw expression through normalization, tree building, Thompson
    /// construction, subset construction and minimization.
    ///
    /// # Example
    ///
    /// ```
    /// use automata_compiler::pipeline::Automata;
    ///
    /// let automata = Automata::build("a+").unwrap();
    ///
    /// assert_eq!("a.a*", automata.normalized.expanded.to_string());
    /// assert!(automata.accepts("aa").minimized);
    /// assert!(!automata.accepts("").nfa);
    /// ```
    pub fn build(pattern: &str) -> Result<Self, PipelineErr> {
        let normalized = normalize(pattern)?;
        let expression = parse(normalized.postfix.as_slice())?;
        let alphabet = normalized.alphabet();
        let nfa = compile(&expression)?;
        let dfa = subset_construction(&nfa, &alphabet);
        let minimized = minimize(&dfa);

        debug!(
            "built {:?}: postfix {}, {} nfa states, {} dfa states, {} minimized",
            pattern,
            normalized.postfix,
            nfa.states().len(),
            dfa.state_count(),
            minimized.state_count()
        );

        Ok(Self {
            normalized,
            expression,
            alphabet,
            nfa,
            dfa,
            minimized,
        })
    }

    /// Simulates `input` against every automaton.
    pub fn accepts(&self, input: &str) -> Verdict {
        Verdict {
            nfa: simulate_nfa(&self.nfa, input),
            dfa: simulate_dfa(&self.dfa, input),
            minimized: simulate_dfa(&self.minimized, input),
        }
    }
}
