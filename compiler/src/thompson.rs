//! Lowers an expression tree into a nondeterministic automaton by Thompson
//! construction.
//!
//! # Example
//!
//! ```
//! use automata_compiler::ast::Expr;
//! use automata_compiler::thompson::compile;
//! use automata_runtime::*;
//!
//! // approximate to `a*`
//! let nfa = compile(&Expr::star(Expr::literal('a'))).unwrap();
//!
//! assert_eq!(StateId::from(0), nfa.start());
//! assert_eq!(StateId::from(1), nfa.accept());
//! assert_eq!(4, nfa.states().len());
//! assert!(simulate_nfa(&nfa, "aaa"));
//! ```

use automata_runtime::{Nfa, NfaState, StateId, Symbol};
use log::debug;

use super::ast::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErr {
    /// No expression tree was supplied.
    MissingRoot,
}

impl std::fmt::Display for CompileErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "no expression tree supplied to compile"),
        }
    }
}

impl std::error::Error for CompileErr {}

/// A partially built automaton with a single entry and a single exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

impl Fragment {
    fn new(start: StateId, accept: StateId) -> Self {
        Self { start, accept }
    }
}

/// Construction-time working state. Identifiers are handed out in
/// allocation order and equal the state's index in the arena.
#[derive(Default)]
struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn allocate(&mut self) -> StateId {
        let id = StateId::from(self.states.len() as u32);
        self.states.push(NfaState::new(id));
        id
    }

    fn connect(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        if let Some(state) = self.states.get_mut(from.as_usize()) {
            state.insert_transition_mut(symbol, to);
        }
    }

    fn lower(&mut self, expr: &Expr) -> Fragment {
        match expr {
            Expr::Literal(symbol) => {
                let start = self.allocate();
                let accept = self.allocate();
                self.connect(start, *symbol, accept);

                Fragment::new(start, accept)
            }
            Expr::Concat(lhs, rhs) => {
                let lhs = self.lower(lhs);
                let rhs = self.lower(rhs);
                self.connect(lhs.accept, Symbol::Epsilon, rhs.start);

                Fragment::new(lhs.start, rhs.accept)
            }
            Expr::Union(lhs, rhs) => {
                let start = self.allocate();
                let accept = self.allocate();
                let lhs = self.lower(lhs);
                let rhs = self.lower(rhs);

                self.connect(start, Symbol::Epsilon, lhs.start);
                self.connect(start, Symbol::Epsilon, rhs.start);
                self.connect(lhs.accept, Symbol::Epsilon, accept);
                self.connect(rhs.accept, Symbol::Epsilon, accept);

                Fragment::new(start, accept)
            }
            Expr::Star(child) => {
                let start = self.allocate();
                let accept = self.allocate();
                let child = self.lower(child);

                self.connect(start, Symbol::Epsilon, child.start);
                self.connect(start, Symbol::Epsilon, accept);
                self.connect(child.accept, Symbol::Epsilon, child.start);
                self.connect(child.accept, Symbol::Epsilon, accept);

                Fragment::new(start, accept)
            }
        }
    }
}

/// Builds an automaton accepting exactly the language of the tree. An absent
/// tree is rejected before any state is allocated.
pub fn compile<'a>(root: impl Into<Option<&'a Expr>>) -> Result<Nfa, CompileErr> {
    let root = root.into().ok_or(CompileErr::MissingRoot)?;

    let mut builder = Builder::default();
    let Fragment { start, accept } = builder.lower(root);
    let nfa = Nfa::new(builder.states, start, accept);

    debug!(
        "thompson construction allocated {} states, start {} accept {}",
        nfa.arena_len(),
        start,
        accept
    );

    Ok(nfa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_runtime::{simulate_nfa, StateSet};

    fn id(n: u32) -> StateId {
        StateId::from(n)
    }

    #[test]
    fn should_reject_missing_root() {
        assert_eq!(Err(CompileErr::MissingRoot), compile(None::<&Expr>));
    }

    #[test]
    fn should_wire_literal_fragment() {
        let nfa = compile(&Expr::literal('a')).unwrap();

        assert_eq!((id(0), id(1)), (nfa.start(), nfa.accept()));
        assert_eq!(
            vec![(id(0), Symbol::Char('a'), id(1))],
            nfa.edges().collect::<Vec<_>>()
        );
    }

    #[test]
    fn should_wire_union_around_both_branches() {
        let nfa = compile(&Expr::union(Expr::literal('a'), Expr::literal('b'))).unwrap();

        assert_eq!((id(0), id(1)), (nfa.start(), nfa.accept()));
        assert_eq!(&[id(2), id(4)], nfa.targets(id(0), Symbol::Epsilon));
        assert_eq!(&[id(1)], nfa.targets(id(3), Symbol::Epsilon));
        assert_eq!(&[id(1)], nfa.targets(id(5), Symbol::Epsilon));
    }

    #[test]
    fn should_wire_star_with_skip_and_loop_edges() {
        let nfa = compile(&Expr::star(Expr::literal('a'))).unwrap();

        assert_eq!(&[id(2), id(1)], nfa.targets(id(0), Symbol::Epsilon));
        assert_eq!(&[id(2), id(1)], nfa.targets(id(3), Symbol::Epsilon));

        let start: StateSet = [id(0)].into_iter().collect();
        assert_eq!(
            [0, 1, 2].into_iter().map(id).collect::<StateSet>(),
            nfa.epsilon_closure(&start)
        );
    }

    #[test]
    fn should_assign_unique_identifiers_across_the_build() {
        // ((a.b)|c)*
        let expr = Expr::star(Expr::union(
            Expr::concat(Expr::literal('a'), Expr::literal('b')),
            Expr::literal('c'),
        ));
        let nfa = compile(&expr).unwrap();

        assert_eq!(10, nfa.arena_len());
        assert_eq!(10, nfa.states().len());
        for (n, state) in nfa.states().iter().enumerate() {
            assert_eq!(id(n as u32), *state);
        }
    }

    #[test]
    fn should_accept_the_language_of_the_tree() {
        let expr = Expr::concat(
            Expr::literal('a'),
            Expr::union(Expr::literal('b'), Expr::epsilon()),
        );
        let nfa = compile(&expr).unwrap();

        assert!(simulate_nfa(&nfa, "a"));
        assert!(simulate_nfa(&nfa, "ab"));
        assert!(!simulate_nfa(&nfa, "b"));
        assert!(!simulate_nfa(&nfa, "abb"));
    }
}
