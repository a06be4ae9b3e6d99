//! Simulators for evaluating input against a built automaton.

use super::dfa::{Dfa, StateName};
use super::nfa::{Nfa, StateId};
use super::sparse_set::SparseSet;
use super::symbol::Symbol;

pub trait PatternEvaluatorMut: Sized {
    /// The input interable type to be compared.
    type Item;

    fn initial_state(mut self) -> Self {
        self.initial_state_mut();
        self
    }

    /// Places the evaluator back in its initial state.
    fn initial_state_mut(&mut self);

    /// Returns a boolean signifying if the match is in a final state.
    fn is_in_accept_state(&self) -> bool;

    /// Attempts to advance to the next state, returning [None] once the
    /// evaluator can no longer reach an accepting state.
    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item>;

    /// Consumes the iterator, stopping at the first item that cannot be
    /// advanced over.
    fn matches<I>(&mut self, iter: I) -> bool
    where
        I: Iterator<Item = Self::Item>,
    {
        for item in iter {
            if self.advance_mut(&item).is_none() {
                return false;
            }
        }

        self.is_in_accept_state()
    }
}

/// Evaluates input against an [Nfa] by tracking every simultaneously active
/// state.
///
/// # Examples
///
/// ```
/// use automata_runtime::*;
/// use automata_runtime::matcher::*;
///
/// // q0 -a-> q1
/// let mut q0 = NfaState::new(StateId::from(0));
/// q0.insert_transition_mut(Symbol::Char('a'), StateId::from(1));
/// let nfa = Nfa::new(vec![q0, NfaState::new(StateId::from(1))], StateId::from(0), StateId::from(1));
///
/// let mut evaluator = NfaEvaluator::new(&nfa).initial_state();
/// assert_eq!(Some(&'a'), evaluator.advance_mut(&'a'));
/// assert!(evaluator.is_in_accept_state());
///
/// evaluator.initial_state_mut();
/// assert!(!evaluator.matches("aa".chars()));
/// ```
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    active: SparseSet,
    next: SparseSet,
    stack: Vec<StateId>,
}

impl<'a> NfaEvaluator<'a> {
    #[must_use]
    pub fn new(nfa: &'a Nfa) -> Self {
        let capacity = nfa.arena_len();

        Self {
            nfa,
            active: SparseSet::new(capacity),
            next: SparseSet::new(capacity),
            stack: Vec::new(),
        }
    }

    /// Returns the currently active states in the order they were reached.
    pub fn active_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.active.iter().map(|id| StateId::from(id as u32))
    }
}

/// Adds `seed` and every state epsilon-reachable from it to `set`.
fn close_over(nfa: &Nfa, set: &mut SparseSet, stack: &mut Vec<StateId>, seed: StateId) {
    stack.push(seed);

    while let Some(id) = stack.pop() {
        if set.insert(id.as_usize()) {
            stack.extend(nfa.targets(id, Symbol::Epsilon).iter().copied());
        }
    }
}

impl<'a> PatternEvaluatorMut for NfaEvaluator<'a> {
    type Item = char;

    fn initial_state_mut(&mut self) {
        let nfa = self.nfa;

        self.active.clear();
        close_over(nfa, &mut self.active, &mut self.stack, nfa.start());
    }

    fn is_in_accept_state(&self) -> bool {
        self.active.contains(&self.nfa.accept().as_usize())
    }

    fn advance_mut<'b>(&mut self, next: &'b Self::Item) -> Option<&'b Self::Item> {
        let nfa = self.nfa;
        let symbol = Symbol::Char(*next);

        self.next.clear();
        for id in self.active.iter() {
            for &target in nfa.targets(StateId::from(id as u32), symbol) {
                close_over(nfa, &mut self.next, &mut self.stack, target);
            }
        }

        core::mem::swap(&mut self.active, &mut self.next);
        (!self.active.is_empty()).then_some(next)
    }
}

/// Evaluates input against a [Dfa] by following its single active state.
///
/// # Examples
///
/// ```
/// use automata_runtime::*;
/// use automata_runtime::matcher::*;
///
/// let mut dfa = Dfa::new(vec!['a'], StateName::from("A"));
/// dfa.insert_state_mut(StateName::from("A"), false);
/// dfa.insert_state_mut(StateName::from("B"), true);
/// dfa.insert_transition_mut(StateName::from("A"), 'a', StateName::from("B"));
///
/// let mut evaluator = DfaEvaluator::new(&dfa).initial_state();
/// assert!(evaluator.matches("a".chars()));
///
/// // no transition out of B, the second character is rejected outright.
/// evaluator.initial_state_mut();
/// assert!(!evaluator.matches("aa".chars()));
/// ```
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: Option<&'a StateName>,
}

impl<'a> DfaEvaluator<'a> {
    #[must_use]
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: Some(dfa.start()),
        }
    }

    /// Returns the active state, or [None] once a transition was missing.
    pub fn current_state(&self) -> Option<&'a StateName> {
        self.current
    }
}

impl<'a> PatternEvaluatorMut for DfaEvaluator<'a> {
    type Item = char;

    fn initial_state_mut(&mut self) {
        self.current = Some(self.dfa.start());
    }

    fn is_in_accept_state(&self) -> bool {
        self.current
            .map_or(false, |state| self.dfa.is_accepting(state))
    }

    fn advance_mut<'b>(&mut self, next: &'b Self::Item) -> Option<&'b Self::Item> {
        let dfa = self.dfa;
        self.current = self
            .current
            .and_then(|state| dfa.transition(state, *next));

        self.current.map(|_| next)
    }
}

/// Returns `true` if the [Nfa] accepts the entire input.
pub fn simulate_nfa(nfa: &Nfa, input: &str) -> bool {
    NfaEvaluator::new(nfa).initial_state().matches(input.chars())
}

/// Returns `true` if the [Dfa] accepts the entire input.
pub fn simulate_dfa(dfa: &Dfa, input: &str) -> bool {
    DfaEvaluator::new(dfa).initial_state().matches(input.chars())
}
