//! The nondeterministic automaton produced by Thompson construction.
//!
//! States live in an arena and are addressed by their [StateId]. Edges only
//! ever reference identifiers, never the states themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use super::symbol::Symbol;

/// A sorted set of nondeterministic states.
pub type StateSet = BTreeSet<StateId>;

/// An index into the state arena of an [Nfa].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A single state and the edges leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    id: StateId,
    transitions: BTreeMap<Symbol, Vec<StateId>>,
}

impl NfaState {
    #[must_use]
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            transitions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Appends an edge labelled `symbol` to `target`.
    pub fn insert_transition_mut(&mut self, symbol: Symbol, target: StateId) {
        self.transitions.entry(symbol).or_default().push(target);
    }

    /// Returns the targets reached over `symbol`, in insertion order.
    pub fn targets(&self, symbol: Symbol) -> &[StateId] {
        self.transitions
            .get(&symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over every `(symbol, targets)` pair in symbol order.
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, &[StateId])> + '_ {
        self.transitions
            .iter()
            .map(|(symbol, targets)| (*symbol, targets.as_slice()))
    }
}

/// A nondeterministic automaton with exactly one start and one accept state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    arena: Vec<NfaState>,
    start: StateId,
    accept: StateId,
    reachable: Vec<StateId>,
}

impl Nfa {
    /// Takes ownership of a state arena, indexed by identifier, and records
    /// every state reachable from `start`.
    #[must_use]
    pub fn new(arena: Vec<NfaState>, start: StateId, accept: StateId) -> Self {
        let reachable = reachable_from(&arena, start);

        Self {
            arena,
            start,
            accept,
            reachable,
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// The states reachable from the start state, sorted by identifier.
    pub fn states(&self) -> &[StateId] {
        &self.reachable
    }

    /// Borrows a state by its identifier if it exists in the arena.
    pub fn state(&self, id: StateId) -> Option<&NfaState> {
        self.arena.get(id.as_usize())
    }

    /// The number of states allocated while building the automaton.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// Returns the targets of `id` over `symbol`. Unknown states have no edges.
    pub fn targets(&self, id: StateId, symbol: Symbol) -> &[StateId] {
        self.state(id)
            .map(|state| state.targets(symbol))
            .unwrap_or_default()
    }

    /// Returns every non-epsilon character labelling a reachable edge, sorted.
    pub fn symbols(&self) -> Vec<char> {
        self.edges()
            .filter_map(|(_, symbol, _)| symbol.as_char())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Iterates over the `(source, symbol, target)` edges of reachable
    /// states, ordered by source then symbol.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.reachable
            .iter()
            .filter_map(|&id| self.state(id))
            .flat_map(|state| {
                state.transitions().flat_map(move |(symbol, targets)| {
                    targets
                        .iter()
                        .map(move |&target| (state.id(), symbol, target))
                })
            })
    }

    /// Returns every state reachable from `states` over epsilon edges alone,
    /// including `states` themselves.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(id) = stack.pop() {
            for &target in self.targets(id, Symbol::Epsilon) {
                if closure.insert(target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// Returns the union of the targets of `states` over `symbol`. The result
    /// is not epsilon-closed.
    pub fn move_on(&self, states: &StateSet, symbol: char) -> StateSet {
        states
            .iter()
            .flat_map(|&id| self.targets(id, Symbol::Char(symbol)))
            .copied()
            .collect()
    }
}

fn reachable_from(arena: &[NfaState], start: StateId) -> Vec<StateId> {
    let mut seen = StateSet::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }

        if let Some(state) = arena.get(id.as_usize()) {
            stack.extend(
                state
                    .transitions()
                    .flat_map(|(_, targets)| targets.iter().copied()),
            );
        }
    }

    seen.into_iter().collect()
}
