//! The deterministic automaton produced by subset construction and by
//! minimization.
//!
//! The transition table is partial: a missing `(state, symbol)` entry is an
//! implicit rejection, no dead state is ever materialized.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt::Display;

use indexmap::IndexMap;

use super::nfa::StateSet;

/// The name of a deterministic state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateName(String);

impl StateName {
    /// Derives the canonical name of a set of nondeterministic states. Equal
    /// sets always produce equal names.
    ///
    /// # Example
    ///
    /// ```
    /// use automata_runtime::{StateId, StateName, StateSet};
    ///
    /// let set: StateSet = [3, 0, 1].into_iter().map(StateId::from).collect();
    /// assert_eq!("{0,1,3}", StateName::from_set(&set).as_str());
    /// ```
    pub fn from_set(states: &StateSet) -> Self {
        let ids = states
            .iter()
            .map(|id| id.as_u32().to_string())
            .collect::<Vec<_>>()
            .join(",");

        Self(format!("{{{}}}", ids))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for StateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DfaState {
    accepting: bool,
    transitions: BTreeMap<char, StateName>,
}

/// A deterministic automaton over an explicit alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Vec<char>,
    states: IndexMap<StateName, DfaState>,
    start: StateName,
}

impl Dfa {
    /// Instantiates an automaton with no states. Duplicate alphabet symbols
    /// are dropped, keeping the first occurrence.
    #[must_use]
    pub fn new(alphabet: Vec<char>, start: StateName) -> Self {
        let mut seen = HashSet::new();
        let alphabet = alphabet.into_iter().filter(|c| seen.insert(*c)).collect();

        Self {
            alphabet,
            states: IndexMap::new(),
            start,
        }
    }

    /// Inserts a state, returning `false` if it was already defined. An
    /// existing state keeps its transitions and accepting flag.
    pub fn insert_state_mut(&mut self, name: StateName, accepting: bool) -> bool {
        if self.states.contains_key(&name) {
            return false;
        }

        self.states.insert(
            name,
            DfaState {
                accepting,
                transitions: BTreeMap::new(),
            },
        );
        true
    }

    /// Records the single transition of `from` over `symbol`, replacing any
    /// previous target. The source state is created if undefined.
    pub fn insert_transition_mut(&mut self, from: StateName, symbol: char, to: StateName) {
        self.states
            .entry(from)
            .or_default()
            .transitions
            .insert(symbol, to);
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn start(&self) -> &StateName {
        &self.start
    }

    /// Iterates over state names in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &StateName> + '_ {
        self.states.keys()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn contains_state(&self, name: &StateName) -> bool {
        self.states.contains_key(name)
    }

    pub fn is_accepting(&self, name: &StateName) -> bool {
        self.states
            .get(name)
            .map_or(false, |state| state.accepting)
    }

    /// Iterates over accepting state names in insertion order.
    pub fn accepting(&self) -> impl Iterator<Item = &StateName> + '_ {
        self.states
            .iter()
            .filter(|(_, state)| state.accepting)
            .map(|(name, _)| name)
    }

    /// Looks up the target of `from` over `symbol`.
    pub fn transition(&self, from: &StateName, symbol: char) -> Option<&StateName> {
        self.states
            .get(from)
            .and_then(|state| state.transitions.get(&symbol))
    }

    /// Iterates over every `(source, symbol, target)` entry, sources in
    /// insertion order and symbols sorted.
    pub fn transitions(&self) -> impl Iterator<Item = (&StateName, char, &StateName)> + '_ {
        self.states.iter().flat_map(|(from, state)| {
            state
                .transitions
                .iter()
                .map(move |(symbol, to)| (from, *symbol, to))
        })
    }

    /// Returns the states reachable from the start state in breadth-first
    /// order, following alphabet symbols only.
    pub fn reachable_states(&self) -> Vec<&StateName> {
        let mut reachable = vec![];
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some((start, _)) = self.states.get_key_value(&self.start) {
            seen.insert(start);
            queue.push_back(start);
        }

        while let Some(state) = queue.pop_front() {
            reachable.push(state);

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }
}
