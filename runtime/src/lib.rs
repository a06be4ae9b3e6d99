//! Automaton representations and simulators shared by the compiler and its
//! consumers.
//!
//! Nondeterministic automata are stored as an arena of [NfaState]s addressed
//! by [StateId]. Deterministic automata name their states with a [StateName]
//! and keep a partial transition table.
//!
//! # Example
//!
//! ```
//! use automata_runtime::*;
//!
//! // a single `x` transition from the start to the accept state.
//! let mut start = NfaState::new(StateId::from(0));
//! start.insert_transition_mut(Symbol::Char('x'), StateId::from(1));
//! let nfa = Nfa::new(vec![start, NfaState::new(StateId::from(1))], StateId::from(0), StateId::from(1));
//!
//! assert!(simulate_nfa(&nfa, "x"));
//! assert!(!simulate_nfa(&nfa, "xx"));
//! ```

pub mod dfa;
pub mod dot;
pub mod matcher;
pub mod nfa;
pub mod sparse_set;
mod symbol;

pub use dfa::{Dfa, StateName};
pub use matcher::{simulate_dfa, simulate_nfa};
pub use nfa::{Nfa, NfaState, StateId, StateSet};
pub use symbol::{Symbol, EPSILON_CHAR};
