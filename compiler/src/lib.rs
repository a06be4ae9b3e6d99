//! Provides for the normalization and compilation of a regular expression
//! into nondeterministic, deterministic and minimal deterministic automata.
//!
//! # Example
//!
//! ```rust
//! // Each stage is exposed on its own, from the raw pattern to the minimal
//! // automaton.
//! use automata_compiler::{compile, minimize, normalize, parse, subset_construction};
//!
//! // Simulators for each automaton live in the `automata_runtime` crate.
//! use automata_runtime::{simulate_dfa, simulate_nfa};
//!
//! let normalized = normalize("(a|b)*abb").expect("failed to tokenize");
//! assert_eq!("ab|*a.b.b.", normalized.postfix.to_string());
//!
//! let expression = parse(normalized.postfix.as_slice()).expect("failed to parse");
//! let nfa = compile(&expression).expect("failed to compile");
//! let dfa = subset_construction(&nfa, &normalized.alphabet());
//! let minimized = minimize(&dfa);
//!
//! for input in ["abb", "babb"] {
//!     assert!(simulate_nfa(&nfa, input));
//!     assert!(simulate_dfa(&dfa, input));
//!     assert!(simulate_dfa(&minimized, input));
//! }
//!
//! assert_eq!(5, dfa.state_count());
//! assert_eq!(4, minimized.state_count());
//! ```

pub mod ast;
pub mod batch;
pub mod minimize;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod subset;
pub mod thompson;

pub use minimize::minimize;
pub use normalize::{normalize, Normalized, Token, TokenStream, TokenizeErr};
pub use parser::{parse, ParseErr, ParseErrKind};
pub use pipeline::{Automata, PipelineErr, Verdict};
pub use subset::subset_construction;
pub use thompson::{compile, CompileErr};
