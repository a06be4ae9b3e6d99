//! Determinizes a nondeterministic automaton by subset construction.

use std::collections::VecDeque;

use automata_runtime::{Dfa, Nfa, StateName, StateSet};
use log::{debug, trace};

/// Builds a deterministic automaton over `alphabet` recognizing the same
/// language as `nfa`.
///
/// Each deterministic state stands for an epsilon-closed set of
/// nondeterministic states and is named by [StateName::from_set]. Sets are
/// discovered breadth first, so state order follows discovery order. Symbols
/// leading to an empty set produce no transition.
///
/// # Example
///
/// ```
/// use automata_compiler::ast::Expr;
/// use automata_compiler::subset::subset_construction;
/// use automata_compiler::thompson::compile;
/// use automata_runtime::*;
///
/// // approximate to `a|b`
/// let nfa = compile(&Expr::union(Expr::literal('a'), Expr::literal('b'))).unwrap();
/// let dfa = subset_construction(&nfa, &['a', 'b']);
///
/// assert_eq!("{0,2,4}", dfa.start().as_str());
/// assert_eq!(3, dfa.state_count());
/// assert!(simulate_dfa(&dfa, "b"));
/// assert!(!simulate_dfa(&dfa, "ab"));
/// ```
pub fn subset_construction(nfa: &Nfa, alphabet: &[char]) -> Dfa {
    let start_set = nfa.epsilon_closure(&[nfa.start()].into_iter().collect());
    let start = StateName::from_set(&start_set);

    let mut dfa = Dfa::new(alphabet.to_vec(), start.clone());
    dfa.insert_state_mut(start, start_set.contains(&nfa.accept()));

    let alphabet = dfa.alphabet().to_vec();
    let mut worklist: VecDeque<StateSet> = VecDeque::from([start_set]);

    while let Some(set) = worklist.pop_front() {
        let from = StateName::from_set(&set);

        for &symbol in &alphabet {
            let next = nfa.epsilon_closure(&nfa.move_on(&set, symbol));
            if next.is_empty() {
                continue;
            }

            let to = StateName::from_set(&next);
            if dfa.insert_state_mut(to.clone(), next.contains(&nfa.accept())) {
                trace!("discovered {} from {} over '{}'", to, from, symbol);
                worklist.push_back(next);
            }

            dfa.insert_transition_mut(from.clone(), symbol, to);
        }
    }

    debug!(
        "subset construction produced {} states over {} symbols",
        dfa.state_count(),
        dfa.alphabet().len()
    );

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::thompson::compile;

    fn name(n: &str) -> StateName {
        StateName::from(n)
    }

    #[test]
    fn should_name_states_by_sorted_closure() {
        // approximate to `a*`
        let nfa = compile(&Expr::star(Expr::literal('a'))).unwrap();
        let dfa = subset_construction(&nfa, &['a']);

        assert_eq!(&name("{0,1,2}"), dfa.start());
        assert_eq!(
            vec![&name("{0,1,2}"), &name("{1,2,3}")],
            dfa.states().collect::<Vec<_>>()
        );
        assert_eq!(Some(&name("{1,2,3}")), dfa.transition(&name("{0,1,2}"), 'a'));
        assert_eq!(Some(&name("{1,2,3}")), dfa.transition(&name("{1,2,3}"), 'a'));
        assert!(dfa.is_accepting(&name("{0,1,2}")));
        assert!(dfa.is_accepting(&name("{1,2,3}")));
    }

    #[test]
    fn should_leave_dead_transitions_implicit() {
        // approximate to `ab`
        let nfa = compile(&Expr::concat(Expr::literal('a'), Expr::literal('b'))).unwrap();
        let dfa = subset_construction(&nfa, &['a', 'b']);

        assert_eq!(3, dfa.state_count());
        assert_eq!(None, dfa.transition(dfa.start(), 'b'));
        assert_eq!(2, dfa.transitions().count());
    }

    #[test]
    fn should_ignore_symbols_outside_the_alphabet() {
        let nfa = compile(&Expr::concat(Expr::literal('a'), Expr::literal('b'))).unwrap();
        let dfa = subset_construction(&nfa, &['a']);

        assert_eq!(2, dfa.state_count());
        assert_eq!(0, dfa.accepting().count());
    }

    #[test]
    fn should_determinize_textbook_expression() {
        // (a|b)*abb
        let a_or_b = Expr::union(Expr::literal('a'), Expr::literal('b'));
        let expr = Expr::concat(
            Expr::concat(
                Expr::concat(Expr::star(a_or_b), Expr::literal('a')),
                Expr::literal('b'),
            ),
            Expr::literal('b'),
        );
        let nfa = compile(&expr).unwrap();
        let dfa = subset_construction(&nfa, &['a', 'b']);

        assert_eq!(5, dfa.state_count());
        assert_eq!(1, dfa.accepting().count());
        // every state of this language has a move on both symbols.
        for state in dfa.states() {
            assert!(dfa
                .alphabet()
                .iter()
                .all(|&symbol| dfa.transition(state, symbol).is_some()));
        }
    }
}
