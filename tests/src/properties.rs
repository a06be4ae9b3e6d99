//! Property tests checking every automaton against a reference matcher that
//! walks the expression tree directly.

use std::collections::BTreeSet;

use automata_compiler::ast::Expr;
use automata_compiler::{minimize, normalize, parse, Automata};
use automata_runtime::Symbol;
use proptest::prelude::*;

const ALPHABET: &[char] = &['a', 'b', 'c'];

fn arb_expr(max_depth: u32) -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        4 => prop::sample::select(ALPHABET).prop_map(Expr::literal),
        1 => Just(Expr::epsilon()),
    ];

    leaf.prop_recursive(max_depth, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expr::concat(lhs, rhs)),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expr::union(lhs, rhs)),
            inner.prop_map(Expr::star),
        ]
    })
}

fn arb_input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Returns every position at which a match of `expr` starting at `start`
/// can end.
fn match_ends(expr: &Expr, input: &[char], start: usize) -> BTreeSet<usize> {
    match expr {
        Expr::Literal(Symbol::Epsilon) => BTreeSet::from([start]),
        Expr::Literal(Symbol::Char(c)) => match input.get(start) {
            Some(next) if next == c => BTreeSet::from([start + 1]),
            _ => BTreeSet::new(),
        },
        Expr::Concat(lhs, rhs) => match_ends(lhs, input, start)
            .into_iter()
            .flat_map(|mid| match_ends(rhs, input, mid))
            .collect(),
        Expr::Union(lhs, rhs) => {
            let mut ends = match_ends(lhs, input, start);
            ends.extend(match_ends(rhs, input, start));
            ends
        }
        Expr::Star(child) => {
            let mut ends = BTreeSet::from([start]);
            let mut frontier = vec![start];

            while let Some(pos) = frontier.pop() {
                for end in match_ends(child, input, pos) {
                    if ends.insert(end) {
                        frontier.push(end);
                    }
                }
            }

            ends
        }
    }
}

fn reference_accepts(expr: &Expr, input: &str) -> bool {
    let input = input.chars().collect::<Vec<_>>();
    match_ends(expr, &input, 0).contains(&input.len())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn should_rebuild_the_same_tree_from_its_rendering(expr in arb_expr(5)) {
        let rendered = expr.to_string();
        let normalized = normalize(&rendered).unwrap();

        prop_assert_eq!(Ok(expr), parse(normalized.postfix.as_slice()));
    }

    #[test]
    fn should_preserve_acceptance_across_every_stage(
        expr in arb_expr(5),
        inputs in prop::collection::vec(arb_input(), 1..8),
    ) {
        let automata = Automata::build(&expr.to_string()).unwrap();

        for input in inputs {
            let expected = reference_accepts(&expr, &input);
            let verdict = automata.accepts(&input);

            prop_assert_eq!(expected, verdict.nfa, "nfa on {:?}", input);
            prop_assert_eq!(expected, verdict.dfa, "dfa on {:?}", input);
            prop_assert_eq!(expected, verdict.minimized, "minimized on {:?}", input);
        }
    }

    #[test]
    fn should_never_grow_when_minimizing(expr in arb_expr(5)) {
        let automata = Automata::build(&expr.to_string()).unwrap();
        let reminimized = minimize(&automata.minimized);

        prop_assert!(automata.minimized.state_count() <= automata.dfa.state_count());
        prop_assert_eq!(automata.minimized.state_count(), reminimized.state_count());
    }

    #[test]
    fn should_record_at_most_one_transition_per_symbol(expr in arb_expr(5)) {
        let automata = Automata::build(&expr.to_string()).unwrap();

        for dfa in [&automata.dfa, &automata.minimized] {
            let mut seen = BTreeSet::new();
            for (from, symbol, _) in dfa.transitions() {
                prop_assert!(seen.insert((from.clone(), symbol)));
            }
        }
    }
}
