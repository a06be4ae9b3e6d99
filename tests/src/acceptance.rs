use automata_compiler::batch::parse_batch;
use automata_compiler::*;
use automata_runtime::dot::{dfa_to_dot, nfa_to_dot};
use automata_runtime::*;

fn build(pattern: &str) -> Automata {
    match Automata::build(pattern) {
        Ok(automata) => automata,
        Err(e) => panic!("{:?} failed to build: {}", pattern, e),
    }
}

#[test]
fn should_agree_on_literal_cases() {
    let input_output = [
        ("a|b", vec!["a", "b"], vec!["ab", ""]),
        ("a*", vec!["", "a", "aaa"], vec!["b"]),
        ("a.b", vec!["ab"], vec!["", "a", "b", "ba", "aba"]),
        ("ab", vec!["ab"], vec!["a", "abab"]),
        ("a+", vec!["a", "aa"], vec![""]),
        ("a?", vec!["", "a"], vec!["aa"]),
        ("(a|b)*abb", vec!["abb", "aabb", "babb"], vec!["", "ab", "abba"]),
        ("0(0|1)*1", vec!["01", "0101", "0001"], vec!["0", "10", "0110"]),
        ("𝜀|x", vec!["", "x"], vec!["xx"]),
    ];

    for (test_case, (pattern, accepted, rejected)) in input_output.into_iter().enumerate() {
        let automata = build(pattern);

        for input in accepted {
            let verdict = automata.accepts(input);
            assert_eq!(
                (test_case, input, Verdict { nfa: true, dfa: true, minimized: true }),
                (test_case, input, verdict)
            );
        }
        for input in rejected {
            let verdict = automata.accepts(input);
            assert_eq!(
                (test_case, input, Verdict { nfa: false, dfa: false, minimized: false }),
                (test_case, input, verdict)
            );
        }
    }
}

#[test]
fn should_pin_postfix_of_chained_operators() {
    let input_output = [
        ("a|b|c", "ab|c|"),
        ("a.b.c", "ab.c."),
        ("ab*c", "ab*.c."),
        ("(a|b)*abb", "ab|*a.b.b."),
        ("a+b?", "aa*.bε|."),
    ];

    for (pattern, expected) in input_output {
        let normalized = normalize(pattern).unwrap();
        assert_eq!((pattern, expected), (pattern, normalized.postfix.to_string().as_str()));
    }
}

#[test]
fn should_fail_to_parse_invalid_symbols_without_panicking() {
    for pattern in ["a$b", "a-", "#", "a|", "()", "a b"] {
        assert!(
            matches!(Automata::build(pattern), Err(PipelineErr::Parse(_))),
            "{:?} should fail to parse",
            pattern
        );
    }
}

#[test]
fn should_minimize_textbook_expression_to_four_states() {
    let automata = build("(a|b)*abb");

    assert_eq!(5, automata.dfa.state_count());
    assert_eq!(4, automata.minimized.state_count());
    assert_eq!(1, automata.minimized.accepting().count());
}

#[test]
fn should_process_batch_lines_independently() {
    let batch = "# patterns\n\
                 a*;,a,aa\n\
                 a$;a\n\
                 b+\n\
                 (a|b)?;a,ab\n";

    let outcomes = parse_batch(batch)
        .map(|(line_no, parsed)| {
            let outcome = parsed.map_err(|e| e.to_string()).and_then(|line| {
                Automata::build(&line.pattern)
                    .map(|automata| {
                        line.inputs
                            .iter()
                            .map(|input| automata.accepts(input).minimized)
                            .collect::<Vec<_>>()
                    })
                    .map_err(|e| e.to_string())
            });
            (line_no, outcome.is_ok(), outcome.unwrap_or_default())
        })
        .collect::<Vec<_>>();

    assert_eq!(
        vec![
            (2, true, vec![true, true, true]),
            (3, false, vec![]),
            (4, false, vec![]),
            (5, true, vec![true, false]),
        ],
        outcomes
    );
}

#[test]
fn should_export_every_automaton_as_dot() {
    let automata = build("a|b");

    let mut nfa_dot = vec![];
    nfa_to_dot(&automata.nfa, &mut nfa_dot).unwrap();
    let nfa_dot = String::from_utf8(nfa_dot).unwrap();

    assert!(nfa_dot.starts_with("digraph nfa {\n\trankdir=LR;\n"));
    assert_eq!(
        automata.nfa.states().len(),
        nfa_dot.matches("shape=circle").count() + nfa_dot.matches("shape=doublecircle").count()
    );
    assert_eq!(1, nfa_dot.matches("shape=doublecircle").count());
    assert_eq!(4, nfa_dot.matches("label=\"ε\"").count());

    let mut dfa_dot = vec![];
    dfa_to_dot(&automata.minimized, &mut dfa_dot).unwrap();
    let dfa_dot = String::from_utf8(dfa_dot).unwrap();

    assert_eq!(automata.minimized.transitions().count(), dfa_dot.matches("label=").count());
    assert!(dfa_dot.contains(&format!("__start -> \"{}\";", automata.minimized.start())));
}

#[test]
fn should_keep_every_dfa_state_deterministic() {
    let automata = build("(a|b)*a(a|b)(a|b)");

    for dfa in [&automata.dfa, &automata.minimized] {
        for state in dfa.reachable_states() {
            for &symbol in dfa.alphabet() {
                let targets = dfa
                    .transitions()
                    .filter(|(from, s, _)| *from == state && *s == symbol)
                    .count();
                assert!(targets <= 1);
            }
        }
    }
}
