//! Graphviz DOT rendering and plain text listings for built automata.

use std::fmt::Display;
use std::io::{self, Write};

use super::dfa::Dfa;
use super::nfa::Nfa;

/// Escapes a label for use inside a double-quoted DOT string.
fn quoted(label: impl Display) -> String {
    let escaped = label
        .to_string()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");

    format!("\"{}\"", escaped)
}

fn write_header(buffer: &mut impl Write, name: &str) -> io::Result<()> {
    writeln!(buffer, "digraph {} {{", name)?;
    writeln!(buffer, "\trankdir=LR;")?;
    writeln!(buffer, "\t__start [shape=point];")
}

/// Emits a DOT graph of every reachable state of the [Nfa].
///
/// # Examples
///
/// ```
/// use automata_runtime::*;
///
/// let mut q0 = NfaState::new(StateId::from(0));
/// q0.insert_transition_mut(Symbol::Epsilon, StateId::from(1));
/// let nfa = Nfa::new(vec![q0, NfaState::new(StateId::from(1))], StateId::from(0), StateId::from(1));
///
/// let mut buffer = vec![];
/// dot::nfa_to_dot(&nfa, &mut buffer).unwrap();
/// let dot = String::from_utf8(buffer).unwrap();
///
/// assert!(dot.contains("\t\"q1\" [shape=doublecircle];"));
/// assert!(dot.contains("\t\"q0\" -> \"q1\" [label=\"ε\"];"));
/// ```
pub fn nfa_to_dot<W: Write>(nfa: &Nfa, mut buffer: W) -> io::Result<()> {
    write_header(&mut buffer, "nfa")?;

    for &id in nfa.states() {
        let shape = if id == nfa.accept() {
            "doublecircle"
        } else {
            "circle"
        };
        writeln!(buffer, "\t{} [shape={}];", quoted(id), shape)?;
    }

    writeln!(buffer, "\t__start -> {};", quoted(nfa.start()))?;
    for (from, symbol, to) in nfa.edges() {
        writeln!(
            buffer,
            "\t{} -> {} [label={}];",
            quoted(from),
            quoted(to),
            quoted(symbol)
        )?;
    }

    writeln!(buffer, "}}")
}

/// Emits a DOT graph of every state of the [Dfa].
pub fn dfa_to_dot<W: Write>(dfa: &Dfa, mut buffer: W) -> io::Result<()> {
    write_header(&mut buffer, "dfa")?;

    for name in dfa.states() {
        let shape = if dfa.is_accepting(name) {
            "doublecircle"
        } else {
            "circle"
        };
        writeln!(buffer, "\t{} [shape={}];", quoted(name), shape)?;
    }

    writeln!(buffer, "\t__start -> {};", quoted(dfa.start()))?;
    for (from, symbol, to) in dfa.transitions() {
        writeln!(
            buffer,
            "\t{} -> {} [label={}];",
            quoted(from),
            quoted(to),
            quoted(symbol)
        )?;
    }

    writeln!(buffer, "}}")
}

impl Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start: {}", self.start())?;
        writeln!(f, "accept: {}", self.accept())?;
        for (from, symbol, to) in self.edges() {
            writeln!(f, "{} --{}--> {}", from, symbol, to)?;
        }

        Ok(())
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accepting = self
            .accepting()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(f, "start: {}", self.start())?;
        writeln!(f, "accepting: {}", accepting)?;
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "{} --{}--> {}", from, symbol, to)?;
        }

        Ok(())
    }
}
