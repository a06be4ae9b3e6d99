use std::fmt::Display;

/// The character used to spell an epsilon in expressions and diagrams.
pub const EPSILON_CHAR: char = 'ε';

/// A transition label. Either a single input character or the empty
/// transition, which consumes no input.
///
/// Ordering places `Epsilon` before every character so that transition tables
/// keyed by symbol iterate in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Returns `true` if the symbol is the empty transition.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the consumed character, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(*c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        if c == EPSILON_CHAR {
            Symbol::Epsilon
        } else {
            Symbol::Char(c)
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "{}", EPSILON_CHAR),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_order_epsilon_before_characters() {
        let mut symbols = vec![Symbol::Char('b'), Symbol::Epsilon, Symbol::Char('a')];
        symbols.sort();

        assert_eq!(
            vec![Symbol::Epsilon, Symbol::Char('a'), Symbol::Char('b')],
            symbols
        );
    }

    #[test]
    fn should_map_epsilon_marker_to_epsilon_symbol() {
        assert_eq!(Symbol::Epsilon, Symbol::from('ε'));
        assert_eq!(Symbol::Char('a'), Symbol::from('a'));
        assert_eq!(None, Symbol::Epsilon.as_char());
        assert_eq!("ε", Symbol::Epsilon.to_string());
    }
}
