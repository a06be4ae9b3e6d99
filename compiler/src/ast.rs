use std::fmt::Display;

use automata_runtime::Symbol;

/// A regular expression tree over the four primitive operations. Every node
/// owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Symbol),
    Concat(Box<Expr>, Box<Expr>),
    Union(Box<Expr>, Box<Expr>),
    Star(Box<Expr>),
}

impl Expr {
    pub fn literal(c: char) -> Self {
        Expr::Literal(Symbol::from(c))
    }

    pub fn epsilon() -> Self {
        Expr::Literal(Symbol::Epsilon)
    }

    pub fn concat(lhs: Expr, rhs: Expr) -> Self {
        Expr::Concat(Box::new(lhs), Box::new(rhs))
    }

    pub fn union(lhs: Expr, rhs: Expr) -> Self {
        Expr::Union(Box::new(lhs), Box::new(rhs))
    }

    pub fn star(child: Expr) -> Self {
        Expr::Star(Box::new(child))
    }

    /// The number of nodes on the longest path from this node to a leaf,
    /// inclusive.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) => 1,
            Expr::Concat(lhs, rhs) | Expr::Union(lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
            Expr::Star(child) => 1 + child.depth(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Expr::Literal(_) => 1,
            Expr::Concat(lhs, rhs) | Expr::Union(lhs, rhs) => lhs.leaf_count() + rhs.leaf_count(),
            Expr::Star(child) => child.leaf_count(),
        }
    }
}

/// Renders a fully parenthesized expression that tokenizes back into the
/// same tree. Literals that are not letters or digits are escaped.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(Symbol::Epsilon) => write!(f, "{}", Symbol::Epsilon),
            Expr::Literal(Symbol::Char(c)) if c.is_alphanumeric() => write!(f, "{}", c),
            Expr::Literal(Symbol::Char(c)) => write!(f, "\\{}", c),
            Expr::Concat(lhs, rhs) => write!(f, "({}.{})", lhs, rhs),
            Expr::Union(lhs, rhs) => write!(f, "({}|{})", lhs, rhs),
            Expr::Star(child) => write!(f, "{}*", child),
        }
    }
}
