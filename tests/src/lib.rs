//! Cross-crate acceptance and property tests for the automata pipeline.

#[cfg(test)]
mod acceptance;
#[cfg(test)]
mod properties;
