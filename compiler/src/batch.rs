//! Reads batch files of `pattern;input,input,...` lines.
//!
//! Blank lines and lines starting with `#` are skipped. A malformed line is
//! reported on its own and never stops the remainder of the batch.

/// Represents the kind of malformed batch line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchLineErrKind {
    /// The line did not split into a pattern and an input field, holding the
    /// number of `;` separated fields found.
    WrongFieldCount(usize),
    EmptyPattern,
    EmptyInputs,
}

/// A malformed batch line, including the kind of error and any optional
/// enriching data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLineErr {
    /// The type of triggered error.
    kind: BatchLineErrKind,
    /// Additional error data.
    data: Option<String>,
}

impl BatchLineErr {
    /// Instantiates a new error.
    pub fn new(kind: BatchLineErrKind) -> Self {
        Self { kind, data: None }
    }

    /// Associates additional data with the error, returning the modified error.
    pub fn with_data(mut self, data: String) -> Self {
        self.data = Some(data);
        self
    }

    pub fn kind(&self) -> BatchLineErrKind {
        self.kind
    }
}

impl std::fmt::Display for BatchLineErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (data, padding) = if let Some(data) = &self.data {
            (data.as_str(), ": ")
        } else {
            ("", "")
        };
        match self.kind {
            BatchLineErrKind::WrongFieldCount(found) => write!(
                f,
                "expected 'pattern;inputs', found {} field(s){}{}",
                found, padding, data
            ),
            BatchLineErrKind::EmptyPattern => {
                write!(f, "empty pattern before ';'{}{}", padding, data)
            }
            BatchLineErrKind::EmptyInputs => {
                write!(f, "empty input list after ';'{}{}", padding, data)
            }
        }
    }
}

impl std::error::Error for BatchLineErr {}

/// A pattern and the inputs to test against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLine {
    pub pattern: String,
    pub inputs: Vec<String>,
}

/// Parses a single line, returning `None` for blank and comment lines.
///
/// Inputs are split on `,` and trimmed. An empty entry between commas is
/// kept as the empty input.
///
/// # Example
///
/// ```
/// use automata_compiler::batch::{parse_line, BatchLine};
///
/// assert_eq!(
///     Some(Ok(BatchLine {
///         pattern: "a*".to_string(),
///         inputs: vec!["".to_string(), "aa".to_string()],
///     })),
///     parse_line(" a* ; , aa ")
/// );
/// assert_eq!(None, parse_line("# a comment"));
/// ```
pub fn parse_line(line: &str) -> Option<Result<BatchLine, BatchLineErr>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let with_line = |kind| BatchLineErr::new(kind).with_data(format!("{:?}", line));
    let fields = line.split(';').collect::<Vec<_>>();

    let parsed = match fields.as_slice() {
        [pattern, _] if pattern.trim().is_empty() => {
            Err(with_line(BatchLineErrKind::EmptyPattern))
        }
        [_, inputs] if inputs.trim().is_empty() => Err(with_line(BatchLineErrKind::EmptyInputs)),
        [pattern, inputs] => Ok(BatchLine {
            pattern: pattern.trim().to_string(),
            inputs: inputs.split(',').map(|input| input.trim().to_string()).collect(),
        }),
        fields => Err(with_line(BatchLineErrKind::WrongFieldCount(fields.len()))),
    };

    Some(parsed)
}

/// Parses every meaningful line of a batch, pairing each with its 1-based
/// line number.
pub fn parse_batch(
    source: &str,
) -> impl Iterator<Item = (usize, Result<BatchLine, BatchLineErr>)> + '_ {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line).map(|parsed| (idx + 1, parsed)))
}
