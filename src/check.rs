use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::policy::WordPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    BlankLine { line: usize },
    InvalidWord { line: usize, word: String },
    OutOfOrder { line: usize, previous: String, word: String },
    Duplicate { line: usize, word: String },
    MissingTrailingNewline,
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub path: PathBuf,
    pub words: usize,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn is_canonical(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BlankLine { line } => write!(f, "line {line}: blank line"),
            Violation::InvalidWord { line, word } => {
                write!(f, "line {line}: '{word}' is not an accepted word")
            }
            Violation::OutOfOrder {
                line,
                previous,
                word,
            } => write!(f, "line {line}: '{word}' sorts before '{previous}'"),
            Violation::Duplicate { line, word } => write!(f, "line {line}: duplicate '{word}'"),
            Violation::MissingTrailingNewline => write!(f, "file does not end with a newline"),
        }
    }
}

/// Verifies that `path` holds a canonical word list under `policy`.
pub fn check_file(path: &Path, policy: &WordPolicy) -> Result<CheckReport, BuildError> {
    let raw = fs::read_to_string(path).map_err(|err| BuildError::read(path, err))?;
    let (words, violations) = check_contents(&raw, policy);

    Ok(CheckReport {
        path: path.to_path_buf(),
        words,
        violations,
    })
}

fn check_contents(raw: &str, policy: &WordPolicy) -> (usize, Vec<Violation>) {
    let mut violations = Vec::new();

    // The empty list is written as a lone newline.
    if raw == "\n" {
        return (0, violations);
    }

    let body = match raw.strip_suffix('\n') {
        Some(body) => body,
        None => {
            violations.push(Violation::MissingTrailingNewline);
            raw
        }
    };

    if body.is_empty() {
        return (0, violations);
    }

    let mut words = 0;
    let mut previous: Option<&str> = None;

    for (idx, word) in body.split('\n').enumerate() {
        let line = idx + 1;

        if word.is_empty() {
            violations.push(Violation::BlankLine { line });
            continue;
        }

        words += 1;

        if !policy.accepts(word) {
            violations.push(Violation::InvalidWord {
                line,
                word: word.to_string(),
            });
        }

        if let Some(prev) = previous {
            if word == prev {
                violations.push(Violation::Duplicate {
                    line,
                    word: word.to_string(),
                });
            } else if word < prev {
                violations.push(Violation::OutOfOrder {
                    line,
                    previous: prev.to_string(),
                    word: word.to_string(),
                });
            }
        }

        previous = Some(word);
    }

    (words, violations)
}
