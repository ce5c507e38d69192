use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::input::{extract_candidate, split_carriage_returns};
use crate::policy::{Verdict, WordPolicy};

#[derive(Debug, Clone, Default)]
pub struct WordListBuilder {
    policy: WordPolicy,
}

/// Sorted, deduplicated output of a single normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub lines: usize,
    pub empty: usize,
    pub too_long: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub count: usize,
    pub path: PathBuf,
}

impl WordListBuilder {
    pub fn new(policy: WordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &WordPolicy {
        &self.policy
    }

    /// Reads `reader` line by line and collects every accepted word.
    ///
    /// Lines that fail the policy are skipped. Only read failures are errors.
    pub fn normalize<R: BufRead>(&self, reader: R) -> io::Result<(WordList, NormalizeStats)> {
        let mut seen = BTreeSet::new();
        let mut stats = NormalizeStats::default();

        for line in reader.lines() {
            let line = line?;

            for entry in split_carriage_returns(&line) {
                stats.lines += 1;

                let candidate = extract_candidate(entry);
                match self.policy.judge(&candidate) {
                    Verdict::Empty => stats.empty += 1,
                    Verdict::TooLong => stats.too_long += 1,
                    Verdict::PatternMismatch => {
                        tracing::trace!("Rejected candidate: {}", candidate);
                        stats.rejected += 1;
                    }
                    Verdict::Accepted => {
                        if seen.insert(candidate) {
                            stats.accepted += 1;
                        } else {
                            stats.duplicates += 1;
                        }
                    }
                }
            }
        }

        // BTreeSet<String> iterates in byte order, which is code-point order for UTF-8.
        let words = seen.into_iter().collect();
        Ok((WordList { words }, stats))
    }

    pub fn normalize_file(&self, path: &Path) -> Result<WordList, BuildError> {
        let file = File::open(path).map_err(|err| BuildError::read(path, err))?;
        let (list, stats) = self
            .normalize(BufReader::new(file))
            .map_err(|err| BuildError::read(path, err))?;

        tracing::debug!(
            "Read {} lines from {}: {} accepted, {} duplicates, {} empty, {} too long, {} rejected",
            stats.lines,
            path.display(),
            stats.accepted,
            stats.duplicates,
            stats.empty,
            stats.too_long,
            stats.rejected
        );

        Ok(list)
    }
}

impl WordList {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// One word per line with a trailing newline. An empty list renders as `"\n"`.
    pub fn render(&self) -> String {
        let mut out = self.words.join("\n");
        out.push('\n');
        out
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    pub fn write(&self, destination: &Path) -> Result<WriteReport, BuildError> {
        let file = File::create(destination).map_err(|err| BuildError::write(destination, err))?;
        self.write_to(BufWriter::new(file))
            .map_err(|err| BuildError::write(destination, err))?;

        Ok(WriteReport {
            count: self.len(),
            path: destination.to_path_buf(),
        })
    }
}
