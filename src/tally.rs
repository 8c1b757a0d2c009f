use std::num::ParseIntError;

/// A whitespace separated token that did not parse as an integer
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedToken {
    pub token: String,
    pub reason: ParseIntError,
}

/// Result of summing one line of integers, one entry per token in input order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tally {
    pub entries: Vec<Result<i32, SkippedToken>>,
}

impl Tally {
    /// Accepted numbers in input order.
    pub fn numbers(&self) -> Vec<i32> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok().copied())
            .collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedToken> {
        self.entries.iter().filter_map(|entry| entry.as_ref().err())
    }

    /// Sum of all accepted numbers. Accumulates in i64 so no input line of
    /// i32 values can overflow it in practice.
    pub fn total(&self) -> i64 {
        self.numbers().into_iter().map(i64::from).sum()
    }
}

/// Splits `line` on whitespace and parses every token as an i32.
pub fn sum_integers(line: &str) -> Tally {
    let entries = line
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|reason| {
                log::debug!("Skipping token {:?}: {}", token, reason);
                SkippedToken {
                    token: token.to_string(),
                    reason,
                }
            })
        })
        .collect();
    Tally { entries }
}
