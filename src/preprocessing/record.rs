//! Row-level parsing: raw tokens in, selected features and target out.

use serde::{Deserialize, Serialize};

/// Number of numeric features the classifier consumes.
pub const N_FEATURES: usize = 2;

/// One input line split into trimmed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    tokens: Vec<String>,
}

/// The two features picked out of a [`RawRecord`], with their source positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedRow {
    /// Raw feature values in encounter order.
    pub values: [f64; N_FEATURES],
    /// Column index each value was read from.
    pub columns: [usize; N_FEATURES],
    /// The record's last token, untouched.
    pub target: String,
}

/// Standardized features plus the target exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizedRecord {
    pub features: [f64; N_FEATURES],
    pub target: String,
}

impl RawRecord {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(|t| t.into().trim().to_string()).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Picks the first two finite numeric tokens as features and the last token
    /// as the target.
    ///
    /// Returns `None` for rows with fewer than two numeric tokens, and for rows
    /// whose last token is not numeric: such a target could not be trained on.
    /// When a row has exactly two tokens and both are numeric, the second
    /// doubles as the target.
    pub fn select_features(&self) -> Option<SelectedRow> {
        let mut values = [0.0; N_FEATURES];
        let mut columns = [0; N_FEATURES];
        let mut found = 0;

        for (idx, token) in self.tokens.iter().enumerate() {
            if let Some(v) = parse_numeric(token) {
                values[found] = v;
                columns[found] = idx;
                found += 1;
                if found == N_FEATURES {
                    break;
                }
            }
        }
        if found < N_FEATURES {
            return None;
        }

        let target = self.tokens.last()?;
        parse_numeric(target)?;
        Some(SelectedRow {
            values,
            columns,
            target: target.clone(),
        })
    }
}

impl From<&csv::StringRecord> for RawRecord {
    fn from(record: &csv::StringRecord) -> Self {
        RawRecord::new(record.iter())
    }
}

/// Parses a token as a finite `f64`. `NaN` and infinities count as non-numeric.
pub fn parse_numeric(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_first_two_numeric_tokens() {
        let rec = RawRecord::new(["alice", "3.5", "x", "-2", "7", "1"]);
        let row = rec.select_features().unwrap();
        assert_eq!(row.values, [3.5, -2.0]);
        assert_eq!(row.columns, [1, 3]);
        assert_eq!(row.target, "1");
    }

    #[test]
    fn test_row_with_text_target_is_dropped() {
        assert!(RawRecord::new(["1", "2", "yes"]).select_features().is_none());
        assert!(RawRecord::new(["1", "2", "3", ""]).select_features().is_none());
        let row = RawRecord::new(["1", "2", "1.0"]).select_features().unwrap();
        assert_eq!(row.target, "1.0");
    }

    #[test]
    fn test_row_with_one_numeric_token_is_dropped() {
        let rec = RawRecord::new(["a", "1.0", "b"]);
        assert!(rec.select_features().is_none());
    }

    #[test]
    fn test_header_row_is_dropped() {
        let rec = RawRecord::new(["f1", "f2", "label"]);
        assert!(rec.select_features().is_none());
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let rec = RawRecord::new([" 1 ", "2", " 0 "]);
        let row = rec.select_features().unwrap();
        assert_eq!(row.values, [1.0, 2.0]);
        assert_eq!(row.target, "0");
    }

    #[test]
    fn test_two_token_row_reuses_last_as_target() {
        let row = RawRecord::new(["4", "1"]).select_features().unwrap();
        assert_eq!(row.values, [4.0, 1.0]);
        assert_eq!(row.target, "1");
    }

    #[test]
    fn test_non_finite_tokens_are_not_numeric() {
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        let rec = RawRecord::new(["NaN", "1", "2", "0"]);
        assert_eq!(rec.select_features().unwrap().columns, [1, 2]);
    }
}
