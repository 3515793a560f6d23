use log::{debug, warn};

pub use crate::config::*;

/// A builder turning the rows of a results table into records.
///
/// The columns are located by name in the header. Optional columns that are
/// missing read as empty strings; a missing required column is an error.
///
/// ```
/// use constituency_results::builder::Builder;
/// use constituency_results::{ResultsError, SchemaConfig};
///
/// let header: Vec<String> = ["pc", "name", "party", "Votes_Total"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let mut builder = Builder::new(&SchemaConfig::pc2024(), "results.csv", &header)?;
/// builder.add_row(2, &["Chennai North".to_string(), "A".to_string(),
///     "PartyX".to_string(), "50000".to_string()])?;
/// let records = builder.build();
/// assert_eq!(records[0].vote_total, 50000);
/// assert_eq!(records[0].symbol, "");
///
/// # Ok::<(), ResultsError>(())
/// ```
pub struct Builder {
    pub(crate) _resource: String,
    pub(crate) _policy: InvalidVotePolicy,
    pub(crate) _indices: ColumnIndices,
    pub(crate) _records: Vec<CandidateRecord>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub(crate) struct ColumnIndices {
    constituency: usize,
    candidate_name: usize,
    party: usize,
    vote_total: usize,
    age: Option<usize>,
    category: Option<usize>,
    symbol: Option<usize>,
}

impl Builder {
    pub fn new(
        schema: &SchemaConfig,
        resource: &str,
        header: &[String],
    ) -> Result<Builder, ResultsError> {
        let cleaned: Vec<String> = header
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let find = |name: &str| cleaned.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| ResultsError::DataUnavailable {
                resource: resource.to_string(),
                reason: format!("missing column {:?} in header {:?}", name, cleaned),
            })
        };
        let cols = &schema.columns;
        let indices = ColumnIndices {
            constituency: require(&cols.constituency)?,
            candidate_name: require(&cols.candidate_name)?,
            party: require(&cols.party)?,
            vote_total: require(&cols.vote_total)?,
            age: find(&cols.age),
            category: find(&cols.category),
            symbol: find(&cols.symbol),
        };
        debug!("Builder::new: {} column indices: {:?}", resource, indices);
        Ok(Builder {
            _resource: resource.to_string(),
            _policy: schema.invalid_vote_policy,
            _indices: indices,
            _records: Vec::new(),
        })
    }

    /// Adds one data row. `lineno` is only used for messages.
    pub fn add_row(&mut self, lineno: usize, row: &[String]) -> Result<(), ResultsError> {
        let cell = |idx: usize| row.get(idx).map(|s| s.as_str()).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("").to_string();
        let idx = self._indices;

        let raw_votes = cell(idx.vote_total);
        let vote_total = match parse_vote_total(raw_votes) {
            Some(v) => v,
            None => match self._policy {
                InvalidVotePolicy::Reject => {
                    return Err(ResultsError::DataUnavailable {
                        resource: self._resource.clone(),
                        reason: format!("line {}: invalid vote total {:?}", lineno, raw_votes),
                    });
                }
                InvalidVotePolicy::SkipRow => {
                    warn!(
                        "{}: line {}: skipping row with invalid vote total {:?}",
                        self._resource, lineno, raw_votes
                    );
                    return Ok(());
                }
            },
        };

        self.add_record(CandidateRecord {
            constituency: cell(idx.constituency).to_string(),
            candidate_name: cell(idx.candidate_name).to_string(),
            party: cell(idx.party).to_string(),
            vote_total,
            age: optional(idx.age),
            category: optional(idx.category),
            symbol: optional(idx.symbol),
        });
        Ok(())
    }

    pub fn add_record(&mut self, record: CandidateRecord) {
        self._records.push(record);
    }

    pub fn build(self) -> Vec<CandidateRecord> {
        debug!(
            "Builder::build: {} records from {}",
            self._records.len(),
            self._resource
        );
        self._records
    }
}

/// Reads a vote total: a non-negative whole number, possibly written with a
/// zero fractional part (`"5000.0"`).
pub fn parse_vote_total(s: &str) -> Option<u64> {
    let t = s.trim();
    if let Ok(v) = t.parse::<u64>() {
        return Some(v);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Some(f as u64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn vote_totals() {
        assert_eq!(parse_vote_total("70000"), Some(70000));
        assert_eq!(parse_vote_total(" 42 "), Some(42));
        assert_eq!(parse_vote_total("5000.0"), Some(5000));
        assert_eq!(parse_vote_total("0"), Some(0));
        assert_eq!(parse_vote_total(""), None);
        assert_eq!(parse_vote_total("-3"), None);
        assert_eq!(parse_vote_total("12.5"), None);
        assert_eq!(parse_vote_total("NaN"), None);
        assert_eq!(parse_vote_total("inf"), None);
        assert_eq!(parse_vote_total("1,234"), None);
    }

    #[test]
    fn optional_columns_and_order() {
        let header = strings(&["Votes_Total", "symbol", "pc", "party", "name"]);
        let mut b = Builder::new(&SchemaConfig::pc2024(), "r.csv", &header).unwrap();
        b.add_row(2, &strings(&["10", "Sun", "X", "P", "A"])).unwrap();
        // Short row: the trailing cells read as empty.
        b.add_row(3, &strings(&["20", "", "X"])).unwrap();
        let records = b.build();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].candidate_name, "A");
        assert_eq!(records[0].symbol, "Sun");
        assert_eq!(records[0].age, "");
        assert_eq!(records[1].vote_total, 20);
        assert_eq!(records[1].party, "");
    }

    #[test]
    fn missing_required_column() {
        let header = strings(&["pc", "name", "party"]);
        let res = Builder::new(&SchemaConfig::pc2024(), "r.csv", &header);
        assert!(matches!(res, Err(ResultsError::DataUnavailable { .. })));
    }

    #[test]
    fn header_with_byte_order_mark() {
        let header = strings(&["\u{feff}pc", "name", "party", "Votes_Total"]);
        assert!(Builder::new(&SchemaConfig::pc2024(), "r.csv", &header).is_ok());
    }

    #[test]
    fn invalid_vote_policies() {
        let header = strings(&["pc", "name", "party", "Votes_Total"]);
        let bad = strings(&["X", "A", "P", "n/a"]);
        let good = strings(&["X", "B", "P", "3"]);

        let mut schema = SchemaConfig::pc2024();
        let mut b = Builder::new(&schema, "r.csv", &header).unwrap();
        let err = b.add_row(2, &bad).unwrap_err();
        assert_eq!(
            err,
            ResultsError::DataUnavailable {
                resource: "r.csv".to_string(),
                reason: "line 2: invalid vote total \"n/a\"".to_string()
            }
        );

        schema.invalid_vote_policy = InvalidVotePolicy::SkipRow;
        let mut b = Builder::new(&schema, "r.csv", &header).unwrap();
        b.add_row(2, &bad).unwrap();
        b.add_row(3, &good).unwrap();
        let records = b.build();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].candidate_name, "B");
    }
}
