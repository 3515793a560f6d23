mod config;
use log::{debug, info};

pub use crate::config::*;

pub mod builder;
pub mod cards;
pub mod chart;
pub mod format;
pub mod manual;
pub mod source;
pub mod view;

use crate::cards::{render_cards, CandidateCard};
use crate::chart::{render_chart, ChartDescription};

/// Everything shown for one constituency.
#[derive(PartialEq, Debug, Clone)]
pub struct ConstituencyResults {
    /// The name as selected by the user, trimmed.
    pub constituency: String,
    pub title: String,
    /// Number of rows of the constituency.
    pub total_candidates: usize,
    /// Same, without the "none of the above" row.
    pub candidates_excluding_nota: usize,
    pub ranked: Vec<CandidateRecord>,
    pub chart: ChartDescription,
    pub cards: Vec<CandidateCard>,
}

/// The matching key of a constituency name.
pub fn normalize_constituency(name: &str) -> String {
    name.trim().to_lowercase()
}

/// All the records of a constituency, in their original order.
///
/// Names are compared after trimming and lower-casing. No partial matching is
/// done: an unknown name gives an empty list.
pub fn filter_records(records: &[CandidateRecord], constituency_name: &str) -> Vec<CandidateRecord> {
    let key = normalize_constituency(constituency_name);
    records
        .iter()
        .filter(|r| normalize_constituency(&r.constituency) == key)
        .cloned()
        .collect()
}

/// The `limit` records with the most votes, best first.
///
/// The sort is stable: candidates with the same vote total keep the order of
/// the input.
pub fn rank_records(records: &[CandidateRecord], limit: usize) -> Vec<CandidateRecord> {
    let mut sorted: Vec<CandidateRecord> = records.to_vec();
    // Vec::sort_by_key is stable.
    sorted.sort_by_key(|r| std::cmp::Reverse(r.vote_total));
    sorted.truncate(limit);
    sorted
}

/// The distinct constituencies of a record set, in order of first appearance.
pub fn list_constituencies(records: &[CandidateRecord]) -> Vec<String> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for r in records.iter() {
        let name = r.constituency.trim();
        if !name.is_empty() && seen.insert(normalize_constituency(name)) {
            res.push(name.to_string());
        }
    }
    res
}

fn is_nota(record: &CandidateRecord, nota_label: &Option<String>) -> bool {
    match nota_label {
        Some(label) => {
            record.candidate_name.trim().eq_ignore_ascii_case(label)
                || record.party.trim().eq_ignore_ascii_case(label)
        }
        None => false,
    }
}

/// Runs filter, rank, chart and cards for one constituency.
///
/// Fails with [ResultsError::NoMatchingRecords] when the constituency has no
/// rows.
pub fn run_pipeline(
    records: &[CandidateRecord],
    constituency_name: &str,
    schema: &SchemaConfig,
) -> Result<ConstituencyResults, ResultsError> {
    info!(
        "Processing {:?} records for constituency {:?}, variant {}",
        records.len(),
        constituency_name,
        schema.variant
    );
    let filtered = filter_records(records, constituency_name);
    if filtered.is_empty() {
        return Err(ResultsError::NoMatchingRecords {
            constituency: constituency_name.trim().to_string(),
        });
    }
    let nota_count = filtered
        .iter()
        .filter(|r| is_nota(r, &schema.nota_label))
        .count();

    let ranked = rank_records(&filtered, schema.rank_limit);
    for (idx, r) in ranked.iter().enumerate() {
        info!(
            "  {} {} ({}) -> {}",
            idx + 1,
            r.candidate_name,
            r.party,
            r.vote_total
        );
    }

    let chart = render_chart(&ranked, &schema.chart);
    let cards = render_cards(&ranked, constituency_name, &schema.images);
    debug!(
        "run_pipeline: {} bars, {} cards",
        chart.bars.len(),
        cards.len()
    );

    Ok(ConstituencyResults {
        constituency: constituency_name.trim().to_string(),
        title: schema.title(constituency_name),
        total_candidates: filtered.len(),
        candidates_excluding_nota: filtered.len() - nota_count,
        ranked,
        chart,
        cards,
    })
}
