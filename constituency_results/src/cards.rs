//! Candidate photo cards.

use log::debug;

use crate::config::{CandidateRecord, FolderCase, ImageConvention};

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateCard {
    pub rank: usize,
    /// `Winner`, `Loser 1`, ... depending on the image convention.
    pub position: String,
    pub image_path: String,
    pub alt_text: String,
    pub candidate_name: String,
    pub party: String,
    pub vote_total: u64,
    pub age: Option<String>,
    pub category: Option<String>,
    pub symbol: Option<String>,
}

/// Name of the image folder of a constituency: the words of the name,
/// recased, with all whitespace removed.
///
/// ```
/// use constituency_results::cards::folder_key;
/// use constituency_results::FolderCase;
///
/// assert_eq!(folder_key("NEW DELHI", FolderCase::TitleCase), "NewDelhi");
/// assert_eq!(folder_key("north  chennai", FolderCase::TitleCase), "NorthChennai");
/// assert_eq!(folder_key("Chennai North", FolderCase::AsIs), "ChennaiNorth");
/// ```
pub fn folder_key(constituency_name: &str, case: FolderCase) -> String {
    constituency_name
        .split_whitespace()
        .map(|word| match case {
            FolderCase::TitleCase => title_case_word(word),
            FolderCase::AsIs => word.to_string(),
        })
        .collect()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

pub fn position_name(rank: usize, convention: &ImageConvention) -> String {
    if rank == 0 {
        convention.winner_label.clone()
    } else {
        format!(
            "{}{}{}",
            convention.loser_prefix, convention.loser_separator, rank
        )
    }
}

pub fn image_path(folder: &str, position: &str, convention: &ImageConvention) -> String {
    format!(
        "{}/{}/{}.{}",
        convention.base_path.trim_end_matches('/'),
        folder,
        position,
        convention.extension
    )
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// One card per ranked candidate. Images are not checked for existence.
pub fn render_cards(
    ranked: &[CandidateRecord],
    constituency_name: &str,
    convention: &ImageConvention,
) -> Vec<CandidateCard> {
    let folder = folder_key(constituency_name, convention.folder_case);
    debug!("render_cards: {} cards in folder {:?}", ranked.len(), folder);
    ranked
        .iter()
        .enumerate()
        .map(|(rank, record)| {
            let position = position_name(rank, convention);
            CandidateCard {
                rank,
                image_path: image_path(&folder, &position, convention),
                position,
                alt_text: record.candidate_name.clone(),
                candidate_name: record.candidate_name.clone(),
                party: record.party.clone(),
                vote_total: record.vote_total,
                age: non_empty(&record.age),
                category: non_empty(&record.category),
                symbol: non_empty(&record.symbol),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaConfig;

    #[test]
    fn title_case_keys() {
        assert_eq!(folder_key("NEW DELHI", FolderCase::TitleCase), "NewDelhi");
        assert_eq!(
            folder_key("north  chennai", FolderCase::TitleCase),
            "NorthChennai"
        );
        assert_eq!(
            folder_key(" Chennai\tSouth ", FolderCase::TitleCase),
            "ChennaiSouth"
        );
        assert_eq!(folder_key("", FolderCase::TitleCase), "");
    }

    #[test]
    fn positions_per_variant() {
        let conv24 = SchemaConfig::pc2024().images;
        assert_eq!(position_name(0, &conv24), "Winner");
        assert_eq!(position_name(2, &conv24), "Loser 2");
        let conv19 = SchemaConfig::tn2019().images;
        assert_eq!(position_name(0, &conv19), "winner");
        assert_eq!(position_name(3, &conv19), "loser3");
    }

    #[test]
    fn cards_for_ranked_candidates() {
        let mut b = CandidateRecord::new("Chennai North", "B", "PartyY", 70000);
        b.age = "54".to_string();
        let a = CandidateRecord::new("Chennai North", "A", "PartyX", 50000);
        let conv = SchemaConfig::pc2024().images;
        let cards = render_cards(&[b, a], "chennai north", &conv);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].image_path, "/candi-pics/ChennaiNorth/Winner.jpg");
        assert_eq!(cards[1].image_path, "/candi-pics/ChennaiNorth/Loser 1.jpg");
        assert_eq!(cards[0].alt_text, "B");
        assert_eq!(cards[0].age.as_deref(), Some("54"));
        assert_eq!(cards[1].age, None);
        assert_eq!(cards[1].symbol, None);
    }

    #[test]
    fn legacy_convention() {
        let conv = SchemaConfig::tn2019().images;
        let cards = render_cards(
            &[CandidateRecord::new("Chennai North", "B", "PartyY", 1)],
            "Chennai North",
            &conv,
        );
        assert_eq!(cards[0].image_path, "/pics/ChennaiNorth/winner.jpeg");
    }

    #[test]
    fn no_cards_for_empty_result() {
        let conv = SchemaConfig::pc2024().images;
        assert!(render_cards(&[], "Nowhere", &conv).is_empty());
    }
}
