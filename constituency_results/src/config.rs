// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One row of a results file.
///
/// The optional columns (`age`, `category`, `symbol`) are carried through
/// untouched. They are empty when the file does not have them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateRecord {
    pub constituency: String,
    pub candidate_name: String,
    pub party: String,
    pub vote_total: u64,
    pub age: String,
    pub category: String,
    pub symbol: String,
}

impl CandidateRecord {
    /// A record with none of the optional columns filled in.
    pub fn new(constituency: &str, candidate_name: &str, party: &str, vote_total: u64) -> Self {
        CandidateRecord {
            constituency: constituency.to_string(),
            candidate_name: candidate_name.to_string(),
            party: party.to_string(),
            vote_total,
            age: String::new(),
            category: String::new(),
            symbol: String::new(),
        }
    }
}

// ******** Errors *********

/// Errors that prevent a constituency from being displayed.
///
/// Missing images are not reported here: they are a concern of the display
/// layer, which is expected to fall back to a placeholder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ResultsError {
    /// The results resource could not be read or parsed.
    DataUnavailable { resource: String, reason: String },
    /// The results were read, but no row belongs to the requested constituency.
    NoMatchingRecords { constituency: String },
}

impl Error for ResultsError {}

impl Display for ResultsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultsError::DataUnavailable { resource, reason } => {
                write!(f, "data unavailable for {}: {}", resource, reason)
            }
            ResultsError::NoMatchingRecords { constituency } => {
                write!(f, "no data found for constituency: {}", constituency)
            }
        }
    }
}

// ********* Configuration **********

/// Number of candidates shown for a constituency.
pub const DEFAULT_RANK_LIMIT: usize = 4;

/// What to do with a row whose vote total is not a non-negative whole number.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InvalidVotePolicy {
    /// The whole resource is rejected as unavailable.
    Reject,
    /// The row is dropped with a warning.
    SkipRow,
}

/// The names of the columns in the results file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnNames {
    pub constituency: String,
    pub candidate_name: String,
    pub party: String,
    pub vote_total: String,
    pub age: String,
    pub category: String,
    pub symbol: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            constituency: "pc".to_string(),
            candidate_name: "name".to_string(),
            party: "party".to_string(),
            vote_total: "Votes_Total".to_string(),
            age: "age".to_string(),
            category: "category".to_string(),
            symbol: "symbol".to_string(),
        }
    }
}

/// How vote totals are written out on labels.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NumberFormat {
    /// Groups of 3 then 2: `12,34,567`
    Indian,
    /// Groups of 3: `1,234,567`
    Western,
    /// No grouping: `1234567`
    Plain,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Layout and styling constants of the bar chart.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartConfig {
    pub total_width: f64,
    pub total_height: f64,
    pub margins: Margins,
    /// Fraction of a band left empty between (and around) the bars.
    pub band_padding: f64,
    pub bar_color: String,
    pub label_color: String,
    pub number_format: NumberFormat,
    pub value_label_size: f64,
    pub value_label_bold: bool,
    /// None keeps the axis default size.
    pub name_label_size: Option<f64>,
    pub party_label_size: f64,
    pub y_axis_title: Option<String>,
    pub axis_title_size: f64,
    pub axis_title_bold: bool,
    /// Grouping of the y tick labels.
    pub tick_format: NumberFormat,
    pub tick_label_size: f64,
    pub tick_count: usize,
}

impl ChartConfig {
    /// Shrinks the chart to fit a viewport, keeping the 4:5 aspect ratio.
    pub fn fit_to_viewport(&mut self, viewport_width: f64) {
        let width = self.total_width.min(viewport_width - 20.0).max(0.0);
        self.total_width = width;
        self.total_height = width * 0.8;
    }
}

/// Capitalisation applied to the words of the image folder name.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FolderCase {
    /// `north  chennai` -> `NorthChennai`
    TitleCase,
    /// `North Chennai` -> `NorthChennai`
    AsIs,
}

/// Where candidate photos live: `<base_path>/<folder>/<position>.<extension>`.
///
/// The position is `winner_label` for the first candidate and
/// `<loser_prefix><loser_separator><k>` for the k-th runner up.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ImageConvention {
    pub base_path: String,
    pub folder_case: FolderCase,
    pub winner_label: String,
    pub loser_prefix: String,
    pub loser_separator: String,
    pub extension: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TitleStyle {
    /// `Chennai North Election Results`
    ElectionResults,
    /// `Chennai North`
    NameOnly,
}

/// Everything that differs between two published result sets.
#[derive(PartialEq, Debug, Clone)]
pub struct SchemaConfig {
    pub variant: String,
    /// Resource requested from the record source.
    pub resource_id: String,
    pub columns: ColumnNames,
    pub invalid_vote_policy: InvalidVotePolicy,
    /// Label of the "none of the above" row, not counted as a candidate.
    pub nota_label: Option<String>,
    pub title_style: TitleStyle,
    pub rank_limit: usize,
    pub chart: ChartConfig,
    pub images: ImageConvention,
}

impl SchemaConfig {
    /// The 2019 Tamil Nadu results page.
    pub fn tn2019() -> SchemaConfig {
        SchemaConfig {
            variant: "tn2019".to_string(),
            resource_id: "/TN2019.csv".to_string(),
            columns: ColumnNames::default(),
            invalid_vote_policy: InvalidVotePolicy::Reject,
            nota_label: Some("NOTA".to_string()),
            title_style: TitleStyle::ElectionResults,
            rank_limit: DEFAULT_RANK_LIMIT,
            chart: ChartConfig {
                total_width: 600.0,
                total_height: 480.0,
                margins: Margins {
                    top: 30.0,
                    right: 10.0,
                    bottom: 100.0,
                    left: 100.0,
                },
                band_padding: 0.08,
                bar_color: "#deb887".to_string(),
                label_color: "white".to_string(),
                number_format: NumberFormat::Indian,
                value_label_size: 12.0,
                value_label_bold: false,
                name_label_size: None,
                party_label_size: 10.0,
                y_axis_title: None,
                axis_title_size: 13.0,
                axis_title_bold: true,
                tick_format: NumberFormat::Western,
                tick_label_size: 10.0,
                tick_count: 10,
            },
            images: ImageConvention {
                base_path: "/pics".to_string(),
                folder_case: FolderCase::AsIs,
                winner_label: "winner".to_string(),
                loser_prefix: "loser".to_string(),
                loser_separator: "".to_string(),
                extension: "jpeg".to_string(),
            },
        }
    }

    /// The 2024 parliamentary constituency results page.
    pub fn pc2024() -> SchemaConfig {
        SchemaConfig {
            variant: "pc2024".to_string(),
            resource_id: "/resultsPC24.csv".to_string(),
            columns: ColumnNames::default(),
            invalid_vote_policy: InvalidVotePolicy::Reject,
            nota_label: Some("NOTA".to_string()),
            title_style: TitleStyle::NameOnly,
            rank_limit: DEFAULT_RANK_LIMIT,
            chart: ChartConfig {
                total_width: 700.0,
                total_height: 560.0,
                margins: Margins {
                    top: 15.0,
                    right: 10.0,
                    bottom: 110.0,
                    left: 30.0,
                },
                band_padding: 0.1,
                bar_color: "#1db6d5".to_string(),
                label_color: "white".to_string(),
                number_format: NumberFormat::Indian,
                value_label_size: 12.0,
                value_label_bold: true,
                name_label_size: Some(11.0),
                party_label_size: 9.0,
                y_axis_title: Some("Total Votes".to_string()),
                axis_title_size: 13.0,
                axis_title_bold: true,
                tick_format: NumberFormat::Indian,
                tick_label_size: 11.0,
                tick_count: 10,
            },
            images: ImageConvention {
                base_path: "/candi-pics".to_string(),
                folder_case: FolderCase::TitleCase,
                winner_label: "Winner".to_string(),
                loser_prefix: "Loser".to_string(),
                loser_separator: " ".to_string(),
                extension: "jpg".to_string(),
            },
        }
    }

    pub fn from_variant(variant: &str) -> Option<SchemaConfig> {
        match variant {
            "tn2019" => Some(SchemaConfig::tn2019()),
            "pc2024" => Some(SchemaConfig::pc2024()),
            _ => None,
        }
    }

    /// The heading shown above a constituency.
    pub fn title(&self, constituency_name: &str) -> String {
        let name = constituency_name.trim();
        match self.title_style {
            TitleStyle::ElectionResults => format!("{} Election Results", name),
            TitleStyle::NameOnly => name.to_string(),
        }
    }
}
