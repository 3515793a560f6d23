use crate::viewer::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "title")]
    pub title: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSettings {
    pub variant: Option<String>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    #[serde(rename = "constituencyColumn")]
    pub constituency_column: Option<String>,
    #[serde(rename = "nameColumn")]
    pub name_column: Option<String>,
    #[serde(rename = "partyColumn")]
    pub party_column: Option<String>,
    #[serde(rename = "votesColumn")]
    pub votes_column: Option<String>,
    #[serde(rename = "ageColumn")]
    pub age_column: Option<String>,
    #[serde(rename = "categoryColumn")]
    pub category_column: Option<String>,
    #[serde(rename = "symbolColumn")]
    pub symbol_column: Option<String>,
    #[serde(rename = "invalidVotePolicy")]
    pub invalid_vote_policy: Option<String>,
    #[serde(rename = "notaLabel")]
    pub nota_label: Option<String>,
    #[serde(rename = "titleStyle")]
    pub title_style: Option<String>,
    #[serde(rename = "rankLimit")]
    pub rank_limit: Option<usize>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSettings {
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(rename = "viewportWidth")]
    pub viewport_width: Option<f64>,
    #[serde(rename = "marginTop")]
    pub margin_top: Option<f64>,
    #[serde(rename = "marginRight")]
    pub margin_right: Option<f64>,
    #[serde(rename = "marginBottom")]
    pub margin_bottom: Option<f64>,
    #[serde(rename = "marginLeft")]
    pub margin_left: Option<f64>,
    #[serde(rename = "bandPadding")]
    pub band_padding: Option<f64>,
    #[serde(rename = "barColor")]
    pub bar_color: Option<String>,
    #[serde(rename = "labelColor")]
    pub label_color: Option<String>,
    #[serde(rename = "numberFormat")]
    pub number_format: Option<String>,
    #[serde(rename = "yAxisTitle")]
    pub y_axis_title: Option<String>,
    #[serde(rename = "axisTitleSize")]
    pub axis_title_size: Option<f64>,
    #[serde(rename = "axisTitleBold")]
    pub axis_title_bold: Option<bool>,
    #[serde(rename = "tickFormat")]
    pub tick_format: Option<String>,
    #[serde(rename = "tickLabelSize")]
    pub tick_label_size: Option<f64>,
    #[serde(rename = "tickCount")]
    pub tick_count: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    #[serde(rename = "folderCase")]
    pub folder_case: Option<String>,
    #[serde(rename = "winnerLabel")]
    pub winner_label: Option<String>,
    #[serde(rename = "loserPrefix")]
    pub loser_prefix: Option<String>,
    #[serde(rename = "loserSeparator")]
    pub loser_separator: Option<String>,
    pub extension: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "dataSources")]
    pub data_sources: Vec<DataSource>,
    pub schema: Option<SchemaSettings>,
    pub chart: Option<ChartSettings>,
    pub images: Option<ImageSettings>,
}

fn set<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl ViewerConfig {
    /// The schema of the configured variant, with the configured overrides applied.
    pub fn schema_config(&self, default_variant: &str) -> ViewerResult<SchemaConfig> {
        let schema_settings = self.schema.clone().unwrap_or_default();
        let variant = schema_settings
            .variant
            .clone()
            .unwrap_or_else(|| default_variant.to_string());
        let mut schema = match SchemaConfig::from_variant(&variant) {
            Some(s) => s,
            None => whatever!("Unknown variant {:?}", variant),
        };
        apply_schema_settings(&mut schema, &schema_settings)?;
        if let Some(cs) = &self.chart {
            apply_chart_settings(&mut schema.chart, cs)?;
        }
        if let Some(is) = &self.images {
            apply_image_settings(&mut schema.images, is)?;
        }
        Ok(schema)
    }
}

fn apply_schema_settings(schema: &mut SchemaConfig, s: &SchemaSettings) -> ViewerResult<()> {
    set(&mut schema.resource_id, &s.resource_id);
    let cols = &mut schema.columns;
    set(&mut cols.constituency, &s.constituency_column);
    set(&mut cols.candidate_name, &s.name_column);
    set(&mut cols.party, &s.party_column);
    set(&mut cols.vote_total, &s.votes_column);
    set(&mut cols.age, &s.age_column);
    set(&mut cols.category, &s.category_column);
    set(&mut cols.symbol, &s.symbol_column);
    if let Some(p) = &s.invalid_vote_policy {
        schema.invalid_vote_policy = match p.as_str() {
            "reject" => InvalidVotePolicy::Reject,
            "skipRow" => InvalidVotePolicy::SkipRow,
            x => whatever!("Unknown invalid vote policy {:?}", x),
        };
    }
    if let Some(label) = &s.nota_label {
        schema.nota_label = if label.is_empty() {
            None
        } else {
            Some(label.clone())
        };
    }
    if let Some(t) = &s.title_style {
        schema.title_style = match t.as_str() {
            "electionResults" => TitleStyle::ElectionResults,
            "nameOnly" => TitleStyle::NameOnly,
            x => whatever!("Unknown title style {:?}", x),
        };
    }
    match s.rank_limit {
        Some(0) => whatever!("rankLimit must be at least 1"),
        Some(x) => schema.rank_limit = x,
        None => {}
    }
    Ok(())
}

fn apply_chart_settings(chart: &mut ChartConfig, s: &ChartSettings) -> ViewerResult<()> {
    set(&mut chart.total_width, &s.width);
    set(&mut chart.total_height, &s.height);
    set(&mut chart.margins.top, &s.margin_top);
    set(&mut chart.margins.right, &s.margin_right);
    set(&mut chart.margins.bottom, &s.margin_bottom);
    set(&mut chart.margins.left, &s.margin_left);
    set(&mut chart.bar_color, &s.bar_color);
    set(&mut chart.label_color, &s.label_color);
    set(&mut chart.axis_title_size, &s.axis_title_size);
    set(&mut chart.axis_title_bold, &s.axis_title_bold);
    set(&mut chart.tick_label_size, &s.tick_label_size);
    set(&mut chart.tick_count, &s.tick_count);
    if let Some(p) = s.band_padding {
        if !(0.0..1.0).contains(&p) {
            whatever!("bandPadding must be in [0, 1), got {}", p)
        }
        chart.band_padding = p;
    }
    if let Some(f) = &s.number_format {
        chart.number_format = parse_number_format(f)?;
    }
    if let Some(f) = &s.tick_format {
        chart.tick_format = parse_number_format(f)?;
    }
    if let Some(title) = &s.y_axis_title {
        chart.y_axis_title = if title.is_empty() {
            None
        } else {
            Some(title.clone())
        };
    }
    if let Some(w) = s.viewport_width {
        chart.fit_to_viewport(w);
    }
    Ok(())
}

fn parse_number_format(name: &str) -> ViewerResult<NumberFormat> {
    match name {
        "indian" => Ok(NumberFormat::Indian),
        "western" => Ok(NumberFormat::Western),
        "plain" => Ok(NumberFormat::Plain),
        x => whatever!("Unknown number format {:?}", x),
    }
}

fn apply_image_settings(images: &mut ImageConvention, s: &ImageSettings) -> ViewerResult<()> {
    set(&mut images.base_path, &s.base_path);
    set(&mut images.winner_label, &s.winner_label);
    set(&mut images.loser_prefix, &s.loser_prefix);
    set(&mut images.loser_separator, &s.loser_separator);
    set(&mut images.extension, &s.extension);
    if let Some(c) = &s.folder_case {
        images.folder_case = match c.as_str() {
            "titleCase" => FolderCase::TitleCase,
            "asIs" => FolderCase::AsIs,
            x => whatever!("Unknown folder case {:?}", x),
        };
    }
    Ok(())
}

pub fn read_config(path: &str) -> ViewerResult<ViewerConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> ViewerResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ViewerConfig {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn minimal_config_uses_variant_defaults() {
        let c = parse(r#"{"dataSources": [{"provider": "csv", "filePath": "a.csv"}]}"#);
        assert_eq!(c.data_sources[0].resource_id, None);
        assert_eq!(c.schema_config("tn2019").unwrap(), SchemaConfig::tn2019());
        assert_eq!(c.schema_config("pc2024").unwrap(), SchemaConfig::pc2024());
        assert!(c.schema_config("nope").is_err());
    }

    #[test]
    fn overrides() {
        let c = parse(
            r#"{
            "dataSources": [],
            "schema": {"variant": "tn2019", "votesColumn": "votes", "invalidVotePolicy": "skipRow",
                       "notaLabel": "", "rankLimit": 3},
            "chart": {"width": 800, "viewportWidth": 500, "numberFormat": "western", "bandPadding": 0.2,
                      "tickFormat": "plain", "tickLabelSize": 9, "axisTitleBold": false},
            "images": {"basePath": "https://example.org/img/", "folderCase": "titleCase", "extension": "png"}
        }"#,
        );
        let s = c.schema_config("pc2024").unwrap();
        assert_eq!(s.variant, "tn2019");
        assert_eq!(s.columns.vote_total, "votes");
        assert_eq!(s.columns.party, "party");
        assert_eq!(s.invalid_vote_policy, InvalidVotePolicy::SkipRow);
        assert_eq!(s.nota_label, None);
        assert_eq!(s.rank_limit, 3);
        assert_eq!(s.chart.total_width, 480.0);
        assert_eq!(s.chart.total_height, 384.0);
        assert_eq!(s.chart.number_format, NumberFormat::Western);
        assert_eq!(s.chart.band_padding, 0.2);
        assert_eq!(s.chart.tick_format, NumberFormat::Plain);
        assert_eq!(s.chart.tick_label_size, 9.0);
        assert!(!s.chart.axis_title_bold);
        assert_eq!(s.chart.axis_title_size, 13.0);
        assert_eq!(s.images.folder_case, FolderCase::TitleCase);
        assert_eq!(
            constituency_results::cards::image_path("NewDelhi", "winner", &s.images),
            "https://example.org/img/NewDelhi/winner.png"
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        for bad in [
            r#"{"dataSources": [], "schema": {"invalidVotePolicy": "maybe"}}"#,
            r#"{"dataSources": [], "schema": {"rankLimit": 0}}"#,
            r#"{"dataSources": [], "chart": {"bandPadding": 1.5}}"#,
            r#"{"dataSources": [], "chart": {"numberFormat": "roman"}}"#,
            r#"{"dataSources": [], "chart": {"tickFormat": "roman"}}"#,
            r#"{"dataSources": [], "images": {"folderCase": "upper"}}"#,
        ] {
            assert!(parse(bad).schema_config("pc2024").is_err(), "{}", bad);
        }
    }

    #[test]
    fn missing_data_sources_is_a_parse_error() {
        assert!(serde_json::from_str::<ViewerConfig>(r#"{"schema": {}}"#).is_err());
    }
}
