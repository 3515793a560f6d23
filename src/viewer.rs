use log::{debug, info, warn};

use constituency_results::source::{CachedSource, RecordSource};
use constituency_results::view::{SelectionOutcome, ViewController};
use constituency_results::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod render_html;
pub mod render_svg;

use crate::viewer::config_reader::*;
use crate::viewer::render_html::HtmlSurface;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ViewerError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Line {lineno}: cannot read cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}: {source}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}: {source}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("Provider not implemented {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No data: pass an input file or a configuration file"))]
    MissingInput {},
    #[snafu(display("{source}"))]
    Pipeline { source: ResultsError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ViewerResult<T> = Result<T, ViewerError>;

/// Reads the records of a resource from the configured files.
///
/// All the data sources declared for the resource are read in order and
/// concatenated. A source without a resource id serves every resource.
pub struct FileSource {
    root: PathBuf,
    sources: Vec<DataSource>,
    schema: SchemaConfig,
}

impl FileSource {
    pub fn new(root: PathBuf, sources: Vec<DataSource>, schema: SchemaConfig) -> FileSource {
        FileSource {
            root,
            sources,
            schema,
        }
    }

    fn read_all(&self, resource_id: &str) -> ViewerResult<Vec<CandidateRecord>> {
        let wanted = io_common::normalize_resource_id(resource_id);
        let mut data: Vec<CandidateRecord> = Vec::new();
        let mut found = false;
        for ds in self.sources.iter() {
            let serves = match &ds.resource_id {
                Some(rid) => io_common::normalize_resource_id(rid) == wanted,
                None => true,
            };
            if !serves {
                continue;
            }
            found = true;
            let mut file_data = read_results_data(&self.root, ds, &self.schema)?;
            data.append(&mut file_data);
        }
        if !found {
            whatever!("No data source for resource {:?}", resource_id)
        }
        Ok(data)
    }
}

impl RecordSource for FileSource {
    fn load(&self, resource_id: &str) -> Result<Vec<CandidateRecord>, ResultsError> {
        self.read_all(resource_id).map_err(|e| match e {
            ViewerError::Pipeline { source } => source,
            e => ResultsError::DataUnavailable {
                resource: resource_id.to_string(),
                reason: e.to_string(),
            },
        })
    }
}

fn read_results_data(
    root: &Path,
    ds: &DataSource,
    schema: &SchemaConfig,
) -> ViewerResult<Vec<CandidateRecord>> {
    let p: PathBuf = root.join(&ds.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read results file {:?}", p2);
    match ds.provider.as_str() {
        "csv" => io_csv::read_csv_results(&p2, schema),
        "xlsx" | "excel" => {
            io_excel::read_excel_results(&p2, ds.excel_worksheet_name.as_deref(), schema)
        }
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn provider_from_path(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
        "xlsx"
    } else {
        "csv"
    }
}

/// The configuration, schema and root directory for a command line invocation.
fn resolve_config(args: &Args) -> ViewerResult<(ViewerConfig, SchemaConfig, PathBuf)> {
    let (mut config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (config, root)
        }
        None => (ViewerConfig::default(), PathBuf::from(".")),
    };

    // The input file given on the command line replaces the configured sources.
    if let Some(input) = &args.input {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| provider_from_path(input).to_string());
        config.data_sources = vec![DataSource {
            provider,
            file_path: input.clone(),
            resource_id: None,
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }];
    }

    if config.data_sources.is_empty() {
        return MissingInputSnafu {}.fail();
    }

    let default_variant = args.variant.clone().unwrap_or_else(|| "pc2024".to_string());
    let mut schema = config.schema_config(&default_variant)?;
    if let Some(w) = args.viewport_width {
        schema.chart.fit_to_viewport(w);
    }
    debug!("resolve_config: schema: {:?}", schema);
    Ok((config, schema, root))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn build_summary_js(schema: &SchemaConfig, results: &ConstituencyResults) -> JSValue {
    let ranked: Vec<JSValue> = results
        .ranked
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            json!({
                "rank": idx + 1,
                "name": r.candidate_name,
                "party": r.party,
                "votes": r.vote_total.to_string(),
                "votesLabel": format::format_votes(r.vote_total, schema.chart.number_format),
            })
        })
        .collect();
    let chart = &results.chart;
    let bars: Vec<JSValue> = chart
        .bars
        .iter()
        .map(|b| {
            json!({
                "x": round2(b.x),
                "y": round2(b.y),
                "width": round2(b.width),
                "height": round2(b.height),
            })
        })
        .collect();
    let cards: Vec<JSValue> = results
        .cards
        .iter()
        .map(|c| {
            let mut js = json!({
                "position": c.position,
                "image": c.image_path,
                "name": c.candidate_name,
                "party": c.party,
            });
            for (key, value) in [("age", &c.age), ("category", &c.category), ("symbol", &c.symbol)] {
                if let Some(v) = value {
                    js[key] = json!(v);
                }
            }
            js
        })
        .collect();
    json!({
        "config": {
            "variant": schema.variant,
            "resource": schema.resource_id,
        },
        "results": {
            "constituency": results.constituency,
            "title": results.title,
            "totalCandidates": results.total_candidates,
            "candidatesExcludingNota": results.candidates_excluding_nota,
            "ranked": ranked,
            "chart": {
                "width": round2(chart.layout.width),
                "height": round2(chart.layout.height),
                "yDomainMax": chart.y_domain_max,
                "bars": bars,
            },
            "cards": cards,
        }
    })
}

/// Relative output paths are placed in the configured output directory, if any.
fn output_path(config: &ViewerConfig, root: &Path, path: &str) -> String {
    let out_dir = config
        .output_settings
        .as_ref()
        .and_then(|o| o.output_directory.as_ref());
    match out_dir {
        Some(dir) if path != "stdout" && Path::new(path).is_relative() => {
            root.join(dir).join(path).display().to_string()
        }
        _ => path.to_string(),
    }
}

fn write_output(path: &str, contents: &str) -> ViewerResult<()> {
    if path == "stdout" {
        println!("{}", contents);
        Ok(())
    } else {
        info!("Writing {:?}", path);
        fs::write(path, contents).context(WritingFileSnafu { path })
    }
}

/// Checks a produced summary against a reference file.
pub fn check_reference(summary_js: &JSValue, reference_path: &str) -> ViewerResult<()> {
    let pretty_js_stats = serde_json::to_string_pretty(summary_js).context(ParsingJsonSnafu {})?;
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

pub fn run_viewer(args: &Args) -> ViewerResult<()> {
    let (config, schema, root) = resolve_config(args)?;
    info!("config: {:?}", config);

    let source = CachedSource::new(FileSource::new(
        root.clone(),
        config.data_sources.clone(),
        schema.clone(),
    ));

    let all_records = source.load(&schema.resource_id).context(PipelineSnafu {})?;
    let constituencies = list_constituencies(&all_records);
    info!(
        "Read {} records in {} constituencies",
        all_records.len(),
        constituencies.len()
    );

    if args.list {
        for name in constituencies.iter() {
            println!("{}", name);
        }
        return Ok(());
    }

    let page_title = config
        .output_settings
        .as_ref()
        .and_then(|o| o.title.clone());
    let surface = HtmlSurface::new(page_title, constituencies, schema.chart.clone());
    let mut controller = ViewController::new(schema, surface);

    for name in args.constituency.iter() {
        match controller.select(name, &source) {
            Ok(SelectionOutcome::Applied) => {}
            Ok(SelectionOutcome::Stale) => {
                warn!("Selection of {:?} was superseded", name);
            }
            Err(ResultsError::NoMatchingRecords { constituency }) => {
                warn!("No data found for constituency: {}", constituency);
            }
            Err(e) => return Err(e).context(PipelineSnafu {}),
        }
    }

    let summary_js = controller
        .last_results()
        .map(|results| build_summary_js(controller.schema(), results));

    if let Some(svg_path) = &args.svg {
        let svg_path = output_path(&config, &root, svg_path);
        write_output(&svg_path, &controller.surface().chart_svg())?;
    }
    if let Some(html_path) = &args.html {
        let html_path = output_path(&config, &root, html_path);
        write_output(&html_path, &controller.surface().render_page())?;
    }

    match (&summary_js, &args.out) {
        (Some(js), Some(out_path)) => {
            let pretty = serde_json::to_string_pretty(js).context(ParsingJsonSnafu {})?;
            write_output(&output_path(&config, &root, out_path), &pretty)?;
        }
        (Some(js), None) if args.svg.is_none() && args.html.is_none() => {
            let pretty = serde_json::to_string_pretty(js).context(ParsingJsonSnafu {})?;
            println!("summary:{}", pretty);
        }
        (None, _) if !args.constituency.is_empty() => {
            warn!("Nothing to display for the selected constituencies");
        }
        _ => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        match &summary_js {
            Some(js) => check_reference(js, reference_path)?,
            None => whatever!("No summary to compare with the reference {}", reference_path),
        }
    }

    Ok(())
}
