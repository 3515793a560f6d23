use clap::Parser;

/// This is a constituency results viewer.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the data sources, the schema and the layout.
    /// See the manual of the constituency_results crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, pcresults will
    /// check that the produced summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the selected constituency will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The results file. Setting this option overrides the data sources
    /// of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx, default from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (tn2019 or pc2024, default pc2024) The built-in schema to use when the configuration does not name one.
    #[clap(long, value_parser)]
    pub variant: Option<String>,

    /// (name, repeatable) The constituency to display. When given several times, the
    /// selections are made in order and the last one is displayed.
    #[clap(short = 's', long, value_parser)]
    pub constituency: Vec<String>,

    /// If passed as an argument, prints the constituencies found in the input and exits.
    #[clap(long, takes_value = false)]
    pub list: bool,

    /// (file path) Writes the chart of the selected constituency as SVG.
    #[clap(long, value_parser)]
    pub svg: Option<String>,

    /// (file path) Writes an HTML page with the constituency list and the selected constituency.
    #[clap(long, value_parser)]
    pub html: Option<String>,

    /// (pixels) Shrinks the chart to fit a screen of this width.
    #[clap(long, value_parser)]
    pub viewport_width: Option<f64>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
