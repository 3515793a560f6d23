// A static HTML page standing in for the two-panel results view.

use std::fmt::Write;

use constituency_results::cards::CandidateCard;
use constituency_results::chart::ChartDescription;
use constituency_results::format::format_votes;
use constituency_results::view::{DisplaySurface, ViewState};
use constituency_results::ChartConfig;
use log::debug;

use crate::viewer::render_svg::{chart_to_svg, escape};

const DEFAULT_PAGE_TITLE: &str = "Election Results";

const STYLE: &str = r#"body { font-family: sans-serif; margin: 1em; }
.hidden { display: none; }
.constituencies { columns: 3; }
.info { margin: 0.5em 0; font-weight: bold; }
.cards { display: flex; flex-wrap: wrap; gap: 1em; }
.card { width: 180px; border: 1px solid #ccc; border-radius: 6px; padding: 0.5em; text-align: center; }
.card img { width: 150px; height: 150px; object-fit: cover; }
.card img.missing { background: #eee; }
.empty { color: #a00; }"#;

/// Swaps a photo that fails to load for a grey box, keeping the alt text.
const IMG_ONERROR: &str = "this.onerror=null;this.classList.add('missing');this.removeAttribute('src')";

/// Collects what the view controller displays and renders it as one HTML page.
pub struct HtmlSurface {
    page_title: Option<String>,
    constituencies: Vec<String>,
    chart_config: ChartConfig,
    state: ViewState,
    title: Option<String>,
    chart: Option<ChartDescription>,
    cards: Vec<CandidateCard>,
    candidate_count: Option<(usize, usize)>,
    empty_message: Option<String>,
}

impl HtmlSurface {
    pub fn new(
        page_title: Option<String>,
        constituencies: Vec<String>,
        chart_config: ChartConfig,
    ) -> HtmlSurface {
        HtmlSurface {
            page_title,
            constituencies,
            chart_config,
            state: ViewState::Home,
            title: None,
            chart: None,
            cards: vec![],
            candidate_count: None,
            empty_message: None,
        }
    }

    /// The chart on display as SVG, or an empty string when there is none.
    pub fn chart_svg(&self) -> String {
        self.chart.as_ref().map(chart_to_svg).unwrap_or_default()
    }

    pub fn render_page(&self) -> String {
        let in_detail = matches!(self.state, ViewState::Detail { .. });
        let hidden = |visible: bool| if visible { "" } else { " hidden" };
        let page_title = self
            .page_title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(DEFAULT_PAGE_TITLE);

        let mut s = String::new();
        let _ = writeln!(s, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>");
        let _ = writeln!(s, "<meta charset=\"utf-8\">");
        let _ = writeln!(s, "<title>{}</title>", escape(page_title));
        let _ = writeln!(s, "<style>\n{}\n</style>\n</head>\n<body>", STYLE);

        // Home panel
        let _ = writeln!(s, "<div id=\"home\" class=\"panel{}\">", hidden(!in_detail));
        let _ = writeln!(s, "<h1>{}</h1>", escape(page_title));
        let _ = writeln!(s, "<ul class=\"constituencies\">");
        for name in self.constituencies.iter() {
            let _ = writeln!(
                s,
                "<li><a href=\"#\" data-constituency=\"{}\">{}</a></li>",
                escape(name),
                escape(name)
            );
        }
        let _ = writeln!(s, "</ul>\n</div>");

        // Detail panel
        let _ = writeln!(s, "<div id=\"detail\" class=\"panel{}\">", hidden(in_detail));
        let _ = writeln!(s, "<button id=\"back\" type=\"button\">Back</button>");
        if let Some(title) = &self.title {
            let _ = writeln!(s, "<h2 id=\"title\">{}</h2>", escape(title));
        }
        if let Some((_, excluding_nota)) = self.candidate_count {
            let _ = writeln!(
                s,
                "<div class=\"info\">Total number of candidates (Excluding NOTA): {}</div>",
                excluding_nota
            );
        }
        if let Some(message) = &self.empty_message {
            let _ = writeln!(s, "<p class=\"empty\">{}</p>", escape(message));
        }
        let svg = self.chart_svg();
        if !svg.is_empty() {
            let _ = write!(
                s,
                "<div id=\"chart\" style=\"max-width: {}px\">\n{}</div>\n",
                self.chart_config.total_width, svg
            );
        }
        if !self.cards.is_empty() {
            let _ = writeln!(s, "<div class=\"cards\">");
            for card in self.cards.iter() {
                self.write_card(&mut s, card);
            }
            let _ = writeln!(s, "</div>");
        }
        let _ = writeln!(s, "</div>\n</body>\n</html>");
        s
    }

    fn write_card(&self, s: &mut String, card: &CandidateCard) {
        let _ = writeln!(s, "<div class=\"card\">");
        let _ = writeln!(
            s,
            "<img src=\"{}\" alt=\"{}\" onerror=\"{}\">",
            escape(&card.image_path),
            escape(&card.alt_text),
            IMG_ONERROR
        );
        let _ = writeln!(s, "<div class=\"position\">{}</div>", escape(&card.position));
        let _ = writeln!(s, "<div class=\"name\">{}</div>", escape(&card.candidate_name));
        let _ = writeln!(s, "<div class=\"party\">{}</div>", escape(&card.party));
        let _ = writeln!(
            s,
            "<div class=\"votes\">{}</div>",
            format_votes(card.vote_total, self.chart_config.number_format)
        );
        for (label, value) in [
            ("Age", &card.age),
            ("Category", &card.category),
            ("Symbol", &card.symbol),
        ] {
            if let Some(v) = value {
                let _ = writeln!(s, "<div>{}: {}</div>", label, escape(v));
            }
        }
        let _ = writeln!(s, "</div>");
    }
}

impl DisplaySurface for HtmlSurface {
    fn clear(&mut self) {
        self.chart = None;
        self.cards.clear();
        self.candidate_count = None;
        self.empty_message = None;
    }

    fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(|t| t.to_string());
    }

    fn show_chart(&mut self, chart: &ChartDescription) {
        debug!("HtmlSurface: chart with {} bars", chart.bars.len());
        self.chart = Some(chart.clone());
    }

    fn show_cards(&mut self, cards: &[CandidateCard]) {
        self.cards = cards.to_vec();
    }

    fn show_candidate_count(&mut self, total: usize, excluding_nota: usize) {
        self.candidate_count = Some((total, excluding_nota));
    }

    fn show_empty(&mut self, constituency: &str) {
        self.empty_message = Some(format!("No data found for constituency: {}", constituency));
    }

    fn set_panel(&mut self, state: &ViewState) {
        self.state = state.clone();
    }
}
