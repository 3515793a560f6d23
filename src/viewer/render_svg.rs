// SVG rendering of a chart description.

use std::fmt::Write;

use constituency_results::chart::ChartDescription;

const FONT_FAMILY: &str = "sans-serif";
const TICK_SIZE: f64 = 6.0;

pub(crate) fn escape<S: AsRef<str>>(s: S) -> String {
    let mut out = String::with_capacity(s.as_ref().len() + 8);
    for ch in s.as_ref().chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn num(x: f64) -> String {
    let r = (x * 100.0).round() / 100.0;
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{}", r)
    }
}

/// The chart as a standalone SVG document. An empty chart gives an empty string.
pub fn chart_to_svg(chart: &ChartDescription) -> String {
    if chart.is_empty() {
        return String::new();
    }
    let layout = &chart.layout;
    let m = layout.margins;
    let mut s = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="{}">"#,
        num(layout.width),
        num(layout.height),
        num(layout.width),
        num(layout.height),
        FONT_FAMILY
    );
    let _ = writeln!(s, r#"<g transform="translate({},{})">"#, num(m.left), num(m.top));

    // Bars and their values
    for bar in chart.bars.iter() {
        let _ = writeln!(
            s,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(bar.x),
            num(bar.y),
            num(bar.width),
            num(bar.height),
            escape(&bar.fill)
        );
    }
    for label in chart.value_labels.iter() {
        let weight = if label.bold { r#" font-weight="bold""# } else { "" };
        let _ = writeln!(
            s,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="{}" fill="{}"{}>{}</text>"#,
            num(label.x),
            num(label.y),
            num(label.font_size),
            escape(&label.fill),
            weight,
            escape(&label.text)
        );
    }

    // X axis: baseline and the rotated candidate labels
    let base = layout.bounded_height;
    let _ = writeln!(
        s,
        r#"<line class="x-axis" x1="0" y1="{}" x2="{}" y2="{}" stroke="currentColor"/>"#,
        num(base),
        num(layout.bounded_width),
        num(base)
    );
    for label in chart.category_labels.iter() {
        let name_size = label
            .name_font_size
            .map(|f| format!(r#" font-size="{}""#, num(f)))
            .unwrap_or_default();
        let _ = writeln!(
            s,
            r#"<text transform="translate({},{}) rotate({})" text-anchor="end"><tspan x="0" dy="0.71em"{}>{}</tspan><tspan x="0" dy="1.2em" font-size="{}" fill="{}">{}</tspan></text>"#,
            num(label.x),
            num(base + TICK_SIZE + 3.0),
            num(label.rotation),
            name_size,
            escape(&label.name),
            num(label.party_font_size),
            escape(&label.party_fill),
            escape(&label.party)
        );
    }

    // Y axis
    let _ = writeln!(
        s,
        r#"<line class="y-axis" x1="0" y1="0" x2="0" y2="{}" stroke="currentColor"/>"#,
        num(base)
    );
    for tick in chart.y_ticks.iter() {
        let _ = writeln!(
            s,
            r#"<line x1="{}" y1="{}" x2="0" y2="{}" stroke="currentColor"/><text x="{}" y="{}" dy="0.32em" text-anchor="end" font-size="{}">{}</text>"#,
            num(-TICK_SIZE),
            num(tick.offset),
            num(tick.offset),
            num(-TICK_SIZE - 3.0),
            num(tick.offset),
            num(chart.tick_label_size),
            escape(&tick.label)
        );
    }
    s.push_str("</g>\n");

    // The axis title is placed relative to the whole chart.
    if let Some(title) = &chart.y_axis_title {
        let weight = if title.bold { r#" font-weight="bold""# } else { "" };
        let _ = writeln!(
            s,
            r#"<text class="y-axis-title" transform="translate({},{}) rotate(-90)" text-anchor="middle" font-size="{}"{}>{}</text>"#,
            num(title.x),
            num(title.y),
            num(title.font_size),
            weight,
            escape(&title.text)
        );
    }

    s.push_str("</svg>\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use constituency_results::chart::{render_chart, LayoutGeometry};
    use constituency_results::{CandidateRecord, SchemaConfig};

    #[test]
    fn one_rect_per_bar() {
        let schema = SchemaConfig::pc2024();
        let ranked = vec![
            CandidateRecord::new("X", "B", "PartyY", 70000),
            CandidateRecord::new("X", "A & co", "PartyX", 50000),
            CandidateRecord::new("X", "C", "PartyZ", 1200),
        ];
        let chart = render_chart(&ranked, &schema.chart);
        let svg = chart_to_svg(&chart);
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("A &amp; co"));
        assert!(svg.contains("70,000"));
        assert!(svg.contains("Total Votes"));
        assert!(svg.contains(r##"fill="#1db6d5""##));
        assert!(svg.contains(
            r#"<text class="y-axis-title" transform="translate(16,217.5) rotate(-90)" text-anchor="middle" font-size="13" font-weight="bold">Total Votes</text>"#
        ));
        assert!(svg.contains(r#"text-anchor="end" font-size="11">70,000</text>"#));
        // The title is outside the translated plotting area.
        let title_at = svg.find("y-axis-title").unwrap();
        assert!(svg.find("</g>").unwrap() < title_at);
    }

    #[test]
    fn tn2019_ticks_are_grouped() {
        let schema = SchemaConfig::tn2019();
        let ranked = vec![CandidateRecord::new("X", "A", "P", 70000)];
        let svg = chart_to_svg(&render_chart(&ranked, &schema.chart));
        assert!(svg.contains(r#"font-size="10">5,000</text>"#));
        assert!(svg.contains(r#"font-size="10">70,000</text>"#));
        assert!(!svg.contains("y-axis-title"));
    }

    #[test]
    fn empty_chart() {
        let layout = LayoutGeometry::from_config(&SchemaConfig::tn2019().chart);
        assert_eq!(chart_to_svg(&ChartDescription::empty(layout)), "");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape(r#"<a href="x">'b'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;b&#39;&lt;/a&gt;");
    }
}
