/*!
Layout of the vote bar chart.

The chart is described as plain data (rectangles, labels and axis ticks in
pixel coordinates). Turning the description into pixels is left to the display
layer.

Candidates are laid out on a band scale: the bounded width is split into one
band per candidate, with a padding fraction between the bands and on both
sides. Heights follow a linear scale from zero to the largest vote total,
rounded up to a round number with the usual 1, 2, 5 x 10^k steps.
*/

use log::debug;

use crate::config::{CandidateRecord, ChartConfig, Margins};
use crate::format::{format_tick, format_votes};

// Thresholds between the 1, 2, 5 and 10 tick increments.
const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Gap between the top of a bar and its value label.
const VALUE_LABEL_OFFSET: f64 = 5.0;
/// Rotation of the candidate labels under the bars, in degrees.
const CATEGORY_LABEL_ROTATION: f64 = -30.0;
/// Horizontal position of the y-axis title, from the left edge of the chart.
const AXIS_TITLE_X: f64 = 16.0;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct LayoutGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub bounded_width: f64,
    pub bounded_height: f64,
}

impl LayoutGeometry {
    pub fn from_config(config: &ChartConfig) -> LayoutGeometry {
        let m = config.margins;
        LayoutGeometry {
            width: config.total_width,
            height: config.total_height,
            margins: m,
            bounded_width: (config.total_width - m.left - m.right).max(0.0),
            bounded_height: (config.total_height - m.top - m.bottom).max(0.0),
        }
    }
}

/// Equal-width padded slots along `[0, range]`, one per category.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct BandScale {
    start: f64,
    step: f64,
    bandwidth: f64,
    count: usize,
}

impl BandScale {
    pub fn new(count: usize, range: f64, padding: f64) -> BandScale {
        let n = count as f64;
        let step = range / (n - padding + padding * 2.0).max(1.0);
        // Centre the bands in the range.
        let start = (range - step * (n - padding)) * 0.5;
        BandScale {
            start,
            step,
            bandwidth: step * (1.0 - padding),
            count,
        }
    }

    /// Left edge of the band at `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        if index < self.count {
            Some(self.start + self.step * index as f64)
        } else {
            None
        }
    }

    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Maps `[0, domain_max]` onto `[height, 0]` (SVG y grows downwards).
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct LinearScale {
    domain_max: f64,
    height: f64,
}

impl LinearScale {
    /// A scale whose upper bound is `max_value` rounded up for `tick_count` ticks.
    pub fn niced(max_value: f64, height: f64, tick_count: usize) -> LinearScale {
        LinearScale {
            domain_max: nice_upper_bound(max_value, tick_count),
            height,
        }
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    pub fn scale(&self, value: f64) -> f64 {
        self.height - value / self.domain_max * self.height
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(0.0, self.domain_max, count)
    }
}

/// The step between ticks covering `[start, stop]` with about `count` ticks.
///
/// Steps below one are returned as the negated inverse (`-10.0` for `0.1`)
/// to keep the arithmetic exact.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        -(10f64.powf(-power)) / factor
    } else {
        factor * 10f64.powf(power)
    }
}

/// Rounds the upper bound of `[0, max_value]` up to a multiple of the tick step.
///
/// A zero (or invalid) maximum gives the unit domain so that all bars sit at
/// the baseline.
pub fn nice_upper_bound(max_value: f64, count: usize) -> f64 {
    if !max_value.is_finite() || max_value <= 0.0 {
        return 1.0;
    }
    let mut stop = max_value;
    let mut previous_step: Option<f64> = None;
    for _ in 0..10 {
        let step = tick_increment(0.0, stop, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }
    stop
}

/// Tick values covering `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(stop > start) || count == 0 {
        return vec![];
    }
    let inc = tick_increment(start, stop, count);
    if !inc.is_finite() || inc == 0.0 {
        return vec![];
    }
    if inc > 0.0 {
        let i0 = (start / inc).ceil() as i64;
        let i1 = (stop / inc).floor() as i64;
        (i0..=i1).map(|i| i as f64 * inc).collect()
    } else {
        let inv = -inc;
        let i0 = (start * inv).ceil() as i64;
        let i1 = (stop * inv).floor() as i64;
        (i0..=i1).map(|i| i as f64 / inv).collect()
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Bar {
    pub rank: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub value: u64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ValueLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub fill: String,
    pub font_size: f64,
    pub bold: bool,
}

/// The two-line label under a bar: candidate name, then party.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryLabel {
    /// Centre of the band.
    pub x: f64,
    pub rotation: f64,
    pub name: String,
    pub party: String,
    pub name_font_size: Option<f64>,
    pub party_font_size: f64,
    pub party_fill: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AxisTick {
    pub value: f64,
    /// Distance from the top of the plotting area.
    pub offset: f64,
    pub label: String,
}

/// The vertical title of the y axis. Unlike the other elements, its position
/// is relative to the whole chart, not to the plotting area.
#[derive(PartialEq, Debug, Clone)]
pub struct AxisTitle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub bold: bool,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ChartDescription {
    pub layout: LayoutGeometry,
    pub y_domain_max: f64,
    pub bars: Vec<Bar>,
    pub value_labels: Vec<ValueLabel>,
    pub category_labels: Vec<CategoryLabel>,
    pub y_ticks: Vec<AxisTick>,
    pub tick_label_size: f64,
    pub y_axis_title: Option<AxisTitle>,
}

impl ChartDescription {
    pub fn empty(layout: LayoutGeometry) -> ChartDescription {
        ChartDescription {
            layout,
            y_domain_max: 0.0,
            bars: vec![],
            value_labels: vec![],
            category_labels: vec![],
            y_ticks: vec![],
            tick_label_size: 0.0,
            y_axis_title: None,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Lays out one bar per ranked candidate, in ranking order.
pub fn render_chart(ranked: &[CandidateRecord], config: &ChartConfig) -> ChartDescription {
    let layout = LayoutGeometry::from_config(config);
    if ranked.is_empty() {
        debug!("render_chart: no candidates, empty chart");
        return ChartDescription::empty(layout);
    }

    // Bands are indexed by position so that two candidates sharing a name
    // still get their own bar.
    let x_scale = BandScale::new(ranked.len(), layout.bounded_width, config.band_padding);
    let max_votes = ranked.iter().map(|r| r.vote_total).max().unwrap_or(0);
    let y_scale = LinearScale::niced(max_votes as f64, layout.bounded_height, config.tick_count);
    debug!(
        "render_chart: {} bars, bandwidth {:.2}, y domain [0, {}]",
        ranked.len(),
        x_scale.bandwidth(),
        y_scale.domain_max()
    );

    let mut bars: Vec<Bar> = Vec::new();
    let mut value_labels: Vec<ValueLabel> = Vec::new();
    let mut category_labels: Vec<CategoryLabel> = Vec::new();
    for (idx, record) in ranked.iter().enumerate() {
        let x = x_scale.position(idx).unwrap_or(0.0);
        let y = y_scale.scale(record.vote_total as f64);
        bars.push(Bar {
            rank: idx,
            x,
            y,
            width: x_scale.bandwidth(),
            height: layout.bounded_height - y,
            fill: config.bar_color.clone(),
            value: record.vote_total,
        });
        let center = x_scale.center(idx).unwrap_or(x);
        value_labels.push(ValueLabel {
            x: center,
            y: y - VALUE_LABEL_OFFSET,
            text: format_votes(record.vote_total, config.number_format),
            fill: config.label_color.clone(),
            font_size: config.value_label_size,
            bold: config.value_label_bold,
        });
        category_labels.push(CategoryLabel {
            x: center,
            rotation: CATEGORY_LABEL_ROTATION,
            name: record.candidate_name.clone(),
            party: record.party.clone(),
            name_font_size: config.name_label_size,
            party_font_size: config.party_label_size,
            party_fill: config.label_color.clone(),
        });
    }

    let y_ticks: Vec<AxisTick> = y_scale
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            offset: y_scale.scale(value),
            label: format_tick(value, config.tick_format),
        })
        .collect();

    let y_axis_title = config.y_axis_title.as_ref().map(|text| AxisTitle {
        text: text.clone(),
        x: AXIS_TITLE_X,
        y: layout.bounded_height / 2.0,
        font_size: config.axis_title_size,
        bold: config.axis_title_bold,
    });

    ChartDescription {
        layout,
        y_domain_max: y_scale.domain_max(),
        bars,
        value_labels,
        category_labels,
        y_ticks,
        tick_label_size: config.tick_label_size,
        y_axis_title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaConfig;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn nice_bounds() {
        assert_eq!(nice_upper_bound(70000.0, 10), 70000.0);
        assert_eq!(nice_upper_bound(99999.0, 10), 100000.0);
        assert_eq!(nice_upper_bound(512345.0, 10), 550000.0);
        assert_eq!(nice_upper_bound(7.0, 10), 7.0);
        assert_eq!(nice_upper_bound(0.0, 10), 1.0);
    }

    #[test]
    fn tick_increments() {
        assert_eq!(tick_increment(0.0, 70000.0, 10), 5000.0);
        assert_eq!(tick_increment(0.0, 100000.0, 10), 10000.0);
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
    }

    #[test]
    fn ticks_cover_domain() {
        let t = ticks(0.0, 70000.0, 10);
        assert_eq!(t.len(), 15);
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&70000.0));
        let t = ticks(0.0, 1.0, 10);
        assert_eq!(t.len(), 11);
        assert!(close(t[3], 0.3));
        assert!(ticks(0.0, 0.0, 10).is_empty());
    }

    #[test]
    fn band_geometry() {
        let b = BandScale::new(2, 490.0, 0.08);
        let step = 490.0 / 2.08;
        assert!(close(b.step(), step));
        assert!(close(b.bandwidth(), step * 0.92));
        let x0 = b.position(0).unwrap();
        let x1 = b.position(1).unwrap();
        assert!(close(x1 - x0, step));
        // Symmetric outer padding
        assert!(close(x0, 490.0 - (x1 + b.bandwidth())));
        assert_eq!(b.position(2), None);
    }

    #[test]
    fn single_band_is_centered() {
        let b = BandScale::new(1, 100.0, 0.1);
        let x = b.position(0).unwrap();
        assert!(close(x + b.bandwidth() / 2.0, 50.0));
        assert_eq!(b.center(0), Some(x + b.bandwidth() / 2.0));
        assert_eq!(b.center(1), None);
    }

    #[test]
    fn bars_scaled_to_max() {
        let config = SchemaConfig::tn2019().chart;
        let ranked = vec![
            CandidateRecord::new("Chennai North", "B", "PartyY", 70000),
            CandidateRecord::new("Chennai North", "A", "PartyX", 50000),
        ];
        let chart = render_chart(&ranked, &config);
        assert_eq!(chart.layout.bounded_width, 490.0);
        assert_eq!(chart.layout.bounded_height, 350.0);
        assert_eq!(chart.y_domain_max, 70000.0);
        assert_eq!(chart.bars.len(), 2);
        assert!(close(chart.bars[0].y, 0.0));
        assert!(close(chart.bars[0].height, 350.0));
        assert!(close(chart.bars[1].height, 250.0));
        assert!(close(chart.bars[1].y, 100.0));
        assert_eq!(chart.bars[0].fill, "#deb887");
        assert_eq!(chart.value_labels[0].text, "70,000");
        for (bar, label) in chart.bars.iter().zip(chart.value_labels.iter()) {
            assert!(close(label.x, bar.x + bar.width / 2.0));
        }
        assert!(close(chart.category_labels[1].x, chart.value_labels[1].x));
        assert!(close(chart.value_labels[1].y, 95.0));
        assert_eq!(chart.category_labels[1].name, "A");
        assert_eq!(chart.category_labels[1].party, "PartyX");
        assert_eq!(chart.y_ticks.len(), 15);
        assert_eq!(chart.y_ticks[1].label, "5,000");
        assert_eq!(chart.y_ticks.last().map(|t| t.label.as_str()), Some("70,000"));
        assert_eq!(chart.tick_label_size, 10.0);
        assert!(chart.y_axis_title.is_none());
    }

    #[test]
    fn formatted_ticks_and_title() {
        let config = SchemaConfig::pc2024().chart;
        let ranked = vec![CandidateRecord::new("X", "A", "P", 99999)];
        let chart = render_chart(&ranked, &config);
        assert_eq!(chart.y_domain_max, 100000.0);
        assert_eq!(chart.y_ticks.last().map(|t| t.label.as_str()), Some("1,00,000"));
        let title = chart.y_axis_title.as_ref().unwrap();
        assert_eq!(title.text, "Total Votes");
        assert_eq!(title.x, 16.0);
        assert_eq!(title.y, chart.layout.bounded_height / 2.0);
        assert_eq!(title.font_size, 13.0);
        assert!(title.bold);
        assert_eq!(chart.tick_label_size, 11.0);
        assert!(chart.value_labels[0].bold);
    }

    #[test]
    fn empty_chart() {
        let config = SchemaConfig::tn2019().chart;
        let chart = render_chart(&[], &config);
        assert!(chart.is_empty());
        assert!(chart.value_labels.is_empty());
        assert!(chart.category_labels.is_empty());
        assert!(chart.y_ticks.is_empty());
    }

    #[test]
    fn huge_totals_keep_exact_tick_labels() {
        let config = SchemaConfig::pc2024().chart;
        let ranked = vec![CandidateRecord::new("X", "A", "P", u64::MAX)];
        let chart = render_chart(&ranked, &config);
        assert_eq!(chart.y_domain_max, 2e19);
        assert_eq!(
            chart.y_ticks.last().map(|t| t.label.as_str()),
            Some("20000000000000000000")
        );
    }

    #[test]
    fn zero_votes_sit_on_baseline() {
        let config = SchemaConfig::tn2019().chart;
        let ranked = vec![CandidateRecord::new("X", "A", "P", 0)];
        let chart = render_chart(&ranked, &config);
        assert_eq!(chart.y_domain_max, 1.0);
        assert!(close(chart.bars[0].height, 0.0));
    }
}
