use svg::node::element::{Line, Rectangle, Text};
use svg::{Document, node};

use crate::domain::format_cents;

use super::{Series, escape};

const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 90.0;
const SLOT_WIDTH: f64 = 70.0;
const MIN_PLOT_WIDTH: f64 = 420.0;
const BAR_COLOR: &str = "skyblue";

/// Vertical bar chart, one bar per series point, left to right in series order.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    x_label: String,
    y_label: String,
    series: Series,
}

impl BarChart {
    pub fn new(title: impl Into<String>, series: Series) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            series,
        }
    }

    pub fn with_axis_labels(
        mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn document(&self) -> Document {
        let plot_width = (SLOT_WIDTH * self.series.len() as f64).max(MIN_PLOT_WIDTH);
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let width = MARGIN_LEFT + plot_width + MARGIN_RIGHT;
        let baseline = MARGIN_TOP + plot_height;
        let slot = plot_width / self.series.len().max(1) as f64;
        // Avoid a zero scale when every bar is zero
        let max = self.series.max().max(1) as f64;

        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, width, HEIGHT))
            .set("width", width)
            .set("height", HEIGHT)
            .add(text(width / 2.0, 32.0, 20.0, &self.title))
            .add(axis(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, baseline))
            .add(axis(MARGIN_LEFT, baseline, MARGIN_LEFT + plot_width, baseline))
            .add(
                text(
                    MARGIN_LEFT - 8.0,
                    MARGIN_TOP + 4.0,
                    12.0,
                    &format_cents(self.series.max()),
                )
                .set("text-anchor", "end"),
            )
            .add(text(MARGIN_LEFT - 8.0, baseline + 4.0, 12.0, "0").set("text-anchor", "end"));

        for (i, (label, value)) in self.series.points().iter().enumerate() {
            let bar_height = *value as f64 / max * plot_height;
            let x = MARGIN_LEFT + slot * i as f64 + slot * 0.15;
            document = document
                .add(
                    Rectangle::new()
                        .set("class", "bar")
                        .set("x", x)
                        .set("y", baseline - bar_height)
                        .set("width", slot * 0.7)
                        .set("height", bar_height)
                        .set("fill", BAR_COLOR),
                )
                .add(text(x + slot * 0.35, baseline + 20.0, 12.0, label));
        }

        if !self.x_label.is_empty() {
            document = document.add(text(
                MARGIN_LEFT + plot_width / 2.0,
                HEIGHT - 30.0,
                14.0,
                &self.x_label,
            ));
        }
        if !self.y_label.is_empty() {
            let (x, y) = (24.0, MARGIN_TOP + plot_height / 2.0);
            document = document.add(
                text(x, y, 14.0, &self.y_label)
                    .set("transform", format!("rotate(-90 {} {})", x, y)),
            );
        }

        document
    }
}

fn text(x: f64, y: f64, size: f64, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", size)
        .add(node::Text::new(escape(content)))
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly() -> Series {
        [("2024-W00", 5250), ("2024-W01", 2000)].into_iter().collect()
    }

    #[test]
    fn test_one_bar_per_point() {
        let svg = BarChart::new("Weekly Spending", weekly())
            .with_axis_labels("Week Number", "Total Spending ($)")
            .document()
            .to_string();

        assert_eq!(svg.matches("class=\"bar\"").count(), 2);
        assert!(svg.contains("2024-W00"));
        assert!(svg.contains("2024-W01"));
        assert!(svg.contains("Week Number"));
        assert!(svg.contains("Total Spending ($)"));
        assert!(svg.contains("52.50"));
    }

    #[test]
    fn test_bars_keep_series_order() {
        let svg = BarChart::new("t", weekly()).document().to_string();
        let first = svg.find("2024-W00").unwrap();
        let second = svg.find("2024-W01").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_all_zero_series_still_renders() {
        let series: Series = [("2024-W03", 0)].into_iter().collect();
        let svg = BarChart::new("t", series).document().to_string();
        assert_eq!(svg.matches("class=\"bar\"").count(), 1);
        assert!(!svg.contains("NaN"));
    }
}
