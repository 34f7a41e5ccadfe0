use std::f64::consts::PI;

use svg::node::element::{Circle, Path, Text};
use svg::{Document, node};

use crate::domain::percentage;

use super::{COLORS, Series, escape};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 560.0;
const RADIUS: f64 = 200.0;
const CENTER: (f64, f64) = (WIDTH / 2.0, HEIGHT / 2.0 + 20.0);
const LABEL_RADIUS: f64 = RADIUS * 1.18;

/// Proportional chart: one slice per series point, sized by its share of the total.
///
/// Slices start at twelve o'clock and go counter-clockwise, in series order.
#[derive(Debug, Clone)]
pub struct PieChart {
    title: String,
    series: Series,
}

impl PieChart {
    pub fn new(title: impl Into<String>, series: Series) -> Self {
        Self {
            title: title.into(),
            series,
        }
    }

    /// Build the SVG document. `None` when the series sums to zero.
    pub fn document(&self) -> Option<Document> {
        let total = self.series.total();
        if total <= 0 {
            return None;
        }

        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .add(title(&self.title));

        let mut start = PI / 2.0;
        for (i, (label, value)) in self.series.points().iter().enumerate() {
            if *value <= 0 {
                continue;
            }
            let share = percentage(*value, total);
            let sweep = *value as f64 / total as f64 * 2.0 * PI;
            let color = COLORS[i % COLORS.len()];

            document = if *value == total {
                document.add(full_slice(color))
            } else {
                document.add(slice(start, start + sweep, color))
            };

            let (x, y) = polar(LABEL_RADIUS, start + sweep / 2.0);
            document = document.add(
                Text::new()
                    .set("x", x)
                    .set("y", y)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 14.0)
                    .add(node::Text::new(format!("{} {:.1}%", escape(label), share))),
            );

            start += sweep;
        }

        Some(document)
    }
}

/// Point at `radius` from the centre, `angle` radians counter-clockwise from three o'clock.
fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (
        CENTER.0 + radius * angle.cos(),
        CENTER.1 - radius * angle.sin(),
    )
}

fn slice(from: f64, to: f64, color: &str) -> Path {
    let (x0, y0) = polar(RADIUS, from);
    let (x1, y1) = polar(RADIUS, to);
    let large_arc = if to - from > PI { 1 } else { 0 };
    // sweep-flag 0: counter-clockwise on screen
    let d = format!(
        "M {:.3} {:.3} L {:.3} {:.3} A {r} {r} 0 {} 0 {:.3} {:.3} Z",
        CENTER.0,
        CENTER.1,
        x0,
        y0,
        large_arc,
        x1,
        y1,
        r = RADIUS
    );
    Path::new()
        .set("class", "slice")
        .set("d", d)
        .set("fill", color)
        .set("stroke", "white")
}

/// A single 100% slice cannot be drawn as an arc with identical end points.
fn full_slice(color: &str) -> Circle {
    Circle::new()
        .set("class", "slice")
        .set("cx", CENTER.0)
        .set("cy", CENTER.1)
        .set("r", RADIUS)
        .set("fill", color)
}

fn title(text: &str) -> Text {
    Text::new()
        .set("x", WIDTH / 2.0)
        .set("y", 32.0)
        .set("text-anchor", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", 20.0)
        .add(node::Text::new(escape(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_one_slice_per_category() {
        let series: Series = [("food", 5250), ("transport", 2000), ("rent", 90000)]
            .into_iter()
            .collect();
        let svg = PieChart::new("Spending by Category", series)
            .document()
            .unwrap()
            .to_string();

        assert_eq!(count(&svg, "class=\"slice\""), 3);
        assert_eq!(count(&svg, "<path"), 3);
        assert!(svg.contains("Spending by Category"));
        assert!(svg.contains("food 5.4%"));
        assert!(svg.contains("rent 92.5%"));
    }

    #[test]
    fn test_single_category_is_a_full_circle() {
        let series: Series = [("food", 100)].into_iter().collect();
        let svg = PieChart::new("t", series).document().unwrap().to_string();

        assert_eq!(count(&svg, "<circle"), 1);
        assert_eq!(count(&svg, "<path"), 0);
        assert!(svg.contains("food 100.0%"));
    }

    #[test]
    fn test_zero_slices_are_skipped() {
        let series: Series = [("free", 0), ("food", 300), ("bus", 100)]
            .into_iter()
            .collect();
        let svg = PieChart::new("t", series).document().unwrap().to_string();

        assert_eq!(count(&svg, "class=\"slice\""), 2);
        assert!(!svg.contains("free"));
    }

    #[test]
    fn test_zero_total_has_no_document() {
        let series: Series = [("free", 0)].into_iter().collect();
        assert!(PieChart::new("t", series).document().is_none());
    }

    #[test]
    fn test_large_slice_uses_large_arc() {
        let series: Series = [("big", 900), ("small", 100)].into_iter().collect();
        let svg = PieChart::new("t", series).document().unwrap().to_string();
        assert!(svg.contains(" 0 1 0 "));
    }

    #[test]
    fn test_polar_starts_at_twelve_oclock() {
        let (x, y) = polar(RADIUS, PI / 2.0);
        assert!((x - CENTER.0).abs() < 1e-9);
        assert!((y - (CENTER.1 - RADIUS)).abs() < 1e-9);
    }
}
