use dioxus::prelude::*;

use crate::domain::CropPricePoint;

const VIEW_WIDTH: f64 = 640.0;
const VIEW_HEIGHT: f64 = 220.0;
const PAD_X: f64 = 48.0;
const PAD_Y: f64 = 24.0;

/// Line chart of one crop's price history, oldest date on the left.
#[component]
pub fn PriceChart(crop_name: String, points: Vec<CropPricePoint>) -> Element {
    if points.is_empty() {
        return rsx! {
            div {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-sm text-slate-400",
                "No dated price history for {crop_name} yet."
            }
        };
    }

    let geometry = ChartGeometry::fit(&points);
    let polyline = geometry.polyline(&points);
    let markers: Vec<(f64, f64, String)> = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let (x, y) = geometry.position(index, point.price);
            (x, y, format!("{}: TZS {}", point.date, point.price))
        })
        .collect();

    let first_date = points.first().map(|p| p.date.clone()).unwrap_or_default();
    let last_date = points.last().map(|p| p.date.clone()).unwrap_or_default();

    let right_edge = VIEW_WIDTH - PAD_X;
    let bottom_edge = VIEW_HEIGHT - PAD_Y;
    let label_x = PAD_X - 8.0;
    let top_label_y = PAD_Y + 4.0;
    let bottom_label_y = bottom_edge + 4.0;

    rsx! {
        div { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
            div { class: "flex items-baseline justify-between",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Price Trend" }
                span { class: "text-xs text-slate-500", "{crop_name} · TZS per kg" }
            }
            svg {
                class: "mt-4 w-full",
                view_box: "0 0 {VIEW_WIDTH} {VIEW_HEIGHT}",
                preserve_aspect_ratio: "none",
                // Gridlines at the price extremes.
                line {
                    x1: "{PAD_X}", y1: "{PAD_Y}",
                    x2: "{right_edge}", y2: "{PAD_Y}",
                    stroke: "#1e293b", stroke_width: "1",
                }
                line {
                    x1: "{PAD_X}", y1: "{bottom_edge}",
                    x2: "{right_edge}", y2: "{bottom_edge}",
                    stroke: "#1e293b", stroke_width: "1",
                }
                text {
                    x: "{label_x}", y: "{top_label_y}",
                    text_anchor: "end", fill: "#64748b", font_size: "11",
                    "{geometry.max_price}"
                }
                text {
                    x: "{label_x}", y: "{bottom_label_y}",
                    text_anchor: "end", fill: "#64748b", font_size: "11",
                    "{geometry.min_price}"
                }
                polyline {
                    points: "{polyline}",
                    fill: "none",
                    stroke: "#34d399",
                    stroke_width: "2",
                    stroke_linejoin: "round",
                    stroke_linecap: "round",
                }
                for (x, y, tooltip) in markers {
                    circle {
                        cx: "{x}", cy: "{y}", r: "3.5",
                        fill: "#34d399",
                        title { "{tooltip}" }
                    }
                }
            }
            div { class: "mt-2 flex justify-between text-xs text-slate-500",
                span { "{first_date}" }
                span { "{last_date}" }
            }
        }
    }
}

struct ChartGeometry {
    min_price: u64,
    max_price: u64,
    point_count: usize,
}

impl ChartGeometry {
    fn fit(points: &[CropPricePoint]) -> Self {
        let min_price = points.iter().map(|p| p.price).min().unwrap_or(0);
        let max_price = points.iter().map(|p| p.price).max().unwrap_or(0);
        Self {
            min_price,
            max_price,
            point_count: points.len(),
        }
    }

    fn position(&self, index: usize, price: u64) -> (f64, f64) {
        let inner_width = VIEW_WIDTH - 2.0 * PAD_X;
        let inner_height = VIEW_HEIGHT - 2.0 * PAD_Y;

        let x = if self.point_count <= 1 {
            PAD_X + inner_width / 2.0
        } else {
            PAD_X + inner_width * index as f64 / (self.point_count - 1) as f64
        };

        let span = self.max_price.saturating_sub(self.min_price);
        let y = if span == 0 {
            PAD_Y + inner_height / 2.0
        } else {
            let ratio = (price - self.min_price) as f64 / span as f64;
            VIEW_HEIGHT - PAD_Y - inner_height * ratio
        };

        (x, y)
    }

    fn polyline(&self, points: &[CropPricePoint]) -> String {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let (x, y) = self.position(index, point.price);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
