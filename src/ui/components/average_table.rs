use dioxus::prelude::*;

use crate::domain::{GlobalCropAverage, RegionCropAverage};

/// Per-crop averages for the selected region, non-sold listings only.
#[component]
pub fn RegionAveragePanel(region: String, averages: Vec<RegionCropAverage>) -> Element {
    rsx! {
        section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
            div { class: "flex items-baseline justify-between",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Region Averages" }
                span { class: "text-xs text-slate-500", "{region} · available listings only" }
            }
            if averages.is_empty() {
                p { class: "mt-3 text-sm text-slate-400",
                    "No available listings in {region} right now."
                }
            } else {
                ul { class: "mt-3 space-y-2 text-sm text-slate-300",
                    for average in averages {
                        li {
                            class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            span { "{average.crop_name}" }
                            span { class: "font-semibold text-emerald-300", "TZS {average.average_price}/kg" }
                        }
                    }
                }
            }
        }
    }
}

/// Bar chart of high-value crops: global averages strictly above the
/// configured threshold.
#[component]
pub fn HighValueChart(averages: Vec<GlobalCropAverage>, threshold: u64) -> Element {
    let max_average = averages
        .iter()
        .map(|average| average.average_price)
        .max()
        .unwrap_or(1)
        .max(1);

    rsx! {
        section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
            div { class: "flex items-baseline justify-between",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "High-Value Crops" }
                span { class: "text-xs text-slate-500", "average above TZS {threshold}/kg" }
            }
            if averages.is_empty() {
                p { class: "mt-3 text-sm text-slate-400",
                    "No crop averages above TZS {threshold}/kg. Lower the threshold in settings to see more."
                }
            } else {
                div { class: "mt-4 space-y-3",
                    for average in averages {
                        {
                            let width_pct = average.average_price as f64 / max_average as f64 * 100.0;
                            rsx! {
                                div {
                                    div { class: "flex justify-between text-xs text-slate-400",
                                        span { "{average.crop_name}" }
                                        span { "TZS {average.average_price}/kg" }
                                    }
                                    div { class: "mt-1 h-2 rounded-full bg-slate-800",
                                        div {
                                            class: "h-2 rounded-full bg-emerald-400",
                                            style: "width: {width_pct:.1}%",
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
