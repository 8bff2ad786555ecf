use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{distinct_crop_names, AppState, DerivedViews},
    ui::components::{
        average_table::{HighValueChart, RegionAveragePanel},
        kpi_card::KpiCard,
        price_chart::PriceChart,
    },
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let listings = state.with(|st| st.listings.clone());
    let selection = state.with(|st| st.selection.clone());
    let threshold = state.with(|st| st.price_threshold);
    let region_names = state.with(|st| st.region_names());

    if listings.is_empty() {
        return rsx! {
            div { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-sm text-slate-400",
                "Loading market listings..."
            }
        };
    }

    let views = DerivedViews::compute(&listings, &selection, threshold);
    let crop_names = distinct_crop_names(&listings);
    let selected_crop = selection.selected_crop.clone().unwrap_or_default();
    let selected_region = selection.selected_region.clone();

    let on_crop_change = {
        let mut state = state.clone();
        move |evt: Event<FormData>| {
            state.with_mut(|st| st.selection.select_crop(evt.value()));
            persist_user_state(&state);
        }
    };

    rsx! {
        div { class: "space-y-6",
            header { class: "flex flex-wrap items-start justify-between gap-4",
                div {
                    h1 { class: "text-2xl font-semibold text-slate-100", "Crop Price Dashboard" }
                    p { class: "text-sm text-slate-400",
                        "Track price history per crop and compare averages across regions."
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Crop" }
                    select {
                        class: "mt-1 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                        value: "{selected_crop}",
                        onchange: on_crop_change,
                        for name in crop_names.iter() {
                            option { value: "{name}", selected: *name == selected_crop, "{name}" }
                        }
                    }
                }
            }

            div { class: "grid gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Listings".to_string(),
                    value: listings.len().to_string(),
                    description: Some("in the current store".to_string()),
                }
                KpiCard {
                    title: "Crops".to_string(),
                    value: crop_names.len().to_string(),
                    description: Some("distinct crops on offer".to_string()),
                }
                KpiCard {
                    title: "High-Value Crops".to_string(),
                    value: views.global_averages.len().to_string(),
                    description: Some(format!("averaging above TZS {threshold}/kg")),
                }
            }

            PriceChart { crop_name: selected_crop.clone(), points: views.series.clone() }

            section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Regions" }
                p { class: "mt-1 text-xs text-slate-500",
                    "Pick a region to compare crop averages. Sold-out listings are excluded."
                }
                div { class: "mt-3 flex flex-wrap gap-2",
                    RegionButton {
                        active: selected_region.is_none(),
                        label: "All".to_string(),
                        onclick: {
                            let mut state = state.clone();
                            move |_| state.with_mut(|st| st.selection.clear_region())
                        },
                    }
                    for name in region_names {
                        RegionButton {
                            active: selected_region.as_deref() == Some(name.as_str()),
                            label: name.clone(),
                            onclick: {
                                let mut state = state.clone();
                                let name = name.clone();
                                move |_| state.with_mut(|st| st.selection.select_region(name.clone()))
                            },
                        }
                    }
                }
            }

            if let Some(region) = selected_region {
                RegionAveragePanel { region, averages: views.region_averages.clone() }
            }

            HighValueChart { averages: views.global_averages.clone(), threshold }
        }
    }
}

#[component]
fn RegionButton(active: bool, label: String, onclick: EventHandler<()>) -> Element {
    let class = if active {
        "rounded-lg border border-emerald-500/60 bg-emerald-500/15 px-3 py-1.5 text-xs font-semibold text-emerald-300"
    } else {
        "rounded-lg border border-slate-700 px-3 py-1.5 text-xs text-slate-400 transition hover:border-emerald-700 hover:text-emerald-300"
    };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
