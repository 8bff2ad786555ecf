use dioxus::prelude::*;

use crate::{
    domain::{AppState, CropListing, ListingFilter, SaleKind},
    ui::components::listing_card::ListingCard,
};

#[component]
pub fn MarketPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let listings = state.with(|st| st.listings.clone());
    let region_names = state.with(|st| st.region_names());

    let mut kind_filter = use_signal(|| None::<SaleKind>);
    let mut region_filter = use_signal(|| None::<String>);
    let mut date_filter = use_signal(|| None::<String>);
    let mut category_filter = use_signal(|| None::<String>);
    let mut contact_listing = use_signal(|| None::<CropListing>);

    let filter = ListingFilter {
        kind: kind_filter(),
        region: region_filter(),
        date: date_filter(),
        category: category_filter(),
    };
    let matched: Vec<CropListing> = filter.apply(&listings).into_iter().cloned().collect();

    let mut categories: Vec<String> = Vec::new();
    for listing in &listings {
        if !categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&listing.category))
        {
            categories.push(listing.category.clone());
        }
    }

    let on_clear = move |_| {
        kind_filter.set(None);
        region_filter.set(None);
        date_filter.set(None);
        category_filter.set(None);
    };

    rsx! {
        div { class: "space-y-6",
            header {
                h1 { class: "text-2xl font-semibold text-slate-100", "Marketplace" }
                p { class: "text-sm text-slate-400",
                    "Browse current listings and reach sellers directly."
                }
            }

            section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                div { class: "grid gap-4 sm:grid-cols-4",
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Sale Kind" }
                        select {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                            value: kind_filter().map(|k| k.label()).unwrap_or("Any"),
                            onchange: move |evt| {
                                kind_filter.set(match evt.value().as_str() {
                                    "Wholesale" => Some(SaleKind::Wholesale),
                                    "Retail" => Some(SaleKind::Retail),
                                    _ => None,
                                });
                            },
                            option { value: "Any", "Any" }
                            option { value: "Wholesale", "Wholesale" }
                            option { value: "Retail", "Retail" }
                        }
                    }
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Region" }
                        select {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                            value: region_filter().unwrap_or_else(|| "Any".to_string()),
                            onchange: move |evt| {
                                let value = evt.value();
                                region_filter.set((value != "Any").then_some(value));
                            },
                            option { value: "Any", "Any" }
                            for name in region_names {
                                option { value: "{name}", "{name}" }
                            }
                        }
                    }
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Date" }
                        input {
                            r#type: "date",
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                            value: date_filter().unwrap_or_default(),
                            oninput: move |evt| {
                                let value = evt.value();
                                date_filter.set((!value.is_empty()).then_some(value));
                            },
                        }
                    }
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Category" }
                        select {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                            value: category_filter().unwrap_or_else(|| "Any".to_string()),
                            onchange: move |evt| {
                                let value = evt.value();
                                category_filter.set((value != "Any").then_some(value));
                            },
                            option { value: "Any", "Any" }
                            for category in categories {
                                option { value: "{category}", class: "capitalize", "{category}" }
                            }
                        }
                    }
                }
                if !filter.is_empty() {
                    button {
                        class: "mt-4 rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800",
                        onclick: on_clear,
                        "Clear Filters"
                    }
                }
            }

            if matched.is_empty() {
                div { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-sm text-slate-400",
                    "No listings match the current filters."
                }
            } else {
                div { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                    for listing in matched {
                        ListingCard {
                            listing,
                            on_contact: move |selected| contact_listing.set(Some(selected)),
                        }
                    }
                }
            }

            if let Some(listing) = contact_listing() {
                ContactDialog {
                    listing,
                    on_close: move |_| contact_listing.set(None),
                }
            }
        }
    }
}

#[component]
fn ContactDialog(listing: CropListing, on_close: EventHandler<()>) -> Element {
    let kind = if listing.wholesale {
        SaleKind::Wholesale
    } else {
        SaleKind::Retail
    };
    rsx! {
        div {
            class: "fixed inset-0 z-10 flex items-center justify-center bg-slate-950/80 p-6",
            onclick: move |_| on_close.call(()),
            div {
                class: "w-full max-w-sm rounded-xl border border-slate-700 bg-slate-900 p-6 shadow-xl",
                onclick: move |evt| evt.stop_propagation(),
                h2 { class: "text-lg font-semibold text-slate-100", "Contact Seller" }
                p { class: "mt-1 text-sm text-slate-400", "{listing.name} · {listing.region}" }
                dl { class: "mt-4 space-y-2 text-sm",
                    div { class: "flex justify-between",
                        dt { class: "text-slate-500", "Seller" }
                        dd { class: "text-slate-200", "{listing.seller}" }
                    }
                    div { class: "flex justify-between",
                        dt { class: "text-slate-500", "Phone" }
                        dd { class: "font-mono text-emerald-300", "{listing.contact}" }
                    }
                    div { class: "flex justify-between",
                        dt { class: "text-slate-500", "Asking Price" }
                        dd { class: "text-slate-200", "{listing.price_text}" }
                    }
                    div { class: "flex justify-between",
                        dt { class: "text-slate-500", "Sale" }
                        dd { class: "text-slate-200", "{kind.label()}" }
                    }
                }
                button {
                    class: "mt-6 w-full rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}
