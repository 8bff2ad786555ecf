use dioxus::prelude::*;

use crate::domain::{parse_price, CropListing, SaleKind};

/// One marketplace listing. `on_contact` opens the seller-contact dialog.
#[component]
pub fn ListingCard(listing: CropListing, on_contact: EventHandler<CropListing>) -> Element {
    let kind = if listing.wholesale {
        SaleKind::Wholesale
    } else {
        SaleKind::Retail
    };
    let sold = listing.status.is_sold();
    let price_display = match parse_price(&listing.price_text) {
        Some(price) => format!("TZS {price}/kg"),
        None => listing.price_text.clone(),
    };

    let status_class = if sold {
        "rounded-full border border-rose-500/40 bg-rose-500/10 px-2 py-0.5 text-xs text-rose-200"
    } else {
        "rounded-full border border-emerald-500/40 bg-emerald-500/10 px-2 py-0.5 text-xs text-emerald-200"
    };

    let contact_target = listing.clone();

    rsx! {
        div { class: "flex flex-col rounded-xl border border-slate-800 bg-slate-900/40 p-4",
            div { class: "flex items-start justify-between gap-2",
                div {
                    h3 { class: "text-sm font-semibold text-slate-100", "{listing.name}" }
                    p { class: "text-xs text-slate-500", "{listing.region} · {listing.date}" }
                }
                span { class: "{status_class}", "{listing.status.label()}" }
            }
            p { class: "mt-3 text-lg font-semibold text-emerald-300", "{price_display}" }
            div { class: "mt-1 flex items-center gap-2 text-xs text-slate-500",
                span { "{kind.label()}" }
                span { "·" }
                span { class: "capitalize", "{listing.category}" }
            }
            p { class: "mt-2 text-xs text-slate-400", "Seller: {listing.seller}" }
            button {
                class: "mt-3 rounded-lg border border-emerald-500/40 px-3 py-1.5 text-xs font-semibold uppercase tracking-wide text-emerald-200 hover:bg-emerald-500/10 disabled:cursor-not-allowed disabled:opacity-40",
                disabled: sold,
                onclick: move |_| on_contact.call(contact_target.clone()),
                if sold { "Sold Out" } else { "Contact Seller" }
            }
        }
    }
}
