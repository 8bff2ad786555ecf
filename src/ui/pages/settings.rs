use std::time::SystemTime;

use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, CACHE_TTL},
    domain::{AppState, CacheResource, DEFAULT_PRICE_THRESHOLD},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
    util::version::{self, check_for_update},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let refresh_tick = use_context::<Signal<u32>>();

    let initial_threshold = state.with(|st| st.price_threshold);
    let mut threshold_input = use_signal(|| initial_threshold.to_string());

    let cache_entries = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, time)| {
                (
                    cache_label(resource),
                    humanize_age(*time),
                    st.is_stale(resource, CACHE_TTL),
                )
            })
            .collect::<Vec<_>>()
    });

    let update_check = use_resource(|| async { check_for_update().await });
    let version_line = format!(
        "{} {} · {}",
        version::APP_NAME,
        version::version_label(),
        version::APP_AUTHOR
    );

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| match threshold_input().trim().parse::<u64>() {
            Ok(threshold) => {
                state.with_mut(|st| st.price_threshold = threshold);
                persist_user_state(&state);
                push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("High-value threshold set to TZS {threshold}/kg."),
                );
            }
            Err(_) => {
                push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    "Threshold must be a whole number of TZS.",
                );
            }
        }
    };

    let on_reset = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            threshold_input.set(DEFAULT_PRICE_THRESHOLD.to_string());
            state.with_mut(|st| st.price_threshold = DEFAULT_PRICE_THRESHOLD);
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                format!("Restored the default threshold of TZS {DEFAULT_PRICE_THRESHOLD}/kg."),
            );
        }
    };

    let on_refresh = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let mut refresh_tick = refresh_tick.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Refreshing listings and regions...",
            );
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "High-Value Threshold" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Crops whose average price stays at or below this value are left out of the high-value chart."
                }
                div { class: "mt-4 max-w-xs",
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Threshold (TZS per kg)" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none",
                        value: threshold_input(),
                        oninput: move |evt| threshold_input.set(evt.value()),
                    }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "rounded-lg bg-emerald-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-950 hover:bg-emerald-400", onclick: on_apply, "Apply" }
                    button { class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800", onclick: on_reset, "Reset Default" }
                }
            }

            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Cache Status" }
                if cache_entries.is_empty() {
                    p { class: "mt-3 text-sm text-slate-400", "No cached fetches yet." }
                } else {
                    ul {
                        class: "mt-3 space-y-2 text-sm text-slate-300",
                        for (label, age, stale) in cache_entries {
                            li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                                span { "{label}" }
                                span { class: "text-xs text-slate-500",
                                    if stale { "{age} · stale" } else { "{age}" }
                                }
                            }
                        }
                    }
                }
                button {
                    class: "mt-4 rounded-lg border border-emerald-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-emerald-200 hover:bg-emerald-500/10",
                    onclick: on_refresh,
                    "Refresh Market Data"
                }
            }

            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "About" }
                p { class: "mt-2 text-sm text-slate-300", "{version_line}" }
                match &*update_check.read() {
                    Some(Ok(info)) => rsx! {
                        p { class: "mt-1 text-sm text-slate-400", "{info}" }
                    },
                    Some(Err(_)) => rsx! {
                        p { class: "mt-1 text-sm text-slate-500", "Could not check for updates." }
                    },
                    None => rsx! {
                        p { class: "mt-1 text-sm text-slate-500", "Checking for updates..." }
                    },
                }
                a {
                    href: version::APP_REPO_URL,
                    target: "_blank",
                    rel: "noreferrer",
                    class: "mt-2 inline-block text-xs text-emerald-300 hover:text-emerald-100",
                    "Source and releases"
                }
            }
        }
    }
}

fn cache_label(resource: &CacheResource) -> String {
    match resource {
        CacheResource::Listings => "Listings".to_string(),
        CacheResource::Regions => "Regions".to_string(),
    }
}

fn humanize_age(time: SystemTime) -> String {
    match time.elapsed() {
        Ok(elapsed) if elapsed.as_secs() >= 60 => {
            format!("{} ago", crate::util::compact_age(elapsed.as_secs()))
        }
        _ => "just now".to_string(),
    }
}
