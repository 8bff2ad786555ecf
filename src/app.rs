use std::time::Duration;

use dioxus::{prelude::*, signals::Signal};
use tracing::warn;

use crate::{
    domain::{AppState, CacheResource},
    infra::{
        fixture,
        market::{CacheStatus, MarketClient},
    },
    ui::{
        components::toast::{
            push_source_toast, push_toast, DataOrigin, Toast, ToastKind, ToastMessage,
        },
        pages::{DashboardPage, MarketPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

/// Shared TTL before cached market data is considered stale.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/market")]
    Market {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Bumped by the settings page to force a refetch of both resources.
    let refresh_tick = use_signal(|| 0u32);
    use_context_provider(|| refresh_tick.clone());

    let _listings = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let refresh_tick = refresh_tick.clone();
        move || async move {
            let _tick = refresh_tick();
            fetch_listings(state.clone(), toasts.clone()).await
        }
    });

    let _regions = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let refresh_tick = refresh_tick.clone();
        move || async move {
            let _tick = refresh_tick();
            fetch_regions(state.clone(), toasts.clone()).await
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(error) = save_persisted_state(&snapshot) {
        warn!(%error, "failed to persist user state");
    }
}

async fn fetch_listings(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> Option<CacheStatus> {
    let client = match MarketClient::new() {
        Ok(client) => client,
        Err(error) => {
            warn!(%error, "failed to initialise market client");
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                "Failed to initialise the marketplace client.",
            );
            load_fixture(state, toasts);
            return None;
        }
    };

    match client.get_listings().await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.set_listings(payload.data.clone());
                st.cache
                    .record_fetch(CacheResource::Listings, payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                push_source_toast(toasts.clone(), "Listings", DataOrigin::Stale);
            }
            Some(payload.status)
        }
        Err(error) => {
            warn!(%error, "failed to load marketplace listings");
            load_fixture(state, toasts);
            None
        }
    }
}

/// With no backend and no cache, fall back to the bundled snapshot so the
/// dashboard stays usable offline.
fn load_fixture(mut state: Signal<AppState>, toasts: Signal<Vec<ToastMessage>>) {
    let already_loaded = state.with(|st| !st.listings.is_empty());
    if already_loaded {
        return;
    }
    state.with_mut(|st| st.set_listings(fixture::sample_listings()));
    push_source_toast(toasts, "Marketplace", DataOrigin::Fixture);
}

async fn fetch_regions(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> Option<CacheStatus> {
    let client = match MarketClient::new() {
        Ok(client) => client,
        Err(error) => {
            warn!(%error, "failed to initialise market client for regions");
            return None;
        }
    };

    match client.get_regions().await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.regions = payload.data.clone();
                st.cache
                    .record_fetch(CacheResource::Regions, payload.fetched_at);
            });
            Some(payload.status)
        }
        Err(error) => {
            // Region buttons fall back to the regions named by the listings.
            warn!(%error, "failed to load region gazetteer");
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Region gazetteer unavailable; using regions from listings.",
            );
            None
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Market() -> Element {
    rsx! { Shell { MarketPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
