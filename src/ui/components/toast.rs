//! Transient status messages. Besides the usual severities there is a
//! dedicated kind for data provenance: the dashboard always tells the
//! farmer whether prices came from the live marketplace, a cache, or the
//! bundled sample snapshot.

use std::time::Duration;

use dioxus::prelude::*;
use uuid::Uuid;

use crate::infra::market::CacheStatus;

const MAX_VISIBLE_TOASTS: usize = 5;

/// Where the data behind the dashboard came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Cache,
    Stale,
    Fixture,
}

impl DataOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            DataOrigin::Live => "live",
            DataOrigin::Cache => "cached",
            DataOrigin::Stale => "stale cache",
            DataOrigin::Fixture => "sample data",
        }
    }
}

impl From<CacheStatus> for DataOrigin {
    fn from(status: CacheStatus) -> Self {
        match status {
            CacheStatus::Fresh => DataOrigin::Live,
            CacheStatus::Cached => DataOrigin::Cache,
            CacheStatus::Stale => DataOrigin::Stale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
    /// Provenance note; rendered with an origin badge.
    Source(DataOrigin),
}

impl ToastKind {
    /// Errors and degraded data stay on screen longer than routine notes.
    fn linger(&self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_secs(10),
            ToastKind::Warning
            | ToastKind::Source(DataOrigin::Stale)
            | ToastKind::Source(DataOrigin::Fixture) => Duration::from_secs(8),
            _ => Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            text: text.into(),
        }
    }
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let text = message.into();
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_VISIBLE_TOASTS {
            entries.remove(0);
        }
        entries.push(ToastMessage::new(kind, text));
    });
}

/// Standard provenance note for a data resource, e.g.
/// "Listings served from an expired cache; prices may be out of date."
pub fn push_source_toast(toasts: Signal<Vec<ToastMessage>>, what: &str, origin: DataOrigin) {
    push_toast(toasts, ToastKind::Source(origin), source_text(what, origin));
}

fn source_text(what: &str, origin: DataOrigin) -> String {
    match origin {
        DataOrigin::Live => format!("{what} refreshed from the marketplace."),
        DataOrigin::Cache => format!("{what} served from the local cache."),
        DataOrigin::Stale => {
            format!("{what} served from an expired cache; prices may be out of date.")
        }
        DataOrigin::Fixture => format!("{what} unreachable; showing bundled sample data."),
    }
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let views = toasts()
        .into_iter()
        .map(ToastView::from)
        .collect::<Vec<_>>();

    if views.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "pointer-events-none fixed inset-x-0 bottom-4 flex justify-center",
            ul {
                class: "space-y-3",
                for view in views {
                    ToastCard { view, toasts: toasts.clone() }
                }
            }
        }
    }
}

#[component]
fn ToastCard(view: ToastView, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toasts_for_timer = toasts.clone();
    let toast_id = view.id.clone();
    let linger = view.linger;
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts_for_timer.clone();
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(linger).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let class = format!(
        "pointer-events-auto flex items-start gap-3 rounded-xl border px-4 py-3 shadow-lg backdrop-blur {}",
        view.theme
    );
    rsx! {
        li {
            class: class,
            span { class: "text-lg", "{view.icon}" }
            div {
                if let Some(badge) = view.badge {
                    span {
                        class: "rounded-full border border-slate-600 px-2 py-0.5 text-xs uppercase tracking-wide text-slate-300",
                        "{badge}"
                    }
                }
                p { class: "text-sm font-medium", "{view.text}" }
            }
            button {
                class: "ml-3 text-xs uppercase tracking-wide text-slate-300 hover:text-white",
                onclick: move |_| {
                    let target = view.id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}

#[derive(Clone, PartialEq)]
struct ToastView {
    id: String,
    text: String,
    theme: &'static str,
    icon: &'static str,
    badge: Option<&'static str>,
    linger: Duration,
}

impl From<ToastMessage> for ToastView {
    fn from(message: ToastMessage) -> Self {
        let (theme, icon) = match message.kind {
            ToastKind::Info => ("border-sky-500/40 bg-sky-500/10 text-sky-100", "ℹ️"),
            ToastKind::Success => (
                "border-emerald-500/40 bg-emerald-500/10 text-emerald-100",
                "✅",
            ),
            ToastKind::Warning => ("border-amber-500/40 bg-amber-500/10 text-amber-100", "⚠️"),
            ToastKind::Error => ("border-rose-500/40 bg-rose-500/10 text-rose-100", "⛔"),
            ToastKind::Source(DataOrigin::Live) => (
                "border-emerald-500/40 bg-emerald-500/10 text-emerald-100",
                "📡",
            ),
            ToastKind::Source(DataOrigin::Cache) => {
                ("border-sky-500/40 bg-sky-500/10 text-sky-100", "🗂️")
            }
            ToastKind::Source(DataOrigin::Stale) | ToastKind::Source(DataOrigin::Fixture) => {
                ("border-amber-500/40 bg-amber-500/10 text-amber-100", "⚠️")
            }
        };

        let badge = match message.kind {
            ToastKind::Source(origin) => Some(origin.label()),
            _ => None,
        };

        ToastView {
            id: message.id,
            text: message.text,
            theme,
            icon,
            badge,
            linger: message.kind.linger(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_status_maps_onto_an_origin() {
        assert_eq!(DataOrigin::from(CacheStatus::Fresh), DataOrigin::Live);
        assert_eq!(DataOrigin::from(CacheStatus::Cached), DataOrigin::Cache);
        assert_eq!(DataOrigin::from(CacheStatus::Stale), DataOrigin::Stale);
    }

    #[test]
    fn degraded_sources_read_as_warnings() {
        let text = source_text("Listings", DataOrigin::Stale);
        assert!(text.contains("expired cache"));
        let text = source_text("Marketplace", DataOrigin::Fixture);
        assert!(text.contains("sample data"));
    }

    #[test]
    fn errors_and_degraded_data_linger_longest() {
        assert!(ToastKind::Error.linger() > ToastKind::Info.linger());
        assert!(
            ToastKind::Source(DataOrigin::Fixture).linger()
                > ToastKind::Source(DataOrigin::Live).linger()
        );
    }

    #[test]
    fn only_source_toasts_carry_a_badge() {
        let view = ToastView::from(ToastMessage::new(ToastKind::Info, "hello"));
        assert_eq!(view.badge, None);

        let view = ToastView::from(ToastMessage::new(
            ToastKind::Source(DataOrigin::Fixture),
            "sample",
        ));
        assert_eq!(view.badge, Some("sample data"));
    }
}
