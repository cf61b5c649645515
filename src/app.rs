//! Demo application.
//!
//! Mounts a single [`Finder`] configured from `assets/finder.toml`, starting
//! at the path in the URL fragment (`index.html#/photos`), and shows the last
//! confirmed selection below it.

use leptos::logging::log;
use leptos::prelude::*;

use crate::components::Finder;
use crate::config::FinderConfig;
use crate::core::FinderEvents;
use crate::utils::dom::location_hash;

const DEMO_CONFIG: &str = include_str!("../assets/finder.toml");

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let selected = RwSignal::new(None::<String>);

    let events = FinderEvents::new();
    events.subscribe(|event| log!("{}: {:?}", event.name(), event));
    let on_select = Callback::new(move |path: String| selected.set(Some(path)));

    let finder = FinderConfig::from_toml(DEMO_CONFIG).map(|config| {
        view! {
            <Finder
                config=config
                initial_path=location_hash()
                events=events
                on_select=on_select
            />
        }
    });

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    max-width: 600px;
                    margin: 4rem auto;
                    font-family: -apple-system, BlinkMacSystemFont, sans-serif;
                ">
                    <h1 style="color: #d73a49;">"Finder failed to start"</h1>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                </div>
            }
        >
            <div style="display: flex; flex-direction: column; gap: 8px; height: 100%;">
                <div style="flex: 1; min-height: 0;">{finder}</div>
                <p style="margin: 0; color: #666;">
                    {move || {
                        selected
                            .get()
                            .map(|path| format!("Selected: {}", path))
                            .unwrap_or_else(|| "Nothing selected".to_string())
                    }}
                </p>
            </div>
        </ErrorBoundary>
    }
}
