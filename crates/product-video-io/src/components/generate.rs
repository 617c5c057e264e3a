//! Generate button with an in-flight progress indicator.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use web_time::Instant;

/// Props for the [`GenerateButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct GenerateButtonProps {
    /// Whether both images are loaded and nothing is in flight.
    enabled: bool,
    /// Whether a request is in flight.
    generating: bool,
    on_generate: EventHandler<()>,
}

/// The generate trigger.
///
/// Disabled unless `enabled`; while `generating` it shows an elapsed
/// time counter instead of accepting clicks.
#[component]
pub fn GenerateButton(props: GenerateButtonProps) -> Element {
    let enabled = props.enabled && !props.generating;
    let on_generate = props.on_generate;

    rsx! {
        div { class: "generate",
            button {
                class: if enabled { "btn btn--primary btn--large" } else { "btn btn--disabled btn--large" },
                disabled: !enabled,
                onclick: move |_| on_generate.call(()),
                if props.generating { "Generating..." } else { "Generate Video" }
            }
            if props.generating {
                Progress {}
            }
        }
    }
}

/// Elapsed-time indicator, mounted only while a request is in flight.
///
/// Unmounting drops the ticking future.
#[component]
fn Progress() -> Element {
    let started = use_hook(Instant::now);
    let mut elapsed = use_signal(|| 0u64);

    use_future(move || async move {
        loop {
            TimeoutFuture::new(1_000).await;
            elapsed.set(started.elapsed().as_secs());
        }
    });

    rsx! {
        p { class: "progress animate-pulse",
            "Generating your video, this can take a few minutes ({elapsed}s)"
        }
    }
}
