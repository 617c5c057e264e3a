//! Generated video preview with a download button.

use dioxus::prelude::*;

/// Props for the [`VideoPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct VideoPanelProps {
    /// Whether a generated video is held and can be downloaded.
    /// `false` hides the panel.
    can_download: bool,
    /// Object URL of the generated video. `None` skips the inline player.
    video_url: Option<String>,
    /// Size of the generated video, for the caption.
    #[props(default)]
    size_bytes: usize,
    on_download: EventHandler<()>,
}

/// Video element plus the download control.
///
/// Renders nothing until a video exists, so the download control only
/// appears after a successful generation. The download button does not
/// depend on the preview URL.
#[component]
pub fn VideoPanel(props: VideoPanelProps) -> Element {
    if !props.can_download {
        return rsx! {};
    }
    let on_download = props.on_download;
    let size = format_size(props.size_bytes);

    rsx! {
        div { class: "panel",
            h3 { class: "panel-title", "Result" }
            if let Some(ref url) = props.video_url {
                video {
                    key: "{url}",
                    class: "video-preview",
                    src: "{url}",
                    controls: true,
                    autoplay: true,
                    muted: true,
                    r#loop: true,
                }
            } else {
                p { class: "text-muted", "Preview unavailable" }
            }
            div { class: "video-actions",
                span { class: "text-muted text-small", "{size}" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| on_download.call(()),
                    "Download Video"
                }
            }
        }
    }
}

/// Human-readable byte count (`"1.5 MB"`).
#[allow(clippy::cast_precision_loss)] // display only
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}
