use dioxus::prelude::*;
use product_video_core::{Controller, ControllerError, Effect, SelectError, SelectedFile, SlotId};
use product_video_io::{
    BrowserSaver, Connectivity, EffectsPanel, GenerateButton, HealthBadge, ImageSlotUpload,
    ObjectUrl, VideoPanel, console, fetch,
};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the single [`Controller`] for the page session and wires it to
/// the upload zones, effects panel, generate button and video panel.
/// Object URLs for previews live next to it and are revoked when
/// replaced.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut controller = use_signal(Controller::default);
    let mut previews = use_signal(|| [None::<ObjectUrl>, None::<ObjectUrl>]);
    let mut video_url = use_signal(|| Option::<ObjectUrl>::None);
    let mut connectivity = use_signal(|| Connectivity::Checking);

    // --- Start-up checks (best-effort, never block the UI) ---
    use_future(move || async move {
        let api = controller.peek().api().clone();
        match fetch::check_health(&api).await {
            Ok(health) => {
                console::info(&format!("backend connected: {}", health.service));
                connectivity.set(Connectivity::Connected(health.service));
            }
            Err(e) => {
                console::warn(&format!("backend health check failed: {e}"));
                connectivity.set(Connectivity::Unreachable(e.to_string()));
            }
        }
        match fetch::list_effects(&api).await {
            Ok(catalog) => console::info(&format!("available effects: {catalog}")),
            Err(e) => console::warn(&format!("could not load effects catalog: {e}")),
        }
    });

    // --- Selection handlers ---
    // Rebuild a slot's preview URL after the controller accepted a file.
    let mut refresh_preview = move |slot: SlotId| {
        let url = controller.peek().slot(slot).map(|image| {
            ObjectUrl::from_bytes(&image.bytes, image.mime.as_str())
        });
        match url {
            Some(Ok(url)) => previews.write()[slot.index()] = Some(url),
            Some(Err(e)) => console::warn(&format!("failed to preview {slot}: {e}")),
            None => {}
        }
    };

    let mut after_select = move |slot: SlotId, result: Result<(), ControllerError>| match result {
        Ok(()) => refresh_preview(slot),
        Err(e) => console::warn(&format!("{slot} rejected: {e}")),
    };

    let mut on_select = move |slot: SlotId, file: SelectedFile| {
        let result = controller.write().select_image(slot, file);
        after_select(slot, result);
    };

    let mut on_drop = move |slot: SlotId, files: Vec<SelectedFile>| {
        let result = controller.write().drag_and_drop(slot, files);
        after_select(slot, result);
    };

    let on_read_error = move |err: SelectError| {
        let err = controller.write().reject_selection(err);
        console::warn(&err.to_string());
    };

    // --- Effects ---
    let on_toggle = move |(effect, enabled): (Effect, bool)| {
        controller.write().set_effect(effect, enabled);
    };

    // --- Generate ---
    let on_generate = move |()| {
        let request = match controller.write().begin_generate() {
            Ok(request) => request,
            Err(e) => {
                console::warn(&format!("generate refused: {e}"));
                return;
            }
        };
        let enabled: Vec<&str> = request.effects.enabled_names().collect();
        console::info(&format!(
            "generating video with effects: {}",
            enabled.join(", ")
        ));

        spawn(async move {
            let outcome = fetch::post_multipart(&request)
                .await
                .map_err(|e| e.to_string());

            // Keep the controller borrow out of the signal writes below.
            let new_url = match controller.write().finish_generate(outcome) {
                Ok(video) => {
                    console::info(&format!("video generated: {} bytes", video.bytes.len()));
                    Some(ObjectUrl::from_bytes(&video.bytes, &video.mime))
                }
                Err(e) => {
                    console::warn(&format!("generation failed: {e}"));
                    None
                }
            };
            match new_url {
                Some(Ok(url)) => video_url.set(Some(url)),
                Some(Err(e)) => console::warn(&format!("failed to preview video: {e}")),
                None => {}
            }
        });
    };

    // --- Download ---
    let on_download = move |()| {
        if let Err(e) = controller.write().download(&mut BrowserSaver) {
            console::warn(&format!("download failed: {e}"));
        }
    };

    // --- Layout ---
    let ctl = controller.read();
    let generating = ctl.is_generating();
    let can_generate = ctl.can_generate();
    let toggles = ctl.effect_toggles();
    let error = ctl.error().map(str::to_owned);
    let can_download = ctl.can_download();
    let phase = ctl.phase();
    let video_size = ctl.video().map_or(0, |v| v.bytes.len());
    let slot_views = SlotId::ALL.map(|slot| {
        let preview = previews.read()[slot.index()]
            .as_ref()
            .map(|url| url.as_str().to_owned());
        (slot, preview, ctl.slot(slot).map(|image| image.name.clone()))
    });
    drop(ctl);
    let video_src = video_url.read().as_ref().map(|url| url.as_str().to_owned());

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "header",
                div {
                    h1 { "Product Video Generator" }
                    p { class: "text-muted",
                        "Upload a start and an end frame to generate a 3D product video"
                    }
                }
                HealthBadge { status: connectivity() }
            }

            div { class: "slots",
                for (slot, preview_url, file_name) in slot_views {
                    ImageSlotUpload {
                        key: "{slot}",
                        slot,
                        preview_url,
                        file_name,
                        disabled: generating,
                        on_select: move |file: SelectedFile| on_select(slot, file),
                        on_drop: move |files: Vec<SelectedFile>| on_drop(slot, files),
                        on_error: on_read_error,
                    }
                }
            }

            EffectsPanel {
                toggles,
                disabled: generating,
                on_toggle: on_toggle,
            }

            if let Some(ref err) = error {
                div { class: "error",
                    span { "{err}" }
                    button {
                        aria_label: "Dismiss",
                        onclick: move |_| controller.write().dismiss_error(),
                        "×"
                    }
                }
            }

            GenerateButton {
                enabled: can_generate,
                generating,
                on_generate: on_generate,
            }
            p { class: "text-muted text-small status", "Status: {phase}" }

            VideoPanel {
                can_download,
                video_url: video_src,
                size_bytes: video_size,
                on_download: on_download,
            }
        }
    }
}
