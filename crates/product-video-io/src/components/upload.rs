//! Per-slot image upload zone with drag-and-drop, file picker and preview.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use product_video_core::validate::check_size;
use product_video_core::{SelectError, SelectedFile, SlotId};

/// Props for the [`ImageSlotUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageSlotUploadProps {
    /// Which slot this zone fills.
    slot: SlotId,
    /// Object URL of the currently stored image, if any.
    preview_url: Option<String>,
    /// Filename of the currently stored image, if any.
    file_name: Option<String>,
    /// Disables both inputs while a request is in flight.
    #[props(default)]
    disabled: bool,
    /// Called with the file chosen in the picker.
    on_select: EventHandler<SelectedFile>,
    /// Called with the dropped files (at most the first one is read).
    on_drop: EventHandler<Vec<SelectedFile>>,
    /// Called when a file could not be read.
    on_error: EventHandler<SelectError>,
}

/// Read a browser file, refusing oversize files before loading them.
#[allow(clippy::future_not_send)] // WASM is single-threaded
async fn read_file(file: &FileData) -> Result<SelectedFile, SelectError> {
    let size = usize::try_from(file.size()).unwrap_or(usize::MAX);
    check_size(size)?;
    let mime = file.content_type().unwrap_or_default();
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| SelectError::Read(e.to_string()))?;
    Ok(SelectedFile::new(file.name(), mime, bytes.to_vec()))
}

/// A drag-and-drop zone with a file picker button and image preview.
///
/// Accepts JPEG and PNG. Validation proper happens in the controller;
/// this component only reads the file and forwards it.
#[component]
pub fn ImageSlotUpload(props: ImageSlotUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let disabled = props.disabled;
    let on_select = props.on_select;
    let on_drop = props.on_drop;
    let on_error = props.on_error;

    let handle_files = move |evt: FormEvent| async move {
        // An empty list means the picker was cancelled.
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        match read_file(&file).await {
            Ok(selected) => on_select.call(selected),
            Err(e) => on_error.call(e),
        }
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        if disabled {
            return;
        }
        let files = match evt.files().into_iter().next() {
            Some(file) => match read_file(&file).await {
                Ok(selected) => vec![selected],
                Err(e) => {
                    on_error.call(e);
                    return;
                }
            },
            None => Vec::new(),
        };
        on_drop.call(files);
    };

    let zone_class = if dragging() {
        "drop-zone drop-zone--active"
    } else {
        "drop-zone"
    };
    let input_id = format!("{}-image", props.slot.key());
    let label = props.slot.label();

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            h3 { class: "slot-title", "{label}" }

            if let Some(ref url) = props.preview_url {
                img {
                    class: "slot-preview",
                    src: "{url}",
                    alt: "{label} preview",
                }
            } else {
                p { class: "text-muted", "Drop an image here or" }
            }

            if let Some(ref name) = props.file_name {
                p { class: "text-success", "Loaded: {name}" }
            }

            label {
                class: if disabled { "btn btn--disabled" } else { "btn btn--primary" },
                r#for: "{input_id}",
                input {
                    id: "{input_id}",
                    r#type: "file",
                    accept: "image/png,image/jpeg,.png,.jpg,.jpeg",
                    class: "hidden",
                    disabled: disabled,
                    onchange: handle_files,
                }
                if props.preview_url.is_some() { "Replace" } else { "Choose File" }
            }

            p { class: "text-muted text-small", "JPEG or PNG, up to 10MB" }
        }
    }
}
