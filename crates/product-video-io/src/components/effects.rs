//! Checkbox panel for the generation effects.

use dioxus::prelude::*;
use product_video_core::{Effect, EffectToggles};

/// Props for the [`EffectsPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct EffectsPanelProps {
    /// Current checkbox states.
    toggles: EffectToggles,
    /// Disables every checkbox while a request is in flight.
    #[props(default)]
    disabled: bool,
    /// Called with the effect and its new state when a box is toggled.
    on_toggle: EventHandler<(Effect, bool)>,
}

/// One labeled checkbox per [`Effect`].
#[component]
pub fn EffectsPanel(props: EffectsPanelProps) -> Element {
    rsx! {
        div { class: "panel",
            h3 { class: "panel-title", "Effects" }
            div { class: "effects-grid",
                for effect in Effect::ALL {
                    {render_toggle(effect, props.toggles.is_enabled(effect), props.disabled, props.on_toggle)}
                }
            }
        }
    }
}

/// Render a labeled checkbox with its description.
fn render_toggle(
    effect: Effect,
    checked: bool,
    disabled: bool,
    on_toggle: EventHandler<(Effect, bool)>,
) -> Element {
    let id = format!("effect-{}", effect.name());
    let label = effect.label();
    let description = effect.description();

    rsx! {
        div { key: "{id}", class: "effect",
            div { class: "effect-row",
                input {
                    r#type: "checkbox",
                    id: "{id}",
                    checked: checked,
                    disabled: disabled,
                    onchange: move |e| {
                        on_toggle.call((effect, e.checked()));
                    },
                }
                label { r#for: "{id}", class: "effect-label", "{label}" }
            }
            p { class: "text-muted text-small", "{description}" }
        }
    }
}
