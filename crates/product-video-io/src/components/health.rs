//! Backend connectivity badge.

use dioxus::prelude::*;

/// Result of the start-up health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    Checking,
    /// The service answered with its name.
    Connected(String),
    /// The check failed; the app keeps working regardless.
    Unreachable(String),
}

/// Props for the [`HealthBadge`] component.
#[derive(Props, Clone, PartialEq, Eq)]
pub struct HealthBadgeProps {
    status: Connectivity,
}

/// Small status pill in the header.
#[component]
pub fn HealthBadge(props: HealthBadgeProps) -> Element {
    let (class, text, title) = match props.status {
        Connectivity::Checking => ("badge", "Checking backend...".to_owned(), String::new()),
        Connectivity::Connected(service) => (
            "badge badge--ok",
            format!("Connected: {service}"),
            String::new(),
        ),
        Connectivity::Unreachable(reason) => {
            ("badge badge--warn", "Backend unreachable".to_owned(), reason)
        }
    };

    rsx! {
        span { class: "{class}", title: "{title}", "{text}" }
    }
}
