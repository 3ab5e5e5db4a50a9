//! Placeholder shown while a page's data is in flight.

use icondata::AiLoadingOutlined;
use leptos::{
    html::{div, p},
    prelude::*,
};

use crate::components::icons;

/// Renders `rows` pulsing bars in place of a table that is still loading.
pub fn component(rows: usize) -> impl IntoView {
    div()
        .class("flex flex-col gap-3 p-4 animate-pulse")
        .attr("aria-busy", "true")
        .child((
            (0..rows)
                .map(|_| div().class("h-6 bg-gray-200 rounded"))
                .collect_view(),
            p().class("text-sm italic text-gray-400").child("Loading..."),
        ))
}

/// Red panel for a page whose initial load failed.
pub fn failed(message: String) -> impl IntoView {
    div()
        .class("p-4 text-red-700 bg-red-50 rounded-md border border-red-200")
        .attr("role", "alert")
        .child(message)
}

/// Small spinning icon for buttons with a request in flight.
pub fn spinner() -> impl IntoView {
    icons::component(AiLoadingOutlined, "animate-spin size-4")
}
