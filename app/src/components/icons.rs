use icondata::Icon;
use leptos::{prelude::*, svg::svg};

/// Inline SVG for an icon from `icondata`, coloured with the current text colour.
pub fn component(icon: Icon, class: &'static str) -> impl IntoView {
    svg()
        .attr("viewBox", icon.view_box)
        .attr("innerHTML", icon.data)
        .attr("fill", "currentColor")
        .attr("aria-hidden", "true")
        .class(class)
}
