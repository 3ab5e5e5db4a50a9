//! Labelled inputs with an inline validation message, shared by the modals.

use leptos::prelude::*;

const INPUT_CLASS: &str = "py-2 px-3 w-full rounded-md border border-gray-300 focus:outline-none focus:ring-2 focus:ring-blue-500";

fn error_line(error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <p class="mt-1 text-sm text-red-600">{message}</p> })
    }
}

/// Single-line text input.
pub fn text(
    label: &'static str,
    name: &'static str,
    placeholder: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <label for=name class="block mb-1 text-sm font-medium">{label}</label>
            <input
                id=name
                name=name
                type="text"
                placeholder=placeholder
                class=INPUT_CLASS
                class:border-red-500=move || error.get().is_some()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {error_line(error)}
        </div>
    }
}

/// Multi-line text input.
pub fn textarea(
    label: &'static str,
    name: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <label for=name class="block mb-1 text-sm font-medium">{label}</label>
            <textarea
                id=name
                name=name
                rows="4"
                class=INPUT_CLASS
                class:border-red-500=move || error.get().is_some()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {error_line(error)}
        </div>
    }
}

/// Date picker bound to a `YYYY-MM-DD` string.
pub fn date(
    label: &'static str,
    name: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <label for=name class="block mb-1 text-sm font-medium">{label}</label>
            <input
                id=name
                name=name
                type="date"
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {error_line(error)}
        </div>
    }
}

/// Drop-down over `(value, label)` pairs with an empty placeholder option.
pub fn select(
    label: &'static str,
    name: &'static str,
    placeholder: &'static str,
    options: Signal<Vec<(String, String)>>,
    value: Signal<String>,
    on_change: Callback<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <label for=name class="block mb-1 text-sm font-medium">{label}</label>
            <select
                id=name
                name=name
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">{placeholder}</option>
                <For
                    each=move || options.get()
                    key=|(value, _)| value.clone()
                    children=move |(option_value, option_label)| {
                        let selected_value = option_value.clone();
                        view! {
                            <option
                                value=option_value
                                selected=move || value.get() == selected_value
                            >
                                {option_label}
                            </option>
                        }
                    }
                />
            </select>
            {error_line(error)}
        </div>
    }
}
