use leptos::prelude::*;

use crate::components::loader;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop or the close
/// button calls `on_close`.
pub fn component(title: String, on_close: Callback<()>, body: AnyView) -> impl IntoView {
    view! {
        <div
            class="flex fixed inset-0 z-40 justify-center items-center bg-black/40"
            on:click=move |_| on_close.run(())
        >
            <div
                class="p-6 w-full max-w-xl bg-white rounded-lg shadow-xl"
                role="dialog"
                aria-modal="true"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="flex justify-between items-center mb-4">
                    <h2 class="text-lg font-semibold">{title}</h2>
                    <button
                        type="button"
                        class="text-gray-500 hover:text-gray-900"
                        aria-label="Close"
                        on:click=move |_| on_close.run(())
                    >
                        "\u{d7}"
                    </button>
                </div>
                {body}
            </div>
        </div>
    }
}

/// Footer with Cancel and a submit button that shows a spinner while
/// `submitting` is set.
pub fn actions(
    submit_label: &'static str,
    submitting: RwSignal<bool>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex gap-2 justify-end mt-6">
            <button
                type="button"
                class="py-1.5 px-4 rounded-md border border-gray-300 hover:border-blue-500"
                on:click=move |_| on_cancel.run(())
            >
                "Cancel"
            </button>
            <button
                type="submit"
                class="flex gap-2 items-center py-1.5 px-4 text-white bg-blue-600 rounded-md hover:bg-blue-500 disabled:opacity-60"
                disabled=move || submitting.get()
            >
                <Show when=move || submitting.get()>{loader::spinner()}</Show>
                {submit_label}
            </button>
        </div>
    }
}
