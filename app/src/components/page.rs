//! Building blocks shared by the list pages: the titled card with its add
//! button, the load-state switch and the per-row edit/delete buttons.

use icondata::{AiDeleteOutlined, AiEditOutlined, AiPlusOutlined};
use leptos::prelude::*;

use crate::collection::LoadState;
use crate::components::{icons, loader};

/// Card with a title row holding the "Add" button.
pub fn card(
    title: &'static str,
    add_label: &'static str,
    on_add: Callback<()>,
    body: AnyView,
) -> impl IntoView {
    view! {
        <section class="p-6 bg-white rounded-lg shadow-sm">
            <div class="flex justify-between items-center mb-4">
                <h2 class="text-xl font-semibold">{title}</h2>
                <button
                    type="button"
                    class="flex gap-2 items-center py-1.5 px-4 text-white bg-blue-600 rounded-md hover:bg-blue-500"
                    on:click=move |_| on_add.run(())
                >
                    {icons::component(AiPlusOutlined, "size-4")}
                    {add_label}
                </button>
            </div>
            {body}
        </section>
    }
}

/// Skeleton while loading, the error panel on failure, `ready` otherwise.
pub fn load_switch<V: IntoView + 'static>(
    state: RwSignal<LoadState>,
    ready: impl Fn() -> V + Send + Sync + 'static,
) -> impl IntoView {
    move || match state.get() {
        LoadState::Loading => loader::component(3).into_any(),
        LoadState::Failed(message) => loader::failed(message).into_any(),
        LoadState::Idle => ready().into_any(),
    }
}

pub const TABLE_CLASS: &str = "w-full text-sm text-left";
pub const HEAD_CLASS: &str = "py-2 px-3 font-medium text-gray-600 bg-gray-50 border-b";
pub const CELL_CLASS: &str = "py-2 px-3 border-b border-gray-100";

/// Edit and delete icon buttons for one table row.
pub fn row_actions(on_edit: Callback<()>, on_delete: Callback<()>, deleting: Signal<bool>) -> impl IntoView {
    view! {
        <div class="flex gap-2">
            <button
                type="button"
                class="p-1.5 rounded-md border border-gray-300 hover:text-blue-600"
                aria-label="Edit"
                on:click=move |_| on_edit.run(())
            >
                {icons::component(AiEditOutlined, "size-4")}
            </button>
            <button
                type="button"
                class="p-1.5 text-red-600 rounded-md border border-red-300 hover:bg-red-50 disabled:opacity-60"
                aria-label="Delete"
                disabled=move || deleting.get()
                on:click=move |_| on_delete.run(())
            >
                {move || {
                    if deleting.get() {
                        loader::spinner().into_any()
                    } else {
                        icons::component(AiDeleteOutlined, "size-4").into_any()
                    }
                }}
            </button>
        </div>
    }
}
