use leptos::prelude::*;
use leptos_meta::Title;

use crate::{
    api::{delete_category, list_categories, save_category},
    collection,
    components::{
        field, modal,
        page::{self, CELL_CLASS, HEAD_CLASS, TABLE_CLASS},
    },
    crud::{Editor, Listing, Named},
    forms::CategoryForm,
    types::Category,
};

fn row(
    category: Category,
    listing: Listing<Category>,
    editor: Editor<CategoryForm>,
) -> impl IntoView {
    let id = category.id;
    let form = CategoryForm::from_record(&category);
    view! {
        <tr>
            <td class=CELL_CLASS>{category.name}</td>
            <td class=format!("{CELL_CLASS} text-gray-600")>{category.description}</td>
            <td class=CELL_CLASS>
                {page::row_actions(
                    Callback::new(move |()| editor.open_edit(id, form.clone())),
                    Callback::new(move |()| listing.delete(id, delete_category)),
                    Signal::derive(move || listing.deleting.get() == Some(id)),
                )}
            </td>
        </tr>
    }
}

fn table(listing: Listing<Category>, editor: Editor<CategoryForm>) -> impl IntoView {
    let sort_by_name = RwSignal::new(false);

    view! {
        <table class=TABLE_CLASS>
            <thead>
                <tr>
                    <th class=HEAD_CLASS>
                        <button
                            type="button"
                            class="flex gap-1 items-center"
                            on:click=move |_| sort_by_name.update(|on| *on = !*on)
                        >
                            "Name"
                            <span class="text-xs" class:text-blue-600=move || sort_by_name.get()>
                                "\u{25b2}"
                            </span>
                        </button>
                    </th>
                    <th class=HEAD_CLASS>"Description"</th>
                    <th class=format!("{HEAD_CLASS} w-28")>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let categories = listing.items.get();
                    let categories = if sort_by_name.get() {
                        collection::sorted_by_name(&categories, |c| c.name.as_str())
                    } else {
                        categories
                    };
                    categories
                        .into_iter()
                        .map(|category| row(category, listing, editor))
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

fn editor_modal(listing: Listing<Category>, editor: Editor<CategoryForm>) -> impl IntoView {
    let body = view! {
        <form on:submit=move |ev| {
            ev.prevent_default();
            editor.save(listing, CategoryForm::validate, save_category);
        }>
            {field::text(
                "Name",
                "name",
                "Enter category name",
                editor.value(|form| &form.name),
                editor.setter(|form, value| form.name = value),
                editor.error("name"),
            )}
            {field::textarea(
                "Description",
                "description",
                editor.value(|form| &form.description),
                editor.setter(|form, value| form.description = value),
                editor.error("description"),
            )}
            {modal::actions("Save", editor.submitting, Callback::new(move |()| editor.close()))}
        </form>
    }
    .into_any();

    modal::component(
        editor.heading(Category::NOUN),
        Callback::new(move |()| editor.close()),
        body,
    )
}

/// Categories page.
pub fn component() -> impl IntoView {
    let listing = Listing::<Category>::new();
    let editor = Editor::<CategoryForm>::new();
    listing.load_on_mount(list_categories);

    view! {
        <Title text="Categories" />
        {page::card(
            "Categories",
            "Add Category",
            Callback::new(move |()| editor.open_new()),
            page::load_switch(listing.state, move || table(listing, editor)).into_any(),
        )}
        <Show when=move || editor.open.get()>{move || editor_modal(listing, editor)}</Show>
    }
}
