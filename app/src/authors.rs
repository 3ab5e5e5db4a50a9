//! Authors page: the author table with a name sort toggle and the add/edit
//! modal.

use leptos::prelude::*;
use leptos_meta::Title;

use crate::{
    api::{delete_author, list_authors, save_author},
    collection,
    components::{
        field, modal,
        page::{self, CELL_CLASS, HEAD_CLASS, TABLE_CLASS},
    },
    crud::{Editor, Listing, Named},
    forms::AuthorForm,
    types::Author,
};

fn row(author: Author, listing: Listing<Author>, editor: Editor<AuthorForm>) -> impl IntoView {
    let id = author.id;
    let form = AuthorForm::from_record(&author);
    view! {
        <tr>
            <td class=CELL_CLASS>{author.name}</td>
            <td class=format!("{CELL_CLASS} text-gray-600")>{author.biography}</td>
            <td class=CELL_CLASS>
                {page::row_actions(
                    Callback::new(move |()| editor.open_edit(id, form.clone())),
                    Callback::new(move |()| listing.delete(id, delete_author)),
                    Signal::derive(move || listing.deleting.get() == Some(id)),
                )}
            </td>
        </tr>
    }
}

fn table(listing: Listing<Author>, editor: Editor<AuthorForm>) -> impl IntoView {
    let sort_by_name = RwSignal::new(false);
    let rows = move || {
        listing.items.with(|authors| {
            if sort_by_name.get() {
                collection::sorted_by_name(authors, |a| a.name.as_str())
            } else {
                authors.clone()
            }
        })
    };

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
                    <th class=HEAD_CLASS>"Biography"</th>
                    <th class=format!("{HEAD_CLASS} w-28")>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    rows()
                        .into_iter()
                        .map(|author| row(author, listing, editor))
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

fn editor_modal(listing: Listing<Author>, editor: Editor<AuthorForm>) -> impl IntoView {
    let body = view! {
        <form on:submit=move |ev| {
            ev.prevent_default();
            editor.save(listing, AuthorForm::validate, save_author);
        }>
            {field::text(
                "Name",
                "name",
                "Enter author name",
                editor.value(|form| &form.name),
                editor.setter(|form, value| form.name = value),
                editor.error("name"),
            )}
            {field::textarea(
                "Biography",
                "biography",
                editor.value(|form| &form.biography),
                editor.setter(|form, value| form.biography = value),
                editor.error("biography"),
            )}
            {modal::actions("Save", editor.submitting, Callback::new(move |()| editor.close()))}
        </form>
    }
    .into_any();

    modal::component(
        editor.heading(Author::NOUN),
        Callback::new(move |()| editor.close()),
        body,
    )
}

pub fn component() -> impl IntoView {
    let listing = Listing::<Author>::new();
    let editor = Editor::<AuthorForm>::new();
    listing.load_on_mount(list_authors);

    view! {
        <Title text="Authors" />
        {page::card(
            "Authors",
            "Add Author",
            Callback::new(move |()| editor.open_new()),
            page::load_switch(listing.state, move || table(listing, editor)).into_any(),
        )}
        <Show when=move || editor.open.get()>{move || editor_modal(listing, editor)}</Show>
    }
}
