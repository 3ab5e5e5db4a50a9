//! Books page.
//!
//! Rows expand to show the cover, publication year, description and
//! categories. The add/edit modal only opens once the author and category
//! choices have been fetched.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::{
    api::{delete_book, error_text, list_books, load_book_form_options, save_book},
    components::{
        field, loader, modal,
        page::{self, CELL_CLASS, HEAD_CLASS, TABLE_CLASS},
        toast::Toasts,
    },
    crud::{Editor, Listing, Named},
    forms::BookForm,
    types::{Book, BookFormOptions, RecordId},
};

/// Shared reactive state of the page.
#[derive(Clone, Copy)]
struct BooksPage {
    listing: Listing<Book>,
    editor: Editor<BookForm>,
    options: RwSignal<BookFormOptions>,
    /// Set while the form choices are being fetched.
    preparing: RwSignal<bool>,
    expanded: RwSignal<Vec<RecordId>>,
    toasts: Toasts,
}

impl BooksPage {
    /// Loads authors and categories, then opens the modal, pre-filled when
    /// `record` is given.
    fn open(self, record: Option<(RecordId, BookForm)>) {
        if self.preparing.get_untracked() {
            return;
        }
        self.preparing.set(true);
        spawn_local(async move {
            match load_book_form_options().await {
                Ok(options) => {
                    self.options.set(options);
                    match record {
                        Some((id, form)) => self.editor.open_edit(id, form),
                        None => self.editor.open_new(),
                    }
                }
                Err(err) => {
                    self.toasts.error("Error fetching authors or categories", error_text(&err));
                }
            }
            self.preparing.set(false);
        });
    }

    fn toggle_expanded(self, id: RecordId) {
        self.expanded.update(|expanded| {
            if let Some(index) = expanded.iter().position(|open| *open == id) {
                expanded.remove(index);
            } else {
                expanded.push(id);
            }
        });
    }
}

fn details(book: Book) -> impl IntoView {
    let categories = book.category_names();
    let description = if book.description.trim().is_empty() {
        "No description available.".to_string()
    } else {
        book.description
    };
    let year = book
        .publication_year
        .map_or_else(|| "Unknown".to_string(), |year| year.to_string());

    view! {
        <tr class="bg-gray-50">
            <td colspan="5" class="p-4 border-b border-gray-100">
                <div class="flex gap-6">
                    <img src=book.img_url alt=book.title class="object-cover w-24 h-36 rounded shadow" />
                    <div class="flex flex-col gap-2 text-sm">
                        <p>
                            <span class="font-medium">"Publication year: "</span>
                            {year}
                        </p>
                        <p>
                            <span class="font-medium">"Description: "</span>
                            {description}
                        </p>
                        <p>
                            <span class="font-medium">"Categories: "</span>
                            {categories}
                        </p>
                    </div>
                </div>
            </td>
        </tr>
    }
}

fn row(book: Book, state: BooksPage) -> impl IntoView {
    let id = book.id;
    let form = BookForm::from_record(&book);
    let is_open = move || state.expanded.with(|expanded| expanded.contains(&id));
    let expanded_view = {
        let book = book.clone();
        move || is_open().then(|| details(book.clone()))
    };

    view! {
        <tr>
            <td class=format!("{CELL_CLASS} w-8")>
                <button
                    type="button"
                    class="w-5 h-5 text-xs rounded border border-gray-300"
                    aria-label="Toggle details"
                    on:click=move |_| state.toggle_expanded(id)
                >
                    {move || if is_open() { "\u{2212}" } else { "+" }}
                </button>
            </td>
            <td class=CELL_CLASS>{book.title.clone()}</td>
            <td class=CELL_CLASS>{book.author.name.clone()}</td>
            <td class=CELL_CLASS>{book.publication_year}</td>
            <td class=CELL_CLASS>
                {page::row_actions(
                    Callback::new(move |()| state.open(Some((id, form.clone())))),
                    Callback::new(move |()| state.listing.delete(id, delete_book)),
                    Signal::derive(move || state.listing.deleting.get() == Some(id)),
                )}
            </td>
        </tr>
        {expanded_view}
    }
}

fn table(state: BooksPage) -> impl IntoView {
    view! {
        <table class=TABLE_CLASS>
            <thead>
                <tr>
                    <th class=HEAD_CLASS></th>
                    <th class=HEAD_CLASS>"Title"</th>
                    <th class=HEAD_CLASS>"Author"</th>
                    <th class=HEAD_CLASS>"Publication Year"</th>
                    <th class=format!("{HEAD_CLASS} w-28")>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    state.listing
                        .items
                        .get()
                        .into_iter()
                        .map(|book| row(book, state))
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

fn category_checkboxes(state: BooksPage) -> impl IntoView {
    let editor = state.editor;
    let error = editor.error("category_ids");
    view! {
        <fieldset class="mb-4">
            <legend class="block mb-1 text-sm font-medium">"Categories"</legend>
            <div class="grid grid-cols-2 gap-1">
                {move || {
                    state.options
                        .with(|options| options.categories.clone())
                        .into_iter()
                        .map(|category| {
                            let id = category.id;
                            view! {
                                <label class="flex gap-2 items-center text-sm">
                                    <input
                                        type="checkbox"
                                        name="category_ids"
                                        value=id.to_string()
                                        prop:checked=move || {
                                            editor.form.with(|form| form.category_ids.contains(&id))
                                        }
                                        on:change=move |ev| {
                                            let selected = event_target_checked(&ev);
                                            editor.form.update(|form| form.toggle_category(id, selected));
                                        }
                                    />
                                    {category.name}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
            {move || error.get().map(|message| view! { <p class="mt-1 text-sm text-red-600">{message}</p> })}
        </fieldset>
    }
}

fn editor_modal(state: BooksPage) -> impl IntoView {
    let BooksPage { listing, editor, .. } = state;
    let authors = Signal::derive(move || {
        state.options.with(|options| {
            options
                .authors
                .iter()
                .map(|author| (author.id.to_string(), author.name.clone()))
                .collect::<Vec<_>>()
        })
    });

    let body = view! {
        <form on:submit=move |ev| {
            ev.prevent_default();
            editor.save(listing, BookForm::validate, save_book);
        }>
            {field::text(
                "Title",
                "title",
                "Enter book title",
                editor.value(|form| &form.title),
                editor.setter(|form, value| form.title = value),
                editor.error("title"),
            )}
            {field::textarea(
                "Description",
                "description",
                editor.value(|form| &form.description),
                editor.setter(|form, value| form.description = value),
                editor.error("description"),
            )}
            <div class="grid grid-cols-2 gap-x-4">
                {field::text(
                    "ISBN",
                    "isbn",
                    "Enter book ISBN",
                    editor.value(|form| &form.isbn),
                    editor.setter(|form, value| form.isbn = value),
                    editor.error("isbn"),
                )}
                {field::text(
                    "Publication Year",
                    "publication_year",
                    "Enter publication year",
                    editor.value(|form| &form.publication_year),
                    editor.setter(|form, value| form.publication_year = value),
                    editor.error("publication_year"),
                )}
            </div>
            {field::text(
                "Image URL",
                "img_url",
                "Enter image URL",
                editor.value(|form| &form.img_url),
                editor.setter(|form, value| form.img_url = value),
                editor.error("img_url"),
            )}
            {field::select(
                "Author",
                "author_id",
                "Select author",
                authors,
                editor.value(|form| &form.author_id),
                editor.setter(|form, value| form.author_id = value),
                editor.error("author_id"),
            )}
            {category_checkboxes(state)}
            {modal::actions("Save", editor.submitting, Callback::new(move |()| editor.close()))}
        </form>
    }
    .into_any();

    modal::component(
        editor.heading(Book::NOUN),
        Callback::new(move |()| editor.close()),
        body,
    )
}

pub fn component() -> impl IntoView {
    let state = BooksPage {
        listing: Listing::new(),
        editor: Editor::new(),
        options: RwSignal::new(BookFormOptions::default()),
        preparing: RwSignal::new(false),
        expanded: RwSignal::new(Vec::new()),
        toasts: Toasts::use_toasts(),
    };
    state.listing.load_on_mount(list_books);

    view! {
        <Title text="Books" />
        {page::card(
            "Books",
            "Add Book",
            Callback::new(move |()| state.open(None)),
            page::load_switch(state.listing.state, move || table(state)).into_any(),
        )}
        <Show when=move || state.preparing.get()>
            <div class="flex fixed inset-0 z-40 justify-center items-center bg-black/10">
                {loader::spinner()}
            </div>
        </Show>
        <Show when=move || state.editor.open.get()>{move || editor_modal(state)}</Show>
    }
}
