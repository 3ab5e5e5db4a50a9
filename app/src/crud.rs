//! Reactive state behind the list pages.
//!
//! [`Listing`] owns the loaded records and their [`LoadState`]. [`Editor`] owns
//! the add/edit modal. Mutations go through the server functions in
//! [`crate::api`] and patch the listing by id when they succeed, so a page never
//! refetches after a write.

use core::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::error_text;
use crate::collection::{self, LoadState};
use crate::components::toast::Toasts;
use crate::forms::{FormErrors, Submission, submit_validated};
use crate::types::{Author, Book, Category, Identified, Member, RecordId};

/// How a record is named in headings and notifications.
pub trait Named {
    const NOUN: &'static str;
    const PLURAL: &'static str;

    fn label(&self) -> String;
}

impl Named for Author {
    const NOUN: &'static str = "Author";
    const PLURAL: &'static str = "authors";

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Named for Category {
    const NOUN: &'static str = "Category";
    const PLURAL: &'static str = "categories";

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Named for Book {
    const NOUN: &'static str = "Book";
    const PLURAL: &'static str = "books";

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Named for Member {
    const NOUN: &'static str = "Member";
    const PLURAL: &'static str = "members";

    fn label(&self) -> String {
        self.full_name()
    }
}

/// Toast title for a finished save.
pub fn saved_title(noun: &str, updated: bool) -> String {
    let verb = if updated { "updated" } else { "added" };
    format!("{noun} {verb} successfully")
}

/// Toast title for a failed save.
pub fn save_failed_title(noun: &str, updated: bool) -> String {
    let verb = if updated { "updating" } else { "adding" };
    format!("Error {verb} {}", noun.to_lowercase())
}

/// Patches `items` with the record a save returned.
///
/// An update replaces the entry it was opened for. A create, or an update whose
/// entry vanished meanwhile, goes through [`collection::upsert`].
pub fn apply_saved<T: Identified + Clone>(items: &mut Vec<T>, editing: Option<RecordId>, record: T) {
    if let Some(id) = editing
        && collection::replace(items, id, record.clone())
    {
        return;
    }
    collection::upsert(items, record);
}

/// The records shown by a list page.
pub struct Listing<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub state: RwSignal<LoadState>,
    /// Row whose delete request is in flight.
    pub deleting: RwSignal<Option<RecordId>>,
    toasts: Toasts,
}

impl<T: Send + Sync + 'static> Clone for Listing<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Listing<T> {}

impl<T> Listing<T>
where
    T: Identified + Named + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            state: RwSignal::new(LoadState::Loading),
            deleting: RwSignal::new(None),
            toasts: Toasts::use_toasts(),
        }
    }

    /// Fetches the collection once the page is mounted in the browser.
    pub fn load_on_mount<Fut>(self, fetch: fn() -> Fut)
    where
        Fut: Future<Output = Result<Vec<T>, ServerFnError>> + 'static,
    {
        Effect::new(move |_| {
            self.state.set(LoadState::Loading);
            spawn_local(async move {
                match fetch().await {
                    Ok(items) => {
                        self.items.set(items);
                        self.state.set(LoadState::Idle);
                    }
                    Err(err) => {
                        let message = error_text(&err);
                        leptos::logging::error!("loading {} failed: {message}", T::PLURAL);
                        self.toasts
                            .error(format!("Failed to load {}", T::PLURAL), message.clone());
                        self.state.set(LoadState::Failed(message));
                    }
                }
            });
        });
    }

    /// Deletes `id` upstream and drops it from the list on success.
    pub fn delete<Fut>(self, id: RecordId, send: fn(RecordId) -> Fut)
    where
        Fut: Future<Output = Result<(), ServerFnError>> + 'static,
    {
        if self.deleting.get_untracked().is_some() {
            return;
        }
        self.deleting.set(Some(id));
        spawn_local(async move {
            match send(id).await {
                Ok(()) => {
                    let label = self
                        .items
                        .with_untracked(|items| collection::find(items, id).map(T::label))
                        .unwrap_or_default();
                    self.items.update(|items| {
                        collection::remove(items, id);
                    });
                    self.toasts
                        .success(format!("{} deleted successfully", T::NOUN), label);
                }
                Err(err) => self.toasts.error(
                    format!("Failed to delete {}", T::NOUN.to_lowercase()),
                    error_text(&err),
                ),
            }
            self.deleting.set(None);
        });
    }
}

/// Add/edit modal state for a form of type `F`.
pub struct Editor<F: Send + Sync + 'static> {
    pub open: RwSignal<bool>,
    /// Id of the record being edited; `None` while adding.
    pub editing: RwSignal<Option<RecordId>>,
    pub form: RwSignal<F>,
    pub errors: RwSignal<FormErrors>,
    pub submitting: RwSignal<bool>,
}

impl<F: Send + Sync + 'static> Clone for Editor<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Send + Sync + 'static> Copy for Editor<F> {}

impl<F> Editor<F>
where
    F: Clone + Default + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            editing: RwSignal::new(None),
            form: RwSignal::new(F::default()),
            errors: RwSignal::new(FormErrors::default()),
            submitting: RwSignal::new(false),
        }
    }

    pub fn open_new(self) {
        self.open_with(None, F::default());
    }

    pub fn open_edit(self, id: RecordId, form: F) {
        self.open_with(Some(id), form);
    }

    fn open_with(self, id: Option<RecordId>, form: F) {
        self.editing.set(id);
        self.form.set(form);
        self.errors.set(FormErrors::default());
        self.open.set(true);
    }

    /// Closes the modal and resets the form.
    pub fn close(self) {
        self.open.set(false);
        self.editing.set(None);
        self.form.set(F::default());
        self.errors.set(FormErrors::default());
    }

    /// "Add Author" or "Edit Author", depending on what was opened.
    pub fn heading(self, noun: &str) -> String {
        if self.editing.get_untracked().is_some() {
            format!("Edit {noun}")
        } else {
            format!("Add {noun}")
        }
    }

    pub fn value(self, read: fn(&F) -> &String) -> Signal<String> {
        Signal::derive(move || self.form.with(|form| read(form).clone()))
    }

    pub fn setter(self, write: fn(&mut F, String)) -> Callback<String> {
        Callback::new(move |value| self.form.update(|form| write(form, value)))
    }

    pub fn error(self, field: &'static str) -> Signal<Option<String>> {
        Signal::derive(move || self.errors.with(|errors| errors.get(field).map(str::to_owned)))
    }

    /// Validates the form and, if it passes, creates or updates the record.
    pub fn save<T, P, Fut>(
        self,
        listing: Listing<T>,
        validate: fn(&F) -> Result<P, FormErrors>,
        send: fn(Option<RecordId>, P) -> Fut,
    ) where
        T: Identified + Named + Clone + Send + Sync + 'static,
        P: 'static,
        Fut: Future<Output = Result<T, ServerFnError>> + 'static,
    {
        if self.submitting.get_untracked() {
            return;
        }
        let id = self.editing.get_untracked();
        let payload = self.form.with_untracked(validate);
        let toasts = listing.toasts;
        self.submitting.set(true);

        spawn_local(async move {
            match submit_validated(payload, |payload| send(id, payload)).await {
                Submission::Invalid(errors) => self.errors.set(errors),
                Submission::Sent(Ok(record)) => {
                    let label = record.label();
                    listing.items.update(|items| apply_saved(items, id, record));
                    toasts.success(saved_title(T::NOUN, id.is_some()), label);
                    self.close();
                }
                Submission::Sent(Err(err)) => {
                    toasts.error(save_failed_title(T::NOUN, id.is_some()), error_text(&err));
                }
            }
            self.submitting.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: RecordId, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            biography: String::new(),
        }
    }

    #[test]
    fn test_apply_saved_appends_new_record_once() {
        let mut items = vec![author(1, "Borges")];
        apply_saved(&mut items, None, author(2, "Calvino"));
        apply_saved(&mut items, None, author(2, "Calvino"));

        assert_eq!(items.iter().filter(|a| a.id == 2).count(), 1);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_apply_saved_replaces_edited_record() {
        let mut items = vec![author(1, "Borges"), author(2, "Calvino")];
        apply_saved(&mut items, Some(1), author(1, "Jorge Luis Borges"));

        assert_eq!(items[0].name, "Jorge Luis Borges");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_apply_saved_restores_vanished_record() {
        let mut items = vec![author(2, "Calvino")];
        apply_saved(&mut items, Some(1), author(1, "Borges"));

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 1);
    }

    #[test]
    fn test_toast_titles() {
        assert_eq!(saved_title(Author::NOUN, false), "Author added successfully");
        assert_eq!(saved_title(Member::NOUN, true), "Member updated successfully");
        assert_eq!(save_failed_title(Book::NOUN, false), "Error adding book");
        assert_eq!(save_failed_title(Category::NOUN, true), "Error updating category");
    }

    #[test]
    fn test_labels() {
        let member = Member {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(member.label(), "Ada Lovelace");
        assert_eq!(author(1, "Borges").label(), "Borges");
    }
}
