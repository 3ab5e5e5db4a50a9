//! Local list bookkeeping for the CRUD pages.
//!
//! Pages keep the collection they loaded on entry and patch it from mutation
//! responses instead of refetching. Every helper matches records by id.

use crate::types::{Identified, RecordId};

/// Lifecycle of a page's initial load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl LoadState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Inserts `record`, replacing any entry that already carries its id.
///
/// The id is present exactly once afterwards.
pub fn upsert<T: Identified>(list: &mut Vec<T>, record: T) {
    let id = record.id();
    match list.iter().position(|item| item.id() == id) {
        Some(index) => {
            list[index] = record;
            list.retain({
                let mut seen = false;
                move |item| {
                    if item.id() != id {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                }
            });
        }
        None => list.push(record),
    }
}

/// Replaces the entry with id `id` by `record`.
///
/// Returns `false` when no entry matched, in which case the list is untouched.
pub fn replace<T: Identified>(list: &mut [T], id: RecordId, record: T) -> bool {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Removes every entry with id `id`. Returns how many were dropped.
pub fn remove<T: Identified>(list: &mut Vec<T>, id: RecordId) -> usize {
    let before = list.len();
    list.retain(|item| item.id() != id);
    before - list.len()
}

/// Looks up an entry by id.
pub fn find<T: Identified>(list: &[T], id: RecordId) -> Option<&T> {
    list.iter().find(|item| item.id() == id)
}

/// Copy of `list` ordered by `name`, ignoring case. Ties keep their order.
pub fn sorted_by_name<T: Clone>(list: &[T], name: fn(&T) -> &str) -> Vec<T> {
    let mut sorted = list.to_vec();
    sorted.sort_by_cached_key(|item| name(item).to_lowercase());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, Member};

    fn author(id: RecordId, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
            biography: String::new(),
        }
    }

    fn count(list: &[Author], id: RecordId) -> usize {
        list.iter().filter(|a| a.id == id).count()
    }

    #[test]
    fn test_upsert_appends_new_record() {
        let mut list = vec![author(1, "Austen"), author(2, "Borges")];
        upsert(&mut list, author(3, "Calvino"));

        assert_eq!(list.len(), 3);
        assert_eq!(count(&list, 3), 1);
        assert_eq!(list[2].name, "Calvino");
    }

    #[test]
    fn test_upsert_existing_id_keeps_single_entry() {
        let mut list = vec![author(1, "Austen"), author(2, "Borges")];
        upsert(&mut list, author(2, "Jorge Luis Borges"));

        assert_eq!(list.len(), 2);
        assert_eq!(count(&list, 2), 1);
        assert_eq!(list[1].name, "Jorge Luis Borges");
    }

    #[test]
    fn test_upsert_collapses_duplicates() {
        let mut list = vec![author(4, "a"), author(5, "b"), author(4, "c")];
        upsert(&mut list, author(4, "d"));

        assert_eq!(count(&list, 4), 1);
        assert_eq!(list[0].name, "d");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_replace_updates_in_place() {
        let mut list = vec![author(1, "Austen"), author(2, "Borges")];
        assert!(replace(&mut list, 1, author(1, "Jane Austen")));

        assert_eq!(list[0].name, "Jane Austen");
        assert_eq!(list[1].name, "Borges");
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let mut list = vec![author(1, "Austen")];
        assert!(!replace(&mut list, 9, author(9, "Nobody")));
        assert_eq!(list, vec![author(1, "Austen")]);
    }

    #[test]
    fn test_remove_drops_id() {
        let mut list = vec![author(1, "Austen"), author(2, "Borges")];
        assert_eq!(remove(&mut list, 1), 1);

        assert_eq!(count(&list, 1), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_missing_id() {
        let mut list: Vec<Member> = Vec::new();
        assert_eq!(remove(&mut list, 1), 0);
    }

    #[test]
    fn test_find_by_id() {
        let list = vec![author(1, "Austen"), author(2, "Borges")];
        assert_eq!(find(&list, 2).map(|a| a.name.as_str()), Some("Borges"));
        assert!(find(&list, 3).is_none());
    }

    #[test]
    fn test_load_state_accessors() {
        assert!(LoadState::Loading.is_loading());
        assert!(!LoadState::Idle.is_loading());
        assert_eq!(LoadState::Failed("boom".into()).error(), Some("boom"));
        assert_eq!(LoadState::Idle.error(), None);
    }

    #[test]
    fn test_sorted_by_name_ignores_case() {
        let list = vec![author(1, "calvino"), author(2, "Austen"), author(3, "Borges")];
        let sorted = sorted_by_name(&list, |a| a.name.as_str());

        let ids: Vec<RecordId> = sorted.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(list[0].id, 1);
    }
}
