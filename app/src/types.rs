use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use leptos::config::LeptosOptions;

#[cfg(feature = "ssr")]
use crate::client::LibraryClient;

/// Identifier type used by every record the library API returns.
pub type RecordId = i64;

#[cfg(feature = "ssr")]
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub client: std::sync::Arc<LibraryClient>,
    pub leptos_options: std::sync::Arc<LeptosOptions>,
}

#[cfg(feature = "ssr")]
impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.as_ref().clone()
    }
}

/// A record with a server-assigned id, patchable in a local list.
pub trait Identified {
    fn id(&self) -> RecordId;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub biography: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub img_url: String,
    pub author: Author,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Book {
    /// Label used in selects and loan rows: `Title (Author)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.author.name)
    }

    #[must_use]
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|category| category.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Member {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An active loan of a book to a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedBook {
    pub id: RecordId,
    pub book: Book,
    pub member: Member,
    pub due_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PopularBook {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub borrow_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopBorrower {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub borrow_count: u64,
    #[serde(default)]
    pub current_borrows: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardOverview {
    pub total_books: u64,
    pub available_books: u64,
    pub borrowed_books: u64,
    pub total_members: u64,
    pub active_members: u64,
    pub members_with_overdue: u64,
}

/// Everything the dashboard renders, fetched in one round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardData {
    pub overview: DashboardOverview,
    pub borrowed_books: Vec<BorrowedBook>,
    pub top_borrowers: Vec<TopBorrower>,
    pub popular_books: Vec<PopularBook>,
}

/// Choices offered by the borrow modal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BorrowOptions {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
}

/// Choices offered by the book form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorInput {
    pub name: String,
    pub biography: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub publication_year: i32,
    pub img_url: String,
    pub author_id: RecordId,
    pub category_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub book_id: RecordId,
    pub member_id: RecordId,
    pub duration_in_days: i64,
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> RecordId {
                self.id
            }
        })+
    };
}

identified!(Author, Category, Book, Member, BorrowedBook, PopularBook, TopBorrower);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_deserializes_full_record() {
        let book: Book = serde_json::from_value(json!({
            "id": 7,
            "title": "Dune",
            "description": "Spice",
            "isbn": "9780441013593",
            "publicationYear": 1965,
            "imgUrl": "https://covers.example/dune.jpg",
            "author": { "id": 2, "name": "Frank Herbert", "biography": "SF author" },
            "categories": [{ "id": 1, "name": "Science Fiction", "description": "" }]
        }))
        .unwrap();

        assert_eq!(book.id, 7);
        assert_eq!(book.publication_year, Some(1965));
        assert_eq!(book.img_url, "https://covers.example/dune.jpg");
        assert_eq!(book.author.name, "Frank Herbert");
        assert_eq!(book.category_names(), "Science Fiction");
    }

    #[test]
    fn test_loan_book_label_names_the_author() {
        let loan: BorrowedBook = serde_json::from_value(json!({
            "id": 11,
            "book": { "id": 3, "title": "Ficciones", "author": { "id": 1, "name": "Jorge Luis Borges" } },
            "member": { "id": 7, "firstName": "Ada", "lastName": "Lovelace" },
            "dueDate": "2020-01-15T10:00:00"
        }))
        .unwrap();

        assert_eq!(loan.book.label(), "Ficciones (Jorge Luis Borges)");
    }

    #[test]
    fn test_book_deserializes_light_record() {
        // Shape returned by `/books/active` and embedded in loans.
        let book: Book = serde_json::from_value(json!({
            "id": 3,
            "title": "Emma",
            "author": { "id": 1, "name": "Jane Austen" }
        }))
        .unwrap();

        assert_eq!(book.label(), "Emma (Jane Austen)");
        assert!(book.categories.is_empty());
        assert_eq!(book.publication_year, None);
    }

    #[test]
    fn test_member_uses_camel_case() {
        let member = Member {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        };
        let value = serde_json::to_value(&member).unwrap();

        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["lastName"], "Lovelace");
        assert_eq!(member.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_overview_defaults_missing_counters() {
        let overview: DashboardOverview =
            serde_json::from_value(json!({ "totalBooks": 200, "borrowedBooks": 40 })).unwrap();

        assert_eq!(overview.total_books, 200);
        assert_eq!(overview.borrowed_books, 40);
        assert_eq!(overview.members_with_overdue, 0);
    }

    #[test]
    fn test_book_input_wire_names() {
        let input = BookInput {
            title: "Dune".to_string(),
            publication_year: 1965,
            author_id: 2,
            category_ids: vec![1, 4],
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["publicationYear"], 1965);
        assert_eq!(value["authorId"], 2);
        assert_eq!(value["categoryIds"], json!([1, 4]));
        assert!(value.get("imgUrl").is_some());
    }

    #[test]
    fn test_identified_reports_record_id() {
        let loan = BorrowedBook {
            id: 11,
            ..Default::default()
        };
        assert_eq!(Identified::id(&loan), 11);
    }
}
