//! Server functions the browser calls to reach the library API.
//!
//! Each endpoint is a thin proxy: it pulls the shared
//! [`LibraryClient`](crate::client::LibraryClient) out of [`AppState`] and maps
//! upstream failures into `ServerFnError` messages staff can read in a toast.
//!
//! [`AppState`]: crate::types::AppState

#![allow(deprecated)]

use leptos::prelude::{ServerFnError, server};
use leptos::server_fn::codec::{GetUrl, Json};

#[cfg(feature = "ssr")]
use leptos::server_fn::error::NoCustomError;

use crate::types::{
    Author, AuthorInput, Book, BookFormOptions, BookInput, BorrowOptions, BorrowRequest, Category,
    CategoryInput, DashboardData, Member, MemberInput, RecordId,
};

#[cfg(feature = "ssr")]
fn client() -> std::sync::Arc<crate::client::LibraryClient> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;

    let AppState { client, .. } = expect_context::<AppState>();
    client
}

#[cfg(feature = "ssr")]
fn upstream(context: &str, err: crate::client::ApiError) -> ServerFnError {
    tracing::error!(error = %err, context, "library API call failed");
    ServerFnError::<NoCustomError>::ServerError(err.user_message())
}

/// Text for an error toast: the upstream message when there is one.
pub fn error_text(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

#[server(prefix = "/api", endpoint = "authors", input = GetUrl)]
pub async fn list_authors() -> Result<Vec<Author>, ServerFnError> {
    client()
        .authors()
        .await
        .map_err(|e| upstream("list_authors", e))
}

/// Creates the author when `id` is `None`, updates it otherwise.
#[server(prefix = "/api/authors", endpoint = "save", input = Json)]
pub async fn save_author(
    id: Option<RecordId>,
    payload: AuthorInput,
) -> Result<Author, ServerFnError> {
    let client = client();
    let result = match id {
        Some(id) => client.update_author(id, &payload).await,
        None => client.create_author(&payload).await,
    };
    result.map_err(|e| upstream("save_author", e))
}

#[server(prefix = "/api/authors", endpoint = "delete")]
pub async fn delete_author(id: RecordId) -> Result<(), ServerFnError> {
    client()
        .delete_author(id)
        .await
        .map_err(|e| upstream("delete_author", e))
}

#[server(prefix = "/api", endpoint = "categories", input = GetUrl)]
pub async fn list_categories() -> Result<Vec<Category>, ServerFnError> {
    client()
        .categories()
        .await
        .map_err(|e| upstream("list_categories", e))
}

#[server(prefix = "/api/categories", endpoint = "save", input = Json)]
pub async fn save_category(
    id: Option<RecordId>,
    payload: CategoryInput,
) -> Result<Category, ServerFnError> {
    let client = client();
    let result = match id {
        Some(id) => client.update_category(id, &payload).await,
        None => client.create_category(&payload).await,
    };
    result.map_err(|e| upstream("save_category", e))
}

#[server(prefix = "/api/categories", endpoint = "delete")]
pub async fn delete_category(id: RecordId) -> Result<(), ServerFnError> {
    client()
        .delete_category(id)
        .await
        .map_err(|e| upstream("delete_category", e))
}

#[server(prefix = "/api", endpoint = "books", input = GetUrl)]
pub async fn list_books() -> Result<Vec<Book>, ServerFnError> {
    client()
        .books()
        .await
        .map_err(|e| upstream("list_books", e))
}

/// Authors and categories for the book form's selects.
#[server(prefix = "/api/books", endpoint = "options", input = GetUrl)]
pub async fn load_book_form_options() -> Result<BookFormOptions, ServerFnError> {
    client()
        .book_form_options()
        .await
        .map_err(|e| upstream("load_book_form_options", e))
}

#[server(prefix = "/api/books", endpoint = "save", input = Json)]
pub async fn save_book(id: Option<RecordId>, payload: BookInput) -> Result<Book, ServerFnError> {
    let client = client();
    let result = match id {
        Some(id) => client.update_book(id, &payload).await,
        None => client.create_book(&payload).await,
    };
    result.map_err(|e| upstream("save_book", e))
}

#[server(prefix = "/api/books", endpoint = "delete")]
pub async fn delete_book(id: RecordId) -> Result<(), ServerFnError> {
    client()
        .delete_book(id)
        .await
        .map_err(|e| upstream("delete_book", e))
}

#[server(prefix = "/api", endpoint = "members", input = GetUrl)]
pub async fn list_members() -> Result<Vec<Member>, ServerFnError> {
    client()
        .members()
        .await
        .map_err(|e| upstream("list_members", e))
}

#[server(prefix = "/api/members", endpoint = "save", input = Json)]
pub async fn save_member(
    id: Option<RecordId>,
    payload: MemberInput,
) -> Result<Member, ServerFnError> {
    let client = client();
    let result = match id {
        Some(id) => client.update_member(id, &payload).await,
        None => client.create_member(&payload).await,
    };
    result.map_err(|e| upstream("save_member", e))
}

#[server(prefix = "/api/members", endpoint = "delete")]
pub async fn delete_member(id: RecordId) -> Result<(), ServerFnError> {
    client()
        .delete_member(id)
        .await
        .map_err(|e| upstream("delete_member", e))
}

/// Overview counters, active loans, top borrowers and popular books in one call.
#[server(prefix = "/api", endpoint = "dashboard", input = GetUrl)]
pub async fn load_dashboard() -> Result<DashboardData, ServerFnError> {
    client()
        .dashboard()
        .await
        .map_err(|e| upstream("load_dashboard", e))
}

/// Borrowable books and all members, for the borrow modal.
#[server(prefix = "/api/loans", endpoint = "options", input = GetUrl)]
pub async fn load_borrow_options() -> Result<BorrowOptions, ServerFnError> {
    client()
        .borrow_options()
        .await
        .map_err(|e| upstream("load_borrow_options", e))
}

#[server(prefix = "/api/loans", endpoint = "borrow", input = Json)]
pub async fn borrow_book(request: BorrowRequest) -> Result<(), ServerFnError> {
    client()
        .borrow_book(&request)
        .await
        .map_err(|e| upstream("borrow_book", e))
}

#[server(prefix = "/api/loans", endpoint = "return")]
pub async fn return_book(loan_id: RecordId) -> Result<(), ServerFnError> {
    client()
        .return_book(loan_id)
        .await
        .map_err(|e| upstream("return_book", e))
}
