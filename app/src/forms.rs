//! Form state for the dashboard's modals and the rules each one enforces.
//!
//! Every form holds the raw strings bound to its inputs. `validate` turns them
//! into the typed payload the library API expects, or a [`FormErrors`] map that
//! the modal renders next to each field.

use std::collections::BTreeMap;
use std::future::Future;

use chrono::NaiveDate;

use crate::stats;
use crate::types::{
    Author, AuthorInput, Book, BookInput, BorrowRequest, Category, CategoryInput, Member,
    MemberInput, RecordId,
};
use crate::validation::{self, ValidationError};

/// First failing message per field, keyed by the field's input name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Records `result` under `field` and hands back the value if it passed.
    fn check<T>(
        &mut self,
        field: &'static str,
        result: Result<T, ValidationError>,
        message: impl FnOnce(&ValidationError) -> String,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.entry(field).or_insert_with(|| message(&err));
                None
            }
        }
    }

    fn push(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_owned());
    }
}

/// Outcome of [`submit_validated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    Invalid(FormErrors),
    Sent(T),
}

/// Validates `payload` and only then awaits `send`.
///
/// An invalid form never reaches the network.
pub async fn submit_validated<P, T, F, Fut>(
    payload: Result<P, FormErrors>,
    send: F,
) -> Submission<T>
where
    F: FnOnce(P) -> Fut,
    Fut: Future<Output = T>,
{
    match payload {
        Ok(payload) => Submission::Sent(send(payload).await),
        Err(errors) => Submission::Invalid(errors),
    }
}

fn text(required: &str, too_long: &str) -> impl Fn(&ValidationError) -> String {
    let required = required.to_owned();
    let too_long = too_long.to_owned();
    move |err| match err {
        ValidationError::Empty => required.clone(),
        ValidationError::TooLong { .. } | ValidationError::InvalidFormat { .. } => too_long.clone(),
    }
}

fn bounded(input: &str, max: usize) -> Result<String, ValidationError> {
    validation::required(input).and_then(|value| validation::max_chars(value, max))
}

fn parse_id(raw: &str) -> Option<RecordId> {
    raw.trim().parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorForm {
    pub name: String,
    pub biography: String,
}

impl AuthorForm {
    pub fn from_record(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            biography: author.biography.clone(),
        }
    }

    pub fn validate(&self) -> Result<AuthorInput, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.check(
            "name",
            bounded(&self.name, 100),
            text(
                "Please enter the author's name",
                "Name cannot be longer than 100 characters",
            ),
        );
        let biography = errors.check(
            "biography",
            bounded(&self.biography, 500),
            text(
                "Please enter the author's biography",
                "Biography cannot be longer than 500 characters",
            ),
        );
        match (name, biography) {
            (Some(name), Some(biography)) => Ok(AuthorInput { name, biography }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_record(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<CategoryInput, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.check(
            "name",
            bounded(&self.name, 100),
            text(
                "Please enter the category name",
                "Name cannot be longer than 100 characters",
            ),
        );
        let description = errors.check(
            "description",
            bounded(&self.description, 500),
            text(
                "Please enter the category description",
                "Description cannot be longer than 500 characters",
            ),
        );
        match (name, description) {
            (Some(name), Some(description)) => Ok(CategoryInput { name, description }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub publication_year: String,
    pub img_url: String,
    /// Selected author id as rendered in the `<select>`; empty when unset.
    pub author_id: String,
    pub category_ids: Vec<RecordId>,
}

impl BookForm {
    pub fn from_record(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            description: book.description.clone(),
            isbn: book.isbn.clone(),
            publication_year: book
                .publication_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            img_url: book.img_url.clone(),
            author_id: book.author.id.to_string(),
            category_ids: book.categories.iter().map(|category| category.id).collect(),
        }
    }

    /// Adds or removes a category from the selection.
    pub fn toggle_category(&mut self, id: RecordId, selected: bool) {
        self.category_ids.retain(|existing| *existing != id);
        if selected {
            self.category_ids.push(id);
        }
    }

    pub fn validate(&self) -> Result<BookInput, FormErrors> {
        let mut errors = FormErrors::default();
        let title = errors.check(
            "title",
            bounded(&self.title, 100),
            text(
                "Please enter the book title.",
                "Title cannot exceed 100 characters.",
            ),
        );
        let description = errors.check(
            "description",
            bounded(&self.description, 500),
            text(
                "Please enter the book description.",
                "Description cannot be longer than 500 characters",
            ),
        );
        let isbn = errors.check("isbn", validation::isbn(&self.isbn), |err| match err {
            ValidationError::Empty => "Please enter the book ISBN.".to_owned(),
            _ => "Please enter a valid ISBN number.".to_owned(),
        });
        let publication_year = errors.check(
            "publication_year",
            validation::four_digit_year(&self.publication_year),
            |err| match err {
                ValidationError::Empty => "Please enter the publication year.".to_owned(),
                _ => "Please enter a valid 4-digit year.".to_owned(),
            },
        );
        let img_url = errors.check("img_url", validation::http_url(&self.img_url), |err| {
            match err {
                ValidationError::Empty => "Please enter the image URL.".to_owned(),
                _ => "Please enter a valid URL.".to_owned(),
            }
        });
        let author_id = parse_id(&self.author_id);
        if author_id.is_none() {
            errors.push("author_id", "Please select an author.");
        }
        if self.category_ids.is_empty() {
            errors.push("category_ids", "Please select at least one category.");
        }

        match (title, description, isbn, publication_year, img_url, author_id) {
            (
                Some(title),
                Some(description),
                Some(isbn),
                Some(publication_year),
                Some(img_url),
                Some(author_id),
            ) if errors.is_empty() => Ok(BookInput {
                title,
                description,
                isbn,
                publication_year,
                img_url,
                author_id,
                category_ids: self.category_ids.clone(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl MemberForm {
    pub fn from_record(member: &Member) -> Self {
        Self {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<MemberInput, FormErrors> {
        let mut errors = FormErrors::default();
        let first_name = errors.check(
            "first_name",
            bounded(&self.first_name, 50),
            text(
                "Please input first name!",
                "First name cannot exceed 50 characters.",
            ),
        );
        let last_name = errors.check(
            "last_name",
            bounded(&self.last_name, 50),
            text(
                "Please input last name!",
                "Last name cannot exceed 50 characters.",
            ),
        );
        let email = errors.check("email", validation::email(&self.email), |err| match err {
            ValidationError::Empty => "Please input email!".to_owned(),
            _ => "The input is not valid E-mail!".to_owned(),
        });
        let phone = errors.check("phone", validation::required(&self.phone), |_| {
            "Please input phone number!".to_owned()
        });

        match (first_name, last_name, email, phone) {
            (Some(first_name), Some(last_name), Some(email), Some(phone)) => Ok(MemberInput {
                first_name,
                last_name,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowForm {
    pub book_id: String,
    pub member_id: String,
    /// `YYYY-MM-DD`, as produced by `<input type="date">`.
    pub due_date: String,
}

impl BorrowForm {
    /// Empty selection with the due date preset to the default loan period.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            book_id: String::new(),
            member_id: String::new(),
            due_date: stats::default_due_date(today).format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<BorrowRequest, FormErrors> {
        let mut errors = FormErrors::default();
        let book_id = parse_id(&self.book_id);
        if book_id.is_none() {
            errors.push("book_id", "Please select a book");
        }
        let member_id = parse_id(&self.member_id);
        if member_id.is_none() {
            errors.push("member_id", "Please select a member");
        }

        let due_date = if self.due_date.trim().is_empty() {
            Some(stats::default_due_date(today))
        } else {
            NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok()
        };
        let duration_in_days = match due_date {
            Some(due) if due > today => Some(stats::duration_in_days(today, due)),
            Some(_) => {
                errors.push("due_date", "Due date must be after today");
                None
            }
            None => {
                errors.push("due_date", "Please pick a valid due date");
                None
            }
        };

        match (book_id, member_id, duration_in_days) {
            (Some(book_id), Some(member_id), Some(duration_in_days)) => Ok(BorrowRequest {
                book_id,
                member_id,
                duration_in_days,
            }),
            _ => Err(errors),
        }
    }
}
