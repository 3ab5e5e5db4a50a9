//! Derived figures for the dashboard: summary percentages, loan ordering and
//! overdue detection, and the labels built from borrow counts.

use core::cmp::Ordering;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

use crate::types::{BorrowedBook, DashboardOverview, PopularBook};

/// Default loan period offered by the borrow form.
pub const DEFAULT_LOAN_DAYS: u64 = 14;

/// `round(numerator / denominator * 100)`, or 0 when there is nothing to divide by.
pub fn percentage(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = ((numerator as f64 / denominator as f64) * 100.0).round() as u64;
    pct
}

/// Tone of a summary card, mapped to a colour by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Danger,
    Warning,
    Success,
}

/// One of the four counters at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: u64,
    pub caption: String,
    pub warning: Option<&'static str>,
    pub tone: Tone,
}

pub fn summary_cards(overview: &DashboardOverview) -> [SummaryCard; 4] {
    let low_engagement = (overview.active_members as f64) < overview.total_members as f64 * 0.3;
    let low_availability = (overview.available_books as f64) < overview.total_books as f64 * 0.2;

    [
        SummaryCard {
            title: "Borrowed Books",
            value: overview.borrowed_books,
            caption: format!(
                "{}% of library in use",
                percentage(overview.borrowed_books, overview.total_books)
            ),
            warning: None,
            tone: Tone::Primary,
        },
        SummaryCard {
            title: "Overdue Members",
            value: overview.members_with_overdue,
            caption: format!(
                "{}% of active borrowers overdue",
                percentage(overview.members_with_overdue, overview.active_members)
            ),
            warning: None,
            tone: Tone::Danger,
        },
        SummaryCard {
            title: "Active Borrowers",
            value: overview.active_members,
            caption: format!(
                "{}% member engagement",
                percentage(overview.active_members, overview.total_members)
            ),
            warning: low_engagement.then_some("Low engagement - consider member outreach"),
            tone: Tone::Warning,
        },
        SummaryCard {
            title: "Available Books",
            value: overview.available_books,
            caption: format!(
                "{}% of collection available",
                percentage(overview.available_books, overview.total_books)
            ),
            warning: low_availability
                .then_some("Low availability - consider acquiring more copies"),
            tone: Tone::Success,
        },
    ]
}

/// Parses the due dates the library API emits.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and bare dates (UTC midnight).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A loan is overdue once its due date lies strictly in the past.
pub fn is_overdue(loan: &BorrowedBook, now: DateTime<Utc>) -> bool {
    parse_due_date(&loan.due_date).is_some_and(|due| due < now)
}

/// Overdue loans first, then by ascending due date.
pub fn sort_loans(loans: &mut [BorrowedBook], now: DateTime<Utc>) {
    loans.sort_by(|a, b| {
        let a_overdue = is_overdue(a, now);
        let b_overdue = is_overdue(b, now);
        b_overdue.cmp(&a_overdue).then_with(|| {
            match (parse_due_date(&a.due_date), parse_due_date(&b.due_date)) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    });
}

/// Human date for the loans table, e.g. `Mar 5, 2026`.
pub fn format_due_date(raw: &str) -> String {
    parse_due_date(raw).map_or_else(
        || raw.to_owned(),
        |due| due.date_naive().format("%b %-d, %Y").to_string(),
    )
}

/// Most borrowed first.
pub fn sort_popular(books: &mut [PopularBook]) {
    books.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count));
}

pub fn borrowed_times_label(count: u64) -> String {
    format!("Borrowed {count} time{}", if count > 1 { "s" } else { "" })
}

pub fn current_borrows_label(count: u64) -> String {
    format!("Currently borrowing: {count} book{}", if count == 1 { "" } else { "s" })
}

pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_LOAN_DAYS))
        .unwrap_or(today)
}

/// Whole days between `today` and `due`.
pub fn duration_in_days(today: NaiveDate, due: NaiveDate) -> i64 {
    (due - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn loan(id: i64, due: &str) -> BorrowedBook {
        BorrowedBook {
            id,
            due_date: due.to_string(),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(40, 200), 20);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_summary_caption_example() {
        let overview = DashboardOverview {
            borrowed_books: 40,
            total_books: 200,
            ..Default::default()
        };
        let cards = summary_cards(&overview);
        assert_eq!(cards[0].title, "Borrowed Books");
        assert_eq!(cards[0].value, 40);
        assert_eq!(cards[0].caption, "20% of library in use");
    }

    #[test]
    fn test_summary_warnings() {
        let overview = DashboardOverview {
            total_books: 100,
            available_books: 10,
            borrowed_books: 90,
            total_members: 50,
            active_members: 10,
            members_with_overdue: 5,
        };
        let cards = summary_cards(&overview);
        assert_eq!(cards[1].caption, "50% of active borrowers overdue");
        assert_eq!(cards[2].caption, "20% member engagement");
        assert!(cards[2].warning.is_some());
        assert_eq!(cards[3].caption, "10% of collection available");
        assert!(cards[3].warning.is_some());

        let healthy = DashboardOverview {
            available_books: 50,
            active_members: 40,
            ..overview
        };
        let cards = summary_cards(&healthy);
        assert!(cards[2].warning.is_none());
        assert!(cards[3].warning.is_none());
    }

    #[test]
    fn test_parse_due_date_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_due_date("2026-03-05"), Some(expected));
        assert_eq!(parse_due_date("2026-03-05T00:00:00"), Some(expected));
        assert_eq!(parse_due_date("2026-03-05T00:00:00.000"), Some(expected));
        assert_eq!(parse_due_date("2026-03-05T00:00:00Z"), Some(expected));
        assert_eq!(parse_due_date("2026-03-05T01:00:00+01:00"), Some(expected));
        assert_eq!(parse_due_date("soon"), None);
    }

    #[test]
    fn test_overdue_past_and_future() {
        assert!(is_overdue(&loan(1, "2026-03-01"), now()));
        assert!(!is_overdue(&loan(2, "2026-03-20"), now()));
        assert!(!is_overdue(&loan(3, "not a date"), now()));
    }

    #[test]
    fn test_sort_loans_overdue_first() {
        let mut loans = vec![
            loan(1, "2026-03-30"),
            loan(2, "2026-03-09"),
            loan(3, "2026-03-12"),
            loan(4, "2026-02-01"),
        ];
        sort_loans(&mut loans, now());
        let ids: Vec<_> = loans.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_format_due_date() {
        assert_eq!(format_due_date("2026-03-05"), "Mar 5, 2026");
        assert_eq!(format_due_date("garbage"), "garbage");
    }

    #[test]
    fn test_sort_popular_descending() {
        let mut books = vec![
            PopularBook { id: 1, borrow_count: 2, ..Default::default() },
            PopularBook { id: 2, borrow_count: 9, ..Default::default() },
            PopularBook { id: 3, borrow_count: 5, ..Default::default() },
        ];
        sort_popular(&mut books);
        let ids: Vec<_> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_labels_pluralise() {
        assert_eq!(borrowed_times_label(1), "Borrowed 1 time");
        assert_eq!(borrowed_times_label(3), "Borrowed 3 times");
        assert_eq!(current_borrows_label(1), "Currently borrowing: 1 book");
        assert_eq!(current_borrows_label(0), "Currently borrowing: 0 books");
        assert_eq!(current_borrows_label(2), "Currently borrowing: 2 books");
    }

    #[test]
    fn test_due_date_helpers() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        let due = default_due_date(today);
        assert_eq!(due, NaiveDate::from_ymd_opt(2027, 1, 8).unwrap());
        assert_eq!(duration_in_days(today, due), 14);
    }
}
