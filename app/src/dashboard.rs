//! Landing page: summary counters, the active loans with their return buttons,
//! popular books, top borrowers and the borrow dialog.
//!
//! Every borrow or return refetches the whole dashboard rather than patching it,
//! since one loan moves several counters at once.

use chrono::{Local, NaiveDate, Utc};
use icondata::{AiBookOutlined, AiPlusOutlined, AiUserOutlined, AiWarningOutlined};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::{
    api::{borrow_book, error_text, load_borrow_options, load_dashboard, return_book},
    components::{
        field, icons, loader, modal,
        page::{CELL_CLASS, HEAD_CLASS, TABLE_CLASS},
        toast::Toasts,
    },
    forms::{BorrowForm, FormErrors, Submission, submit_validated},
    stats::{self, SummaryCard, Tone},
    types::{BorrowOptions, BorrowedBook, DashboardData, PopularBook, RecordId, TopBorrower},
};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// State of the "Borrow a Book" modal.
#[derive(Clone, Copy)]
struct BorrowDialog {
    open: RwSignal<bool>,
    /// Set while the book and member choices are being fetched.
    preparing: RwSignal<bool>,
    submitting: RwSignal<bool>,
    options: RwSignal<BorrowOptions>,
    form: RwSignal<BorrowForm>,
    errors: RwSignal<FormErrors>,
}

impl BorrowDialog {
    fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            preparing: RwSignal::new(false),
            submitting: RwSignal::new(false),
            options: RwSignal::new(BorrowOptions::default()),
            form: RwSignal::new(BorrowForm::starting(today())),
            errors: RwSignal::new(FormErrors::default()),
        }
    }

    fn close(self) {
        self.open.set(false);
        self.form.set(BorrowForm::starting(today()));
        self.errors.set(FormErrors::default());
    }

    fn value(self, read: fn(&BorrowForm) -> &String) -> Signal<String> {
        Signal::derive(move || self.form.with(|form| read(form).clone()))
    }

    fn setter(self, write: fn(&mut BorrowForm, String)) -> Callback<String> {
        Callback::new(move |value| self.form.update(|form| write(form, value)))
    }

    fn error(self, field: &'static str) -> Signal<Option<String>> {
        Signal::derive(move || self.errors.with(|errors| errors.get(field).map(str::to_owned)))
    }
}

#[derive(Clone, Copy)]
struct Dashboard {
    data: Resource<Result<DashboardData, ServerFnError>>,
    toasts: Toasts,
    /// Loan whose return request is in flight.
    returning: RwSignal<Option<RecordId>>,
    borrow: BorrowDialog,
}

impl Dashboard {
    fn return_loan(self, loan_id: RecordId) {
        if self.returning.get_untracked().is_some() {
            return;
        }
        self.returning.set(Some(loan_id));
        spawn_local(async move {
            match return_book(loan_id).await {
                Ok(()) => {
                    self.toasts.success(
                        "Book returned successfully",
                        "The book has been returned to the library",
                    );
                    self.data.refetch();
                }
                Err(err) => self.toasts.error("Failed to return book", error_text(&err)),
            }
            self.returning.set(None);
        });
    }

    /// Loads borrowable books and members, then opens the borrow modal.
    fn open_borrow(self) {
        let borrow = self.borrow;
        if borrow.preparing.get_untracked() {
            return;
        }
        borrow.preparing.set(true);
        spawn_local(async move {
            match load_borrow_options().await {
                Ok(options) => {
                    borrow.options.set(options);
                    borrow.form.set(BorrowForm::starting(today()));
                    borrow.errors.set(FormErrors::default());
                    borrow.open.set(true);
                }
                Err(err) => self.toasts.error(
                    "Failed to fetch available books and members",
                    error_text(&err),
                ),
            }
            borrow.preparing.set(false);
        });
    }

    fn submit_borrow(self) {
        let borrow = self.borrow;
        if borrow.submitting.get_untracked() {
            return;
        }
        let payload = borrow.form.with_untracked(|form| form.validate(today()));
        borrow.submitting.set(true);
        spawn_local(async move {
            match submit_validated(payload, borrow_book).await {
                Submission::Invalid(errors) => borrow.errors.set(errors),
                Submission::Sent(Ok(())) => {
                    self.toasts.success(
                        "Book borrowed successfully",
                        "The book has been borrowed successfully",
                    );
                    borrow.close();
                    self.data.refetch();
                }
                Submission::Sent(Err(err)) => {
                    self.toasts.error("Failed to borrow book", error_text(&err));
                }
            }
            borrow.submitting.set(false);
        });
    }
}

const fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Primary => "border-blue-500 text-blue-700",
        Tone::Danger => "border-red-500 text-red-700",
        Tone::Warning => "border-amber-500 text-amber-700",
        Tone::Success => "border-green-500 text-green-700",
    }
}

fn summary_card(card: SummaryCard) -> impl IntoView {
    view! {
        <div class=format!("p-4 bg-white rounded-lg border-t-4 shadow-sm {}", tone_class(card.tone))>
            <p class="text-sm text-gray-500">{card.title}</p>
            <p class="my-1 text-4xl font-semibold">{card.value}</p>
            <p class="text-sm text-gray-600">{card.caption}</p>
            {card
                .warning
                .map(|warning| {
                    view! {
                        <p class="flex gap-1 items-center mt-2 text-xs text-amber-700">
                            {icons::component(AiWarningOutlined, "size-3")}
                            {warning}
                        </p>
                    }
                })}
        </div>
    }
}

fn loan_row(dashboard: Dashboard, loan: BorrowedBook, overdue: bool) -> impl IntoView {
    let id = loan.id;
    let tag = if overdue {
        "text-red-700 bg-red-50 border-red-300"
    } else {
        "text-green-700 bg-green-50 border-green-300"
    };
    let in_flight = move || dashboard.returning.get() == Some(id);

    view! {
        <tr>
            <td class=CELL_CLASS>{loan.member.full_name()}</td>
            <td class=CELL_CLASS>{loan.book.label()}</td>
            <td class=CELL_CLASS>
                <span class=format!("py-0.5 px-2 text-xs rounded border {tag}")>
                    {stats::format_due_date(&loan.due_date)}
                </span>
            </td>
            <td class=CELL_CLASS>
                <button
                    type="button"
                    class="flex gap-2 items-center py-1 px-3 rounded-md border border-gray-300 hover:border-blue-500 disabled:opacity-60"
                    disabled=in_flight
                    on:click=move |_| dashboard.return_loan(id)
                >
                    <Show when=in_flight>{loader::spinner()}</Show>
                    "Return Book"
                </button>
            </td>
        </tr>
    }
}

fn loans_table(dashboard: Dashboard, mut loans: Vec<BorrowedBook>) -> impl IntoView {
    let now = Utc::now();
    stats::sort_loans(&mut loans, now);
    let preparing = dashboard.borrow.preparing;

    view! {
        <section class="p-6 bg-white rounded-lg shadow-sm">
            <div class="flex justify-between items-center mb-4">
                <h2 class="text-xl font-semibold">"Borrowed Books"</h2>
                <button
                    type="button"
                    class="flex gap-2 items-center py-1.5 px-4 text-white bg-blue-600 rounded-md hover:bg-blue-500 disabled:opacity-60"
                    disabled=move || preparing.get()
                    on:click=move |_| dashboard.open_borrow()
                >
                    {move || {
                        if preparing.get() {
                            loader::spinner().into_any()
                        } else {
                            icons::component(AiPlusOutlined, "size-4").into_any()
                        }
                    }}
                    "Borrow Book"
                </button>
            </div>
            <table class=TABLE_CLASS>
                <thead>
                    <tr>
                        <th class=HEAD_CLASS>"Member"</th>
                        <th class=HEAD_CLASS>"Book"</th>
                        <th class=HEAD_CLASS>"Due Date"</th>
                        <th class=HEAD_CLASS>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {if loans.is_empty() {
                        view! {
                            <tr>
                                <td colspan="4" class="py-6 text-center text-gray-400">
                                    "No books are currently borrowed."
                                </td>
                            </tr>
                        }
                            .into_any()
                    } else {
                        loans
                            .into_iter()
                            .map(|loan| {
                                let overdue = stats::is_overdue(&loan, now);
                                loan_row(dashboard, loan, overdue)
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </section>
    }
}

fn panel(title: &'static str, body: AnyView) -> impl IntoView {
    view! {
        <section class="p-6 bg-white rounded-lg shadow-sm">
            <h2 class="mb-4 text-lg font-semibold">{title}</h2>
            {body}
        </section>
    }
}

fn popular_books(mut books: Vec<PopularBook>) -> impl IntoView {
    stats::sort_popular(&mut books);
    let body = view! {
        <ul class="flex flex-col divide-y divide-gray-100">
            {books
                .into_iter()
                .map(|book| {
                    view! {
                        <li class="flex gap-3 items-start py-2">
                            {icons::component(AiBookOutlined, "mt-1 size-5 text-blue-600")}
                            <div>
                                <p class="font-medium">{book.title}</p>
                                <p class="text-sm text-gray-500">{book.author}</p>
                                <p class="text-xs text-gray-400">
                                    {stats::borrowed_times_label(book.borrow_count)}
                                </p>
                            </div>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    };
    panel("Popular Books", body.into_any())
}

fn top_borrowers(borrowers: Vec<TopBorrower>) -> impl IntoView {
    let body = view! {
        <ul class="flex flex-col divide-y divide-gray-100">
            {borrowers
                .into_iter()
                .map(|borrower| {
                    view! {
                        <li class="flex gap-3 items-start py-2">
                            {icons::component(AiUserOutlined, "mt-1 size-5 text-blue-600")}
                            <div class="flex-1">
                                <div class="flex justify-between items-center">
                                    <p class="font-medium">{borrower.name}</p>
                                    <span class="py-0.5 px-2 text-xs text-blue-700 bg-blue-50 rounded">
                                        {format!("{} books", borrower.borrow_count)}
                                    </span>
                                </div>
                                <p class="text-xs text-gray-400">
                                    {stats::current_borrows_label(borrower.current_borrows)}
                                </p>
                            </div>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    };
    panel("Top Borrowers", body.into_any())
}

fn overview(dashboard: Dashboard, data: DashboardData) -> impl IntoView {
    let DashboardData {
        overview,
        borrowed_books,
        top_borrowers: borrowers,
        popular_books: popular,
    } = data;

    view! {
        <div class="grid grid-cols-1 gap-4 mb-6 sm:grid-cols-2 xl:grid-cols-4">
            {stats::summary_cards(&overview).into_iter().map(summary_card).collect_view()}
        </div>
        <div class="grid grid-cols-1 gap-6 xl:grid-cols-3">
            <div class="xl:col-span-2">{loans_table(dashboard, borrowed_books)}</div>
            <div class="flex flex-col gap-6">
                {popular_books(popular)}
                {top_borrowers(borrowers)}
            </div>
        </div>
    }
}

fn borrow_modal(dashboard: Dashboard) -> impl IntoView {
    let borrow = dashboard.borrow;
    let books = Signal::derive(move || {
        borrow.options.with(|options| {
            options
                .books
                .iter()
                .map(|book| (book.id.to_string(), book.label()))
                .collect::<Vec<_>>()
        })
    });
    let members = Signal::derive(move || {
        borrow.options.with(|options| {
            options
                .members
                .iter()
                .map(|member| (member.id.to_string(), member.full_name()))
                .collect::<Vec<_>>()
        })
    });

    let body = view! {
        <form on:submit=move |ev| {
            ev.prevent_default();
            dashboard.submit_borrow();
        }>
            {field::select(
                "Book",
                "book_id",
                "Select a book",
                books,
                borrow.value(|form| &form.book_id),
                borrow.setter(|form, value| form.book_id = value),
                borrow.error("book_id"),
            )}
            {field::select(
                "Member",
                "member_id",
                "Select a member",
                members,
                borrow.value(|form| &form.member_id),
                borrow.setter(|form, value| form.member_id = value),
                borrow.error("member_id"),
            )}
            {field::date(
                "Due Date",
                "due_date",
                borrow.value(|form| &form.due_date),
                borrow.setter(|form, value| form.due_date = value),
                borrow.error("due_date"),
            )}
            {modal::actions("Borrow", borrow.submitting, Callback::new(move |()| borrow.close()))}
        </form>
    }
    .into_any();

    modal::component(
        "Borrow a Book".to_string(),
        Callback::new(move |()| borrow.close()),
        body,
    )
}

pub fn component() -> impl IntoView {
    let toasts = Toasts::use_toasts();
    let data = Resource::new(|| (), |()| load_dashboard());
    let dashboard = Dashboard {
        data,
        toasts,
        returning: RwSignal::new(None),
        borrow: BorrowDialog::new(),
    };

    Effect::new(move |_| {
        if let Some(Err(err)) = data.get() {
            leptos::logging::error!("dashboard load failed: {err}");
            toasts.error("Failed to refresh dashboard data", "Please try again later");
        }
    });

    view! {
        <Title text="Dashboard" />
        <Transition fallback=move || loader::component(6)>
            {move || {
                data.get()
                    .map(|result| match result {
                        Ok(data) => overview(dashboard, data).into_any(),
                        Err(_) => loader::failed("Failed to refresh dashboard data".to_string()).into_any(),
                    })
            }}
        </Transition>
        <Show when=move || dashboard.borrow.open.get()>{move || borrow_modal(dashboard)}</Show>
    }
}
