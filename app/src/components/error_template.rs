//! Full-page error view used as the router fallback.
//!
//! During SSR the HTTP status of the response is set from the first
//! [`AppError`] found.

use http::status::StatusCode;
use icondata::AiArrowLeftOutlined;
use leptos::prelude::*;
use leptos_router::components::A;
use thiserror::Error;

use crate::components::icons;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Renders the errors carried by `outside_errors` (SSR) or `errors` (client).
pub fn component(
    outside_errors: Option<Errors>,
    errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = outside_errors.map_or_else(|| errors.unwrap_or_default(), RwSignal::new);
    let errors: Vec<AppError> = errors
        .get_untracked()
        .into_iter()
        .filter_map(|(_key, err)| err.downcast_ref::<AppError>().cloned())
        .collect();

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    let heading = if errors.len() > 1 { "Errors" } else { "Error" };
    view! {
        <div class="grid place-content-center p-12 text-center">
            <h1 class="mb-6 text-2xl font-semibold">{heading}</h1>
            {errors
                .into_iter()
                .map(|error| {
                    let code = error.status_code();
                    view! {
                        <p class="text-lg tracking-widest text-gray-500 uppercase">
                            {format!("{code} | {error}")}
                        </p>
                    }
                })
                .collect_view()}
            <div class="flex gap-1 justify-center items-center mt-6 text-blue-600 hover:underline">
                {icons::component(AiArrowLeftOutlined, "size-4")}
                <A href="/">"Back to dashboard"</A>
            </div>
        </div>
    }
}
