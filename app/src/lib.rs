#![recursion_limit = "256"]

use crate::components::{error_template, header, sidebar, toast};
use leptos::{
    html::{body, head, html, meta},
    prelude::*,
};
use leptos_meta::{MetaTags, Stylesheet, StylesheetProps, Title, TitleProps, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod api;
mod authors;
mod books;
mod categories;
#[cfg(feature = "ssr")]
pub mod client;
pub mod collection;
mod components;
mod crud;
mod dashboard;
pub mod forms;
mod members;
pub mod nav;
pub mod stats;
pub mod types;
pub mod validation;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
            Stylesheet(
                StylesheetProps::builder()
                    .id("leptos")
                    .href("/pkg/library.css")
                    .build(),
            ),
            Title(
                TitleProps::builder()
                    .text("Library Management System")
                    .build(),
            ),
        )),
        body().class("text-gray-900 bg-gray-100").child(self::component),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

/// Header, sidebar and the routed page, with the toast queue provided to all of them.
#[must_use]
pub fn component() -> impl IntoView {
    toast::Toasts::provide();

    view! {
        <Router>
            <div class="flex flex-col min-h-screen">
                {header::component}
                <div class="flex flex-1">
                    {sidebar::component}
                    <main class="overflow-auto flex-1 p-6">
                        <FlatRoutes fallback=|| {
                            let mut outside_errors = Errors::default();
                            outside_errors.insert_with_default_key(error_template::AppError::NotFound);
                            error_template::component(Some(outside_errors), None)
                        }>
                            <Route path=StaticSegment("") view=dashboard::component/>
                            <Route path=StaticSegment("authors") view=authors::component/>
                            <Route path=StaticSegment("categories") view=categories::component/>
                            <Route path=StaticSegment("books") view=books::component/>
                            <Route path=StaticSegment("member") view=members::component/>
                        </FlatRoutes>
                    </main>
                </div>
            </div>
            {toast::component}
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::MenuKey;

    #[test]
    fn test_shell_creation() {
        let options = LeptosOptions::builder().output_name("library").build();
        drop(shell(options));
    }

    #[test]
    fn test_component_function_signatures() {
        let _shell_fn: fn(LeptosOptions) -> _ = shell;
        let _component_fn: fn() -> _ = component;
        let _dashboard: fn() -> _ = dashboard::component;
        let _authors: fn() -> _ = authors::component;
        let _categories: fn() -> _ = categories::component;
        let _books: fn() -> _ = books::component;
        let _members: fn() -> _ = members::component;
    }

    #[test]
    fn test_menu_routes_match_route_table() {
        let routed = ["/", "/authors", "/categories", "/books", "/member"];
        for key in MenuKey::ALL {
            assert!(routed.contains(&key.route()), "{key:?} has no route");
        }
    }
}
