use leptos::prelude::*;
use leptos_router::components::A;

pub fn component() -> impl IntoView {
    view! {
        <header class="flex items-center px-6 h-16 bg-white border-b border-gray-200">
            <h1 class="text-base font-semibold">
                <A href="/">"Library Management System"</A>
            </h1>
        </header>
    }
}
