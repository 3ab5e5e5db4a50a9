//! WASM entry point: hydrates the server-rendered dashboard and routes browser
//! logs and panics to the developer console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Installs console logging and the panic hook, then hydrates `app::component`.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(component);
}

#[cfg(test)]
mod tests {
    #[test]
    /// A second initialisation may return `Err`; it must not panic.
    fn test_console_log_initialization() {
        let _ = console_log::init_with_level(log::Level::Debug);
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}
