//! UI pieces shared by the pages.

pub mod error_template;
pub mod field;
pub mod header;
pub mod icons;
pub mod loader;
pub mod modal;
pub mod page;
pub mod sidebar;
pub mod toast;
