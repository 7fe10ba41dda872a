//! Page persistence for Pagewright.
//!
//! A finished [`Page`](pagewright_core::Page) is rendered into a standalone
//! Streamlit script and written under the pages directory. The
//! [`PageStore`] is an explicit value: a build takes it in and hands it
//! back, so there is no process-wide registry of pages.

pub mod render;
pub mod sanitize;
pub mod store;

pub use render::render_page;
pub use sanitize::{escape_string, page_stem, sanitize_function_name};
pub use store::{PageStatus, PageStore};
