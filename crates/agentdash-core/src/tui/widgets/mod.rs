//! TUI widgets.

mod detail;
mod header;
mod help;
mod popup;
mod quit_confirm;
mod summary;
mod table;

pub use detail::render_detail;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use summary::{SUMMARY_HEIGHT, render_summary};
pub use table::render_table;
