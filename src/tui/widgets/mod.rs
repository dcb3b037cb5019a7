//! TUI widgets for dextable.

mod cards;
mod confirm;
mod detail;
mod form;
mod header;
mod help;
mod popup;
mod table;

pub use cards::render_cards;
pub use confirm::{render_delete_confirm, render_quit_confirm};
pub use detail::render_detail;
pub use form::render_form;
pub use header::{render_header, render_status};
pub use help::render_help;
pub use table::render_table;
