//! Terminal user interface for dextable.
//!
//! Renders the record collection as cards or as a table with a resizable,
//! reorderable header, and routes keyboard and mouse input to the
//! interaction controller.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::UiState;
