//! dextable - interactive record table library.
//!
//! This library provides the state core behind the `dextable` viewer:
//! - `store` - canonical record sequence and derived display sequence
//! - `view` - search filtering and stable sorting
//! - `layout` - resizable, reorderable column layout
//! - `form` - create/edit form buffers
//! - `controller` - gesture and action routing over all of the above
//! - `gateway` - backend abstraction with in-memory and JSON-file backends
//! - `tui` - terminal front-end

pub mod controller;
pub mod error;
pub mod form;
pub mod gateway;
pub mod layout;
pub mod record;
pub mod store;
pub mod tui;
pub mod view;

pub use controller::{InteractionController, ViewMode};
pub use error::StoreError;
pub use record::{ColumnKey, ListField, Record, RecordDraft, RecordId};
pub use store::RecordStore;
