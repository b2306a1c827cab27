//! Data model shared by the HTTP layer and the page store.
//!
//! All wire/storage field naming lives here as serde renames so the rest of
//! the crate works with plain Rust names.

pub mod map_display;
pub mod page;
pub mod patch;

pub use map_display::MapDisplayConfig;
pub use page::{Coordinates, Page, PageContent, Popup, PopupLink};
pub use patch::{CoordinatesPatch, FieldSet, PagePatch, PopupPatch};
