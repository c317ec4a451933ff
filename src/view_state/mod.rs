//! View state handed from the view-models to the presentation layer.
//!
//! Everything here is read-only data: derived book views, display rows,
//! notices, and navigation routes. Screens render these without touching
//! the view-models' internals.

mod book_view;
mod notice;
mod route;

pub use book_view::{BookCounts, BookFilter, BookRow, DerivedView};
pub use notice::{Notice, NoticeKind};
pub use route::Route;
