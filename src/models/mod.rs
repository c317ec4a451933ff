//! Data model shared by the view-models and the backend seams.

mod book;
mod session;

pub use book::{
    parse_rating, rating_for_status, BookRecord, BookUpdate, Genre, NewBook, ReadingStatus,
    UnknownGenre, MAX_RATING, MIN_RATING,
};
pub use session::SessionUser;
