//! Error handling for the bookshelf core.
//!
//! Every provider failure is caught where the call is made and converted
//! into one of five kinds:
//!
//! | Kind | Raised by | Category |
//! |------|-----------|----------|
//! | [`AuthError`] | sign-in, sign-up, sign-out, missing session | Auth |
//! | [`SubscriptionError`] | live book query | Network |
//! | [`PersistenceError`] | create, update, delete | Server |
//! | [`ValidationError`] | draft checks before any remote call | User |
//! | [`NotFoundError`] | edit opened without a book | User |
//!
//! [`ShelfError`] unifies them. Each kind exposes `user_message()` for the
//! notice shown to the user and `error_code()` for logs.

mod auth;
mod category;
mod not_found;
mod persistence;
mod result;
mod shelf_error;
mod subscription;
mod validation;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use not_found::NotFoundError;
pub use persistence::{PersistenceError, WriteOp};
pub use result::{ResultExt, ShelfResult};
pub use shelf_error::ShelfError;
pub use subscription::SubscriptionError;
pub use validation::ValidationError;
