//! Web layer for the station availability API.
//!
//! Serves the published snapshot over HTTP. Handlers only read the
//! [`PublishedView`](crate::view::PublishedView); they never touch the
//! upstream feeds.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
