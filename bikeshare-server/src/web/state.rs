//! Application state for the web layer.

use std::net::SocketAddr;

use crate::view::PublishedView;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Latest published station snapshot
    pub view: PublishedView,

    /// Address the server is listening on, echoed by the root endpoint
    pub listen_addr: SocketAddr,
}

impl AppState {
    /// Create a new app state.
    pub fn new(view: PublishedView, listen_addr: SocketAddr) -> Self {
        Self { view, listen_addr }
    }
}
