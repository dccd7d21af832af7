// Thin HTTP transport around the profile service

pub mod error;
pub mod routes;
pub mod server;

pub use error::{Error, Result};
pub use routes::AppState;
pub use server::LinkeyServer;
