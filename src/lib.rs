pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod mock_api;
pub mod model;
pub mod pagination;
pub mod shutdown;
pub mod store;

pub use error::{JobBoardError, Result};
pub use store::JobStore;
