pub mod urls;
pub mod http_client;
mod fetch_utils;
mod core;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
// Re-export core API functions
pub use core::*;
