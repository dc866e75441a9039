//! HTTP protocol layer module
//!
//! Response builders and cache validation shared by the handlers.

pub mod cache;
pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_standard_headers, build_404_response, build_405_response, build_413_response,
    build_500_response, build_health_response, build_options_response,
};
