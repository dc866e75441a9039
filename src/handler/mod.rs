//! Request handler module
//!
//! Routes requests to the QR generator, health probes and the favicon.

mod favicon;
mod generate;
mod page;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
