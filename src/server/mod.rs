// Server module entry point
// Listener setup, connection handling, the accept loop and signals

pub mod connection;
pub mod listener;
pub mod serve;
pub mod signal;

// Re-export commonly used items
pub use listener::create_listener;
pub use signal::start_signal_handler;
