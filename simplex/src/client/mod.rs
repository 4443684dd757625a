//! Connection lifecycle: configuring, opening and closing a session.

mod session_config;
pub use session_config::{parse_compression, parse_consistency, SessionConfig};

pub mod session_manager;
pub use session_manager::{SessionManager, SessionState};
