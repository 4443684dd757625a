mod catalog;
mod session_manager;
pub(crate) mod utils;
