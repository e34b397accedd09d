//! CLI library components for the screener terminal.

pub mod logging;
pub mod session;
