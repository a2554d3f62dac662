//! Uptime - dashboard client for uptime-monitor REST APIs
//!
//! This library polls a monitor API for its health and monitor list, renders
//! the result to a terminal or an HTML page, and drives create, edit and
//! delete requests.

pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod monitor;
