//! CLI commands

pub mod auth_url;
pub mod init;
pub mod list;
pub mod show;
