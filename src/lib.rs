pub mod alternatives;
pub mod analysis;
pub mod api_connection;
pub mod chat;
pub mod cli;
pub mod config;
pub mod health;
pub mod i18n;
pub mod logging;
pub mod nutrition;
pub mod profile;
pub mod prompts;
pub mod report;
pub mod response_parser;
