pub mod app;
pub mod background_tasks;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_handler;
pub mod gmail_api;
pub mod permissions;
pub mod platform;
pub mod sms;
pub mod sources;
pub mod state;
pub mod terminal;
pub mod types;
pub mod ui;
