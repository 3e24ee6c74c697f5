pub mod app;
pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod logging;
pub mod search;
pub mod session;
pub mod ui;
