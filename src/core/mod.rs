pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod parser;
