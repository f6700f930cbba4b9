pub mod config;
pub mod generation;
pub mod notifications;
pub mod server;
pub mod slack;
