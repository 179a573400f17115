pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod domain;
pub mod flatten;
pub mod services;
pub mod store;
