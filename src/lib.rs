pub mod agent;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod resolver;
pub mod session;
pub mod uploader;
