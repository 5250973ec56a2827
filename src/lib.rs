pub mod config;
pub mod content;
pub mod controller;
pub mod logger;
pub mod paginator;
pub mod server;
pub mod view;
mod query_string;
mod test_data;
mod text_utils;
