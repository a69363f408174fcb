pub mod config;
pub mod http;
pub mod middleware;
pub mod openvoice;
pub mod repositories;
