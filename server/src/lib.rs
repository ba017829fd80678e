pub mod config;
pub mod controller;
pub mod error;
pub mod handler;
pub mod logging;
mod request;
mod response;
pub mod route;
