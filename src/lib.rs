pub mod auth;
pub mod backend;
pub mod config;
pub mod model;
pub mod pages;
pub mod routes;
pub mod shell;
pub mod utils;
