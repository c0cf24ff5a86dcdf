pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod qibla;
pub mod ramadan;
pub mod repo;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
