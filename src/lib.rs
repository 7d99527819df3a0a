pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod seed;
pub mod services;

#[cfg(test)]
pub mod testing;
