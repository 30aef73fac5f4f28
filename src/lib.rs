pub mod aggregate;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod output;
pub mod state;
pub mod variates;
