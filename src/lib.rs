// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod quiz;
pub mod repository;
pub mod routes;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_router;
