pub mod config;
pub mod dashboard;
pub mod error;
pub mod middleware;
pub mod models;
pub mod object_id;
pub mod routes;
pub mod state;
pub mod store;
