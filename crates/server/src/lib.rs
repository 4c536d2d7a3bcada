pub mod auth;
pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod eval;
pub mod routes;
