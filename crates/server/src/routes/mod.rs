pub mod analysis;
pub mod auth;
pub mod games;
pub mod health;
