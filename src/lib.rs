pub mod board;
pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod error;
pub mod portfolio;
pub mod session;
