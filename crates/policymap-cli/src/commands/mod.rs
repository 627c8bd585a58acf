//! CLI command handlers

pub mod ask;
pub mod chunk;
pub mod concat;
pub mod config;
pub mod embed;
pub mod extract;
pub mod profile;
pub mod tag;
