pub mod classifier;
pub mod cli;
pub mod collector;
pub mod config;
pub mod export;
pub mod global;
pub mod report;
pub mod sql;
pub mod trash;
pub mod zoom;
