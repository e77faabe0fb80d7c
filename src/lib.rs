pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod input;
pub mod model;
pub mod snapshot;
pub mod ui;
