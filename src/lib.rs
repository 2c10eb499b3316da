pub mod app;
pub mod config;
pub mod format;
pub mod models;
pub mod portfolio;
pub mod seed;
pub mod storage;
pub mod views;
