pub mod api;
pub mod config;
pub mod extract;
pub mod fetcher;
pub mod storage;
