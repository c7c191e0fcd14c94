pub mod config;
pub mod dataset;
pub mod network;
pub mod storage;
