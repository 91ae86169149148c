pub mod config;
pub mod errors;
pub mod files;
pub mod status;
pub mod sync;
