// Library root: the draft engine plus its data sources, export, and config.

pub mod config;
pub mod draft;
pub mod export;
pub mod import;
pub mod preset;
