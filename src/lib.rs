//! Content management for a media site: list, upload and delete videos,
//! music and blog posts held behind a single HTTP endpoint.

pub mod config;
pub mod media;
pub mod ui;
pub mod utils;
