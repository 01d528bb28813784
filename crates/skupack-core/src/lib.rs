pub mod config;
pub mod logging;

pub mod archive;
pub mod catalog;
pub mod compose;
pub mod drive_url;
pub mod http;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod retry;
