pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod utils;

pub use crate::core::{
    Downloader, ExtractContext, ExtractResult, ExtractorEngine, Format, MediaInfo, Playlist,
    PlaylistEntry,
};
pub use crate::extractors::register_all;
