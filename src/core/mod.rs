pub mod downloader;
pub mod error;
pub mod extractor;
pub mod metadata;

pub use downloader::Downloader;
pub use error::ExtractError;
pub use extractor::{ExtractContext, ExtractResult, Extractor, ExtractorEngine};
pub use metadata::{
    Availability, Format, MediaInfo, Playlist, PlaylistEntry, Subtitle, LIVE_CHAT_LANG,
};
