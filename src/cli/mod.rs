use crate::config::Config;
use crate::core::{Downloader, ExtractResult, ExtractorEngine, MediaInfo, Playlist};
use crate::extractors;
use crate::utils::generate_output_filename;
use anyhow::Result;
use clap::Parser;
use std::collections::VecDeque;
use std::path::PathBuf;

// Resolution chain depth is fixed: institution → course → sessions → launch
// → recording.
const MAX_RESOLVE_DEPTH: usize = 5;

#[derive(Parser)]
#[command(name = "collab-dl")]
#[command(about = "Download Blackboard Collaborate recordings and course playlists")]
#[command(version)]
pub struct Cli {
    /// URL to download
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Output filename template
    #[arg(short = 't', long)]
    pub output_template: Option<String>,

    /// List playlist entries without resolving them
    #[arg(long)]
    pub flat_playlist: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of concurrent downloads
    #[arg(short = 'j', long)]
    pub concurrent: Option<usize>,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        if self.verbose {
            println!("Verbose mode enabled");
        }

        let config = Config::load()?;
        let concurrent = self.concurrent.unwrap_or(config.concurrent_downloads);

        println!("Resolving: {}", self.url);
        println!("Output directory: {}", self.output);

        let mut engine = ExtractorEngine::new();
        extractors::register_all(&mut engine);

        let downloader = Downloader::new(concurrent);
        let template = self
            .output_template
            .as_deref()
            .unwrap_or("%(title)s.%(ext)s");

        // Entries are deferred URL pointers; resolve them breadth-first and
        // serially, bounded by the fixed chain depth.
        let mut queue = VecDeque::from([(self.url.clone(), 0usize)]);

        while let Some((url, depth)) = queue.pop_front() {
            if depth > MAX_RESOLVE_DEPTH {
                anyhow::bail!("Resolution chain too deep at {}", url);
            }

            match engine.extract(&url).await? {
                ExtractResult::Media(media) => {
                    self.download_media(&downloader, &media, template).await?;
                }
                ExtractResult::Playlist(playlist) => {
                    self.print_playlist(&playlist);
                    if !self.flat_playlist {
                        for entry in &playlist.entries {
                            queue.push_back((entry.url.clone(), depth + 1));
                        }
                    }
                }
            }
        }

        println!("Done");
        Ok(())
    }

    async fn download_media(
        &self,
        downloader: &Downloader,
        media: &MediaInfo,
        template: &str,
    ) -> Result<()> {
        println!("Title: {}", media.title);
        if let Some(duration) = media.duration {
            println!("Duration: {}s", duration);
        }
        println!("Available formats: {}", media.formats.len());
        for (i, format) in media.formats.iter().enumerate().take(5) {
            println!(
                "  {}: {} ({} bytes)",
                i + 1,
                format.container,
                format
                    .filesize
                    .map_or("unknown".to_string(), |s| s.to_string())
            );
        }
        if !media.subtitles.is_empty() {
            let mut langs: Vec<&String> = media.subtitles.keys().collect();
            langs.sort();
            println!(
                "Subtitles: {}",
                langs.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
            );
        }

        let filename = generate_output_filename(template, media);
        let output_path = PathBuf::from(&self.output).join(filename);

        println!("Output file: {}", output_path.display());
        downloader.download(media, output_path).await
    }

    fn print_playlist(&self, playlist: &Playlist) {
        println!(
            "Playlist: {} ({} entries)",
            playlist.title.as_deref().unwrap_or(&playlist.id),
            playlist.entries.len()
        );
        for entry in &playlist.entries {
            println!("  {} -> {}", entry.id, entry.url);
        }
    }
}
