use anyhow::Result;
use collab_dl::core::{
    Availability, Downloader, Extractor, ExtractorEngine, Format, MediaInfo, PlaylistEntry,
};
use collab_dl::extractors::collaborate::recording::parse_recording_url;
use collab_dl::extractors::{
    CourseExtractor, InstitutionExtractor, LaunchExtractor, RecordingExtractor, SessionsExtractor,
};
use std::path::PathBuf;
use url::Url;

#[tokio::test]
async fn test_extractor_engine_initialization() -> Result<()> {
    let mut engine = ExtractorEngine::new();
    collab_dl::register_all(&mut engine);

    assert_eq!(engine.extractors.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_recording_extractor_suitable() -> Result<()> {
    let extractor = RecordingExtractor::new();

    // Playback-load and short recording URLs, various regions
    assert!(extractor.suitable(&Url::parse(
        "https://us-lti.bbcollab.com/collab/ui/session/playback/load/0a633b6a88824deb8c918f470b22b256"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://eu.bbcollab.com/recording/f83be390ecff46c0bf7dccb9dddcf5f6"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://au.bbcollab.com/collab/ui/session/playback/load/2bccf7165d7c419ab87afc1ec3f3bb15"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://ca.bbcollab.com/collab/ui/session/playback/load/b6399dcb44df4f21b29ebe581e22479d?authToken=abc.def.ghi"
    )?));

    // Not ours
    assert!(!extractor.suitable(&Url::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ")?));
    assert!(!extractor.suitable(&Url::parse("https://eu.bbcollab.com/launch/aaa.bbb.ccc")?));
    assert!(!extractor.suitable(&Url::parse("https://example.com/recording/abc")?));

    Ok(())
}

#[tokio::test]
async fn test_recording_url_parsing() -> Result<()> {
    let url = Url::parse(
        "https://us-lti.bbcollab.com/collab/ui/session/playback/load/0a633b6a88824deb8c918f470b22b256?authToken=aaa.bbb.ccc",
    )?;
    let parts = parse_recording_url(&url).expect("should match");
    assert_eq!(parts.region, "us-lti");
    assert_eq!(parts.id, "0a633b6a88824deb8c918f470b22b256");
    assert_eq!(parts.token.as_deref(), Some("aaa.bbb.ccc"));

    let url = Url::parse("https://eu.bbcollab.com/recording/4bde2dee104f40289a10f8e554270600")?;
    let parts = parse_recording_url(&url).expect("should match");
    assert_eq!(parts.region, "eu");
    assert_eq!(parts.id, "4bde2dee104f40289a10f8e554270600");
    assert_eq!(parts.token, None);

    Ok(())
}

#[tokio::test]
async fn test_launch_extractor_suitable() -> Result<()> {
    let extractor = LaunchExtractor::new();

    assert!(extractor.suitable(&Url::parse(
        "https://eu.bbcollab.com/launch/eyJhbGciOiJIUzI1NiJ9.eyJjb250ZXh0IjoieCJ9.c2ln"
    )?));
    assert!(!extractor.suitable(&Url::parse(
        "https://eu.bbcollab.com/recording/4bde2dee104f40289a10f8e554270600"
    )?));

    Ok(())
}

#[tokio::test]
async fn test_sessions_extractor_suitable() -> Result<()> {
    let extractor = SessionsExtractor::new();

    assert!(extractor.suitable(&Url::parse(
        "https://us-lti.bbcollab.com/lti/scheduler?token=aaa.bbb.ccc"
    )?));
    // Token is required
    assert!(!extractor.suitable(&Url::parse("https://us-lti.bbcollab.com/lti/scheduler")?));
    assert!(!extractor.suitable(&Url::parse(
        "https://umb.umassonline.net/webapps/collab-ultra/tool/collabultra?course_id=_70544_1"
    )?));

    Ok(())
}

#[tokio::test]
async fn test_course_extractor_suitable() -> Result<()> {
    let extractor = CourseExtractor::new();

    assert!(extractor.suitable(&Url::parse(
        "https://umb.umassonline.net/webapps/collab-ultra/tool/collabultra?course_id=_70544_1"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://lms.mu.edu.sa/webapps/collab-ultra/tool/collabultra?course_id=_65252_1&mode=cpview"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://nestor.rug.nl/ultra/courses/_404619_1/cl/outline"
    )?));
    assert!(extractor.suitable(&Url::parse(
        "https://online.uwl.ac.uk/ultra/courses/_1445/outline"
    )?));
    assert!(!extractor.suitable(&Url::parse("https://nestor.rug.nl/ultra/institution-page")?));

    Ok(())
}

#[tokio::test]
async fn test_institution_extractor_suitable() -> Result<()> {
    let extractor = InstitutionExtractor::new();

    assert!(extractor.suitable(&Url::parse("https://umb.umassonline.net/ultra/institution-page")?));
    assert!(!extractor.suitable(&Url::parse(
        "https://umb.umassonline.net/ultra/courses/_70544_1/cl/outline"
    )?));

    Ok(())
}

#[tokio::test]
async fn test_engine_rejects_unknown_urls() -> Result<()> {
    let mut engine = ExtractorEngine::new();
    collab_dl::register_all(&mut engine);

    let result = engine.extract("https://vimeo.com/123456").await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("No suitable extractor"));

    Ok(())
}

#[tokio::test]
async fn test_format_selection_prefers_mp4() -> Result<()> {
    let downloader = Downloader::new(1);

    let formats = vec![
        Format {
            url: "https://example.com/recording.webm".to_string(),
            container: "webm".to_string(),
            filesize: Some(900_000_000),
            aspect_ratio: None,
        },
        Format {
            url: "https://example.com/recording.mp4".to_string(),
            container: "mp4".to_string(),
            filesize: Some(500_000_000),
            aspect_ratio: Some(1.778),
        },
    ];

    let best = downloader.select_best_format(&formats)?;
    assert_eq!(best.container, "mp4");

    assert!(downloader.select_best_format(&[]).is_err());

    Ok(())
}

#[tokio::test]
async fn test_media_info_construction() -> Result<()> {
    let media = MediaInfo {
        id: "0a633b6a88824deb8c918f470b22b256".to_string(),
        title: "HESI A2 Information Session".to_string(),
        duration: Some(1896),
        timestamp: Some(1620333295),
        formats: vec![],
        subtitles: std::collections::HashMap::new(),
    };

    assert_eq!(media.duration, Some(1896));
    assert_eq!(media.timestamp, Some(1620333295));

    Ok(())
}

#[tokio::test]
async fn test_playlist_entry_defaults() -> Result<()> {
    let entry = PlaylistEntry {
        id: "rec-1".to_string(),
        url: "https://eu.bbcollab.com/launch/a.b.c".to_string(),
        view_count: Some(12),
        duration: Some(880),
        availability: Some(Availability::NeedsAuth),
        filesize: None,
    };

    assert_eq!(entry.availability, Some(Availability::NeedsAuth));
    assert!(entry.filesize.is_none());

    Ok(())
}

#[tokio::test]
async fn test_filename_sanitization() -> Result<()> {
    use collab_dl::utils::sanitize_filename;

    let test_cases = vec![
        ("Hello World", "Hello World"),
        ("Hello/World", "Hello-World"),
        ("Meeting - Azerbaycanca erize formasi", "Meeting - Azerbaycanca erize formasi"),
        ("Hello|World", "Hello_World"),
        ("Hello?World", "Hello_World"),
        ("Hello:World", "Hello_World"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(sanitize_filename(input), expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_output_filename_generation() -> Result<()> {
    use collab_dl::utils::generate_output_filename;

    let media = MediaInfo {
        id: "c3e1e7c9e83d4cd9981c93c74888d496".to_string(),
        title: "International Ally User Group - recording_18".to_string(),
        duration: Some(3479),
        timestamp: Some(1721919621),
        formats: vec![Format {
            url: "https://example.com/recording.mp4".to_string(),
            container: "mp4".to_string(),
            filesize: Some(1000),
            aspect_ratio: None,
        }],
        subtitles: std::collections::HashMap::new(),
    };

    let filename = generate_output_filename("%(title)s.%(ext)s", &media);
    assert_eq!(
        filename,
        PathBuf::from("International Ally User Group - recording_18.mp4")
    );

    let filename = generate_output_filename("%(id)s.%(ext)s", &media);
    assert_eq!(filename, PathBuf::from("c3e1e7c9e83d4cd9981c93c74888d496.mp4"));

    Ok(())
}
