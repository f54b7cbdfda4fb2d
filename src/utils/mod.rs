use std::path::PathBuf;

pub fn sanitize_filename(filename: &str) -> String {
    // Remove or replace characters that are invalid in filenames
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            '/' | '\\' => '-',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Map a MIME type to a container extension. Unknown types keep the MIME
/// subtype so the host still has something to name the file with.
pub fn mimetype2ext(mime_type: &str) -> String {
    let essence = mime_type.split(';').next().unwrap_or(mime_type).trim();
    match essence {
        "video/mp4" => "mp4".to_string(),
        "video/webm" => "webm".to_string(),
        "video/x-matroska" => "mkv".to_string(),
        "audio/mp4" => "m4a".to_string(),
        "audio/webm" => "webm".to_string(),
        "audio/mpeg" => "mp3".to_string(),
        "text/vtt" => "vtt".to_string(),
        "application/json" => "json".to_string(),
        other => other.rsplit('/').next().unwrap_or("bin").to_string(),
    }
}

/// Parse an ISO-8601/RFC3339 timestamp into Unix epoch seconds.
pub fn parse_iso8601(value: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp())
}

pub fn generate_output_filename(template: &str, media: &crate::core::MediaInfo) -> PathBuf {
    let best_format = media
        .formats
        .iter()
        .max_by_key(|f| (f.container == "mp4", f.filesize.unwrap_or(0)));

    let ext = best_format.map(|f| f.container.as_str()).unwrap_or("mp4");

    // Simple template replacement
    let filename = template
        .replace("%(title)s", &sanitize_filename(&media.title))
        .replace("%(id)s", &media.id)
        .replace("%(ext)s", ext);

    PathBuf::from(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("hello/world"), "hello-world");
        assert_eq!(sanitize_filename("test<>file"), "test__file");
        assert_eq!(sanitize_filename("normal_file.mp4"), "normal_file.mp4");
    }

    #[test]
    fn test_mimetype2ext() {
        assert_eq!(mimetype2ext("video/mp4"), "mp4");
        assert_eq!(mimetype2ext("video/webm"), "webm");
        assert_eq!(mimetype2ext("audio/mp4"), "m4a");
        assert_eq!(mimetype2ext("video/mp4; codecs=\"avc1\""), "mp4");
        assert_eq!(mimetype2ext("application/x-mpegurl"), "x-mpegurl");
    }

    #[test]
    fn test_parse_iso8601() {
        assert_eq!(parse_iso8601("2021-05-06T20:34:55Z"), Some(1620333295));
        assert_eq!(parse_iso8601("2021-05-06T20:34:55.000Z"), Some(1620333295));
        assert_eq!(parse_iso8601("2021-05-06T22:34:55+02:00"), Some(1620333295));
        assert_eq!(parse_iso8601("yesterday"), None);
    }
}
