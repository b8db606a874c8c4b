use reqwest::header::{CONTENT_TYPE, HeaderMap};

/// Content types that mark a response body as a raw audio elementary stream
/// rather than a playlist document.
pub const AUDIO_STREAM_MIME_TYPES: &[&str] = &["audio/aacp", "audio/mpeg"];

/// Returns true when any `Content-Type` header value, lower-cased, is exactly
/// one of [`AUDIO_STREAM_MIME_TYPES`]. Header names are case-insensitive in
/// `HeaderMap` already.
pub fn is_audio_stream(headers: &HeaderMap) -> bool {
    headers.get_all(CONTENT_TYPE).iter().any(|value| {
        value
            .to_str()
            .map(|v| {
                let v = v.to_ascii_lowercase();
                AUDIO_STREAM_MIME_TYPES.contains(&v.as_str())
            })
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn recognizes_audio_stream_types() {
        assert!(is_audio_stream(&headers(&[("content-type", "audio/mpeg")])));
        assert!(is_audio_stream(&headers(&[("Content-Type", "audio/aacp")])));
        assert!(is_audio_stream(&headers(&[("CONTENT-TYPE", "Audio/MPEG")])));
    }

    #[test]
    fn playlist_types_are_not_streams() {
        assert!(!is_audio_stream(&headers(&[(
            "content-type",
            "application/vnd.apple.mpegurl"
        )])));
        assert!(!is_audio_stream(&headers(&[("content-type", "audio/x-mpegurl")])));
        assert!(!is_audio_stream(&HeaderMap::new()));
    }

    #[test]
    fn match_is_exact() {
        assert!(!is_audio_stream(&headers(&[(
            "content-type",
            "audio/mpeg; charset=binary"
        )])));
        assert!(!is_audio_stream(&headers(&[("x-content-type", "audio/mpeg")])));
    }

    #[test]
    fn any_of_several_values_matches() {
        assert!(is_audio_stream(&headers(&[
            ("content-type", "text/plain"),
            ("content-type", "audio/aacp"),
        ])));
    }
}
