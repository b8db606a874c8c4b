use percent_encoding::percent_decode_str;
use tracing::warn;
use url::Url;

use crate::hls::HlsError;

/// Resolves a segment URI from a playlist into the absolute, unescaped form
/// used both as the dedup key and as the download URI.
///
/// Absolute URIs are taken as written; relative ones are joined onto the
/// playlist URL first. Returns `Ok(None)` for entries that should be skipped
/// (empty, or a relative URI that cannot be joined). A URI that cannot be
/// unescaped is an error.
pub fn resolve_segment_uri(playlist_url: &Url, raw: &str) -> Result<Option<String>, HlsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let is_absolute = Url::parse(raw).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
    if is_absolute {
        return unescape_uri(raw).map(Some);
    }

    match playlist_url.join(raw) {
        Ok(resolved) => unescape_uri(resolved.as_str()).map(Some),
        Err(e) => {
            warn!(uri = raw, base = %playlist_url, error = %e, "Failed to resolve segment URI, skipping");
            Ok(None)
        }
    }
}

/// Decodes `uri` the way a query string is decoded: `+` becomes a space and
/// `%XX` escapes are decoded. Fails on a `%` that is not followed by two hex
/// digits, or when the decoded bytes are not UTF-8.
pub fn unescape_uri(uri: &str) -> Result<String, HlsError> {
    let plus_decoded = uri.replace('+', " ");
    let bytes = plus_decoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(HlsError::Unescape {
                    uri: uri.to_string(),
                    reason: format!("invalid escape at byte {i}"),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(&plus_decoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| HlsError::Unescape {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
}
