// Playlist decoding seam: turns raw playlist bytes into the segment list the
// monitor works on. The grammar itself is left to m3u8-rs.

use std::time::Duration;

use m3u8_rs::{MediaPlaylist, parse_playlist_res};

use crate::hls::HlsError;

/// One entry of a decoded media playlist, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSegment {
    /// URI exactly as written in the playlist, possibly relative
    pub uri: String,
    pub duration: Duration,
}

/// The result of decoding one poll of a media playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSnapshot {
    pub segments: Vec<PlaylistSegment>,
    /// True once the playlist is finished and will never grow again
    pub closed: bool,
    /// How long to wait before polling again
    pub target_duration: Duration,
}

pub trait PlaylistDecoder: Send + Sync {
    /// Decodes raw playlist bytes. Anything other than a media playlist is an error.
    fn decode(&self, bytes: &[u8]) -> Result<PlaylistSnapshot, HlsError>;
}

/// [`PlaylistDecoder`] backed by `m3u8-rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct M3u8PlaylistDecoder;

impl PlaylistDecoder for M3u8PlaylistDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<PlaylistSnapshot, HlsError> {
        match parse_playlist_res(bytes) {
            Ok(m3u8_rs::Playlist::MediaPlaylist(pl)) => Ok(PlaylistSnapshot::from(pl)),
            Ok(m3u8_rs::Playlist::MasterPlaylist(_)) => Err(HlsError::NotMediaPlaylist),
            Err(e) => Err(HlsError::Decode(e.to_string())),
        }
    }
}

impl From<MediaPlaylist> for PlaylistSnapshot {
    fn from(playlist: MediaPlaylist) -> Self {
        let segments = playlist
            .segments
            .into_iter()
            .map(|s| PlaylistSegment {
                uri: s.uri,
                duration: Duration::try_from_secs_f32(s.duration).unwrap_or_default(),
            })
            .collect();
        Self {
            segments,
            closed: playlist.end_list,
            target_duration: Duration::from_secs(playlist.target_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:6
#EXT-X-MEDIA-SEQUENCE:100
#EXTINF:5.5,
seg100.aac
#EXTINF:6.0,
http://cdn.example.com/audio/seg101.aac
";

    #[test]
    fn decodes_live_media_playlist() {
        let snapshot = M3u8PlaylistDecoder.decode(LIVE.as_bytes()).unwrap();
        assert!(!snapshot.closed);
        assert_eq!(snapshot.target_duration, Duration::from_secs(6));
        assert_eq!(snapshot.segments.len(), 2);
        assert_eq!(snapshot.segments[0].uri, "seg100.aac");
        assert_eq!(snapshot.segments[0].duration, Duration::from_millis(5500));
        assert_eq!(
            snapshot.segments[1].uri,
            "http://cdn.example.com/audio/seg101.aac"
        );
    }

    #[test]
    fn endlist_marks_playlist_closed() {
        let vod = format!("{LIVE}#EXT-X-ENDLIST\n");
        let snapshot = M3u8PlaylistDecoder.decode(vod.as_bytes()).unwrap();
        assert!(snapshot.closed);
    }

    #[test]
    fn master_playlist_is_rejected() {
        let master = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=128000,CODECS=\"mp4a.40.2\"
audio/index.m3u8
";
        assert_eq!(
            M3u8PlaylistDecoder.decode(master.as_bytes()),
            Err(HlsError::NotMediaPlaylist)
        );
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = M3u8PlaylistDecoder
            .decode(b"<html>not found</html>")
            .unwrap_err();
        assert!(matches!(err, HlsError::Decode(_)));
    }
}
