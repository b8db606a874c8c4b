use clap::Parser;
use hlsgrab_engine::RecordMode;
use hlsgrab_engine::config::DEFAULT_USER_AGENT;
use std::path::PathBuf;

/// Define CLI arguments
#[derive(Parser, Debug)]
#[command(
    name = "hlsgrab",
    version,
    about = "HTTP Live Streaming (HLS) recorder",
    long_about = "Records a live HLS media playlist or a raw audio stream into a single file.\n\
                  \n\
                  Every segment published by the playlist is downloaded once and appended\n\
                  to the output in order. Raw audio streams (audio/mpeg, audio/aacp) are\n\
                  copied directly and re-probed when they drop."
)]
pub struct CliArgs {
    /// Media playlist or stream URL
    #[arg(value_parser = parse_http_url, help = "Media playlist or raw stream URL (must start with http)")]
    pub url: String,

    /// File the recording is appended to
    #[arg(help = "Output file; created if missing, appended to otherwise")]
    pub output: PathBuf,

    /// User-Agent sent with every request
    #[arg(
        long = "user-agent",
        visible_alias = "ua",
        default_value = DEFAULT_USER_AGENT,
        help = "User-Agent for HTTP requests"
    )]
    pub user_agent: String,

    /// Extra request headers
    #[arg(
        short = 'H',
        long = "header",
        help = "Add a request header ('Name: Value'). Can be repeated"
    )]
    pub headers: Vec<String>,

    /// Use wall-clock time for the recorded timeline
    #[arg(
        short = 'l',
        long = "local-time",
        help = "Measure the recorded duration with the local clock instead of segment durations"
    )]
    pub local_time: bool,

    /// Maximum recording duration with optional unit (s, m, h)
    #[arg(
        short = 't',
        long,
        default_value = "0",
        help = "Stop after recording this much (\"90s\", \"30m\", \"1.5h\"). Use 0 for unlimited"
    )]
    pub max_duration: String,

    #[arg(
        long,
        value_enum,
        default_value_t = RecordMode::Auto,
        help = "How to treat the URL: try a raw stream then a playlist, or force one"
    )]
    pub mode: RecordMode,

    /// Overall timeout in seconds
    #[arg(
        long,
        default_value = "0",
        help = "Overall timeout in seconds for HTTP requests (0 disables it)"
    )]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[arg(
        long,
        default_value = "0",
        help = "Connection timeout in seconds (0 disables it)"
    )]
    pub connect_timeout: u64,

    /// Buffer size for the download job channel
    #[arg(
        long,
        default_value = "1024",
        help = "Segment jobs buffered between the playlist monitor and the writer"
    )]
    pub channel_size: usize,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable detailed debug logging")]
    pub verbose: bool,

    /// Also write logs to a file
    #[arg(long, help = "Append logs to this file in addition to stderr")]
    pub log_file: Option<PathBuf>,
}

fn parse_http_url(value: &str) -> Result<String, String> {
    if value.starts_with("http") {
        Ok(value.to_string())
    } else {
        Err("Media playlist url must begin with http".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let args = CliArgs::try_parse_from(["hlsgrab", "http://example.com/live.m3u8", "out.aac"])
            .unwrap();
        assert_eq!(args.url, "http://example.com/live.m3u8");
        assert_eq!(args.output, PathBuf::from("out.aac"));
        assert_eq!(args.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(args.mode, RecordMode::Auto);
        assert!(!args.local_time);
        assert_eq!(args.max_duration, "0");
    }

    #[test]
    fn accepts_short_ua_alias() {
        let args = CliArgs::try_parse_from([
            "hlsgrab",
            "--ua",
            "radio/1.0",
            "-l",
            "-t",
            "30m",
            "-H",
            "Referer: https://example.com",
            "https://example.com/live.m3u8",
            "out.aac",
        ])
        .unwrap();
        assert_eq!(args.user_agent, "radio/1.0");
        assert!(args.local_time);
        assert_eq!(args.max_duration, "30m");
        assert_eq!(args.headers, vec!["Referer: https://example.com"]);
    }

    #[test]
    fn rejects_non_http_url() {
        let err = CliArgs::try_parse_from(["hlsgrab", "ftp://example.com/live.m3u8", "out.aac"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn requires_output() {
        assert!(CliArgs::try_parse_from(["hlsgrab", "http://example.com/live.m3u8"]).is_err());
    }
}
