use std::sync::OnceLock;

use regex::Regex;
use url::Url;

const REDIRECT_MARKER: &str = "google.com/url?q=";

/// Returns the real target of a redirect-wrapper link, or `href` unchanged.
///
/// Exported documents wrap outbound links as
/// `https://www.google.com/url?q=<target>&sa=...`; the target is taken from
/// the decoded `q` query parameter.
pub fn unwrap_redirect(href: &str) -> String {
    if !href.contains(REDIRECT_MARKER) {
        return href.to_string();
    }
    Url::parse(href)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| href.to_string())
}

/// Extracts an 11-character video identifier from `watch?v=ID` or short `/ID` links.
pub fn video_id(url: &str) -> Option<String> {
    static VIDEO_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = VIDEO_REGEX
        .get_or_init(|| {
            Regex::new(
                r"(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})",
            )
            .ok()
        })
        .as_ref()?;

    regex
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
