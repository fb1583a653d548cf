use url::Url;

use crate::error::PlaylistError;

pub const DEFAULT_PLAYLIST_URL: &str =
    "https://open.spotify.com/embed/playlist/37i9dQZF1DX4sWSpwq3LiO?utm_source=generator";

/// Store key holding the last accepted embed URL
pub const PLAYLIST_KEY: &str = "playlist_url";

pub fn embed_url(id: &str) -> String {
    format!("https://open.spotify.com/embed/playlist/{id}?utm_source=generator")
}

/// Normalize a pasted playlist link into the canonical embed URL.
///
/// Accepts `https://…/playlist/<id>` links (any host, query ignored) and
/// `<scheme>:playlist:<id>` URIs.
pub fn normalize(input: &str) -> Result<String, PlaylistError> {
    let input = input.trim();
    let id = from_https_link(input)
        .or_else(|| from_uri(input))
        .ok_or(PlaylistError::Unrecognized)?;
    Ok(embed_url(&id))
}

fn from_https_link(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    if url.scheme() != "https" || url.host_str().is_none() {
        return None;
    }
    let mut segments = url.path_segments()?;
    segments.position(|s| s == "playlist")?;
    let id = segments.next()?;
    is_playlist_id(id).then(|| id.to_string())
}

fn from_uri(input: &str) -> Option<String> {
    let mut parts = input.split(':');
    let scheme = parts.next()?;
    let kind = parts.next()?;
    let id = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let scheme_ok = !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic());
    (scheme_ok && kind == "playlist" && is_playlist_id(id)).then(|| id.to_string())
}

fn is_playlist_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Current playlist embed, keeping the last good value on rejected input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    url: String,
}

impl Playlist {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validate and adopt `input`; returns the new embed URL
    pub fn update(&mut self, input: &str) -> Result<&str, PlaylistError> {
        self.url = normalize(input)?;
        Ok(&self.url)
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYLIST_URL)
    }
}
