use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

use crate::error::BackgroundError;

/// Largest accepted local upload
pub const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPreset {
    pub id: &'static str,
    pub url: &'static str,
}

pub const PRESETS: [BackgroundPreset; 6] = [
    BackgroundPreset {
        id: "lofi-room",
        url: "https://images.unsplash.com/photo-1618172193622-ae2d025f4032?q=80&w=1964&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "chill-cafe",
        url: "https://images.unsplash.com/photo-1559925393-8be0ec4767c8?q=80&w=1991&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "rainy-window",
        url: "https://images.unsplash.com/photo-1587736891536-beb1e48bb22b?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=2069",
    },
    BackgroundPreset {
        id: "night-train",
        url: "https://images.unsplash.com/photo-1598881298757-0724dc0f905a?ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&q=80&w=2073",
    },
    BackgroundPreset {
        id: "peaceful-lake",
        url: "https://images.unsplash.com/photo-1476231682828-37e571bc172f?q=80&w=1974&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "mountain-sunset",
        url: "https://images.unsplash.com/photo-1542281286-9e0a16bb7366?q=80&w=2070&auto=format&fit=crop",
    },
];

pub fn find_preset(id: &str) -> Option<&'static BackgroundPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Check a candidate upload's MIME type and size
pub fn check_upload(mime: &str, size: u64) -> Result<(), BackgroundError> {
    if !mime.starts_with("image/") {
        return Err(BackgroundError::NotAnImage);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(BackgroundError::TooLarge { size });
    }
    Ok(())
}

/// Validate a local file as a background image
pub fn validate_file(path: &Path) -> Result<(), BackgroundError> {
    let mime = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    // type first so a huge non-image reports the type problem
    if !mime.starts_with("image/") {
        return Err(BackgroundError::NotAnImage);
    }
    let size = std::fs::metadata(path)?.len();
    check_upload(mime, size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Preset(&'static BackgroundPreset),
    Url(String),
    /// A validated local image copied into a session-scoped temporary file
    Upload { name: String, path: PathBuf },
}

impl Background {
    /// Reference that a viewer (browser) can open
    pub fn reference(&self) -> String {
        match self {
            Background::Preset(p) => p.url.to_string(),
            Background::Url(u) => u.clone(),
            Background::Upload { path, .. } => Url::from_file_path(path)
                .map(String::from)
                .unwrap_or_else(|_| path.display().to_string()),
        }
    }

    /// Short label for the status line
    pub fn label(&self) -> String {
        match self {
            Background::Preset(p) => p.id.to_string(),
            Background::Url(u) => u.clone(),
            Background::Upload { name, .. } => name.clone(),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Preset(&PRESETS[0])
    }
}

/// Holds the current background and at most one temporary upload.
///
/// A superseded upload is deleted when its handle is dropped, which happens
/// exactly once: on replacement or when the slot itself goes away.
#[derive(Debug, Default)]
pub struct BackgroundSlot {
    current: Background,
    upload: Option<NamedTempFile>,
}

impl BackgroundSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Background {
        &self.current
    }

    pub fn select_preset(&mut self, preset: &'static BackgroundPreset) {
        self.replace(Background::Preset(preset), None);
    }

    /// Use a remote image URL; blank input is ignored
    pub fn select_url(&mut self, input: &str) -> bool {
        let url = input.trim();
        if url.is_empty() {
            return false;
        }
        self.replace(Background::Url(url.to_string()), None);
        true
    }

    /// Validate and copy a local image, then make it current
    pub fn select_file(&mut self, source: &Path) -> Result<(), BackgroundError> {
        validate_file(source)?;

        let suffix = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let mut upload = tempfile::Builder::new()
            .prefix("pomo-bg-")
            .suffix(&suffix)
            .tempfile()?;
        io::copy(&mut File::open(source)?, upload.as_file_mut())?;

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let background = Background::Upload {
            name,
            path: upload.path().to_path_buf(),
        };
        self.replace(background, Some(upload));
        Ok(())
    }

    /// Interpret free-form input: a preset id, an http(s) URL, or a local path
    pub fn choose(&mut self, input: &str) -> Result<(), BackgroundError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }
        if let Some(preset) = find_preset(input) {
            self.select_preset(preset);
            return Ok(());
        }
        if let Ok(url) = Url::parse(input) {
            if matches!(url.scheme(), "http" | "https") {
                self.select_url(input);
                return Ok(());
            }
            if url.scheme() == "file" {
                if let Ok(path) = url.to_file_path() {
                    return self.select_file(&path);
                }
            }
        }
        self.select_file(Path::new(input))
    }

    fn replace(&mut self, background: Background, upload: Option<NamedTempFile>) {
        if let Some(previous) = self.upload.take() {
            debug!(path = %previous.path().display(), "releasing previous background upload");
            drop(previous);
        }
        self.current = background;
        self.upload = upload;
    }
}
