//! File Preview
//!
//! Chooses how the code browser displays a file, based only on its
//! extension, and loads what the viewer needs.

use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Text previews are cut off after this many bytes
pub const MAX_TEXT_PREVIEW_BYTES: usize = 2 * 1024 * 1024;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "rst", "log", "csv", "ini", "cfg", "conf", "toml", "yaml", "yml", "json", "xml",
    "html", "htm", "css", "scss", "js", "jsx", "ts", "tsx", "vue", "py", "rs", "go", "c", "h",
    "cc", "cpp", "hpp", "cs", "java", "kt", "swift", "m", "php", "rb", "lua", "sh", "bat", "ps1",
    "sql", "gradle", "properties",
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico"];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "aac", "m4a"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "webm", "wmv", "flv"];

/// Viewer chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Text,
    Image,
    Audio,
    Video,
    /// No viewer, metadata only
    Other,
}

/// Classify a path by its (case-insensitive) extension
pub fn classify(path: &Path) -> PreviewKind {
    let Some(ext) = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
    else {
        return PreviewKind::Other;
    };

    let ext = ext.as_str();
    if TEXT_EXTENSIONS.contains(&ext) {
        PreviewKind::Text
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        PreviewKind::Image
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        PreviewKind::Audio
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        PreviewKind::Video
    } else {
        PreviewKind::Other
    }
}

/// Facts shown for files without a viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    /// Not every filesystem records creation time
    pub created: Option<DateTime<Local>>,
}

impl FileMetadata {
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            size: meta.len(),
            created: meta.created().ok().map(DateTime::<Local>::from),
        })
    }

    /// Human-readable lines for the metadata panel
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Path", self.path.display().to_string()),
            ("Size", format_size(self.size)),
            (
                "Created",
                self.created
                    .map(|c| c.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
        ]
    }
}

/// Loaded preview content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Text {
        content: String,
        /// Content was cut at [`MAX_TEXT_PREVIEW_BYTES`]
        truncated: bool,
    },
    Image(PathBuf),
    Audio(PathBuf),
    Video(PathBuf),
    Metadata(FileMetadata),
    NotFound(PathBuf),
}

/// Read at most one byte past the preview cap
fn read_capped(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?
        .take(MAX_TEXT_PREVIEW_BYTES as u64 + 1)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Load the preview for `path`. Never fails: problems become `NotFound`.
pub fn load(path: &Path) -> Preview {
    if !path.is_file() {
        return Preview::NotFound(path.to_path_buf());
    }

    match classify(path) {
        PreviewKind::Text => match read_capped(path) {
            Ok(mut bytes) => {
                let truncated = bytes.len() > MAX_TEXT_PREVIEW_BYTES;
                bytes.truncate(MAX_TEXT_PREVIEW_BYTES);
                Preview::Text {
                    content: String::from_utf8_lossy(&bytes).into_owned(),
                    truncated,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Preview::NotFound(path.to_path_buf())
            }
        },
        PreviewKind::Image => Preview::Image(path.to_path_buf()),
        PreviewKind::Audio => Preview::Audio(path.to_path_buf()),
        PreviewKind::Video => Preview::Video(path.to_path_buf()),
        PreviewKind::Other => match FileMetadata::read(path) {
            Ok(meta) => Preview::Metadata(meta),
            Err(e) => {
                tracing::warn!("Failed to stat {}: {}", path.display(), e);
                Preview::NotFound(path.to_path_buf())
            }
        },
    }
}

/// Format a byte count with binary units
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify(Path::new("src/main.rs")), PreviewKind::Text);
        assert_eq!(classify(Path::new("README.MD")), PreviewKind::Text);
        assert_eq!(classify(Path::new("logo.PNG")), PreviewKind::Image);
        assert_eq!(classify(Path::new("intro.mp3")), PreviewKind::Audio);
        assert_eq!(classify(Path::new("demo.webm")), PreviewKind::Video);
        assert_eq!(classify(Path::new("manual.docx")), PreviewKind::Other);
        assert_eq!(classify(Path::new("Makefile")), PreviewKind::Other);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_load_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        std::fs::write(&path, "print('hi')\n").unwrap();

        assert_eq!(
            load(&path),
            Preview::Text {
                content: "print('hi')\n".to_string(),
                truncated: false
            }
        );
    }

    #[test]
    fn test_load_truncates_large_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.log");
        std::fs::write(&path, vec![b'x'; MAX_TEXT_PREVIEW_BYTES + 10]).unwrap();

        match load(&path) {
            Preview::Text { content, truncated } => {
                assert!(truncated);
                assert_eq!(content.len(), MAX_TEXT_PREVIEW_BYTES);
            }
            other => panic!("expected text preview, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_text_file_is_read_up_to_the_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.csv");
        // Sparse file, far larger than the cap
        File::create(&path).unwrap().set_len(1 << 32).unwrap();

        match read_capped(&path) {
            Ok(bytes) => assert_eq!(bytes.len(), MAX_TEXT_PREVIEW_BYTES + 1),
            Err(e) => panic!("read failed: {}", e),
        }
        match load(&path) {
            Preview::Text { content, truncated } => {
                assert!(truncated);
                assert_eq!(content.len(), MAX_TEXT_PREVIEW_BYTES);
            }
            other => panic!("expected text preview, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_extension_shows_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.bin");
        std::fs::write(&path, [0u8; 2048]).unwrap();

        match load(&path) {
            Preview::Metadata(meta) => {
                assert_eq!(meta.size, 2048);
                let rows = meta.describe();
                assert_eq!(rows[1], ("Size", "2.0 KB".to_string()));
            }
            other => panic!("expected metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.rs");
        assert_eq!(load(&path), Preview::NotFound(path.clone()));
    }
}
