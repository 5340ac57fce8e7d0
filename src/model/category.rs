use std::fmt;

/// Coarse media type used as the prefix of every downloaded file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Video,
    Image,
    Audio,
    Text,
    Unknown,
}

impl Category {
    /// Extensions are matched as-is, so `MP4` is `Unknown`.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "mp4" | "mov" | "avi" => Category::Video,
            "jpg" | "png" | "jpeg" => Category::Image,
            "mp3" | "wav" => Category::Audio,
            "txt" | "docx" | "pdf" => Category::Text,
            _ => Category::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Video => "video",
            Category::Image => "image",
            Category::Audio => "audio",
            Category::Text => "text",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
