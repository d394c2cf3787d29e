use serde::{Deserialize, Serialize};

/// Shape discriminant for content items.
///
/// TEXT items carry an inline `content` body and no file; IMAGE and VIDEO
/// items carry a stored file and no inline body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Text,
    Image,
    Video,
}

impl ContentKind {
    pub fn is_text(&self) -> bool {
        matches!(self, ContentKind::Text)
    }

    pub fn is_media(&self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Video)
    }

    /// Check whether an uploaded MIME type agrees with this kind
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        match self {
            ContentKind::Text => false,
            ContentKind::Image => mime_type.starts_with("image/"),
            ContentKind::Video => mime_type.starts_with("video/"),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Text => write!(f, "TEXT"),
            ContentKind::Image => write!(f, "IMAGE"),
            ContentKind::Video => write!(f, "VIDEO"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(ContentKind::Text),
            "IMAGE" => Ok(ContentKind::Image),
            "VIDEO" => Ok(ContentKind::Video),
            _ => Err(format!("Invalid content kind: {}", s)),
        }
    }
}
