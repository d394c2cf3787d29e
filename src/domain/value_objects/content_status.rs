use serde::{Deserialize, Serialize};

/// Publication workflow states for information items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    /// Being authored, visible only to the author
    Draft,
    /// Submitted for review
    Pending,
    /// Validated and publicly visible
    Published,
}

impl ContentStatus {
    pub fn is_published(&self) -> bool {
        matches!(self, ContentStatus::Published)
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentStatus::Draft => write!(f, "DRAFT"),
            ContentStatus::Pending => write!(f, "PENDING"),
            ContentStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ContentStatus::Draft),
            "PENDING" => Ok(ContentStatus::Pending),
            "PUBLISHED" => Ok(ContentStatus::Published),
            _ => Err(format!("Invalid content status: {}", s)),
        }
    }
}
