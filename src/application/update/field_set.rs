use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CategoryId, ContentStatus, FileId, UserId};

/// Validation stamp written when an admin publishes an item or activates an
/// activity for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishStamp {
    pub validated_by: UserId,
    pub validated_and_published_at: DateTime<Utc>,
}

impl PublishStamp {
    pub fn new(validated_by: UserId, at: DateTime<Utc>) -> Self {
        Self {
            validated_by,
            validated_and_published_at: at,
        }
    }
}

/// One accepted change to a single persisted field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// Information title
    Title(String),
    /// Activity name
    Name(String),
    Description(String),
    /// Inline body; only staged for TEXT items
    Content(String),
    Category(CategoryId),
    /// Information workflow transition; `stamp` is set on publish
    Status {
        status: ContentStatus,
        stamp: Option<PublishStamp>,
    },
    /// Activity activation toggle; `stamp` is set on first activation only
    Active {
        active: bool,
        stamp: Option<PublishStamp>,
    },
    /// File replacement; the superseded id is kept for post-commit cleanup
    File {
        new_file: FileId,
        superseded: Option<FileId>,
    },
}

/// The minimal set of fields to persist for one update call.
///
/// Built incrementally by the eligibility rules; only ever holds changes
/// that passed their rule. An empty set is an error at commit time, never
/// a no-op write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFieldSet {
    changes: Vec<FieldChange>,
}

impl UpdateFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: FieldChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// The file id displaced by a staged file replacement, if any
    pub fn superseded_file(&self) -> Option<FileId> {
        self.changes.iter().find_map(|change| match change {
            FieldChange::File {
                superseded: Some(old),
                ..
            } => Some(*old),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_set() {
        let fields = UpdateFieldSet::new();
        assert!(fields.is_empty());
        assert_eq!(fields.len(), 0);
        assert!(fields.superseded_file().is_none());
    }

    #[test]
    fn test_superseded_file_lookup() {
        let old = FileId::new();
        let mut fields = UpdateFieldSet::new();
        fields.push(FieldChange::Title("New title".to_string()));
        fields.push(FieldChange::File {
            new_file: FileId::new(),
            superseded: Some(old),
        });

        assert_eq!(fields.superseded_file(), Some(old));
    }

    #[test]
    fn test_superseded_file_absent_when_no_prior_file() {
        let mut fields = UpdateFieldSet::new();
        fields.push(FieldChange::File {
            new_file: FileId::new(),
            superseded: None,
        });

        assert!(fields.superseded_file().is_none());
    }
}
