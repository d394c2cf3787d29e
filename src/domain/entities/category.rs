use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{errors::DomainError, value_objects::CategoryId};

/// Category grouping content items. Inactive categories cannot receive new
/// or re-assigned content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        Ok(Self {
            id: CategoryId::new(),
            name,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    pub fn reconstruct(
        id: CategoryId,
        name: String,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            is_active,
            created_at,
        }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
