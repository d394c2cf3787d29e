//! Field eligibility rules for information updates.
//!
//! Each rule is a pure function over (payload, entity, actor); the update
//! use case applies them in order and owns the collaborator calls the rules
//! stage (category verification, blob storage).

use chrono::{DateTime, Utc};

use super::{supplied_text, FieldChange, PublishStamp, UpdateError};
use crate::application::dto::{FileUpload, UpdateInformationRequest};
use crate::domain::authorization::ActorContext;
use crate::domain::entities::Information;
use crate::domain::value_objects::CategoryId;

pub fn title_rule(payload: &UpdateInformationRequest) -> Option<FieldChange> {
    supplied_text(&payload.title).map(|t| FieldChange::Title(t.to_string()))
}

pub fn description_rule(payload: &UpdateInformationRequest) -> Option<FieldChange> {
    supplied_text(&payload.description).map(|d| FieldChange::Description(d.to_string()))
}

/// Inline body changes only apply to TEXT items; for media items a supplied
/// body is ignored, not an error.
pub fn content_rule(
    payload: &UpdateInformationRequest,
    entity: &Information,
) -> Option<FieldChange> {
    if !entity.kind().is_text() {
        return None;
    }
    supplied_text(&payload.content).map(|c| FieldChange::Content(c.to_string()))
}

/// Stages a category reassignment. Existence and active-flag verification is
/// the use case's job; a bad reference aborts the whole update there.
pub fn category_rule(payload: &UpdateInformationRequest) -> Option<CategoryId> {
    payload.category_id
}

/// Workflow transitions. Publishing is admin-only and always stamps the
/// validation fields; draft/pending moves carry no stamp.
pub fn status_rule(
    payload: &UpdateInformationRequest,
    actor: &ActorContext,
    now: DateTime<Utc>,
) -> Result<Option<FieldChange>, UpdateError> {
    let Some(status) = payload.status else {
        return Ok(None);
    };

    if status.is_published() {
        if !actor.is_admin() {
            return Err(UpdateError::AccessDenied);
        }
        return Ok(Some(FieldChange::Status {
            status,
            stamp: Some(PublishStamp::new(*actor.user_id(), now)),
        }));
    }

    Ok(Some(FieldChange::Status {
        status,
        stamp: None,
    }))
}

/// File replacement eligibility: the item must be a media kind and the
/// upload's MIME type must agree with it. TEXT items ignore uploads.
pub fn file_rule<'a>(
    payload: &'a UpdateInformationRequest,
    entity: &Information,
) -> Result<Option<&'a FileUpload>, UpdateError> {
    let Some(upload) = payload.file.as_ref() else {
        return Ok(None);
    };
    if !entity.kind().is_media() {
        return Ok(None);
    }
    if !entity.kind().accepts_mime(&upload.mime_type) {
        return Err(UpdateError::InvalidPayload(format!(
            "file type {} does not match {} content",
            upload.mime_type,
            entity.kind()
        )));
    }
    Ok(Some(upload))
}
