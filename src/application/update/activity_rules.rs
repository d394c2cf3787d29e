//! Field eligibility rules for activity updates.
//!
//! Activities are admin-only upstream; the rules here therefore never gate
//! on the actor beyond stamping, but the first-activation stamp is
//! idempotent where the information publish stamp is not.

use chrono::{DateTime, Utc};

use super::{supplied_text, FieldChange, PublishStamp, UpdateError};
use crate::application::dto::{FileUpload, UpdateActivityRequest};
use crate::domain::authorization::ActorContext;
use crate::domain::entities::Activity;
use crate::domain::value_objects::CategoryId;

pub fn name_rule(payload: &UpdateActivityRequest) -> Option<FieldChange> {
    supplied_text(&payload.name).map(|n| FieldChange::Name(n.to_string()))
}

pub fn description_rule(payload: &UpdateActivityRequest) -> Option<FieldChange> {
    supplied_text(&payload.description).map(|d| FieldChange::Description(d.to_string()))
}

pub fn content_rule(payload: &UpdateActivityRequest, entity: &Activity) -> Option<FieldChange> {
    if !entity.kind().is_text() {
        return None;
    }
    supplied_text(&payload.content).map(|c| FieldChange::Content(c.to_string()))
}

pub fn category_rule(payload: &UpdateActivityRequest) -> Option<CategoryId> {
    payload.category_id
}

/// Activation toggle. First activation stamps the validation fields; an
/// already-stamped activity keeps its original stamp on re-activation.
pub fn active_rule(
    payload: &UpdateActivityRequest,
    entity: &Activity,
    actor: &ActorContext,
    now: DateTime<Utc>,
) -> Option<FieldChange> {
    let active = payload.is_active?;

    let stamp = if active && !entity.has_publish_stamp() {
        Some(PublishStamp::new(*actor.user_id(), now))
    } else {
        None
    };

    Some(FieldChange::Active { active, stamp })
}

pub fn file_rule<'a>(
    payload: &'a UpdateActivityRequest,
    entity: &Activity,
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
