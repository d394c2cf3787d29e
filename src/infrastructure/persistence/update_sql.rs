use sqlx::{Postgres, QueryBuilder};

use crate::application::update::{FieldChange, UpdateFieldSet};

/// Append `SET` fragments for every staged change, bound parameters only.
///
/// Shared by the information and activity repositories; the two tables use
/// the same column names apart from title/name.
pub(crate) fn push_field_changes(qb: &mut QueryBuilder<'_, Postgres>, fields: &UpdateFieldSet) {
    for change in fields.changes() {
        match change {
            FieldChange::Title(title) => {
                qb.push(", title = ").push_bind(title.clone());
            }
            FieldChange::Name(name) => {
                qb.push(", name = ").push_bind(name.clone());
            }
            FieldChange::Description(description) => {
                qb.push(", description = ").push_bind(description.clone());
            }
            FieldChange::Content(content) => {
                qb.push(", content = ").push_bind(content.clone());
            }
            FieldChange::Category(category_id) => {
                qb.push(", category_id = ").push_bind(*category_id.as_uuid());
            }
            FieldChange::Status { status, stamp } => {
                qb.push(", status = ").push_bind(status.to_string());
                if let Some(stamp) = stamp {
                    qb.push(", validated_by = ")
                        .push_bind(*stamp.validated_by.as_uuid());
                    qb.push(", validated_and_published_at = ")
                        .push_bind(stamp.validated_and_published_at);
                }
            }
            FieldChange::Active { active, stamp } => {
                qb.push(", is_active = ").push_bind(*active);
                if let Some(stamp) = stamp {
                    qb.push(", validated_by = ")
                        .push_bind(*stamp.validated_by.as_uuid());
                    qb.push(", validated_and_published_at = ")
                        .push_bind(stamp.validated_and_published_at);
                }
            }
            FieldChange::File { new_file, .. } => {
                qb.push(", file_id = ").push_bind(*new_file.as_uuid());
            }
        }
    }
}
