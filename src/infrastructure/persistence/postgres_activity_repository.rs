use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use crate::application::dto::ActivityFilter;
use crate::application::ports::{ActivityRepository, RepositoryError};
use crate::application::update::UpdateFieldSet;
use crate::domain::entities::Activity;
use crate::domain::value_objects::{CategoryId, ContentId, ContentKind, FileId, UserId};

use super::update_sql::push_field_changes;

const ACTIVITY_SELECT: &str = r#"
    SELECT id, name, description, kind, content, is_active, category_id,
           file_id, author_id, validated_by, validated_and_published_at,
           created_at, updated_at
    FROM activities
"#;

pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn insert(&self, activity: &Activity) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO activities (
                id, name, description, kind, content, is_active, category_id,
                file_id, author_id, validated_by, validated_and_published_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(activity.id().as_uuid())
        .bind(activity.name())
        .bind(activity.description())
        .bind(activity.kind().to_string())
        .bind(activity.content())
        .bind(activity.is_active())
        .bind(activity.category_id().as_uuid())
        .bind(activity.file_id().map(|f| *f.as_uuid()))
        .bind(activity.author_id().as_uuid())
        .bind(activity.validated_by().map(|v| *v.as_uuid()))
        .bind(activity.validated_and_published_at())
        .bind(activity.created_at())
        .bind(activity.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Activity>, RepositoryError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!("{} WHERE id = $1", ACTIVITY_SELECT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, RepositoryError> {
        let mut qb = QueryBuilder::new(ACTIVITY_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(category_id) = &filter.category_id {
            qb.push(" AND category_id = ").push_bind(*category_id.as_uuid());
        }
        if let Some(active) = filter.active {
            qb.push(" AND is_active = ").push_bind(active);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows: Vec<ActivityRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn update_fields(
        &self,
        id: &ContentId,
        fields: &UpdateFieldSet,
    ) -> Result<Option<Activity>, RepositoryError> {
        let mut qb = QueryBuilder::new("UPDATE activities SET updated_at = NOW()");
        push_field_changes(&mut qb, fields);
        qb.push(" WHERE id = ").push_bind(*id.as_uuid());
        qb.push(
            r#" RETURNING id, name, description, kind, content, is_active, category_id,
                file_id, author_id, validated_by, validated_and_published_at,
                created_at, updated_at"#,
        );

        let row: Option<ActivityRow> = qb.build_query_as().fetch_optional(&self.pool).await?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ContentId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: uuid::Uuid,
    name: String,
    description: String,
    kind: String,
    content: Option<String>,
    is_active: bool,
    category_id: uuid::Uuid,
    file_id: Option<uuid::Uuid>,
    author_id: uuid::Uuid,
    validated_by: Option<uuid::Uuid>,
    validated_and_published_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ActivityRow {
    fn into_domain(self) -> Result<Activity, RepositoryError> {
        let kind = self
            .kind
            .parse::<ContentKind>()
            .map_err(RepositoryError::SerializationError)?;

        Ok(Activity::reconstruct(
            ContentId::from_uuid(self.id),
            self.name,
            self.description,
            kind,
            self.content,
            self.is_active,
            CategoryId::from_uuid(self.category_id),
            self.file_id.map(FileId::from_uuid),
            UserId::from_uuid(self.author_id),
            self.validated_by.map(UserId::from_uuid),
            self.validated_and_published_at,
            self.created_at,
            self.updated_at,
        ))
    }
}
