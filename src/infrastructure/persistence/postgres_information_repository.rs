use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};

use crate::application::dto::InformationFilter;
use crate::application::ports::{InformationRepository, RepositoryError};
use crate::application::update::UpdateFieldSet;
use crate::domain::entities::Information;
use crate::domain::value_objects::{
    CategoryId, ContentId, ContentKind, ContentStatus, FileId, UserId,
};

use super::update_sql::push_field_changes;

const INFORMATION_SELECT: &str = r#"
    SELECT id, title, description, kind, content, status, category_id,
           file_id, author_id, validated_by, validated_and_published_at,
           created_at, updated_at
    FROM information
"#;

pub struct PostgresInformationRepository {
    pool: PgPool,
}

impl PostgresInformationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InformationRepository for PostgresInformationRepository {
    async fn insert(&self, item: &Information) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO information (
                id, title, description, kind, content, status, category_id,
                file_id, author_id, validated_by, validated_and_published_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.title())
        .bind(item.description())
        .bind(item.kind().to_string())
        .bind(item.content())
        .bind(item.status().to_string())
        .bind(item.category_id().as_uuid())
        .bind(item.file_id().map(|f| *f.as_uuid()))
        .bind(item.author_id().as_uuid())
        .bind(item.validated_by().map(|v| *v.as_uuid()))
        .bind(item.validated_and_published_at())
        .bind(item.created_at())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Information>, RepositoryError> {
        let row = sqlx::query_as::<_, InformationRow>(&format!(
            "{} WHERE id = $1",
            INFORMATION_SELECT
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, RepositoryError> {
        let mut qb = QueryBuilder::new(INFORMATION_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(category_id) = &filter.category_id {
            qb.push(" AND category_id = ").push_bind(*category_id.as_uuid());
        }
        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status.to_string());
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows: Vec<InformationRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn update_fields(
        &self,
        id: &ContentId,
        fields: &UpdateFieldSet,
    ) -> Result<Option<Information>, RepositoryError> {
        let mut qb = QueryBuilder::new("UPDATE information SET updated_at = NOW()");
        push_field_changes(&mut qb, fields);
        qb.push(" WHERE id = ").push_bind(*id.as_uuid());
        qb.push(
            r#" RETURNING id, title, description, kind, content, status, category_id,
                file_id, author_id, validated_by, validated_and_published_at,
                created_at, updated_at"#,
        );

        let row: Option<InformationRow> = qb.build_query_as().fetch_optional(&self.pool).await?;

        match row {
            Some(r) => Ok(Some(r.into_domain()?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ContentId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM information WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct InformationRow {
    id: uuid::Uuid,
    title: String,
    description: String,
    kind: String,
    content: Option<String>,
    status: String,
    category_id: uuid::Uuid,
    file_id: Option<uuid::Uuid>,
    author_id: uuid::Uuid,
    validated_by: Option<uuid::Uuid>,
    validated_and_published_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl InformationRow {
    fn into_domain(self) -> Result<Information, RepositoryError> {
        let kind = self
            .kind
            .parse::<ContentKind>()
            .map_err(RepositoryError::SerializationError)?;
        let status = self
            .status
            .parse::<ContentStatus>()
            .map_err(RepositoryError::SerializationError)?;

        Ok(Information::reconstruct(
            ContentId::from_uuid(self.id),
            self.title,
            self.description,
            kind,
            self.content,
            status,
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
