use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::entities::Category;
use crate::domain::value_objects::CategoryId;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, is_active, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.name())
        .bind(category.is_active())
        .bind(category.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, is_active, created_at FROM categories WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_domain))
    }

    async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, is_active, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_domain).collect())
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: uuid::Uuid,
    name: String,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl CategoryRow {
    fn into_domain(self) -> Category {
        Category::reconstruct(
            CategoryId::from_uuid(self.id),
            self.name,
            self.is_active,
            self.created_at,
        )
    }
}
