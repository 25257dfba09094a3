// ============================================================================
// Menu Infrastructure - PostgreSQL Node Store
// File: crates/menu-infrastructure/src/database/postgres/node_store_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use menu_core::domain::{MenuNode, MenuNodePatch};
use menu_core::error::DomainError;
use menu_core::repositories::NodeStore;

pub struct PgNodeStore {
    pool: PgPool,
}

impl PgNodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuNodeRow {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub depth: i32,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuNodeRow> for MenuNode {
    fn from(row: MenuNodeRow) -> Self {
        MenuNode {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            depth: row.depth,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Like `database_error`, but a foreign key violation on `parent_id` means the
/// parent was deleted after it was looked up.
fn write_error(context: &str, parent_id: Option<Uuid>) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        let fk_violation = e
            .as_database_error()
            .is_some_and(|db| db.is_foreign_key_violation());

        match parent_id {
            Some(parent_id) if fk_violation => {
                warn!("Parent menu {} vanished while {}", parent_id, context);
                DomainError::MenuNotFound(parent_id)
            }
            _ => database_error(context)(e),
        }
    }
}

#[async_trait]
impl NodeStore for PgNodeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT id, name, parent_id, depth, position, created_at, updated_at
            FROM menus
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("finding menu by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_parent(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError> {
        let query = match parent_id {
            Some(_) => sqlx::query_as::<_, MenuNodeRow>(
                r#"
                SELECT id, name, parent_id, depth, position, created_at, updated_at
                FROM menus
                WHERE parent_id = $1
                ORDER BY position ASC, created_at ASC, id ASC
                "#
            )
            .bind(parent_id),
            None => sqlx::query_as::<_, MenuNodeRow>(
                r#"
                SELECT id, name, parent_id, depth, position, created_at, updated_at
                FROM menus
                WHERE parent_id IS NULL
                ORDER BY position ASC, created_at ASC, id ASC
                "#
            ),
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("listing menus by parent"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError> {
        let rows: Vec<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT id, name, parent_id, depth, position, created_at, updated_at
            FROM menus
            ORDER BY depth ASC, position ASC, created_at ASC, id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("listing menus"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, node: MenuNode) -> Result<MenuNode, DomainError> {
        info!("Inserting menu: {}", node.name);

        let row: MenuNodeRow = sqlx::query_as(
            r#"
            INSERT INTO menus (id, name, parent_id, depth, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, parent_id, depth, position, created_at, updated_at
            "#
        )
        .bind(node.id)
        .bind(&node.name)
        .bind(node.parent_id)
        .bind(node.depth)
        .bind(node.position)
        .bind(node.created_at)
        .bind(node.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("inserting menu", node.parent_id))?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: MenuNodePatch) -> Result<Option<MenuNode>, DomainError> {
        let new_parent = patch.parent_id.flatten();
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            UPDATE menus
            SET
                name = COALESCE($2, name),
                parent_id = CASE WHEN $3 THEN $4 ELSE parent_id END,
                depth = COALESCE($5, depth),
                position = COALESCE($6, position),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, parent_id, depth, position, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.parent_id.is_some())
        .bind(new_parent)
        .bind(patch.depth)
        .bind(patch.position)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error("updating menu", new_parent))?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<bool, DomainError> {
        // Descendants go with it through ON DELETE CASCADE on parent_id.
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("deleting menu"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[test]
    fn test_row_maps_to_domain() {
        let parent = Uuid::new_v4();
        let now = Utc::now();
        let row = MenuNodeRow {
            id: Uuid::new_v4(),
            name: "Drinks".to_string(),
            parent_id: Some(parent),
            depth: 1,
            position: 4,
            created_at: now,
            updated_at: now,
        };
        let id = row.id;

        let node: MenuNode = row.into();
        assert_eq!(node.id, id);
        assert_eq!(node.parent_id, Some(parent));
        assert_eq!((node.depth, node.position), (1, 4));
        assert!(!node.is_root());
    }

    #[test]
    fn test_database_error_keeps_message() {
        let err = database_error("testing")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::DatabaseError(msg) if msg.contains("no rows")));
    }

    #[derive(Debug)]
    struct ConstraintError {
        foreign_key: bool,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("constraint violated")
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.foreign_key {
                ErrorKind::ForeignKeyViolation
            } else {
                ErrorKind::UniqueViolation
            }
        }
    }

    fn constraint_error(foreign_key: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { foreign_key }))
    }

    #[test]
    fn test_foreign_key_violation_is_missing_parent() {
        let parent = Uuid::new_v4();
        let err = write_error("inserting menu", Some(parent))(constraint_error(true));
        assert!(matches!(err, DomainError::MenuNotFound(id) if id == parent));
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let err = write_error("inserting menu", Some(Uuid::new_v4()))(constraint_error(false));
        assert!(matches!(err, DomainError::DatabaseError(_)));

        let err = write_error("updating menu", None)(constraint_error(true));
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
