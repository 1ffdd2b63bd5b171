/// SQLite persistence layer for canvas storage
///
/// Handles the four logical statements behind the canvas API: project
/// creation, project lookup/listing, object listing, and the full-replace
/// object save. Rows are read back column for column so responses can
/// return them verbatim.

use crate::canvas::types::{CanvasObject, ObjectPayload, Project};
use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};

/// SQLite-based canvas storage manager
///
/// Wraps a connection pool; each request borrows one pooled connection and
/// returns it on every exit path, including errors.
#[derive(Debug, Clone)]
pub struct CanvasStorage {
    /// SQLite connection pool for the canvas database
    pool: SqlitePool,
}

impl CanvasStorage {
    /// Create new storage instance around an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the canvas store at the given URL
    ///
    /// Creates the database file if missing and enforces foreign keys so an
    /// object row can never outlive its project.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Initialize the canvas storage schema
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS). Timestamps carry
    /// millisecond precision so `updated_at` ordering survives back-to-back
    /// saves.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS canvas_projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT 'Untitled Project',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS canvas_objects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL REFERENCES canvas_projects(id),
                object_id TEXT NOT NULL,
                type TEXT NOT NULL,
                x REAL NOT NULL,
                y REAL NOT NULL,
                width REAL,
                height REAL,
                text TEXT,
                color TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_canvas_objects_project ON canvas_objects(project_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new project row and return its store-generated id
    pub async fn create_project(&self, name: &str, description: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO canvas_projects (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Retrieve a project by id (absent is None, not an error)
    pub async fn get_project(&self, id: i64) -> Result<Option<Project>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM canvas_projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| project_from_row(&row)))
    }

    /// List all projects, most recently updated first
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM canvas_projects
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(project_from_row).collect())
    }

    /// List all objects of a project in insertion order
    ///
    /// The row id tiebreak matters: objects written in one save share a
    /// timestamp, and the contract promises they read back in given order.
    pub async fn list_objects(&self, project_id: i64) -> Result<Vec<CanvasObject>> {
        let rows = sqlx::query(
            r#"
            SELECT id, project_id, object_id, type, x, y, width, height, text, color, created_at
            FROM canvas_objects
            WHERE project_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(object_from_row).collect())
    }

    /// Replace the full object set of a project
    ///
    /// One transaction: delete every existing row, insert the supplied list
    /// in order, bump the project's `updated_at`. Commit makes the new set
    /// visible atomically; any failure before commit rolls the whole
    /// replace back when the transaction drops.
    pub async fn replace_objects(&self, project_id: i64, objects: &[ObjectPayload]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM canvas_objects WHERE project_id = ?")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        for object in objects {
            sqlx::query(
                r#"
                INSERT INTO canvas_objects
                    (project_id, object_id, type, x, y, width, height, text, color)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(project_id)
            .bind(&object.id)
            .bind(&object.object_type)
            .bind(object.x)
            .bind(object.y)
            .bind(object.width)
            .bind(object.height)
            .bind(&object.text)
            .bind(&object.color)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            UPDATE canvas_projects
            SET updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
            WHERE id = ?
            "#,
        )
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn object_from_row(row: &sqlx::sqlite::SqliteRow) -> CanvasObject {
    CanvasObject {
        id: row.get("id"),
        project_id: row.get("project_id"),
        object_id: row.get("object_id"),
        object_type: row.get("type"),
        x: row.get("x"),
        y: row.get("y"),
        width: row.get("width"),
        height: row.get("height"),
        text: row.get("text"),
        color: row.get("color"),
        created_at: row.get("created_at"),
    }
}
