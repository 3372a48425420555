/// SQLite implementation of the todo repository
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving todos. It handles all SQL queries and row conversion.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::domain::{PaginatedResult, Pagination, Todo, TodoFilter, TodoId, TodoStatus};
use crate::storage::{migrations, StorageError, TodoRepository};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, status, created_at, updated_at FROM todos";

/// SQLite-based todo repository
///
/// The connection sits behind a mutex so one repository can be shared
/// between tasks. Every operation takes the lock for its whole duration.
pub struct SqliteTodoRepository {
    conn: Mutex<Connection>,
}

impl SqliteTodoRepository {
    /// Open (or create) the database file and bring the schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let repository = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(repository)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        register_functions(&conn)?;
        migrations::initialize_database(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Database connection lock poisoned".to_string()))
    }

    /// Run a SELECT and convert every row into a todo
    fn query_todos(
        conn: &Connection,
        sql: &str,
        args: &[String],
    ) -> Result<Vec<Todo>, StorageError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), TodoRow::from_row)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?.into_todo()?);
        }
        Ok(todos)
    }

    fn count_with(conn: &Connection, filter: &TodoFilter) -> Result<u64, StorageError> {
        let (where_sql, args) = where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM todos{}", where_sql);
        let count: i64 = conn.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn find_all(
        &self,
        pagination: Pagination,
        filter: TodoFilter,
    ) -> Result<PaginatedResult<Todo>, StorageError> {
        let conn = self.conn()?;

        let total = Self::count_with(&conn, &filter)?;

        let (where_sql, args) = where_clause(&filter);
        let sql = format!(
            "{}{} ORDER BY created_at DESC, id DESC LIMIT {} OFFSET {}",
            SELECT_COLUMNS,
            where_sql,
            pagination.limit(),
            pagination.offset()
        );
        let todos = Self::query_todos(&conn, &sql, &args)?;

        Ok(PaginatedResult::new(todos, total, &pagination))
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StorageError> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);

        let row = conn
            .query_row(&sql, params![id.value()], TodoRow::from_row)
            .optional()?;

        row.map(TodoRow::into_todo).transpose()
    }

    async fn find_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StorageError> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE status = ?1 ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );
        Self::query_todos(&conn, &sql, &[status.as_str().to_string()])
    }

    async fn save(&self, todo: &Todo) -> Result<Todo, StorageError> {
        if let Some(id) = todo.id() {
            return Err(StorageError::AlreadyPersisted { id });
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO todos (title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                todo.title().value(),
                todo.description(),
                todo.status().as_str(),
                format_timestamp(todo.created_at()),
                format_timestamp(todo.updated_at()),
            ],
        )?;
        let id = TodoId(conn.last_insert_rowid());

        tracing::debug!("Created todo: {} ({})", todo.title(), id);

        Ok(Todo::reconstruct(
            id,
            todo.title().value().to_string(),
            todo.description().map(str::to_string),
            todo.status(),
            todo.created_at(),
            todo.updated_at(),
        ))
    }

    async fn update(&self, todo: &Todo) -> Result<Todo, StorageError> {
        let id = todo.id().ok_or(StorageError::Unpersisted)?;

        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "UPDATE todos SET
                title = ?2,
                description = ?3,
                status = ?4,
                updated_at = ?5
             WHERE id = ?1",
            params![
                id.value(),
                todo.title().value(),
                todo.description(),
                todo.status().as_str(),
                format_timestamp(todo.updated_at()),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::TodoNotFound { id });
        }

        tracing::debug!("Updated todo: {} ({})", todo.title(), id);
        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM todos WHERE id = ?1", params![id.value()])?;

        tracing::debug!("Deleted todo: {} ({} row(s))", id, rows_affected);
        Ok(())
    }

    async fn count(&self, filter: TodoFilter) -> Result<u64, StorageError> {
        let conn = self.conn()?;
        Self::count_with(&conn, &filter)
    }
}

/// Raw column values of one `todos` row
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TodoRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_todo(self) -> Result<Todo, StorageError> {
        let status: TodoStatus = self.status.parse().map_err(|_| {
            StorageError::CorruptRow(format!("todo {} has unknown status '{}'", self.id, self.status))
        })?;

        Ok(Todo::reconstruct(
            TodoId(self.id),
            self.title,
            self.description,
            status,
            parse_timestamp(self.id, &self.created_at)?,
            parse_timestamp(self.id, &self.updated_at)?,
        ))
    }
}

/// Build the WHERE part of a list query and its positional arguments
fn where_clause(filter: &TodoFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut args = Vec::new();

    if let Some(status) = filter.status {
        conditions.push("status = ?");
        args.push(status.as_str().to_string());
    }

    if let Some(term) = filter.search_term() {
        conditions.push("unicode_lower(title) LIKE ? ESCAPE '\\'");
        args.push(format!("%{}%", escape_like(&term.to_lowercase())));
    }

    if conditions.is_empty() {
        (String::new(), args)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), args)
    }
}

/// SQLite's own `lower()` and `LIKE` only fold ASCII letters
fn register_functions(conn: &Connection) -> Result<(), StorageError> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: String = ctx.get(0)?;
            Ok(value.to_lowercase())
        },
    )?;
    Ok(())
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Fixed-width so that text ordering matches time ordering
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(id: i64, value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StorageError::CorruptRow(format!("todo {} has invalid timestamp '{}'", id, value)))
}
