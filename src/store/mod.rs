//! Publishing rendered HTML into SQLite rows.
//!
//! Every update of a pass runs in one transaction: either all rows are
//! written or none are. An id that matches no row is not an error; it is
//! reported with zero affected rows.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::manifest::{DEFAULT_CONTENT_COLUMN, DEFAULT_KEY_COLUMN, DEFAULT_TABLE};

/// Which table and columns receive the HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetColumn {
    pub table: String,
    pub key_column: String,
    pub column: String,
}

impl TargetColumn {
    /// Create a target, rejecting names that are not plain SQL identifiers.
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        column: impl Into<String>,
    ) -> Result<Self> {
        let target = Self {
            table: table.into(),
            key_column: key_column.into(),
            column: column.into(),
        };
        for name in [&target.table, &target.key_column, &target.column] {
            validate_identifier(name)?;
        }
        Ok(target)
    }

    fn update_sql(&self) -> String {
        format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            self.table, self.column, self.key_column
        )
    }
}

impl Default for TargetColumn {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            column: DEFAULT_CONTENT_COLUMN.to_string(),
        }
    }
}

/// Names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is allowed.
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

/// What happened to one id → file pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file was read and the update statement ran
    Updated {
        id: i64,
        path: PathBuf,
        rows_affected: usize,
    },
    /// The HTML file does not exist
    Missing { id: i64, path: PathBuf },
}

impl UpdateOutcome {
    pub fn id(&self) -> i64 {
        match self {
            UpdateOutcome::Updated { id, .. } | UpdateOutcome::Missing { id, .. } => *id,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            UpdateOutcome::Updated { path, .. } | UpdateOutcome::Missing { path, .. } => path,
        }
    }
}

/// Outcomes of an update pass, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub outcomes: Vec<UpdateOutcome>,
}

impl UpdateReport {
    /// Number of entries whose file was found.
    pub fn updated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::Updated { .. }))
            .count()
    }

    pub fn missing_count(&self) -> usize {
        self.outcomes.len() - self.updated_count()
    }

    /// Total rows changed across the pass.
    pub fn rows_affected(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                UpdateOutcome::Updated { rows_affected, .. } => *rows_affected,
                UpdateOutcome::Missing { .. } => 0,
            })
            .sum()
    }
}

/// Copies file contents into rows keyed by id.
pub struct RowUpdater {
    conn: Connection,
    target: TargetColumn,
}

impl RowUpdater {
    /// Open the database at `path` with the default target column.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    /// Wrap an existing connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            target: TargetColumn::default(),
        }
    }

    /// Set the table and columns to update.
    pub fn with_target(mut self, target: TargetColumn) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> &TargetColumn {
        &self.target
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the updater, returning the connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Write each existing file into the row with its id, in one transaction.
    ///
    /// Missing files are skipped and reported. Any database or read error
    /// aborts the pass and rolls back every update made so far.
    pub fn update_all<I, P>(&mut self, entries: I) -> Result<UpdateReport>
    where
        I: IntoIterator<Item = (i64, P)>,
        P: AsRef<Path>,
    {
        let sql = self.target.update_sql();
        let tx = self.conn.transaction()?;
        let mut report = UpdateReport::default();

        {
            // Not prepared until a file exists: an all-missing pass must
            // succeed even without the target table.
            let mut stmt = None;
            for (id, path) in entries {
                let path = path.as_ref().to_path_buf();
                if !path.exists() {
                    log::warn!("File not found: {}", path.display());
                    report.outcomes.push(UpdateOutcome::Missing { id, path });
                    continue;
                }

                let content = fs::read_to_string(&path)?;
                let stmt = match &mut stmt {
                    Some(stmt) => stmt,
                    slot @ None => slot.insert(tx.prepare(&sql)?),
                };
                let rows_affected = stmt.execute(params![content, id])?;
                if rows_affected == 0 {
                    log::warn!(
                        "No row with {} = {} in {}",
                        self.target.key_column,
                        id,
                        self.target.table
                    );
                } else {
                    log::info!("Updated ID {}: {}", id, path.display());
                }
                report.outcomes.push(UpdateOutcome::Updated {
                    id,
                    path,
                    rows_affected,
                });
            }
        }

        tx.commit()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE resource_posts (id INTEGER PRIMARY KEY, title TEXT, content TEXT);
             INSERT INTO resource_posts (id, title, content) VALUES (10, 'a', 'old'), (11, 'b', 'old');",
        )
        .unwrap();
        conn
    }

    fn content_of(conn: &Connection, id: i64) -> String {
        conn.query_row(
            "SELECT content FROM resource_posts WHERE id = ?1",
            [id],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("resource_posts").is_ok());
        assert!(validate_identifier("_c1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1abc").is_err());
        assert!(validate_identifier("posts; DROP TABLE x").is_err());
        assert!(validate_identifier("a-b").is_err());
    }

    #[test]
    fn test_target_column_rejects_bad_names() {
        assert!(TargetColumn::new("posts", "id", "body").is_ok());
        assert!(matches!(
            TargetColumn::new("posts", "id", "body = 1 --"),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_update_sql() {
        let target = TargetColumn::default();
        assert_eq!(
            target.update_sql(),
            "UPDATE resource_posts SET content = ?1 WHERE id = ?2"
        );
    }

    #[test]
    fn test_update_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("a.html");
        fs::write(&html, "<p>new</p>").unwrap();

        let mut updater = RowUpdater::new(posts_db());
        let report = updater
            .update_all([(10, html.clone()), (11, dir.path().join("gone.html"))])
            .unwrap();

        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.outcomes[1].id(), 11);

        let conn = updater.into_connection();
        assert_eq!(content_of(&conn, 10), "<p>new</p>");
        assert_eq!(content_of(&conn, 11), "old");
    }

    #[test]
    fn test_unknown_id_updates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("a.html");
        fs::write(&html, "X").unwrap();

        let mut updater = RowUpdater::new(posts_db());
        let report = updater.update_all([(99, &html)]).unwrap();

        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.rows_affected(), 0);
    }

    #[test]
    fn test_all_missing_succeeds_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut updater = RowUpdater::open(dir.path().join("fresh.sqlite")).unwrap();

        let report = updater
            .update_all([(10, dir.path().join("gone.html"))])
            .unwrap();

        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.rows_affected(), 0);
    }

    #[test]
    fn test_failure_rolls_back_whole_pass() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("a.html");
        fs::write(&html, "new").unwrap();
        let not_utf8 = dir.path().join("b.html");
        fs::write(&not_utf8, [0xff, 0xfe, 0xfd]).unwrap();

        let mut updater = RowUpdater::new(posts_db());
        let result = updater.update_all([(10, html), (11, not_utf8)]);
        assert!(result.is_err());

        let conn = updater.into_connection();
        assert_eq!(content_of(&conn, 10), "old");
    }
}
