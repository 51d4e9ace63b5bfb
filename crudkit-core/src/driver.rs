use crate::{Prepared, SqlWriter};

/// Backend description: statement handle type and SQL dialect.
pub trait Driver: Send + Sync {
    type Prepared: Prepared;
    type SqlWriter: SqlWriter;

    /// Scheme of the connection urls, `postgres` for `postgres://..`.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
