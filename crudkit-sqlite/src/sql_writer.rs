use crudkit_core::SqlWriter;
use std::fmt::Write;

/// Sqlite dialect: numbered `?n` placeholders, because `$n` would be bound in
/// order of appearance.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = write!(out, "?{}", index);
    }
}
