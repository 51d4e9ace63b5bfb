use crate::{EntitySchema, Value, separated_by, truncate_long};
use std::fmt::{self, Display, Write};

/// Dialect printer of the four statements.
///
/// Every method has a default implementation producing positional `$n`
/// placeholders and double quoted column identifiers. Table names and the
/// primary key column are written verbatim.
pub trait SqlWriter: Send + Sync {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', r#""""#);
        out.push('"');
    }

    fn write_table_name(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str(&schema.table_name);
    }

    fn write_primary_key(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str(&schema.primary_key.column_name);
    }

    /// Placeholder of the parameter at `index` (starting from 1).
    fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = write!(out, "${}", index);
    }

    fn write_insert(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str("INSERT INTO ");
        self.write_table_name(out, schema);
        if schema.fields.is_empty() {
            out.push_str(" DEFAULT VALUES");
        } else {
            out.push_str(" (");
            separated_by(
                out,
                schema.columns(),
                |out, v| self.write_identifier_quoted(out, v),
                ", ",
            );
            out.push_str(") VALUES (");
            separated_by(
                out,
                1..=schema.fields.len(),
                |out, i| self.write_placeholder(out, i),
                ", ",
            );
            out.push(')');
        }
        out.push_str(" RETURNING ");
        self.write_primary_key(out, schema);
    }

    fn write_select_by_key(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str("SELECT * FROM ");
        self.write_table_name(out, schema);
        self.write_where_key(out, schema, 1);
    }

    fn write_update_by_key(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str("UPDATE ");
        self.write_table_name(out, schema);
        out.push_str(" SET ");
        separated_by(
            out,
            schema.columns().enumerate(),
            |out, (i, v)| {
                self.write_identifier_quoted(out, v);
                out.push_str(" = ");
                self.write_placeholder(out, i + 1);
            },
            ", ",
        );
        self.write_where_key(out, schema, schema.fields.len() + 1);
    }

    fn write_delete_by_key(&self, out: &mut String, schema: &EntitySchema) {
        out.push_str("DELETE FROM ");
        self.write_table_name(out, schema);
        self.write_where_key(out, schema, 1);
    }

    fn write_where_key(&self, out: &mut String, schema: &EntitySchema, index: usize) {
        out.push_str(" WHERE ");
        self.write_primary_key(out, schema);
        out.push_str(" = ");
        self.write_placeholder(out, index);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}

/// SQL text paired with its ordered arguments.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))?;
        if !self.params.is_empty() {
            f.write_str(" [")?;
            for (i, v) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", v)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
