use crudkit_core::{AsValue, Error, Prepared, Result, Value, truncate_long};
use rusqlite::types::Value as SqliteValue;
use std::fmt::{self, Display};
use time::{format_description::well_known::Rfc3339, macros::format_description};

/// Statement validated by Sqlite, with the parameters bound so far.
///
/// Values are converted when bound: Sqlite only stores integers, reals, text
/// and blobs, so the other types are written as text in the format that
/// [`crudkit_core::Parse`] reads back.
#[derive(Debug, Clone)]
pub struct SqlitePrepared {
    pub(crate) sql: String,
    pub(crate) params: Vec<SqliteValue>,
    pub(crate) index: u64,
}

impl SqlitePrepared {
    pub(crate) fn new(sql: String) -> Self {
        Self {
            sql,
            params: Vec::new(),
            index: 0,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl Prepared for SqlitePrepared {
    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        let index = self.index;
        self.bind_index(value, index)
    }

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let value = match sqlite_value(value.as_value()) {
            Ok(v) => v,
            Err(e) => {
                let error = e.context(format!(
                    "Cannot bind parameter {} to query:\n{}",
                    index + 1,
                    truncate_long!(self.sql)
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        let position = index as usize;
        if self.params.len() <= position {
            self.params.resize(position + 1, SqliteValue::Null);
        }
        self.params[position] = value;
        self.index = index + 1;
        Ok(self)
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

pub(crate) fn sqlite_value(value: Value) -> Result<SqliteValue> {
    if value.is_null() {
        return Ok(SqliteValue::Null);
    }
    Ok(match value {
        Value::Boolean(Some(v)) => SqliteValue::Integer(v as i64),
        Value::Int16(Some(v)) => SqliteValue::Integer(v as i64),
        Value::Int32(Some(v)) => SqliteValue::Integer(v as i64),
        Value::Int64(Some(v)) => SqliteValue::Integer(v),
        Value::Float32(Some(v)) => SqliteValue::Real(v as f64),
        Value::Float64(Some(v)) => SqliteValue::Real(v),
        Value::Decimal(Some(v)) => SqliteValue::Text(v.to_string()),
        Value::Varchar(Some(v)) => SqliteValue::Text(v),
        Value::Blob(Some(v)) => SqliteValue::Blob(v.into_vec()),
        Value::Date(Some(v)) => {
            SqliteValue::Text(v.format(format_description!("[year]-[month]-[day]"))?)
        }
        Value::Time(Some(v)) => SqliteValue::Text(
            v.format(format_description!("[hour]:[minute]:[second].[subsecond]"))?,
        ),
        Value::Timestamp(Some(v)) => SqliteValue::Text(v.format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"
        ))?),
        Value::TimestampWithTimezone(Some(v)) => SqliteValue::Text(v.format(&Rfc3339)?),
        Value::Uuid(Some(v)) => SqliteValue::Text(v.to_string()),
        Value::Json(Some(v)) => SqliteValue::Text(v.to_string()),
        _ => {
            return Err(Error::msg(format!(
                "Cannot use a {:?} as a sqlite parameter",
                value
            )));
        }
    })
}
