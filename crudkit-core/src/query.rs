use crate::{AsValue, Driver, Error, Prepared, Result, Value, truncate_long};
use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

/// Statement handed to an [`crate::Executor`]: plain SQL text, or a handle
/// prepared by the driver together with its arguments.
pub enum Query<D: Driver> {
    Raw(String),
    Prepared(D::Prepared),
}

impl<D: Driver> Query<D> {
    /// Append an argument, fails on raw queries.
    pub fn bind(&mut self, value: impl AsValue) -> Result<&mut Self> {
        match self {
            Query::Prepared(prepared) => {
                prepared.bind(value)?;
                Ok(self)
            }
            Query::Raw(..) => Err(Error::msg("Arguments can only be bound to prepared queries")),
        }
    }
}

impl<D: Driver> From<String> for Query<D> {
    fn from(value: String) -> Self {
        Query::Raw(value)
    }
}

impl<D: Driver> Display for Query<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Raw(sql) => write!(f, "{}", truncate_long!(sql)),
            Query::Prepared(prepared) => Display::fmt(prepared, f),
        }
    }
}

impl<D: Driver> Debug for Query<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Raw(sql) => f.debug_tuple("Raw").field(sql).finish(),
            Query::Prepared(prepared) => f
                .debug_tuple("Prepared")
                .field(&format_args!("{}", prepared))
                .finish(),
        }
    }
}

/// Outcome of a statement that modifies rows.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    pub rows_affected: u64,
    /// Rowid of the last insert, for the backends that report it.
    pub last_affected_id: Option<i64>,
}

/// Column names, shared by all the rows of a result.
pub type RowNames = Arc<[String]>;
/// Column values, in the order of [`RowNames`].
pub type Row = Box<[Value]>;

/// One result row. `labels` is empty when the backend cannot name the
/// columns, the values are then matched by position.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }

    pub fn unlabeled(values: Row) -> Self {
        Self::new(Arc::new([]), values)
    }

    pub fn names(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the column `name`, if the row has it.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        let index = self.labels.iter().position(|v| v == name)?;
        self.values.get(index)
    }
}

/// Item of the stream returned by [`crate::Executor::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Row(RowLabeled),
    Affected(RowsAffected),
}

/// Sums the counts, the last reported id wins.
impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for item in iter {
            self.rows_affected += item.rows_affected;
            self.last_affected_id = item.last_affected_id.or(self.last_affected_id);
        }
    }
}

impl From<RowLabeled> for QueryResult {
    fn from(value: RowLabeled) -> Self {
        QueryResult::Row(value)
    }
}

impl From<RowsAffected> for QueryResult {
    fn from(value: RowsAffected) -> Self {
        QueryResult::Affected(value)
    }
}
