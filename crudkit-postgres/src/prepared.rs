use crate::{ValueHolder, postgres_type_to_value};
use crudkit_core::{AsValue, Error, Prepared, Result, truncate_long};
use std::fmt::{self, Debug, Display};
use tokio_postgres::Statement;

/// Statement prepared on the server. Each bound value is converted to the
/// parameter type the server inferred for its placeholder.
pub struct PostgresPrepared {
    pub(crate) statement: Statement,
    pub(crate) sql: String,
    pub(crate) index: u64,
    pub(crate) params: Vec<Option<ValueHolder>>,
}

impl PostgresPrepared {
    pub(crate) fn new(statement: Statement, sql: String) -> Self {
        let params = statement.params().iter().map(|_| None).collect();
        Self {
            statement,
            sql,
            index: 0,
            params,
        }
    }

    pub(crate) fn take_params(&mut self) -> Result<Vec<ValueHolder>> {
        self.params
            .iter_mut()
            .enumerate()
            .map(|(i, v)| {
                v.take()
                    .ok_or_else(|| Error::msg(format!("The parameter ${} was not set", i + 1)))
            })
            .collect()
    }
}

impl Prepared for PostgresPrepared {
    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        self.bind_index(value, self.index)
    }

    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let position = index as usize;
        let Some(ty) = self.statement.params().get(position) else {
            let error = Error::msg(format!(
                "Cannot bind parameter ${}, the query has {} parameters",
                position + 1,
                self.params.len()
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let value = value
            .as_value()
            .try_as(&postgres_type_to_value(ty))
            .map_err(|e| {
                let error = e.context(format!(
                    "While binding parameter ${} of type {}",
                    position + 1,
                    ty
                ));
                log::error!("{:#}", error);
                error
            })?;
        self.params[position] = Some(value.into());
        self.index = index + 1;
        Ok(self)
    }
}

impl Display for PostgresPrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

impl Debug for PostgresPrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresPrepared")
            .field("sql", &self.sql)
            .field("index", &self.index)
            .field("params", &self.params)
            .finish()
    }
}
