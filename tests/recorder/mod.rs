#![allow(dead_code)]

use crudkit::{
    AsValue, Driver, Error, Executor, GenericSqlWriter, Prepared, Query, QueryResult, Result,
    RowLabeled, RowsAffected, Value,
    future::{self, Future},
    stream::{self, Stream},
};
use std::{
    collections::VecDeque,
    fmt::{self, Display},
    sync::Arc,
};

#[derive(Debug, Default)]
pub struct RecorderDriver;

impl Driver for RecorderDriver {
    type Prepared = RecordedStatement;
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "recorder";

    fn sql_writer(&self) -> GenericSqlWriter {
        GenericSqlWriter::new()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Prepared for RecordedStatement {
    fn bind<V: AsValue>(&mut self, value: V) -> Result<&mut Self> {
        self.params.push(value.as_value());
        Ok(self)
    }
    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self> {
        let index = index as usize;
        if self.params.len() <= index {
            self.params.resize(index + 1, Value::Null);
        }
        self.params[index] = value.as_value();
        Ok(self)
    }
}

impl Display for RecordedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Executor that stores every statement it receives and replies with canned
/// results.
#[derive(Debug, Default)]
pub struct Recorder {
    driver: RecorderDriver,
    /// Number of `prepare` calls.
    pub prepared: usize,
    /// Statements run, in order.
    pub calls: Vec<RecordedStatement>,
    /// One entry consumed per `run`, empty result when exhausted.
    pub responses: VecDeque<Vec<QueryResult>>,
    /// Make the next `run` fail with this message.
    pub fail: Option<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn respond(&mut self, results: impl IntoIterator<Item = QueryResult>) -> &mut Self {
        self.responses.push_back(results.into_iter().collect());
        self
    }

    /// Empty `labels` reply with an unlabeled row.
    pub fn respond_row(&mut self, labels: &[&str], values: Vec<Value>) -> &mut Self {
        let row = if labels.is_empty() {
            RowLabeled::unlabeled(values.into_boxed_slice())
        } else {
            let labels: Arc<[String]> = labels.iter().map(|v| v.to_string()).collect();
            RowLabeled::new(labels, values.into_boxed_slice())
        };
        self.respond([row.into()])
    }

    pub fn respond_affected(&mut self, rows_affected: u64) -> &mut Self {
        self.respond([RowsAffected {
            rows_affected,
            last_affected_id: None,
        }
        .into()])
    }

    /// True when nothing reached the executor.
    pub fn untouched(&self) -> bool {
        self.prepared == 0 && self.calls.is_empty()
    }
}

impl Executor for Recorder {
    type Driver = RecorderDriver;

    fn driver(&self) -> &Self::Driver {
        &self.driver
    }

    fn prepare(&mut self, query: String) -> impl Future<Output = Result<Query<RecorderDriver>>> + Send {
        self.prepared += 1;
        future::ready(Ok(Query::Prepared(RecordedStatement {
            sql: query,
            params: vec![],
        })))
    }

    fn run(&mut self, query: Query<RecorderDriver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.calls.push(match query {
            Query::Raw(sql) => RecordedStatement {
                sql,
                params: vec![],
            },
            Query::Prepared(prepared) => prepared,
        });
        let results: Vec<Result<QueryResult>> = match self.fail.take() {
            Some(message) => vec![Err(Error::msg(message))],
            None => self
                .responses
                .pop_front()
                .unwrap_or_default()
                .into_iter()
                .map(Ok)
                .collect(),
        };
        stream::iter(results)
    }
}
