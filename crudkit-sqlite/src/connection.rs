use crate::{SqliteDriver, SqlitePrepared, extract::extract_value};
use async_stream::try_stream;
use crudkit_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, Row, RowLabeled,
    RowNames, RowsAffected, stream::Stream, truncate_long,
};
use rusqlite::{Batch, OpenFlags, types::Value as SqliteValue};
use std::{
    borrow::Cow,
    sync::{Arc, Mutex, MutexGuard},
};
use tokio::task::spawn_blocking;

/// Session on a Sqlite database. The statements run on the blocking thread
/// pool, one at a time.
#[derive(Debug, Clone)]
pub struct SqliteConnection {
    pub(crate) connection: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteConnection {
    pub fn new(connection: rusqlite::Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
        }
    }
}

fn lock(connection: &Mutex<rusqlite::Connection>) -> Result<MutexGuard<'_, rusqlite::Connection>> {
    connection
        .lock()
        .map_err(|_| Error::msg("The sqlite connection was poisoned by a panic"))
}

fn run_statement(
    connection: &rusqlite::Connection,
    statement: &mut rusqlite::Statement<'_>,
    params: &[SqliteValue],
    results: &mut Vec<QueryResult>,
) -> Result<()> {
    for (i, value) in params.iter().enumerate() {
        statement.raw_bind_parameter(i + 1, value)?;
    }
    let count = statement.column_count();
    if count == 0 {
        let rows_affected = statement.raw_execute()?;
        results.push(
            RowsAffected {
                rows_affected: rows_affected as u64,
                last_affected_id: Some(connection.last_insert_rowid()),
            }
            .into(),
        );
        return Ok(());
    }
    let labels: RowNames = statement
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let mut rows = statement.raw_query();
    while let Some(row) = rows.next()? {
        let values = (0..count)
            .map(|i| extract_value(row.get_ref(i)?))
            .collect::<Result<Row>>()?;
        results.push(RowLabeled::new(labels.clone(), values).into());
    }
    Ok(())
}

fn run_blocking(
    connection: &rusqlite::Connection,
    query: Query<SqliteDriver>,
) -> Result<Vec<QueryResult>> {
    let mut results = Vec::new();
    match query {
        Query::Raw(sql) => {
            let mut batch = Batch::new(connection, &sql);
            while let Some(mut statement) = batch.next()? {
                run_statement(connection, &mut statement, &[], &mut results)?;
            }
        }
        Query::Prepared(prepared) => {
            let mut statement = connection.prepare_cached(&prepared.sql)?;
            run_statement(connection, &mut statement, &prepared.params, &mut results)?;
        }
    }
    Ok(results)
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &Self::Driver {
        &SqliteDriver {}
    }

    async fn prepare(&mut self, query: String) -> Result<Query<Self::Driver>> {
        let connection = self.connection.clone();
        let context = format!("While preparing the query:\n{}", truncate_long!(query));
        let result = spawn_blocking(move || {
            let connection = lock(&connection)?;
            connection.prepare_cached(&query)?;
            Ok::<_, Error>(query)
        })
        .await?;
        match result {
            Ok(sql) => Ok(Query::Prepared(SqlitePrepared::new(sql))),
            Err(e) => {
                let error = e.context(context);
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn run(&mut self, query: Query<Self::Driver>) -> impl Stream<Item = Result<QueryResult>> + Send {
        let connection = self.connection.clone();
        try_stream! {
            let context = format!("While running the query:\n{}", query);
            let results = spawn_blocking(move || {
                let connection = lock(&connection)?;
                run_blocking(&connection, query)
            })
            .await?
            .map_err(|e| {
                let error = e.context(context);
                log::error!("{:#}", error);
                error
            })?;
            for result in results {
                yield result;
            }
        }
    }
}

impl Connection for SqliteConnection {
    /// Open `sqlite://<path>[?<uri parameters>]`, `sqlite://:memory:` for a
    /// private in memory database.
    #[allow(refining_impl_trait)]
    async fn connect(url: Cow<'static, str>) -> Result<SqliteConnection> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let context = || format!("Error while opening the database at `{}`", url);
        let location = urlencoding::decode(location).with_context(context)?;
        let connection = rusqlite::Connection::open_with_flags(
            format!("file:{}", location),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(context)?;
        log::debug!("Connected to {}", url);
        Ok(Self::new(connection))
    }
}
