use crate::{PostgresPrepared, ValueHolder};
use async_stream::try_stream;
use crudkit_core::{
    Error, QueryResult, Result, Row, RowLabeled, RowNames, RowsAffected, Value,
    stream::{Stream, StreamExt},
};
use std::pin::pin;
use tokio_postgres::{Client, SimpleQueryMessage};

pub(crate) fn row_to_values(row: tokio_postgres::Row) -> Result<Row> {
    (0..row.len())
        .map(|i| match row.try_get::<_, ValueHolder>(i) {
            Ok(v) => Ok(v.0),
            Err(e) => {
                let col = &row.columns()[i];
                Err(Error::new(e).context(format!(
                    "Could not deserialize column {} `{}`: {}",
                    i,
                    col.name(),
                    col.type_()
                )))
            }
        })
        .collect()
}

/// Raw queries go through the simple query protocol, which can carry more
/// than one statement. Every value comes back as text.
pub(crate) fn stream_simple_query(
    client: &Client,
    sql: String,
) -> impl Stream<Item = Result<QueryResult>> + Send + '_ {
    try_stream! {
        let messages = client.simple_query(&sql).await?;
        let mut labels: Option<RowNames> = None;
        for message in messages {
            match message {
                SimpleQueryMessage::Row(row) => {
                    let labels = labels.get_or_insert_with(|| {
                        row.columns().iter().map(|c| c.name().to_string()).collect()
                    });
                    let values = (0..row.len())
                        .map(|i| Value::Varchar(row.get(i).map(String::from)))
                        .collect::<Row>();
                    yield QueryResult::Row(RowLabeled::new(labels.clone(), values));
                }
                SimpleQueryMessage::CommandComplete(rows_affected) => {
                    labels = None;
                    yield QueryResult::Affected(RowsAffected {
                        rows_affected,
                        last_affected_id: None,
                    });
                }
                _ => {}
            }
        }
    }
}

pub(crate) fn stream_prepared(
    client: &Client,
    mut prepared: PostgresPrepared,
) -> impl Stream<Item = Result<QueryResult>> + Send + '_ {
    try_stream! {
        let params = prepared.take_params()?;
        if prepared.statement.columns().is_empty() {
            let rows_affected = client.execute_raw(&prepared.statement, params).await?;
            yield QueryResult::Affected(RowsAffected {
                rows_affected,
                last_affected_id: None,
            });
        } else {
            let stream = client.query_raw(&prepared.statement, params).await?;
            let mut stream = pin!(stream);
            let mut labels: Option<RowNames> = None;
            while let Some(row) = stream.next().await.transpose()? {
                let labels = labels.get_or_insert_with(|| {
                    row.columns().iter().map(|c| c.name().to_string()).collect()
                });
                yield QueryResult::Row(RowLabeled::new(labels.clone(), row_to_values(row)?));
            }
        }
    }
}
