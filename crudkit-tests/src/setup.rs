use crudkit::{Driver, Executor, Query, Result};

/// Drop and create `table`, using the definition matching the driver of the
/// executor.
pub async fn reset_table<E: Executor>(
    executor: &mut E,
    table: &str,
    postgres: &str,
    sqlite: &str,
) -> Result<()> {
    let definition = match <E::Driver as Driver>::NAME {
        "postgres" => postgres,
        "sqlite" => sqlite,
        name => {
            return Err(crudkit::Error::msg(format!(
                "No table definition for driver `{}`",
                name
            )));
        }
    };
    executor
        .execute(Query::Raw(format!("DROP TABLE IF EXISTS {}", table)))
        .await?;
    executor
        .execute(Query::Raw(format!("CREATE TABLE {} ({})", table, definition)))
        .await?;
    Ok(())
}
