use crate::{
    AsValue, CodecRegistry, Driver, Entity, EntitySchema, ExecutionError, Executor, GenericSqlWriter,
    MappingError, Query, Result, ResultMaterializer, RowLabeled, SqlWriter, Statement,
    ValueMarshaller, stream::StreamExt,
};
use anyhow::Context;
use std::{fmt, marker::PhantomData, pin::pin};

/// Create, read, update and delete by primary key of the entity `E` whose
/// key field holds a `K`.
///
/// Nothing is retained between calls: every operation resolves the schema of
/// `E` again, builds its statement, runs it on the executor passed in and
/// interprets the result. Schema and mapping failures are detected before the
/// executor is touched.
pub struct Crud<E, K> {
    codecs: CodecRegistry,
    _entity: PhantomData<fn() -> (E, K)>,
}

impl<E: Entity, K: AsValue> Crud<E, K> {
    pub fn new() -> Self {
        Self::with_codecs(Default::default())
    }

    pub fn with_codecs(codecs: CodecRegistry) -> Self {
        Self {
            codecs,
            _entity: PhantomData,
        }
    }

    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    pub fn codecs_mut(&mut self) -> &mut CodecRegistry {
        &mut self.codecs
    }

    /// Insert `entity` and return the key generated by the database.
    pub async fn create<X: Executor>(&self, executor: &mut X, entity: &E) -> Result<K> {
        let writer = executor.driver().sql_writer();
        let (schema, statement) = self.build_insert(writer.as_dyn(), entity)?;
        let row = fetch_one(executor, statement).await?;
        let Some(value) = row.and_then(|v| v.values.into_vec().into_iter().next()) else {
            return Err(ExecutionError::NoReturnedKey(schema.table_name).into());
        };
        K::try_from_value(value).with_context(|| {
            format!(
                "While decoding the key `{}` returned by the insert into `{}`",
                schema.primary_key.column_name, schema.table_name
            )
        })
    }

    /// Load the entity whose key is `key`.
    pub async fn detail<X: Executor>(&self, executor: &mut X, key: K) -> Result<E>
    where
        E: Default,
    {
        let writer = executor.driver().sql_writer();
        let (schema, statement) = self.build_detail(writer.as_dyn(), key)?;
        let materializer = ResultMaterializer::new(&self.codecs);
        let mut entity = E::default();
        materializer.slots(&mut entity)?;
        let Some(row) = fetch_one(executor, statement).await? else {
            return Err(ExecutionError::NoRows(schema.table_name).into());
        };
        let slots = materializer.slots(&mut entity)?;
        materializer
            .decode(row, slots)
            .with_context(|| format!("While materializing a row of `{}`", schema.table_name))?;
        Ok(entity)
    }

    /// Overwrite the row having the key of `entity`. Returns `false` when no
    /// row has that key.
    pub async fn update<X: Executor>(&self, executor: &mut X, entity: &E) -> Result<bool> {
        let writer = executor.driver().sql_writer();
        let (_, statement) = self.build_update(writer.as_dyn(), entity)?;
        Ok(execute(executor, statement).await? > 0)
    }

    /// Remove the row having key `key`. Returns `false` when no row has that
    /// key.
    pub async fn delete<X: Executor>(&self, executor: &mut X, key: K) -> Result<bool> {
        let writer = executor.driver().sql_writer();
        let (_, statement) = self.build_delete(writer.as_dyn(), key)?;
        Ok(execute(executor, statement).await? > 0)
    }

    pub fn insert_statement(&self, entity: &E) -> Result<Statement> {
        Ok(self.build_insert(&GenericSqlWriter, entity)?.1)
    }

    pub fn detail_statement(&self, key: K) -> Result<Statement> {
        Ok(self.build_detail(&GenericSqlWriter, key)?.1)
    }

    pub fn update_statement(&self, entity: &E) -> Result<Statement> {
        Ok(self.build_update(&GenericSqlWriter, entity)?.1)
    }

    pub fn delete_statement(&self, key: K) -> Result<Statement> {
        Ok(self.build_delete(&GenericSqlWriter, key)?.1)
    }

    fn build_insert(
        &self,
        writer: &dyn SqlWriter,
        entity: &E,
    ) -> Result<(EntitySchema, Statement)> {
        let schema = EntitySchema::of::<E>()?;
        let params = ValueMarshaller::new(&self.codecs).values_of(entity, &schema.fields)?;
        let mut sql = String::with_capacity(64 + schema.fields.len() * 16);
        writer.write_insert(&mut sql, &schema);
        Ok((schema, Statement::new(sql, params)))
    }

    fn build_detail(&self, writer: &dyn SqlWriter, key: K) -> Result<(EntitySchema, Statement)> {
        let schema = EntitySchema::of::<E>()?;
        let mut sql = String::with_capacity(64);
        writer.write_select_by_key(&mut sql, &schema);
        Ok((schema, Statement::new(sql, vec![key.as_value()])))
    }

    fn build_update(
        &self,
        writer: &dyn SqlWriter,
        entity: &E,
    ) -> Result<(EntitySchema, Statement)> {
        let schema = EntitySchema::of::<E>()?;
        if schema.fields.is_empty() {
            return Err(MappingError::NothingToUpdate(schema.table_name).into());
        }
        let marshaller = ValueMarshaller::new(&self.codecs);
        let mut params = marshaller.values_of(entity, &schema.fields)?;
        params.push(marshaller.value_of(entity, &schema.primary_key)?);
        let mut sql = String::with_capacity(64 + schema.fields.len() * 24);
        writer.write_update_by_key(&mut sql, &schema);
        Ok((schema, Statement::new(sql, params)))
    }

    fn build_delete(&self, writer: &dyn SqlWriter, key: K) -> Result<(EntitySchema, Statement)> {
        let schema = EntitySchema::of::<E>()?;
        let mut sql = String::with_capacity(64);
        writer.write_delete_by_key(&mut sql, &schema);
        Ok((schema, Statement::new(sql, vec![key.as_value()])))
    }
}

impl<E: Entity, K: AsValue> Default for Crud<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, K> Clone for Crud<E, K> {
    fn clone(&self) -> Self {
        Self {
            codecs: self.codecs.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E, K> fmt::Debug for Crud<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crud")
            .field("entity", &std::any::type_name::<E>())
            .field("key", &std::any::type_name::<K>())
            .field("codecs", &self.codecs)
            .finish()
    }
}

async fn prepare<X: Executor>(
    executor: &mut X,
    statement: Statement,
) -> Result<Query<X::Driver>> {
    let Statement { sql, params } = statement;
    let mut query = executor.prepare(sql).await?;
    for (i, value) in params.into_iter().enumerate() {
        query
            .bind(value)
            .with_context(|| format!("Cannot bind the parameter ${}", i + 1))?;
    }
    Ok(query)
}

async fn fetch_one<X: Executor>(
    executor: &mut X,
    statement: Statement,
) -> Result<Option<RowLabeled>> {
    log::debug!("{} <{}>", statement, <X::Driver as Driver>::NAME);
    let context = format!("While fetching the result of:\n{}", statement);
    let query = prepare(executor, statement)
        .await
        .with_context(|| context.clone())?;
    let mut stream = pin!(executor.fetch(query));
    let row = stream.next().await.transpose().context(context)?;
    log::trace!("fetched {} row", if row.is_some() { 1 } else { 0 });
    Ok(row)
}

async fn execute<X: Executor>(executor: &mut X, statement: Statement) -> Result<u64> {
    log::debug!("{} <{}>", statement, <X::Driver as Driver>::NAME);
    let context = format!("While executing:\n{}", statement);
    let query = prepare(executor, statement)
        .await
        .with_context(|| context.clone())?;
    let affected = executor.execute(query).await.context(context)?;
    log::trace!("{} rows affected", affected.rows_affected);
    Ok(affected.rows_affected)
}
