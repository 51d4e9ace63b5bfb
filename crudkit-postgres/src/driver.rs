use crate::PostgresPrepared;
use crudkit_core::{Driver, GenericSqlWriter};

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDriver {}

impl PostgresDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for PostgresDriver {
    type Prepared = PostgresPrepared;
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "postgres";

    fn sql_writer(&self) -> GenericSqlWriter {
        GenericSqlWriter::new()
    }
}
