mod as_value;
mod codec;
mod connection;
mod crud;
mod driver;
mod entity;
mod error;
mod executor;
mod marshal;
mod materialize;
mod parse;
mod prepared;
mod query;
mod schema;
mod sql_writer;
mod tag;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use codec::*;
pub use connection::*;
pub use crud::*;
pub use driver::*;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use marshal::*;
pub use materialize::*;
pub use parse::*;
pub use prepared::*;
pub use query::*;
pub use schema::*;
pub use sql_writer::*;
pub use tag::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
pub type Error = anyhow::Error;
