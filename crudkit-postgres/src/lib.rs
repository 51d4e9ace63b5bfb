mod connection;
mod driver;
mod prepared;
mod util;
mod value_holder;

pub use connection::*;
pub use driver::*;
pub use prepared::*;
pub use value_holder::*;
