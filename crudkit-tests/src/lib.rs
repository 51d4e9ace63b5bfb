mod accounts;
#[cfg(not(feature = "disable-arrays"))]
mod arrays;
#[cfg(not(feature = "disable-json"))]
mod documents;
mod failures;
mod items;
mod setup;

use accounts::accounts;
#[cfg(not(feature = "disable-arrays"))]
use arrays::arrays;
use crudkit::Connection;
#[cfg(not(feature = "disable-json"))]
use documents::documents;
use failures::failures;
use items::items;
use log::LevelFilter;
use std::env;

pub use setup::reset_table;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    items(&mut connection).await;
    accounts(&mut connection).await;
    #[cfg(not(feature = "disable-arrays"))]
    arrays(&mut connection).await;
    #[cfg(not(feature = "disable-json"))]
    documents(&mut connection).await;
    failures(&mut connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
