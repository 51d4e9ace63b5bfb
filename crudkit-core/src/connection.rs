use crate::{Executor, Result};
use std::{borrow::Cow, future::Future};

/// Executor owning a live session, created from a connection url.
pub trait Connection: Executor {
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<impl Connection>>;
}
