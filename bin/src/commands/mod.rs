//! CLI command implementations.

pub(crate) mod category;
pub(crate) mod observations;
pub(crate) mod release;
pub(crate) mod search;
pub(crate) mod series;
pub(crate) mod table;
pub(crate) mod tag;
