//! Typed Rust client for the FRED economic data API.
//!
//! This is a facade crate that re-exports functionality from the fredtools
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use fredtools_lib::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let client = FredClient::from_env()?;
//!     client.register_default();
//!
//!     let gdp = Series::get("GNPCA")?;
//!     let observations = gdp.observations(&client, &ObservationOptions::default())?;
//!     println!("{gdp}: {} observations", observations.len());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fredtools/fredtools/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use fredtools_types::*;

// Re-export client plumbing
pub use fredtools_client::{
    API_KEY_ENV, BASE_URL_ENV, ClientGuard, FnTransport, FredClient, FredConfig, HttpTransport,
    Params, Transport, clear_default_client, context, current_client, set_default_client, url,
    use_client, with_client,
};

#[cfg(feature = "test-utils")]
pub use fredtools_client::mock;

// Re-export entity handles
pub use fredtools_api::{
    Category, CategoryFields, DatesOptions, ListOptions, ObservationOptions, RealtimeWindow,
    Release, ReleaseFields, SearchOptions, SearchType, Series, SeriesFields, SortOrder,
    TableOptions, Tag, TagFields, TagSelector, UPDATE_TIME_FORMAT, UpdatesOptions,
    join_tag_names,
};

// Re-export release tables
pub use fredtools_table::{Element, ElementKind, ElementRef, ReleaseTable, RootPass, Walk};

// Re-export formatters
#[cfg(feature = "format")]
pub use fredtools_format::{
    COLUMNS, CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use fredtools_format::{ParquetFormatter, observation_schema, record_batch};

/// Prelude module for convenient imports.
///
/// ```
/// use fredtools_lib::prelude::*;
/// ```
pub mod prelude {
    pub use fredtools_types::{
        CategoryId, ElementId, FredError, Observation, Observations, ReleaseId, Result,
        SeriesId, Source, TagGroup,
    };

    pub use fredtools_client::{FredClient, FredConfig, current_client, use_client};

    pub use fredtools_api::{
        Category, ListOptions, ObservationOptions, RealtimeWindow, Release, SearchOptions,
        Series, TableOptions, Tag,
    };

    pub use fredtools_table::{ElementRef, ReleaseTable};

    #[cfg(feature = "format")]
    pub use fredtools_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use fredtools_format::ParquetFormatter;
}
