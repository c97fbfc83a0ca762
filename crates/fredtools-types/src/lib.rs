//! Core types for the fredtools FRED API client.
//!
//! This crate provides the fundamental data structures used throughout fredtools:
//!
//! - [`SeriesId`], [`ReleaseId`], [`CategoryId`], [`ElementId`] - Record identifiers
//! - [`FredError`] - Error taxonomy shared by every crate
//! - [`coerce_int`] - Normalization of loosely typed numeric JSON fields
//! - [`Observation`] / [`Observations`] - Series readings
//! - [`Source`] - Data source records
//! - [`TagGroup`] - Tag group identifiers

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fredtools/fredtools/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
mod error;
mod ids;
mod observation;
mod source;
mod tag_group;

pub use coerce::{coerce_field, coerce_int, scalar_text};
pub use error::{FredError, Result};
pub use ids::{CategoryId, ElementId, ReleaseId, SeriesId, SourceId};
pub use observation::{
    DATE_FORMAT, MISSING_VALUE, Observation, Observations, parse_date, parse_value,
};
pub use source::Source;
pub use tag_group::{TagGroup, TagGroupParseError};
