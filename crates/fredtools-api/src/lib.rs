//! Entity handles for the fredtools FRED API client.
//!
//! This crate maps FRED records onto typed handles:
//!
//! - [`Series`] - Metadata, observations, vintages and search
//! - [`Release`] - Release dates, sources and release tables
//! - [`Category`] - The category tree and its series
//! - [`Tag`] - Tag lookup and tag-filtered series
//! - [`ListOptions`] and friends - Query filters appended to requests

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fredtools/fredtools/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod category;
mod options;
mod release;
mod response;
mod series;
mod tag;
mod tag_names;

pub use category::{Category, CategoryFields};
pub use options::{
    DatesOptions, ListOptions, ObservationOptions, RealtimeWindow, SearchOptions, SearchType,
    SortOrder, TableOptions, UPDATE_TIME_FORMAT, UpdatesOptions,
};
pub use release::{Release, ReleaseFields};
pub use series::{Series, SeriesFields};
pub use tag::{Tag, TagFields};
pub use tag_names::{TagSelector, join_tag_names};
