//! Release table reconstruction for the fredtools FRED API client.
//!
//! This crate turns the nested `release/tables` payload into a tree:
//!
//! - [`Element`] / [`ElementKind`] - One table line
//! - [`ReleaseTable`] - Arena of elements with roots and lookups
//! - [`ElementRef`] - Borrowed node that navigates to children and parent
//! - [`RootPass`] - Which rule selected the roots

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/fredtools/fredtools/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod element;
mod table;

pub use element::{Element, ElementKind};
pub use table::{ElementRef, ReleaseTable, RootPass, Walk};
