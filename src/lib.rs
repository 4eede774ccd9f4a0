//! Matrix URI parameter parsing with a tower middleware adapter.
//!
//! A matrix parameter is a `;key=value` pair carried inside a single path
//! segment, distinct from the query string:
//!
//! ```text
//! /club;name=lakers;address=downtown/members;role=guest
//! ```
//!
//! [`parse`] turns such a path into an ordered sequence of
//! [`SegmentRecord`]s, one per `/`-delimited piece, each holding the plain
//! segment name and an ordered map of its parameters. The grammar is
//! deliberately permissive — matrix parameters are an advisory convention,
//! so every string input maps to a defined result and nothing ever fails:
//!
//! - a trailing run of `;` is ignored: `/home;name=raghav;` → `name=raghav`
//! - a key without `=` contributes no entry: `/index;a;b=1;c` → only `b=1`
//! - the last declaration of a key wins: `;name=a;name=b` → `name=b`
//! - comma-delimited values become lists: `;list=a,b,,,` → five elements
//! - keys and values are percent-decoded: `;name=raghav%20dua`
//!
//! ```rust
//! use matrix_params::MatrixValue;
//!
//! let parsed = matrix_params::parse("/index;name=raghav%20dua");
//!
//! assert_eq!(parsed.len(), 1);
//! assert_eq!(parsed[0].segment, "index");
//! assert_eq!(
//!     parsed[0].matrix.get("name").and_then(MatrixValue::as_str),
//!     Some("raghav dua"),
//! );
//! ```
//!
//! [`MatrixLayer`] mounts the parser as middleware for any
//! `tower_service::Service` over [`http::Request`]: each request gets a
//! [`ParsedMatrix`] attached to its extensions, computed at most once, and
//! handlers read it back with `req.extensions().get::<ParsedMatrix>()`. A
//! replacement parsing function can be swapped in through [`MatrixConfig`]
//! for alternative grammars.

#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod matrix;
mod normalize;
mod parser;
mod service;

#[macro_use]
extern crate log;

pub use matrix::{MatrixMap, MatrixMapIter, MatrixValue, ParsedMatrix, SegmentRecord};
pub use parser::{parse, parse_with, ParseOptions};
pub use service::{MatrixConfig, MatrixLayer, MatrixService, ParserFn};
