//! Render an RSS 2.0 channel as an HTML news table.
//!
//! A feed is loaded ([`feed`]), parsed into a labeled tree ([`xml`]), and
//! rendered ([`render`]) as a page with a heading built from channel
//! metadata and one table row per item.

pub mod config;
pub mod feed;
pub mod render;
pub mod util;
pub mod xml;
