#![forbid(unsafe_code)]

//! Read and write OpenSearch documents.
//!
//! This crate reads OpenSearch description documents (version 1.1, with the
//! parameter extension) into a [`Description`], and encodes a
//! [`Description`] back into XML. It also reads OpenSearch responses in the
//! Atom format into a [`SearchResultPage`], including GeoRSS geometries.
//!
//! All lookups are by namespace URI, never by the prefix a document happens
//! to use. Fields that hold their documented default value are left out
//! when encoding, so `parse_osdd(encode_osdd(d)) == d`.
//!
//! ```rust
//! use opensearch_xml::parse_atom_feed;
//!
//! let page = parse_atom_feed(br#"<feed xmlns="http://www.w3.org/2005/Atom"
//!       xmlns:os="http://a9.com/-/spec/opensearch/1.1/"
//!       xmlns:dc="http://purl.org/dc/elements/1.1/">
//!   <title>Results</title>
//!   <id>urn:results</id>
//!   <link rel="search" href="http://example.com/osdd.xml"/>
//!   <os:totalResults>1</os:totalResults>
//!   <os:startIndex>1</os:startIndex>
//!   <os:itemsPerPage>10</os:itemsPerPage>
//!   <entry><title>Hit</title><id>urn:hit</id><dc:identifier>hit</dc:identifier></entry>
//! </feed>"#)?;
//! assert_eq!(page.total_results, 1);
//! assert_eq!(page.items[0].identifier, "hit");
//! # Ok::<(), opensearch_xml::Error>(())
//! ```
//!
//! The library logs through [`tracing`](https://docs.rs/tracing); it does not
//! install a subscriber.

mod access;
mod atom;
mod coerce;
pub mod defaults;
mod description;
mod encoding;
mod entity;
mod error;
pub mod fixed;
pub mod georss;
mod idmap;
mod name;
mod namespace;
pub mod osdd;
mod parse;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest;
mod result;
mod serialize;
pub mod temporal;
mod xmldata;
mod xmlvalue;

pub use access::{Attribute, Document};
pub use atom::{parse_atom_feed, parse_atom_feed_with};
pub use coerce::{parse_adult_content, parse_limit_or_step, parse_temporal, Limit, Step};
pub use description::{
    Description, ExtensionName, HttpMethod, Image, Parameter, ParameterOption, Query,
    SyndicationRight, Url,
};
pub use error::{Error, ErrorKind};
pub use georss::{GeoRss, Geometry, GeometryParser, Shape};
pub use namespace::ns;
pub use osdd::{
    encode_osdd, encode_osdd_to_string, encode_osdd_to_writer, parse_osdd, parse_osdd_with,
    OptionScope, ParseOptions,
};
pub use result::{SearchResult, SearchResultItem, SearchResultPage};
pub use serialize::{serialize_xml_string, serialize_xml_write, SerializeOptions};
pub use temporal::{format_instant, parse_instant, Instant, Temporal};
pub use xmldata::Node;
