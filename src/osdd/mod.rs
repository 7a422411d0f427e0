//! OpenSearch description documents, version 1.1, with the parameter
//! extension.
//!
//! [`parse_osdd`] reads a document into a [`Description`]. [`encode_osdd`]
//! goes the other way, leaving out every field that holds its documented
//! default, so that parsing the encoded document gives back an equal value.
//!
//! ```rust
//! use opensearch_xml::{encode_osdd_to_string, parse_osdd, SerializeOptions};
//!
//! let description = parse_osdd(br#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
//!   <ShortName>Web</ShortName>
//!   <Description>Web search</Description>
//!   <Url type="text/html" template="http://example.com/?q={searchTerms}" method="get"/>
//! </OpenSearchDescription>"#)?;
//! assert_eq!(description.short_name, "Web");
//! assert_eq!(description.languages, vec!["*"]);
//!
//! let xml = encode_osdd_to_string(&description, &SerializeOptions::default())?;
//! assert_eq!(parse_osdd(xml.as_bytes())?, description);
//! # Ok::<(), opensearch_xml::Error>(())
//! ```

mod encode;
mod parse;

pub use encode::{encode_osdd, encode_osdd_to_string, encode_osdd_to_writer};
pub use parse::{parse_osdd, parse_osdd_with};

#[cfg(doc)]
use crate::description::Description;

/// Which `Option` elements belong to a `Parameter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionScope {
    /// The `Option` children of the parameter itself.
    #[default]
    Parameter,
    /// Every `Option` that is a direct child of the enclosing `Url`, given
    /// to each parameter of that `Url`. Some producers write options this
    /// way.
    Url,
}

/// Options for [`parse_osdd_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub option_scope: OptionScope,
}
