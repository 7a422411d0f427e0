use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::coerce::{Limit, Step};
use crate::defaults;
use crate::error::Error;

/// An OpenSearch description: the capabilities of a search endpoint.
///
/// Optional text fields that hold an empty string are encoded like absent
/// ones, so `Some(String::new())` reads back as `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Description {
    pub short_name: String,
    pub description: String,
    pub urls: Vec<Url>,
    pub tags: Vec<String>,
    pub images: Vec<Image>,
    pub long_name: Option<String>,
    pub contact: Option<String>,
    pub queries: Vec<Query>,
    pub developer: Option<String>,
    pub attribution: Option<String>,
    pub syndication_right: SyndicationRight,
    pub adult_content: bool,
    pub languages: Vec<String>,
    pub input_encodings: Vec<String>,
    pub output_encodings: Vec<String>,
}

impl Description {
    /// A description with the required fields set and everything else at
    /// its default.
    pub fn new(short_name: impl Into<String>, description: impl Into<String>) -> Self {
        Description {
            short_name: short_name.into(),
            description: description.into(),
            urls: Vec::new(),
            tags: Vec::new(),
            images: Vec::new(),
            long_name: None,
            contact: None,
            queries: Vec::new(),
            developer: None,
            attribution: None,
            syndication_right: defaults::SYNDICATION_RIGHT,
            adult_content: defaults::ADULT_CONTENT,
            languages: defaults::owned(defaults::LANGUAGES),
            input_encodings: defaults::owned(defaults::INPUT_ENCODINGS),
            output_encodings: defaults::owned(defaults::OUTPUT_ENCODINGS),
        }
    }
}

/// A URL template through which the endpoint can be queried.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Url {
    /// The template. It is kept as-is and never expanded.
    pub template: String,
    /// MIME type of the response, the `type` attribute.
    pub mime_type: String,
    pub rel: String,
    pub index_offset: i64,
    pub page_offset: i64,
    pub method: HttpMethod,
    pub enctype: Option<String>,
    pub parameters: Vec<Parameter>,
}

impl Url {
    pub fn new(template: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Url {
            template: template.into(),
            mime_type: mime_type.into(),
            rel: defaults::REL.to_string(),
            index_offset: defaults::INDEX_OFFSET,
            page_offset: defaults::PAGE_OFFSET,
            method: defaults::METHOD,
            enctype: None,
            parameters: Vec::new(),
        }
    }
}

/// A template parameter, from the parameter extension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    /// The default binding, usually a `{searchTerms}` style placeholder.
    pub value: Option<String>,
    pub minimum: i64,
    pub maximum: i64,
    pub pattern: Option<String>,
    pub title: Option<String>,
    pub min_exclusive: Option<Limit>,
    pub max_exclusive: Option<Limit>,
    pub min_inclusive: Option<Limit>,
    pub max_inclusive: Option<Limit>,
    pub step: Option<Step>,
    pub options: Vec<ParameterOption>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            value: None,
            minimum: defaults::MINIMUM,
            maximum: defaults::MAXIMUM,
            pattern: None,
            title: None,
            min_exclusive: None,
            max_exclusive: None,
            min_inclusive: None,
            max_inclusive: None,
            step: None,
            options: Vec::new(),
        }
    }
}

/// One allowed value of a [`Parameter`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterOption {
    pub value: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// MIME type of the image, the `type` attribute.
    pub mime_type: Option<String>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Image {
            url: url.into(),
            width: None,
            height: None,
            mime_type: None,
        }
    }
}

/// The name of an extension attribute on a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionName {
    /// Namespace URI; `None` for an attribute without a namespace.
    pub namespace: Option<String>,
    pub local_name: String,
}

impl ExtensionName {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        ExtensionName {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

/// An example or default query.
///
/// The counts are unsigned: a negative `totalResults`, `count`,
/// `startIndex` or `startPage` is rejected as a format error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub role: String,
    pub title: Option<String>,
    pub total_results: Option<u64>,
    pub search_terms: Option<String>,
    pub count: Option<u64>,
    pub start_index: Option<u64>,
    pub start_page: Option<u64>,
    pub language: Option<String>,
    pub input_encoding: Option<String>,
    pub output_encoding: Option<String>,
    /// Namespaced attributes from outside the core vocabulary.
    pub extra_parameters: BTreeMap<ExtensionName, String>,
}

impl Query {
    pub fn new(role: impl Into<String>) -> Self {
        Query {
            role: role.into(),
            title: None,
            total_results: None,
            search_terms: None,
            count: None,
            start_index: None,
            start_page: None,
            language: None,
            input_encoding: None,
            output_encoding: None,
            extra_parameters: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HttpMethod {
    Options,
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Trace,
    Connect,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPTIONS" => Ok(HttpMethod::Options),
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            _ => Err(Error::InvalidEnum {
                field: "method",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How search results may be redistributed.
///
/// Parsing ignores case, so `Closed` and `CLOSED` are accepted as
/// `closed`. Encoding always writes the lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyndicationRight {
    #[default]
    Open,
    Limited,
    Private,
    Closed,
}

impl SyndicationRight {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyndicationRight::Open => "open",
            SyndicationRight::Limited => "limited",
            SyndicationRight::Private => "private",
            SyndicationRight::Closed => "closed",
        }
    }
}

impl FromStr for SyndicationRight {
    type Err = Error;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(SyndicationRight::Open),
            "limited" => Ok(SyndicationRight::Limited),
            "private" => Ok(SyndicationRight::Private),
            "closed" => Ok(SyndicationRight::Closed),
            _ => Err(Error::InvalidEnum {
                field: "SyndicationRight",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for SyndicationRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
