//! Proptest support for description documents
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module generates arbitrary [`Description`]
//! values, for instance to check that what you store survives encoding.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! opensearch-xml = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::coerce::Limit;
use crate::description::{
    Description, ExtensionName, HttpMethod, Image, Parameter, ParameterOption, Query,
    SyndicationRight, Url,
};
use crate::namespace::ns;

const EXTENSION_NAMESPACES: &[&str] = &[
    "http://example.com/x",
    "http://example.com/y",
    ns::OPENSEARCH,
    ns::PARAMETERS,
];
const EXTENSION_NAMES: &[&str] = &["box", "uid", "start", "role"];
// text never starts with whitespace, so it is never only whitespace
const TEXT: &str = "[a-zA-Z0-9&<>\"'{}?=/:.-][a-zA-Z0-9 &<>\"'{}?=/:.-]{0,15}";
const TOKEN: &str = "[a-zA-Z0-9*-]{1,8}";

fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(TEXT)
}

/// An arbitrary limit or step. Text limits never look like numbers.
pub fn arb_limit() -> impl Strategy<Value = Limit> {
    prop_oneof![
        any::<i64>().prop_map(Limit::Integer),
        (-1e6f64..1e6f64).prop_map(Limit::Float),
        "[a-zA-Z][a-zA-Z0-9]{0,8}"
            .prop_filter("not numeric", |text| text.parse::<f64>().is_err())
            .prop_map(Limit::Text),
    ]
}

fn arb_method() -> impl Strategy<Value = HttpMethod> {
    prop::sample::select(vec![
        HttpMethod::Options,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ])
}

fn arb_syndication_right() -> impl Strategy<Value = SyndicationRight> {
    prop::sample::select(vec![
        SyndicationRight::Open,
        SyndicationRight::Limited,
        SyndicationRight::Private,
        SyndicationRight::Closed,
    ])
}

prop_compose! {
    fn arb_option()(value in TEXT, label in arb_optional_text()) -> ParameterOption {
        ParameterOption { value, label }
    }
}

prop_compose! {
    fn arb_limits()(min_exclusive in prop::option::of(arb_limit()),
                    max_exclusive in prop::option::of(arb_limit()),
                    min_inclusive in prop::option::of(arb_limit()),
                    max_inclusive in prop::option::of(arb_limit()),
                    step in prop::option::of(arb_limit()))
                    -> [Option<Limit>; 5] {
        [min_exclusive, max_exclusive, min_inclusive, max_inclusive, step]
    }
}

prop_compose! {
    /// An arbitrary template parameter.
    pub fn arb_parameter()(name in TOKEN,
                           value in arb_optional_text(),
                           minimum in -2i64..5,
                           maximum in -2i64..5,
                           pattern in arb_optional_text(),
                           title in arb_optional_text(),
                           limits in arb_limits(),
                           options in prop::collection::vec(arb_option(), 0..3)) -> Parameter {
        let [min_exclusive, max_exclusive, min_inclusive, max_inclusive, step] = limits;
        Parameter {
            name,
            value,
            minimum,
            maximum,
            pattern,
            title,
            min_exclusive,
            max_exclusive,
            min_inclusive,
            max_inclusive,
            step,
            options,
        }
    }
}

prop_compose! {
    /// An arbitrary URL template.
    pub fn arb_url()(template in TEXT,
                     mime_type in TOKEN,
                     rel in prop::sample::select(vec!["results", "suggestions", "self", "collection"]),
                     index_offset in -1i64..3,
                     page_offset in -1i64..3,
                     method in arb_method(),
                     enctype in prop::option::of(TOKEN),
                     parameters in prop::collection::vec(arb_parameter(), 0..3)) -> Url {
        Url {
            template,
            mime_type,
            rel: rel.to_string(),
            index_offset,
            page_offset,
            method,
            enctype,
            parameters,
        }
    }
}

prop_compose! {
    fn arb_image()(url in TEXT,
                   width in prop::option::of(any::<u32>()),
                   height in prop::option::of(any::<u32>()),
                   mime_type in prop::option::of(TOKEN)) -> Image {
        Image { url, width, height, mime_type }
    }
}

fn arb_extra_parameters() -> impl Strategy<Value = BTreeMap<ExtensionName, String>> {
    prop::collection::btree_map(
        (
            prop::sample::select(EXTENSION_NAMESPACES),
            prop::sample::select(EXTENSION_NAMES),
        )
            .prop_map(|(namespace, local_name)| ExtensionName::new(namespace, local_name)),
        TEXT,
        0..3,
    )
}

prop_compose! {
    fn arb_query_counts()(total_results in prop::option::of(any::<u64>()),
                          count in prop::option::of(0u64..100),
                          start_index in prop::option::of(0u64..100),
                          start_page in prop::option::of(0u64..100)) -> [Option<u64>; 4] {
        [total_results, count, start_index, start_page]
    }
}

prop_compose! {
    /// An arbitrary example query.
    pub fn arb_query()(role in prop::sample::select(vec!["request", "example", "related", "correction"]),
                       title in arb_optional_text(),
                       counts in arb_query_counts(),
                       search_terms in arb_optional_text(),
                       language in prop::option::of(TOKEN),
                       input_encoding in prop::option::of(TOKEN),
                       output_encoding in prop::option::of(TOKEN),
                       extra_parameters in arb_extra_parameters()) -> Query {
        let [total_results, count, start_index, start_page] = counts;
        Query {
            role: role.to_string(),
            title,
            total_results,
            search_terms,
            count,
            start_index,
            start_page,
            language,
            input_encoding,
            output_encoding,
            extra_parameters,
        }
    }
}

prop_compose! {
    fn arb_metadata()(long_name in arb_optional_text(),
                      contact in arb_optional_text(),
                      developer in arb_optional_text(),
                      attribution in arb_optional_text(),
                      syndication_right in arb_syndication_right(),
                      adult_content in any::<bool>())
                      -> ([Option<String>; 4], SyndicationRight, bool) {
        ([long_name, contact, developer, attribution], syndication_right, adult_content)
    }
}

prop_compose! {
    /// Generate an arbitrary description.
    ///
    /// Every generated value encodes to a document that parses back to an
    /// equal value.
    pub fn arb_description()(short_name in TEXT,
                             description in TEXT,
                             urls in prop::collection::vec(arb_url(), 0..3),
                             tags in prop::collection::vec(TOKEN, 0..4),
                             images in prop::collection::vec(arb_image(), 0..2),
                             queries in prop::collection::vec(arb_query(), 0..3),
                             metadata in arb_metadata(),
                             languages in prop::collection::vec(TOKEN, 1..3),
                             input_encodings in prop::collection::vec(TOKEN, 1..3),
                             output_encodings in prop::collection::vec(TOKEN, 1..3)) -> Description {
        let ([long_name, contact, developer, attribution], syndication_right, adult_content) =
            metadata;
        Description {
            short_name,
            description,
            urls,
            tags,
            images,
            long_name,
            contact,
            queries,
            developer,
            attribution,
            syndication_right,
            adult_content,
            languages,
            input_encodings,
            output_encodings,
        }
    }
}
