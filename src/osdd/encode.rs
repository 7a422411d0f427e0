use std::io::Write;

use crate::defaults::is_default;
use crate::description::{Description, Image, Parameter, ParameterOption, Query, Url};
use crate::error::Error;
use crate::fixed::{Element, Name};
use crate::namespace::ns;
use crate::serialize::{serialize_xml_string, serialize_xml_write, SerializeOptions};

const PARAMETERS_PREFIX: &str = "parameters";

// attributes of Query that are part of the core vocabulary
const QUERY_ATTRIBUTES: [&str; 10] = [
    "role",
    "title",
    "totalResults",
    "searchTerms",
    "count",
    "startIndex",
    "startPage",
    "language",
    "inputEncoding",
    "outputEncoding",
];

/// Build the element tree of a description document.
///
/// Fields holding their documented default are left out, as are absent
/// optional fields. The OpenSearch namespace is the default namespace, the
/// parameter extension uses the `parameters` prefix, and any other
/// namespace used by query extension attributes gets a generated prefix.
pub fn encode_osdd(description: &Description) -> Element {
    let mut root = os("OpenSearchDescription")
        .with_prefix("", ns::OPENSEARCH)
        .with_prefix(PARAMETERS_PREFIX, ns::PARAMETERS)
        .with_child(os_text("ShortName", &description.short_name))
        .with_child(os_text("Description", &description.description))
        .with_children(description.urls.iter().map(url))
        .with_optional_child(
            (!is_default::tags(&description.tags))
                .then(|| os_text("Tags", &description.tags.join(" "))),
        )
        .with_children(description.images.iter().map(image))
        .with_optional_child(optional_text("LongName", &description.long_name))
        .with_optional_child(optional_text("Contact", &description.contact))
        .with_children(description.queries.iter().map(query))
        .with_optional_child(optional_text("Developer", &description.developer))
        .with_optional_child(optional_text("Attribution", &description.attribution))
        .with_optional_child(
            (!is_default::syndication_right(description.syndication_right))
                .then(|| os_text("SyndicationRight", description.syndication_right.as_str())),
        )
        .with_optional_child(
            (!is_default::adult_content(description.adult_content))
                .then(|| os_text("AdultContent", "true")),
        );
    if !is_default::languages(&description.languages) {
        root = root.with_children(texts("Language", &description.languages));
    }
    if !is_default::input_encodings(&description.input_encodings) {
        root = root.with_children(texts("InputEncoding", &description.input_encodings));
    }
    if !is_default::output_encodings(&description.output_encodings) {
        root = root.with_children(texts("OutputEncoding", &description.output_encodings));
    }
    root.create_missing_prefixes();
    tracing::debug!(
        short_name = %description.short_name,
        urls = description.urls.len(),
        queries = description.queries.len(),
        "encoded description document"
    );
    root
}

/// Encode a description document and serialize it to a string.
pub fn encode_osdd_to_string(
    description: &Description,
    options: &SerializeOptions,
) -> Result<String, Error> {
    serialize_xml_string(&encode_osdd(description), options)
}

/// Encode a description document and write it, as UTF-8.
pub fn encode_osdd_to_writer<W: Write>(
    description: &Description,
    options: &SerializeOptions,
    w: &mut W,
) -> Result<(), Error> {
    serialize_xml_write(&encode_osdd(description), options, w)
}

fn os(local_name: &str) -> Element {
    Element::new(ns::OPENSEARCH, local_name)
}

fn os_text(local_name: &str, text: &str) -> Element {
    os(local_name).with_text(text)
}

/// Empty text is left out like absent text; it would read back as `None`.
fn optional_text(local_name: &str, text: &Option<String>) -> Option<Element> {
    text.as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| os_text(local_name, text))
}

fn texts<'a>(local_name: &'a str, values: &'a [String]) -> impl Iterator<Item = Element> + 'a {
    values.iter().map(move |value| os_text(local_name, value))
}

fn url(url: &Url) -> Element {
    os("Url")
        .with_attribute(Name::local("template"), &url.template)
        .with_attribute(Name::local("type"), &url.mime_type)
        .with_optional_attribute(Name::local("rel"), unless(is_default::rel(&url.rel), &url.rel))
        .with_optional_attribute(
            Name::local("indexOffset"),
            unless(is_default::index_offset(url.index_offset), url.index_offset),
        )
        .with_optional_attribute(
            Name::local("pageOffset"),
            unless(is_default::page_offset(url.page_offset), url.page_offset),
        )
        .with_optional_attribute(
            Name::new(ns::PARAMETERS, "method"),
            unless(is_default::method(url.method), url.method),
        )
        .with_optional_attribute(Name::new(ns::PARAMETERS, "enctype"), url.enctype.as_ref())
        .with_children(url.parameters.iter().map(parameter))
}

fn parameter(parameter: &Parameter) -> Element {
    Element::new(ns::PARAMETERS, "Parameter")
        .with_attribute(Name::local("name"), &parameter.name)
        .with_optional_attribute(Name::local("value"), parameter.value.as_ref())
        .with_optional_attribute(
            Name::local("minimum"),
            unless(is_default::minimum(parameter.minimum), parameter.minimum),
        )
        .with_optional_attribute(
            Name::local("maximum"),
            unless(is_default::maximum(parameter.maximum), parameter.maximum),
        )
        .with_optional_attribute(Name::local("pattern"), parameter.pattern.as_ref())
        .with_optional_attribute(Name::local("title"), parameter.title.as_ref())
        .with_optional_attribute(Name::local("minExclusive"), parameter.min_exclusive.as_ref())
        .with_optional_attribute(Name::local("maxExclusive"), parameter.max_exclusive.as_ref())
        .with_optional_attribute(Name::local("minInclusive"), parameter.min_inclusive.as_ref())
        .with_optional_attribute(Name::local("maxInclusive"), parameter.max_inclusive.as_ref())
        .with_optional_attribute(Name::local("step"), parameter.step.as_ref())
        .with_children(parameter.options.iter().map(option))
}

fn option(option: &ParameterOption) -> Element {
    Element::new(ns::PARAMETERS, "Option")
        .with_attribute(Name::local("value"), &option.value)
        .with_optional_attribute(Name::local("label"), option.label.as_ref())
}

fn image(image: &Image) -> Element {
    os("Image")
        .with_optional_attribute(Name::local("width"), image.width)
        .with_optional_attribute(Name::local("height"), image.height)
        .with_optional_attribute(Name::local("type"), image.mime_type.as_ref())
        .with_text(&image.url)
}

fn query(query: &Query) -> Element {
    let mut element = os("Query")
        .with_attribute(Name::local("role"), &query.role)
        .with_optional_attribute(Name::local("title"), query.title.as_ref())
        .with_optional_attribute(Name::local("totalResults"), query.total_results)
        .with_optional_attribute(Name::local("searchTerms"), query.search_terms.as_ref())
        .with_optional_attribute(Name::local("count"), query.count)
        .with_optional_attribute(Name::local("startIndex"), query.start_index)
        .with_optional_attribute(Name::local("startPage"), query.start_page)
        .with_optional_attribute(Name::local("language"), query.language.as_ref())
        .with_optional_attribute(Name::local("inputEncoding"), query.input_encoding.as_ref())
        .with_optional_attribute(Name::local("outputEncoding"), query.output_encoding.as_ref());
    for (name, value) in &query.extra_parameters {
        let namespace = name.namespace.as_deref().unwrap_or_default();
        if namespace.is_empty() && QUERY_ATTRIBUTES.contains(&name.local_name.as_str()) {
            tracing::trace!(local_name = %name.local_name, "extension attribute shadows a core attribute, skipped");
            continue;
        }
        element = element.with_attribute(Name::new(namespace, name.local_name.as_str()), value);
    }
    element
}

/// `None` when `is_default` holds, so the attribute is left out.
fn unless<T>(is_default: bool, value: T) -> Option<T> {
    (!is_default).then_some(value)
}
