use std::collections::BTreeMap;

use crate::access::Document;
use crate::coerce::{
    parse_adult_content, parse_integer, parse_limit_or_step, parse_optional_integer, Limit,
};
use crate::defaults;
use crate::description::{
    Description, ExtensionName, HttpMethod, Image, Parameter, ParameterOption, Query,
    SyndicationRight, Url,
};
use crate::error::Error;
use crate::namespace::ns;
use crate::xmldata::Node;

use super::{OptionScope, ParseOptions};

/// Parse an OpenSearch description document.
pub fn parse_osdd(bytes: &[u8]) -> Result<Description, Error> {
    parse_osdd_with(bytes, &ParseOptions::default())
}

/// Parse an OpenSearch description document with explicit options.
pub fn parse_osdd_with(bytes: &[u8], options: &ParseOptions) -> Result<Description, Error> {
    let document = Document::parse(bytes)?;
    let description = DescriptionParser { document: &document, options }.parse()?;
    tracing::debug!(
        short_name = %description.short_name,
        urls = description.urls.len(),
        queries = description.queries.len(),
        images = description.images.len(),
        "parsed description document"
    );
    Ok(description)
}

struct DescriptionParser<'a> {
    document: &'a Document,
    options: &'a ParseOptions,
}

impl<'a> DescriptionParser<'a> {
    fn parse(&self) -> Result<Description, Error> {
        let root = self
            .document
            .validate_root(ns::OPENSEARCH, "OpenSearchDescription")?;

        let urls = self
            .document
            .find_all(root, ns::OPENSEARCH, "Url")
            .map(|url| self.url(url))
            .collect::<Result<Vec<_>, _>>()?;
        let images = self
            .document
            .find_all(root, ns::OPENSEARCH, "Image")
            .map(|image| self.image(image))
            .collect::<Result<Vec<_>, _>>()?;
        let queries = self
            .document
            .find_all(root, ns::OPENSEARCH, "Query")
            .map(|query| self.query(query))
            .collect::<Result<Vec<_>, _>>()?;
        let syndication_right = match self.text(root, "SyndicationRight") {
            Some(text) => text.trim().parse::<SyndicationRight>()?,
            None => defaults::SYNDICATION_RIGHT,
        };

        Ok(Description {
            short_name: self.required_text(root, "ShortName")?,
            description: self.required_text(root, "Description")?,
            urls,
            tags: self
                .text(root, "Tags")
                .map(|tags| tags.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            images,
            long_name: self.text(root, "LongName"),
            contact: self.text(root, "Contact"),
            queries,
            developer: self.text(root, "Developer"),
            attribution: self.text(root, "Attribution"),
            syndication_right,
            adult_content: parse_adult_content(self.text(root, "AdultContent").as_deref()),
            languages: self.texts_or_default(root, "Language", defaults::LANGUAGES),
            input_encodings: self.texts_or_default(
                root,
                "InputEncoding",
                defaults::INPUT_ENCODINGS,
            ),
            output_encodings: self.texts_or_default(
                root,
                "OutputEncoding",
                defaults::OUTPUT_ENCODINGS,
            ),
        })
    }

    fn url(&self, node: Node) -> Result<Url, Error> {
        let method = match self.extension_attribute(node, "method") {
            Some(method) => method.parse::<HttpMethod>()?,
            None => defaults::METHOD,
        };
        let parameters = self
            .document
            .find_all(node, ns::PARAMETERS, "Parameter")
            .map(|parameter| self.parameter(node, parameter))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Url {
            template: self.required_attribute(node, "Url", "template")?,
            mime_type: self.required_attribute(node, "Url", "type")?,
            rel: self
                .attribute(node, "rel")
                .unwrap_or_else(|| defaults::REL.to_string()),
            index_offset: self.integer_or(node, "indexOffset", defaults::INDEX_OFFSET)?,
            page_offset: self.integer_or(node, "pageOffset", defaults::PAGE_OFFSET)?,
            method,
            enctype: self.extension_attribute(node, "enctype"),
            parameters,
        })
    }

    /// `method` and `enctype` belong to the parameter extension, but are
    /// often written without a namespace.
    fn extension_attribute(&self, node: Node, local_name: &str) -> Option<String> {
        self.document
            .attribute_ns(node, ns::PARAMETERS, local_name)
            .or_else(|| self.document.attribute(node, local_name))
            .map(str::to_string)
    }

    fn parameter(&self, url: Node, node: Node) -> Result<Parameter, Error> {
        let option_parent = match self.options.option_scope {
            OptionScope::Parameter => node,
            OptionScope::Url => url,
        };
        let options = self
            .document
            .find_all(option_parent, ns::PARAMETERS, "Option")
            .map(|option| {
                Ok(ParameterOption {
                    value: self.required_attribute(option, "Option", "value")?,
                    label: self.attribute(option, "label"),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Parameter {
            name: self.required_attribute(node, "Parameter", "name")?,
            value: self.attribute(node, "value"),
            minimum: self.integer_or(node, "minimum", defaults::MINIMUM)?,
            maximum: self.integer_or(node, "maximum", defaults::MAXIMUM)?,
            pattern: self.attribute(node, "pattern"),
            title: self.attribute(node, "title"),
            min_exclusive: self.limit(node, "minExclusive"),
            max_exclusive: self.limit(node, "maxExclusive"),
            min_inclusive: self.limit(node, "minInclusive"),
            max_inclusive: self.limit(node, "maxInclusive"),
            step: self.limit(node, "step"),
            options,
        })
    }

    fn image(&self, node: Node) -> Result<Image, Error> {
        Ok(Image {
            url: self
                .document
                .text(node)
                .ok_or(Error::MissingElement { element: "Image" })?,
            width: parse_optional_integer("width", self.document.attribute(node, "width"))?,
            height: parse_optional_integer("height", self.document.attribute(node, "height"))?,
            mime_type: self.attribute(node, "type"),
        })
    }

    fn query(&self, node: Node) -> Result<Query, Error> {
        let extra_parameters = self
            .document
            .attributes(node)
            .filter(|attribute| !attribute.namespace.is_empty())
            .map(|attribute| {
                (
                    ExtensionName::new(attribute.namespace, attribute.local_name),
                    attribute.value.to_string(),
                )
            })
            .collect::<BTreeMap<_, _>>();
        let integer = |local_name: &'static str| {
            parse_optional_integer::<u64>(local_name, self.document.attribute(node, local_name))
        };
        Ok(Query {
            role: self.required_attribute(node, "Query", "role")?,
            title: self.attribute(node, "title"),
            total_results: integer("totalResults")?,
            search_terms: self.attribute(node, "searchTerms"),
            count: integer("count")?,
            start_index: integer("startIndex")?,
            start_page: integer("startPage")?,
            language: self.attribute(node, "language"),
            input_encoding: self.attribute(node, "inputEncoding"),
            output_encoding: self.attribute(node, "outputEncoding"),
            extra_parameters,
        })
    }

    fn text(&self, node: Node, local_name: &str) -> Option<String> {
        self.document.find_text(node, ns::OPENSEARCH, local_name)
    }

    fn required_text(&self, node: Node, element: &'static str) -> Result<String, Error> {
        self.text(node, element)
            .ok_or(Error::MissingElement { element })
    }

    fn texts_or_default(&self, node: Node, local_name: &str, default: &[&str]) -> Vec<String> {
        let texts = self
            .document
            .find_all(node, ns::OPENSEARCH, local_name)
            .filter_map(|child| self.document.text(child))
            .collect::<Vec<_>>();
        if texts.is_empty() {
            tracing::trace!(local_name, "no values, using default");
            defaults::owned(default)
        } else {
            texts
        }
    }

    fn attribute(&self, node: Node, local_name: &str) -> Option<String> {
        self.document.attribute(node, local_name).map(str::to_string)
    }

    fn required_attribute(
        &self,
        node: Node,
        element: &'static str,
        attribute: &'static str,
    ) -> Result<String, Error> {
        self.attribute(node, attribute)
            .ok_or(Error::MissingAttribute { element, attribute })
    }

    fn integer_or(&self, node: Node, local_name: &'static str, default: i64) -> Result<i64, Error> {
        match self.document.attribute(node, local_name) {
            Some(raw) => parse_integer(local_name, raw),
            None => Ok(default),
        }
    }

    fn limit(&self, node: Node, local_name: &str) -> Option<Limit> {
        self.document
            .attribute(node, local_name)
            .map(parse_limit_or_step)
    }
}
