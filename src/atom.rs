//! OpenSearch responses in the Atom syndication format.

use crate::access::Document;
use crate::coerce::{parse_integer, parse_temporal};
use crate::error::Error;
use crate::georss::{GeoRss, GeometryParser};
use crate::namespace::ns;
use crate::result::{SearchResultItem, SearchResultPage};
use crate::temporal::Temporal;
use crate::xmldata::Node;

/// Parse an Atom feed into a page of search results, reading geometries
/// with [`GeoRss`].
pub fn parse_atom_feed(bytes: &[u8]) -> Result<SearchResultPage, Error> {
    parse_atom_feed_with(bytes, &GeoRss)
}

/// Parse an Atom feed into a page of search results, reading the geometry
/// of each entry with `geometry_parser`.
pub fn parse_atom_feed_with(
    bytes: &[u8],
    geometry_parser: &dyn GeometryParser,
) -> Result<SearchResultPage, Error> {
    let document = Document::parse(bytes)?;
    let page = FeedParser {
        document: &document,
        geometry_parser,
    }
    .parse()?;
    tracing::debug!(
        id = %page.id,
        total_results = page.total_results,
        start_index = page.start_index,
        items = page.items.len(),
        "parsed atom feed"
    );
    Ok(page)
}

struct FeedParser<'a> {
    document: &'a Document,
    geometry_parser: &'a dyn GeometryParser,
}

impl<'a> FeedParser<'a> {
    fn parse(&self) -> Result<SearchResultPage, Error> {
        let feed = self.document.validate_root(ns::ATOM, "feed")?;
        let items = self
            .document
            .find_all(feed, ns::ATOM, "entry")
            .map(|entry| self.entry(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchResultPage {
            title: self.required_text(feed, "title")?,
            id: self.required_text(feed, "id")?,
            source: self
                .link(feed, &["search"])
                .ok_or(Error::MissingElement {
                    element: "link[@rel='search']",
                })?,
            total_results: self.required_count(feed, "totalResults")?,
            start_index: self.required_count(feed, "startIndex")?,
            items_per_page: self.required_count(feed, "itemsPerPage")?,
            items,
            creator: self.creator(feed),
            // category text rather than term, with term as fallback
            subjects: self.subjects(feed, |category| {
                self.document
                    .text(category)
                    .or_else(|| self.document.attribute(category, "term").map(str::to_string))
            }),
            r#abstract: self.text(feed, "summary"),
            publisher: self.text(feed, "generator"),
            contributors: self.contributors(feed),
            modified: self.temporal(self.text(feed, "updated"))?,
            identifier: self.document.find_text(feed, ns::DC, "identifier"),
            language: self.text(feed, "language"),
            rights: self.text(feed, "rights"),
            envelopes: Vec::new(),
            next_page: self.link(feed, &["next"]),
            previous_page: self.link(feed, &["prev", "previous"]),
            first_page: self.link(feed, &["first"]),
            last_page: self.link(feed, &["last"]),
        })
    }

    fn entry(&self, entry: Node) -> Result<SearchResultItem, Error> {
        let envelope = self
            .document
            .find_in_namespace(entry, ns::GEORSS)
            .map(|node| self.geometry_parser.parse_geometry(self.document, node))
            .transpose()?;
        Ok(SearchResultItem {
            title: self.required_text(entry, "title")?,
            id: self.required_text(entry, "id")?,
            identifier: self
                .document
                .find_text(entry, ns::DC, "identifier")
                .ok_or(Error::MissingElement {
                    element: "dc:identifier",
                })?,
            creator: self.creator(entry),
            subjects: self.subjects(entry, |category| {
                self.document
                    .attribute(category, "term")
                    .map(str::to_string)
                    .or_else(|| self.document.text(category))
            }),
            r#abstract: self.text(entry, "summary"),
            contributors: self.contributors(entry),
            modified: self.temporal(self.text(entry, "updated"))?,
            date: self.temporal(self.document.find_text(entry, ns::DC, "date"))?,
            sources: self
                .links(entry, &["via"])
                .filter_map(|link| {
                    self.document
                        .attribute(link, "href")
                        .map(str::to_string)
                        .or_else(|| self.document.text(link))
                })
                .collect(),
            language: self.text(entry, "language"),
            rights: self.text(entry, "rights"),
            envelope,
        })
    }

    fn text(&self, node: Node, local_name: &str) -> Option<String> {
        self.document.find_text(node, ns::ATOM, local_name)
    }

    fn required_text(&self, node: Node, element: &'static str) -> Result<String, Error> {
        self.text(node, element)
            .ok_or(Error::MissingElement { element })
    }

    fn required_count(&self, feed: Node, element: &'static str) -> Result<u64, Error> {
        let raw = self
            .document
            .find_text(feed, ns::OPENSEARCH, element)
            .ok_or(Error::MissingElement { element })?;
        parse_integer(element, &raw)
    }

    fn creator(&self, node: Node) -> Option<String> {
        self.text(node, "creator")
            .or_else(|| self.document.find_text(node, ns::DC, "creator"))
    }

    fn subjects<F>(&self, node: Node, subject: F) -> Vec<String>
    where
        F: Fn(Node) -> Option<String>,
    {
        self.document
            .find_all(node, ns::ATOM, "category")
            .filter_map(subject)
            .collect()
    }

    /// The name of each contributor, or the contributor text when there is
    /// no name.
    fn contributors(&self, node: Node) -> Vec<String> {
        self.document
            .find_all(node, ns::ATOM, "contributor")
            .filter_map(|contributor| {
                self.text(contributor, "name")
                    .or_else(|| self.document.text(contributor))
                    .map(|text| text.trim().to_string())
            })
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn temporal(&self, raw: Option<String>) -> Result<Option<Temporal>, Error> {
        raw.map(|raw| parse_temporal(raw.trim())).transpose()
    }

    fn links<'b>(&'b self, node: Node, rels: &'b [&'b str]) -> impl Iterator<Item = Node> + 'b {
        self.document
            .find_all(node, ns::ATOM, "link")
            .filter(move |link| {
                self.document
                    .attribute(*link, "rel")
                    .map(|rel| rels.contains(&rel))
                    .unwrap_or(false)
            })
    }

    /// The `href` of the first link with one of the given relations.
    fn link(&self, node: Node, rels: &[&str]) -> Option<String> {
        self.links(node, rels)
            .find_map(|link| self.document.attribute(link, "href"))
            .map(str::to_string)
    }
}
