use std::io::Read;

use crate::encoding::decode;
use crate::error::Error;
use crate::name::NameId;
use crate::parse::parse;
use crate::xmldata::{Node, XmlData};
use crate::xmlvalue::Value;

/// A parsed XML document with namespace-aware access.
///
/// All lookups take a namespace URI and a local name. The prefixes used in
/// the source document play no role: `<os:ShortName>` and `<ShortName>`
/// in a default namespace are found by the same query.
///
/// ```rust
/// use opensearch_xml::Document;
///
/// let doc = Document::parse_str(
///     r#"<x:feed xmlns:x="http://www.w3.org/2005/Atom"><x:title>Hits</x:title></x:feed>"#,
/// )?;
/// let feed = doc.validate_root("http://www.w3.org/2005/Atom", "feed")?;
/// assert_eq!(
///     doc.find_text(feed, "http://www.w3.org/2005/Atom", "title"),
///     Some("Hits".to_string())
/// );
/// # Ok::<(), opensearch_xml::Error>(())
/// ```
#[derive(Debug)]
pub struct Document {
    data: XmlData,
    root: Node,
}

/// An attribute of an element, with its name resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Namespace URI. Empty string means no namespace.
    pub namespace: &'a str,
    pub local_name: &'a str,
    pub value: &'a str,
}

impl Document {
    /// Parse a document from bytes, detecting its character encoding.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let xml = decode(bytes)?;
        Self::parse_str(&xml)
    }

    /// Parse a document from text.
    pub fn parse_str(xml: &str) -> Result<Self, Error> {
        let (data, root) = parse(xml)?;
        Ok(Document { data, root })
    }

    /// Read a document from a byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    /// The document element.
    pub fn root(&self) -> Node {
        self.root
    }

    /// Check that the document element has the expected name, and return it.
    pub fn validate_root(
        &self,
        namespace: &'static str,
        local_name: &'static str,
    ) -> Result<Node, Error> {
        if self.is_element(self.root, namespace, local_name) {
            return Ok(self.root);
        }
        let (found_namespace, found) = self.name(self.root).unwrap_or_default();
        Err(Error::UnexpectedRoot {
            namespace,
            local_name,
            found_namespace: found_namespace.to_string(),
            found: found.to_string(),
        })
    }

    /// Namespace URI and local name of an element.
    pub fn name(&self, node: Node) -> Option<(&str, &str)> {
        self.data
            .element(node)
            .map(|element| self.data.name_ns_str(element.name_id))
    }

    pub fn is_element(&self, node: Node, namespace: &str, local_name: &str) -> bool {
        match (self.data.element(node), self.data.name_ns(namespace, local_name)) {
            (Some(element), Some(name_id)) => element.name_id == name_id,
            _ => false,
        }
    }

    /// Child elements, in document order.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.data
            .children(node)
            .filter(|child| self.data.element(*child).is_some())
    }

    /// All child elements with the given name, in document order.
    pub fn find_all<'a>(
        &'a self,
        node: Node,
        namespace: &str,
        local_name: &str,
    ) -> impl Iterator<Item = Node> + 'a {
        let name_id = self.data.name_ns(namespace, local_name);
        self.children(node)
            .filter(move |child| name_id.is_some() && self.element_name(*child) == name_id)
    }

    /// The first child element with the given name.
    pub fn find(&self, node: Node, namespace: &str, local_name: &str) -> Option<Node> {
        self.find_all(node, namespace, local_name).next()
    }

    /// The first child element in the given namespace, whatever its local
    /// name.
    pub fn find_in_namespace(&self, node: Node, namespace: &str) -> Option<Node> {
        let namespace_id = self.data.namespace_lookup.get_id(&namespace.to_string())?;
        self.children(node).find(|child| {
            self.element_name(*child)
                .map(|name_id| self.data.namespace_id_of(name_id) == namespace_id)
                .unwrap_or(false)
        })
    }

    /// The text of a node: its direct text children concatenated. Returns
    /// `None` when there is no text at all.
    pub fn text(&self, node: Node) -> Option<String> {
        let mut texts = self.data.children(node).filter_map(|child| match self.data.value(child) {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        });
        let first = texts.next()?;
        let mut result = first.to_string();
        for text in texts {
            result.push_str(text);
        }
        Some(result)
    }

    /// The text of the first child element with the given name.
    pub fn find_text(&self, node: Node, namespace: &str, local_name: &str) -> Option<String> {
        self.find(node, namespace, local_name)
            .and_then(|child| self.text(child))
    }

    /// An attribute without a namespace.
    pub fn attribute(&self, node: Node, local_name: &str) -> Option<&str> {
        self.attribute_ns(node, "", local_name)
    }

    /// An attribute in a namespace.
    pub fn attribute_ns(&self, node: Node, namespace: &str, local_name: &str) -> Option<&str> {
        let name_id = self.data.name_ns(namespace, local_name)?;
        self.data.element(node)?.get_attribute(name_id)
    }

    /// All attributes of an element, in document order.
    pub fn attributes(&self, node: Node) -> impl Iterator<Item = Attribute<'_>> + '_ {
        self.data
            .element(node)
            .into_iter()
            .flat_map(|element| element.attributes.iter())
            .map(|(name_id, value)| {
                let (namespace, local_name) = self.data.name_ns_str(*name_id);
                Attribute {
                    namespace,
                    local_name,
                    value,
                }
            })
    }

    fn element_name(&self, node: Node) -> Option<NameId> {
        self.data.element(node).map(|element| element.name_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const NS: &str = "http://example.com/a";

    #[test]
    fn test_validate_root() {
        let doc = Document::parse_str(r#"<doc xmlns="http://example.com/a"/>"#).unwrap();
        assert_eq!(doc.validate_root(NS, "doc").unwrap(), doc.root());
        let err = doc.validate_root(NS, "other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        let err = doc.validate_root("http://example.com/b", "doc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_find_all_ignores_prefix() {
        let doc = Document::parse_str(
            r#"<doc xmlns="http://example.com/a" xmlns:p="http://example.com/a"><a>1</a><p:a>2</p:a><b>3</b></doc>"#,
        )
        .unwrap();
        let texts = doc
            .find_all(doc.root(), NS, "a")
            .map(|node| doc.text(node).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_find_unknown_name() {
        let doc = Document::parse_str(r#"<doc><a/></doc>"#).unwrap();
        assert_eq!(doc.find(doc.root(), NS, "a"), None);
        assert_eq!(doc.find_all(doc.root(), "", "missing").count(), 0);
        assert!(doc.find(doc.root(), "", "a").is_some());
    }

    #[test]
    fn test_text() {
        let doc = Document::parse_str(r#"<doc><a/><b>x<c/>y</b></doc>"#).unwrap();
        assert_eq!(doc.find_text(doc.root(), "", "a"), None);
        assert_eq!(doc.find_text(doc.root(), "", "b"), Some("xy".to_string()));
    }

    #[test]
    fn test_attributes() {
        let doc = Document::parse_str(
            r#"<doc xmlns:e="http://example.com/a" plain="1" e:ext="2"/>"#,
        )
        .unwrap();
        assert_eq!(doc.attribute(doc.root(), "plain"), Some("1"));
        assert_eq!(doc.attribute(doc.root(), "ext"), None);
        assert_eq!(doc.attribute_ns(doc.root(), NS, "ext"), Some("2"));
        let attributes = doc.attributes(doc.root()).collect::<Vec<_>>();
        assert_eq!(
            attributes,
            vec![
                Attribute {
                    namespace: "",
                    local_name: "plain",
                    value: "1"
                },
                Attribute {
                    namespace: NS,
                    local_name: "ext",
                    value: "2"
                },
            ]
        );
    }

    #[test]
    fn test_find_in_namespace() {
        let doc = Document::parse_str(
            r#"<doc xmlns:g="http://example.com/a"><x/><g:point>1 2</g:point></doc>"#,
        )
        .unwrap();
        let node = doc.find_in_namespace(doc.root(), NS).unwrap();
        assert_eq!(doc.name(node), Some((NS, "point")));
    }

    #[test]
    fn test_from_reader() {
        let doc = Document::from_reader(&b"<doc>x</doc>"[..]).unwrap();
        assert_eq!(doc.text(doc.root()), Some("x".to_string()));
    }
}
