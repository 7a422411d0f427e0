//! A fixed representation of a tree of elements.
//!
//! The encoder builds documents as a [`fixed::Element`](Element) tree that
//! owns all of its names and text. It does not depend on a parsed
//! [`Document`](crate::Document). Serialize it with
//! [`serialize_xml_string`](crate::serialize_xml_string) or
//! [`serialize_xml_write`](crate::serialize_xml_write).
//!
//! Example:
//!
//! ```rust
//! use opensearch_xml::{fixed, serialize_xml_string, SerializeOptions};
//!
//! let element = fixed::Element::new("http://example.com", "foo")
//!     .with_prefix("", "http://example.com")
//!     .with_text("Example");
//!
//! let xml = serialize_xml_string(&element, &SerializeOptions::default())?;
//! assert_eq!(xml, r#"<foo xmlns="http://example.com">Example</foo>"#);
//! # Ok::<(), opensearch_xml::Error>(())
//! ```

use std::collections::BTreeSet;

use crate::namespace::ns;

/// A fixed representation of an XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    /// Namespace URI. Empty string means no namespace
    pub namespace: String,
    /// Local name.
    pub local_name: String,
}

impl Name {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Name {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// A name without a namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new("", local_name)
    }
}

/// A fixed representation of an XML namespace prefix declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    /// Name of prefix. Empty string means default namespace
    pub name: String,
    /// Namespace URI.
    pub namespace: String,
}

/// A fixed representation of an XML element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// Name of element
    pub name: Name,
    /// Namespace prefix declarations
    pub prefixes: Vec<Prefix>,
    /// Attributes
    pub attributes: Vec<(Name, String)>,
    /// Children
    pub children: Vec<Content>,
}

/// A fixed representation of element content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    /// A text node
    Text(String),
    /// An element node
    Element(Element),
}

impl Element {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Element {
            name: Name::new(namespace, local_name),
            prefixes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Declare a prefix on this element.
    pub fn with_prefix(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.push(Prefix {
            name: name.into(),
            namespace: namespace.into(),
        });
        self
    }

    pub fn with_attribute(mut self, name: Name, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Add an attribute if there is a value; `None` adds nothing.
    pub fn with_optional_attribute<V: ToString>(self, name: Name, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_attribute(name, value.to_string()),
            None => self,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Add a child element if there is one; `None` adds nothing.
    pub fn with_optional_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Content::Element));
        self
    }

    /// Child elements, in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &Name) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute_name, _)| attribute_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Declare prefixes for all namespaces that are used in this tree but
    /// have no usable prefix in scope.
    ///
    /// The prefixes are named "n0", "n1", "n2", etc., skipping names that
    /// are already declared, and are added to this element.
    pub fn create_missing_prefixes(&mut self) {
        let mut missing = BTreeSet::new();
        let mut scope = Vec::new();
        collect_missing(self, &mut scope, &mut missing);
        let mut counter = 0;
        for namespace in missing {
            let name = loop {
                let candidate = format!("n{}", counter);
                counter += 1;
                if !self.prefixes.iter().any(|prefix| prefix.name == candidate) {
                    break candidate;
                }
            };
            self.prefixes.push(Prefix { name, namespace });
        }
    }
}

/// Find the prefix that an element (`attribute == false`) or attribute
/// name in `namespace` would be serialized with, given the declarations in
/// scope (innermost last). The `xml` prefix is always in scope.
///
/// Elements use the default namespace whenever it binds `namespace`, even
/// if a named prefix for the same namespace is declared more closely.
pub(crate) fn prefix_in_scope<'a>(
    scope: &[&'a Prefix],
    namespace: &str,
    attribute: bool,
) -> Option<&'a str> {
    if namespace == ns::XML {
        return Some("xml");
    }
    if !attribute && !namespace.is_empty() && default_namespace(scope) == namespace {
        return Some("");
    }
    let mut shadowed: Vec<&str> = Vec::new();
    for prefix in scope.iter().rev() {
        if shadowed.contains(&prefix.name.as_str()) {
            continue;
        }
        shadowed.push(prefix.name.as_str());
        if prefix.namespace != namespace {
            continue;
        }
        // attributes in a namespace always need a real prefix
        if attribute && prefix.name.is_empty() {
            continue;
        }
        return Some(prefix.name.as_str());
    }
    None
}

/// The namespace bound to the default prefix in scope; no namespace when
/// nothing is declared.
pub(crate) fn default_namespace<'a>(scope: &[&'a Prefix]) -> &'a str {
    scope
        .iter()
        .rev()
        .find(|prefix| prefix.name.is_empty())
        .map(|prefix| prefix.namespace.as_str())
        .unwrap_or("")
}

fn collect_missing<'a>(
    element: &'a Element,
    scope: &mut Vec<&'a Prefix>,
    missing: &mut BTreeSet<String>,
) {
    let depth = scope.len();
    scope.extend(element.prefixes.iter());
    let namespace = element.name.namespace.as_str();
    if !namespace.is_empty() && prefix_in_scope(scope, namespace, false).is_none() {
        missing.insert(namespace.to_string());
    }
    for (name, _) in &element.attributes {
        if !name.namespace.is_empty() && prefix_in_scope(scope, &name.namespace, true).is_none() {
            missing.insert(name.namespace.clone());
        }
    }
    for child in element.child_elements() {
        collect_missing(child, scope, missing);
    }
    scope.truncate(depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_parts_are_skipped() {
        let element = Element::new("", "Url")
            .with_optional_attribute(Name::local("rel"), None::<&str>)
            .with_optional_attribute(Name::local("indexOffset"), Some(0))
            .with_optional_child(None);
        assert_eq!(element.attributes, vec![(Name::local("indexOffset"), "0".to_string())]);
        assert!(element.children.is_empty());
    }

    #[test]
    fn test_create_missing_prefixes() {
        let mut element = Element::new("http://example.com/a", "doc")
            .with_prefix("", "http://example.com/a")
            .with_prefix("n0", "http://example.com/taken")
            .with_attribute(Name::new("http://example.com/a", "x"), "1")
            .with_child(
                Element::new("http://example.com/a", "child")
                    .with_attribute(Name::new("http://example.com/b", "y"), "2"),
            );
        element.create_missing_prefixes();
        assert_eq!(
            &element.prefixes[2..],
            &[
                Prefix {
                    name: "n1".to_string(),
                    namespace: "http://example.com/a".to_string()
                },
                Prefix {
                    name: "n2".to_string(),
                    namespace: "http://example.com/b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_element_prefers_default_namespace() {
        let default = Prefix {
            name: "".to_string(),
            namespace: "http://example.com/a".to_string(),
        };
        let named = Prefix {
            name: "n0".to_string(),
            namespace: "http://example.com/a".to_string(),
        };
        let scope = vec![&default, &named];
        assert_eq!(prefix_in_scope(&scope, "http://example.com/a", false), Some(""));
        assert_eq!(prefix_in_scope(&scope, "http://example.com/a", true), Some("n0"));
    }

    #[test]
    fn test_shadowed_prefix_is_not_used() {
        let outer = Prefix {
            name: "p".to_string(),
            namespace: "http://example.com/a".to_string(),
        };
        let inner = Prefix {
            name: "p".to_string(),
            namespace: "http://example.com/b".to_string(),
        };
        let scope = vec![&outer, &inner];
        assert_eq!(prefix_in_scope(&scope, "http://example.com/a", false), None);
        assert_eq!(
            prefix_in_scope(&scope, "http://example.com/b", true),
            Some("p")
        );
    }
}
