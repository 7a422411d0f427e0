use std::borrow::Cow;

use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::entity::{parse_attribute, parse_entities};
use crate::error::Error;
use crate::namespace::NamespaceId;
use crate::xmldata::{Node, XmlData};
use crate::xmlvalue::{Element, Value};

/// An element start tag that has been seen but not yet closed with `>` or
/// `/>`, so its namespace declarations are not complete yet.
struct PendingElement<'a> {
    prefix: &'a str,
    local: &'a str,
    declarations: Vec<(&'a str, Cow<'a, str>)>,
    attributes: Vec<(&'a str, &'a str, Cow<'a, str>)>,
}

impl<'a> PendingElement<'a> {
    fn new(prefix: &'a str, local: &'a str) -> Self {
        PendingElement {
            prefix,
            local,
            declarations: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

struct OpenElement<'a> {
    prefix: &'a str,
    local: &'a str,
    node: Node,
    declarations: Vec<(&'a str, NamespaceId)>,
}

struct DocumentBuilder<'a> {
    data: XmlData,
    root: Node,
    document_element: Option<Node>,
    pending: Option<PendingElement<'a>>,
    open: Vec<OpenElement<'a>>,
}

fn qname(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

impl<'a> DocumentBuilder<'a> {
    fn new() -> Self {
        let mut data = XmlData::new();
        let root = data.new_node(Value::Root);
        DocumentBuilder {
            data,
            root,
            document_element: None,
            pending: None,
            open: Vec::new(),
        }
    }

    fn attribute(&mut self, prefix: &'a str, local: &'a str, value: &'a str) -> Result<(), Error> {
        let value = parse_attribute(value)?;
        if let Some(pending) = &mut self.pending {
            if prefix == "xmlns" {
                pending.declarations.push((local, value));
            } else if prefix.is_empty() && local == "xmlns" {
                pending.declarations.push(("", value));
            } else {
                pending.attributes.push((prefix, local, value));
            }
        }
        Ok(())
    }

    /// Resolve a prefix, looking at the declarations of the element being
    /// opened first and then at the open ancestors.
    fn resolve(&self, own: &[(&'a str, NamespaceId)], prefix: &str) -> Result<NamespaceId, Error> {
        let declared = own
            .iter()
            .chain(self.open.iter().rev().flat_map(|open| open.declarations.iter()))
            .find(|(declared, _)| *declared == prefix)
            .map(|(_, namespace_id)| *namespace_id);
        match (declared, prefix) {
            (Some(namespace_id), _) => Ok(namespace_id),
            (None, "") => Ok(self.data.no_namespace_id),
            (None, "xml") => Ok(self.data.xml_namespace_id),
            (None, _) => Err(Error::UnknownPrefix(prefix.to_string())),
        }
    }

    fn open_element(&mut self) -> Result<(), Error> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let declarations = pending
            .declarations
            .iter()
            .map(|(prefix, uri)| (*prefix, self.data.add_namespace(uri)))
            .collect::<Vec<_>>();
        let namespace_id = self.resolve(&declarations, pending.prefix)?;
        let name_id = self.data.add_name_ns(pending.local, namespace_id);

        let mut attributes = Vec::with_capacity(pending.attributes.len());
        for (prefix, local, value) in pending.attributes {
            // unprefixed attributes are never in the default namespace
            let namespace_id = if prefix.is_empty() {
                self.data.no_namespace_id
            } else {
                self.resolve(&declarations, prefix)?
            };
            let attribute_name = self.data.add_name_ns(local, namespace_id);
            attributes.push((attribute_name, value.into_owned()));
        }

        let node = self
            .data
            .new_node(Value::Element(Element::new(name_id, attributes)));
        let parent = match self.open.last() {
            Some(open) => open.node,
            None => {
                if self.document_element.is_some() {
                    return Err(Error::MultipleDocumentElements);
                }
                self.document_element = Some(node);
                self.root
            }
        };
        self.data.append(parent, node);
        self.open.push(OpenElement {
            prefix: pending.prefix,
            local: pending.local,
            node,
            declarations,
        });
        Ok(())
    }

    fn close_element(&mut self, prefix: &str, local: &str) -> Result<(), Error> {
        let open = self.open.pop().ok_or_else(|| Error::UnbalancedTag {
            expected: String::new(),
            found: qname(prefix, local),
        })?;
        if open.prefix != prefix || open.local != local {
            return Err(Error::UnbalancedTag {
                expected: qname(open.prefix, open.local),
                found: qname(prefix, local),
            });
        }
        Ok(())
    }

    fn close_empty_element(&mut self) {
        self.open.pop();
    }

    fn text(&mut self, text: Cow<'a, str>) {
        // whitespace outside of the document element is dropped
        if let Some(open) = self.open.last() {
            let parent = open.node;
            let node = self.data.new_node(Value::Text(text.into_owned()));
            self.data.append(parent, node);
        }
    }

    fn finish(self) -> Result<(XmlData, Node), Error> {
        if let Some(open) = self.open.last() {
            return Err(Error::UnclosedElement(qname(open.prefix, open.local)));
        }
        let document_element = self.document_element.ok_or(Error::NoDocumentElement)?;
        Ok((self.data, document_element))
    }
}

/// Parse XML text into a tree, resolving all names to their namespaces.
/// Returns the tree and its document element.
pub(crate) fn parse(xml: &str) -> Result<(XmlData, Node), Error> {
    let mut builder = DocumentBuilder::new();

    for token in Tokenizer::from(xml) {
        match token? {
            Token::ElementStart { prefix, local, .. } => {
                builder.pending = Some(PendingElement::new(prefix.as_str(), local.as_str()));
            }
            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => {
                builder.attribute(prefix.as_str(), local.as_str(), value.as_str())?;
            }
            Token::ElementEnd { end, .. } => match end {
                ElementEnd::Open => builder.open_element()?,
                ElementEnd::Empty => {
                    builder.open_element()?;
                    builder.close_empty_element();
                }
                ElementEnd::Close(prefix, local) => {
                    builder.close_element(prefix.as_str(), local.as_str())?
                }
            },
            Token::Text { text } => builder.text(parse_entities(text.as_str())?),
            Token::Cdata { text, .. } => builder.text(Cow::Borrowed(text.as_str())),
            _ => {}
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_element_name(xml: &str) -> (String, String) {
        let (data, node) = parse(xml).unwrap();
        let element = data.element(node).unwrap();
        let (namespace, local) = data.name_ns_str(element.name_id);
        (namespace.to_string(), local.to_string())
    }

    #[test]
    fn test_default_namespace() {
        assert_eq!(
            document_element_name(r#"<a xmlns="http://example.com"/>"#),
            ("http://example.com".to_string(), "a".to_string())
        );
    }

    #[test]
    fn test_prefixed_namespace() {
        assert_eq!(
            document_element_name(r#"<x:a xmlns:x="http://example.com"></x:a>"#),
            ("http://example.com".to_string(), "a".to_string())
        );
    }

    #[test]
    fn test_no_namespace() {
        assert_eq!(
            document_element_name(r#"<a/>"#),
            ("".to_string(), "a".to_string())
        );
    }

    #[test]
    fn test_undeclared_default_namespace() {
        let (data, node) = parse(r#"<a xmlns="http://example.com"><b xmlns=""/></a>"#).unwrap();
        let child = data.children(node).next().unwrap();
        let element = data.element(child).unwrap();
        assert_eq!(data.name_ns_str(element.name_id), ("", "b"));
    }

    #[test]
    fn test_unknown_prefix() {
        assert!(matches!(
            parse(r#"<x:a/>"#),
            Err(Error::UnknownPrefix(prefix)) if prefix == "x"
        ));
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            parse(r#"<a><b></a></b>"#),
            Err(Error::UnbalancedTag { .. })
        ));
    }

    #[test]
    fn test_entities_in_text_and_attributes() {
        let (data, node) = parse(r#"<a b="&lt;1&gt;">x &amp; y</a>"#).unwrap();
        let element = data.element(node).unwrap();
        assert_eq!(element.attributes[0].1, "<1>");
        let text = data.children(node).next().unwrap();
        assert!(matches!(data.value(text), Value::Text(text) if text == "x & y"));
    }
}
