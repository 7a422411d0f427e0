use std::io::Write;

use crate::entity::{serialize_attribute, serialize_text};
use crate::error::Error;
use crate::fixed::{default_namespace, prefix_in_scope, Content, Element, Name, Prefix};

/// Options for serializing a [`fixed::Element`](crate::fixed::Element) tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// Pretty-print with this many spaces per level. Elements that contain
    /// text are never reindented, so text content is preserved exactly.
    pub indent: Option<usize>,
    /// Emit an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub declaration: bool,
}

/// Serialize an element tree to a string.
pub fn serialize_xml_string(element: &Element, options: &SerializeOptions) -> Result<String, Error> {
    let mut buf = Vec::new();
    serialize_xml_write(element, options, &mut buf)?;
    // we only ever write valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize an element tree to a writer, as UTF-8.
pub fn serialize_xml_write<W: Write>(
    element: &Element,
    options: &SerializeOptions,
    w: &mut W,
) -> Result<(), Error> {
    if options.declaration {
        w.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        if options.indent.is_some() {
            w.write_all(b"\n")?;
        }
    }
    let mut serializer = XmlSerializer {
        scope: Vec::new(),
        indent: options.indent,
    };
    serializer.serialize_element(w, element, 0)?;
    if options.indent.is_some() {
        w.write_all(b"\n")?;
    }
    Ok(())
}

struct XmlSerializer<'a> {
    scope: Vec<&'a Prefix>,
    indent: Option<usize>,
}

impl<'a> XmlSerializer<'a> {
    fn element_fullname(&self, name: &Name) -> Result<String, Error> {
        if name.namespace.is_empty() {
            if !default_namespace(&self.scope).is_empty() {
                return Err(Error::NoPrefixForNamespace(String::new()));
            }
            return Ok(name.local_name.clone());
        }
        let prefix = prefix_in_scope(&self.scope, &name.namespace, false)
            .ok_or_else(|| Error::NoPrefixForNamespace(name.namespace.clone()))?;
        Ok(fullname(prefix, &name.local_name))
    }

    fn attribute_fullname(&self, name: &Name) -> Result<String, Error> {
        if name.namespace.is_empty() {
            return Ok(name.local_name.clone());
        }
        let prefix = prefix_in_scope(&self.scope, &name.namespace, true)
            .ok_or_else(|| Error::NoPrefixForNamespace(name.namespace.clone()))?;
        Ok(fullname(prefix, &name.local_name))
    }

    fn serialize_element<W: Write>(
        &mut self,
        w: &mut W,
        element: &'a Element,
        depth: usize,
    ) -> Result<(), Error> {
        let scope_depth = self.scope.len();
        self.scope.extend(element.prefixes.iter());

        let fullname = self.element_fullname(&element.name)?;
        write!(w, "<{}", fullname)?;
        for prefix in &element.prefixes {
            if prefix.name.is_empty() {
                write!(w, " xmlns=\"{}\"", serialize_attribute(&prefix.namespace))?;
            } else {
                write!(
                    w,
                    " xmlns:{}=\"{}\"",
                    prefix.name,
                    serialize_attribute(&prefix.namespace)
                )?;
            }
        }
        for (name, value) in &element.attributes {
            write!(
                w,
                " {}=\"{}\"",
                self.attribute_fullname(name)?,
                serialize_attribute(value)
            )?;
        }

        if element.children.is_empty() {
            write!(w, "/>")?;
            self.scope.truncate(scope_depth);
            return Ok(());
        }
        write!(w, ">")?;

        let has_text = element
            .children
            .iter()
            .any(|child| matches!(child, Content::Text(_)));
        let indent = if has_text { None } else { self.indent };
        for child in &element.children {
            match child {
                Content::Text(text) => write!(w, "{}", serialize_text(text))?,
                Content::Element(child) => {
                    if let Some(indent) = indent {
                        write!(w, "\n{}", " ".repeat(indent * (depth + 1)))?;
                    }
                    self.serialize_element(w, child, depth + 1)?;
                }
            }
        }
        if let Some(indent) = indent {
            write!(w, "\n{}", " ".repeat(indent * depth))?;
        }
        write!(w, "</{}>", fullname)?;

        self.scope.truncate(scope_depth);
        Ok(())
    }
}

fn fullname(prefix: &str, local_name: &str) -> String {
    if prefix.is_empty() {
        local_name.to_string()
    } else {
        format!("{}:{}", prefix, local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    const A: &str = "http://example.com/a";
    const B: &str = "http://example.com/b";

    fn sample() -> Element {
        Element::new(A, "doc")
            .with_prefix("", A)
            .with_prefix("b", B)
            .with_child(Element::new(A, "title").with_text("Fish & Chips"))
            .with_child(
                Element::new(B, "item")
                    .with_attribute(Name::local("q"), "\"x\"")
                    .with_attribute(Name::new(B, "r"), "1"),
            )
    }

    #[rstest]
    fn serialize(
        #[values(
            ("compact", SerializeOptions::default()),
            ("indented", SerializeOptions { indent: Some(2), declaration: false }),
            ("declaration", SerializeOptions { indent: None, declaration: true }),
        )]
        value: (&str, SerializeOptions),
    ) {
        let (name, options) = value;
        let output = serialize_xml_string(&sample(), &options).unwrap();
        assert!(output.contains("<title>Fish &amp; Chips</title>"), "{}: {}", name, output);
        assert!(output.contains(r#"<b:item q="&quot;x&quot;" b:r="1"/>"#), "{}: {}", name, output);
    }

    #[test]
    fn test_compact() {
        let output = serialize_xml_string(&sample(), &SerializeOptions::default()).unwrap();
        assert_snapshot!(output, @r#"<doc xmlns="http://example.com/a" xmlns:b="http://example.com/b"><title>Fish &amp; Chips</title><b:item q="&quot;x&quot;" b:r="1"/></doc>"#);
    }

    #[test]
    fn test_indented() {
        let options = SerializeOptions {
            indent: Some(2),
            declaration: true,
        };
        let output = serialize_xml_string(&sample(), &options).unwrap();
        assert_eq!(
            output,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <doc xmlns=\"http://example.com/a\" xmlns:b=\"http://example.com/b\">\n  \
             <title>Fish &amp; Chips</title>\n  \
             <b:item q=\"&quot;x&quot;\" b:r=\"1\"/>\n\
             </doc>\n"
        );
    }

    #[test]
    fn test_missing_prefix() {
        let element = Element::new(A, "doc");
        assert!(matches!(
            serialize_xml_string(&element, &SerializeOptions::default()),
            Err(Error::NoPrefixForNamespace(namespace)) if namespace == A
        ));
    }

    #[test]
    fn test_attribute_needs_real_prefix() {
        let mut element = Element::new(A, "doc")
            .with_prefix("", A)
            .with_attribute(Name::new(A, "x"), "1");
        element.create_missing_prefixes();
        let output = serialize_xml_string(&element, &SerializeOptions::default()).unwrap();
        assert_eq!(
            output,
            r#"<doc xmlns="http://example.com/a" xmlns:n0="http://example.com/a" n0:x="1"/>"#
        );
    }
}
