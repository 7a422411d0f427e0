use crate::name::NameId;

/// A value in the parsed tree.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    /// Document root that holds everything. This is not the document
    /// element.
    Root,
    Element(Element),
    Text(String),
}

/// A parsed element. Names are already resolved to their namespace; the
/// prefixes used in the source are not kept.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub(crate) name_id: NameId,
    pub(crate) attributes: Vec<(NameId, String)>,
}

impl Element {
    pub(crate) fn new(name_id: NameId, attributes: Vec<(NameId, String)>) -> Self {
        Element {
            name_id,
            attributes,
        }
    }

    pub(crate) fn get_attribute(&self, name_id: NameId) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(id, _)| *id == name_id)
            .map(|(_, value)| value.as_str())
    }
}
