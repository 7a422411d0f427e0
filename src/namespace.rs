use crate::idmap::{IdIndex, IdMap};

/// Well-known namespace URIs.
pub mod ns {
    /// OpenSearch 1.1, used by description documents and response elements.
    pub const OPENSEARCH: &str = "http://a9.com/-/spec/opensearch/1.1/";
    /// OpenSearch parameter extension 1.0.
    pub const PARAMETERS: &str = "http://a9.com/-/spec/opensearch/extensions/parameters/1.0/";
    /// Atom syndication format.
    pub const ATOM: &str = "http://www.w3.org/2005/Atom";
    /// Dublin Core elements 1.1.
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// GeoRSS.
    pub const GEORSS: &str = "http://www.georss.org/georss";
    /// GML 3.1.
    pub const GML: &str = "http://www.opengis.net/gml";
    /// The `xml` prefix namespace, always in scope.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) struct NamespaceId(u16);

impl IdIndex<NamespaceId> for NamespaceId {
    fn to_id(index: usize) -> NamespaceId {
        NamespaceId(index as u16)
    }

    fn from_id(id: NamespaceId) -> usize {
        id.0 as usize
    }
}

/// Namespace URIs by id. The empty string is "no namespace".
pub(crate) type NamespaceLookup = IdMap<NamespaceId, String>;
