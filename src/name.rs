use crate::idmap::{IdIndex, IdMap};
use crate::namespace::NamespaceId;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) struct NameId(u32);

impl IdIndex<NameId> for NameId {
    fn to_id(index: usize) -> NameId {
        NameId(index as u32)
    }

    fn from_id(id: NameId) -> usize {
        id.0 as usize
    }
}

/// A resolved name: local name plus namespace.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) struct Name {
    pub(crate) local: String,
    pub(crate) namespace_id: NamespaceId,
}

impl Name {
    pub(crate) fn new(local: &str, namespace_id: NamespaceId) -> Self {
        Self {
            local: local.to_string(),
            namespace_id,
        }
    }
}

pub(crate) type NameLookup = IdMap<NameId, Name>;
