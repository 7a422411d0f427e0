use indextree::{Arena, NodeId};

use crate::name::{Name, NameId, NameLookup};
use crate::namespace::{ns, NamespaceId, NamespaceLookup};
use crate::xmlvalue::{Element, Value};

pub(crate) type XmlArena = Arena<Value>;

/// A node in a parsed [`Document`](crate::Document).
/// This is a lightweight value and can be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// Owns the arena and the name tables of one parsed document.
#[derive(Debug)]
pub(crate) struct XmlData {
    pub(crate) arena: XmlArena,
    pub(crate) namespace_lookup: NamespaceLookup,
    pub(crate) name_lookup: NameLookup,
    pub(crate) no_namespace_id: NamespaceId,
    pub(crate) xml_namespace_id: NamespaceId,
}

impl XmlData {
    pub(crate) fn new() -> Self {
        let mut namespace_lookup = NamespaceLookup::new();
        let no_namespace_id = namespace_lookup.get_id_mut(String::new());
        let xml_namespace_id = namespace_lookup.get_id_mut(ns::XML.to_string());
        XmlData {
            arena: XmlArena::new(),
            namespace_lookup,
            name_lookup: NameLookup::new(),
            no_namespace_id,
            xml_namespace_id,
        }
    }

    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena.new_node(value))
    }

    pub(crate) fn append(&mut self, parent: Node, child: Node) {
        parent.get().append(child.get(), &mut self.arena);
    }

    pub(crate) fn add_namespace(&mut self, namespace: &str) -> NamespaceId {
        self.namespace_lookup.get_id_mut(namespace.to_string())
    }

    pub(crate) fn add_name_ns(&mut self, local: &str, namespace_id: NamespaceId) -> NameId {
        self.name_lookup.get_id_mut(Name::new(local, namespace_id))
    }

    /// Look up a name by namespace URI and local name. Returns `None` if the
    /// name never occurs in the document.
    pub(crate) fn name_ns(&self, namespace: &str, local: &str) -> Option<NameId> {
        let namespace_id = self.namespace_lookup.get_id(&namespace.to_string())?;
        self.name_lookup.get_id(&Name::new(local, namespace_id))
    }

    pub(crate) fn namespace_id_of(&self, name_id: NameId) -> NamespaceId {
        self.name_lookup.get_value(name_id).namespace_id
    }

    /// Namespace URI and local name.
    pub(crate) fn name_ns_str(&self, name_id: NameId) -> (&str, &str) {
        let name = self.name_lookup.get_value(name_id);
        (
            self.namespace_lookup.get_value(name.namespace_id).as_str(),
            name.local.as_str(),
        )
    }

    #[inline]
    pub(crate) fn value(&self, node: Node) -> &Value {
        self.arena[node.get()].get()
    }

    pub(crate) fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(&self.arena).map(Node::new)
    }
}
