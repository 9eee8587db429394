//! Arena-backed live document: parent links, attribute edits, listener registry and the
//! open/modal state of `<dialog>` elements.

use crate::controller::Listener;
use html::{Attributes, Id, Node, parse_document};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown node {0:?}")]
    UnknownNode(Id),
    #[error("node {0:?} cannot have children")]
    NotAContainer(Id),
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document { doctype: Option<String> },
    Element { name: String, attributes: Attributes },
    Text { text: String },
    Comment { text: String },
}

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

/// Mutable document with stable node ids (`Id(1)` is the document node).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeRecord>,
    listeners: HashMap<Id, Vec<Listener>>,
    /// Modally open dialogs, most recent last.
    pub(crate) top_layer: Vec<Id>,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self::from_node(&parse_document(markup))
    }

    /// Imports `root`; a non-document root is wrapped in a fresh document node.
    pub fn from_node(root: &Node) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            listeners: HashMap::new(),
            top_layer: Vec::new(),
        };
        match root {
            Node::Document {
                doctype, children, ..
            } => {
                let id = doc.push(
                    NodeKind::Document {
                        doctype: doctype.clone(),
                    },
                    None,
                );
                doc.import(children, id);
            }
            other => {
                let id = doc.push(NodeKind::Document { doctype: None }, None);
                doc.import(std::slice::from_ref(other), id);
            }
        }
        doc
    }

    pub fn root(&self) -> Id {
        Id(1)
    }

    fn record(&self, id: Id) -> Option<&NodeRecord> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.nodes.get(index)
    }

    fn record_mut(&mut self, id: Id) -> Option<&mut NodeRecord> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.nodes.get_mut(index)
    }

    fn push(&mut self, kind: NodeKind, parent: Option<Id>) -> Id {
        self.nodes.push(NodeRecord {
            kind,
            parent,
            children: Vec::new(),
        });
        let id = Id(self.nodes.len() as u32);
        if let Some(parent) = parent.and_then(|p| self.record_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    /// Copies `nodes` (and their subtrees) under `parent`, iteratively.
    fn import(&mut self, nodes: &[Node], parent: Id) -> Vec<Id> {
        let mut top_level = Vec::with_capacity(nodes.len());
        let mut stack: Vec<(&Node, Id)> = nodes.iter().rev().map(|n| (n, parent)).collect();
        while let Some((node, parent_id)) = stack.pop() {
            let kind = match node {
                Node::Document { .. } => continue,
                Node::Element {
                    name, attributes, ..
                } => NodeKind::Element {
                    name: name.clone(),
                    attributes: to_attributes(attributes),
                },
                Node::Text { text, .. } => NodeKind::Text { text: text.clone() },
                Node::Comment { text, .. } => NodeKind::Comment { text: text.clone() },
            };
            let id = self.push(kind, Some(parent_id));
            if parent_id == parent {
                top_level.push(id);
            }
            for child in node.children().iter().rev() {
                stack.push((child, id));
            }
        }
        top_level
    }

    /// Parses `markup` and appends the result as the last children of `parent`.
    /// Returns the ids of the appended top-level nodes.
    pub fn append_markup(&mut self, parent: Id, markup: &str) -> Result<Vec<Id>, DocumentError> {
        match self.record(parent).map(|r| &r.kind) {
            None => return Err(DocumentError::UnknownNode(parent)),
            Some(NodeKind::Text { .. } | NodeKind::Comment { .. }) => {
                return Err(DocumentError::NotAContainer(parent));
            }
            Some(_) => {}
        }
        let fragment = parse_document(markup);
        Ok(self.import(fragment.children(), parent))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.record(id).is_some()
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map_or(&[], |r| r.children.as_slice())
    }

    /// Element name, `None` for other node kinds.
    pub fn name(&self, id: Id) -> Option<&str> {
        match &self.record(id)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, id: Id, tag: &str) -> bool {
        self.name(id).is_some_and(|n| n.eq_ignore_ascii_case(tag))
    }

    fn attributes(&self, id: Id) -> Option<&Attributes> {
        match &self.record(id)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    fn attributes_mut(&mut self, id: Id) -> Option<&mut Attributes> {
        match &mut self.record_mut(id)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Attribute value; valueless attributes yield `Some("")`.
    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.attributes(id)?.get(name)
    }

    pub fn has_attr(&self, id: Id, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Returns false when `id` is not an element.
    pub fn set_attr(&mut self, id: Id, name: &str, value: &str) -> bool {
        self.attributes_mut(id)
            .map(|attrs| attrs.set(name, value))
            .is_some()
    }

    pub fn set_flag(&mut self, id: Id, name: &str) -> bool {
        self.attributes_mut(id)
            .map(|attrs| attrs.set_flag(name))
            .is_some()
    }

    /// Returns true when the attribute existed.
    pub fn remove_attr(&mut self, id: Id, name: &str) -> bool {
        self.attributes_mut(id)
            .and_then(|attrs| attrs.remove(name))
            .is_some()
    }

    /// `from` and everything below it, in document order.
    pub fn descendants(&self, from: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(record) = self.record(id) else {
                continue;
            };
            out.push(id);
            stack.extend(record.children.iter().rev());
        }
        out
    }

    /// Elements carrying `name`, in document order (`querySelectorAll("[name]")`).
    pub fn elements_with_attribute(&self, name: &str) -> Vec<Id> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_attr(*id, name))
            .collect()
    }

    /// First element in document order whose `id` attribute equals `value`.
    pub fn get_element_by_id(&self, value: &str) -> Option<Id> {
        if value.is_empty() {
            return None;
        }
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(value))
    }

    /// `id`, then its parent, up to the document node.
    pub fn ancestors_inclusive(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        std::iter::successors(self.contains(id).then_some(id), |current| {
            self.parent(*current)
        })
    }

    /// Nearest inclusive ancestor element named `tag`.
    pub fn closest(&self, id: Id, tag: &str) -> Option<Id> {
        self.ancestors_inclusive(id)
            .find(|a| self.is_element_named(*a, tag))
    }

    pub fn add_listener(&mut self, id: Id, listener: Listener) {
        self.listeners.entry(id).or_default().push(listener);
    }

    pub fn listeners(&self, id: Id) -> &[Listener] {
        self.listeners.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Rebuilds a plain tree rooted at `id`, with node ids preserved.
    pub fn to_node(&self, id: Id) -> Option<Node> {
        self.record(id)?;
        // Reverse preorder visits every child before its parent.
        let mut built: HashMap<Id, Node> = HashMap::new();
        for current in self.descendants(id).into_iter().rev() {
            let Some(record) = self.record(current) else {
                continue;
            };
            let mut children = || -> Vec<Node> {
                record
                    .children
                    .iter()
                    .filter_map(|c| built.remove(c))
                    .collect()
            };
            let node = match &record.kind {
                NodeKind::Document { doctype } => Node::Document {
                    id: current,
                    doctype: doctype.clone(),
                    children: children(),
                },
                NodeKind::Element { name, attributes } => Node::Element {
                    id: current,
                    name: name.clone(),
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                        .collect(),
                    children: children(),
                },
                NodeKind::Text { text } => Node::Text {
                    id: current,
                    text: text.clone(),
                },
                NodeKind::Comment { text } => Node::Comment {
                    id: current,
                    text: text.clone(),
                },
            };
            built.insert(current, node);
        }
        built.remove(&id)
    }
}

fn to_attributes(list: &[(String, Option<String>)]) -> Attributes {
    let mut attrs = Attributes::new();
    for (k, v) in list {
        match v {
            Some(v) => attrs.set(k.as_str(), v.as_str()),
            None => attrs.set_flag(k.as_str()),
        }
    }
    attrs
}
