use std::collections::HashMap;
use std::sync::Arc;

pub type NodeId = u32;

/// Document-local node identity. `Id(0)` means "not yet assigned".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);
}

/// Interned tag/attribute name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtomId(pub u32);

/// Per-stream table of canonical (ASCII-lowercase) names.
#[derive(Debug, Default)]
pub struct AtomTable {
    atoms: Vec<Arc<str>>,
    map: HashMap<Arc<str>, AtomId>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_ascii_lowercase(&mut self, name: &str) -> AtomId {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            let folded = name.to_ascii_lowercase();
            return self.intern_canonical(&folded);
        }
        self.intern_canonical(name)
    }

    fn intern_canonical(&mut self, name: &str) -> AtomId {
        if let Some(id) = self.map.get(name) {
            return *id;
        }
        let id = AtomId(self.atoms.len() as u32);
        let atom = Arc::<str>::from(name);
        self.atoms.push(Arc::clone(&atom));
        self.map.insert(atom, id);
        id
    }

    /// Panics on ids from a different table.
    pub fn resolve(&self, id: AtomId) -> &str {
        &self.atoms[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: AtomId,
        attributes: Vec<(AtomId, Option<String>)>,
        self_closing: bool,
    },
    EndTag(AtomId),
    Comment(String),
    Text(String),
}

/// Tokens plus the atom table their names resolve against.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    atoms: AtomTable,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, atoms: AtomTable) -> Self {
        Self { tokens, atoms }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. }
            | Node::Element { id, .. }
            | Node::Text { id, .. }
            | Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. }
            | Node::Element { id, .. }
            | Node::Text { id, .. }
            | Node::Comment { id, .. } => *id = new_id,
        }
    }

    /// Element name, `None` for non-elements.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Attribute lookup (ASCII case-insensitive). Valueless attributes yield `Some("")`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// True if the whitespace-separated attribute value contains `token`.
    pub fn attr_has_token(&self, key: &str, token: &str) -> bool {
        self.attr(key)
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == token))
    }

    pub fn is_element_named(&self, tag: &str) -> bool {
        self.name().is_some_and(|n| n.eq_ignore_ascii_case(tag))
    }
}

/// Tears subtrees down with an explicit stack so deeply nested trees cannot overflow.
impl Drop for Node {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        if children.iter().all(|c| c.children().is_empty()) {
            return;
        }
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Some(grandchildren) = node.children_mut() {
                pending.append(grandchildren);
            }
        }
    }
}
