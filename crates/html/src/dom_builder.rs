use crate::tokenizer::tokenize;
use crate::traverse::assign_node_ids;
use crate::types::{Id, Node, Token, TokenStream};

/// Builds a tree from a token stream.
///
/// Unmatched end tags are ignored. An end tag closes every element opened after its
/// matching start tag. Elements still open at the end of input are closed implicitly.
/// Node ids are left unassigned.
pub fn build_dom(stream: &TokenStream) -> Node {
    let atoms = stream.atoms();
    let mut open: Vec<Node> = vec![Node::Document {
        id: Id::UNASSIGNED,
        doctype: None,
        children: Vec::new(),
    }];

    for token in stream.tokens() {
        match token {
            Token::Doctype(value) => {
                if let Some(Node::Document { doctype, .. }) = open.first_mut() {
                    *doctype = Some(value.clone());
                }
            }
            Token::Comment(text) => append(
                &mut open,
                Node::Comment {
                    id: Id::UNASSIGNED,
                    text: text.clone(),
                },
            ),
            Token::Text(text) => append(
                &mut open,
                Node::Text {
                    id: Id::UNASSIGNED,
                    text: text.clone(),
                },
            ),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    id: Id::UNASSIGNED,
                    name: atoms.resolve(*name).to_string(),
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (atoms.resolve(*k).to_string(), v.clone()))
                        .collect(),
                    children: Vec::new(),
                };
                if *self_closing {
                    append(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let target = atoms.resolve(*name);
                // Index 0 is the document and never matches.
                let Some(depth) = open.iter().rposition(|n| n.is_element_named(target)) else {
                    log::trace!(target: "html.dom_builder", "ignoring unmatched </{target}>");
                    continue;
                };
                while open.len() > depth {
                    close_top(&mut open);
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }
    // The document is pushed first and never popped.
    open.pop().unwrap_or(Node::Document {
        id: Id::UNASSIGNED,
        doctype: None,
        children: Vec::new(),
    })
}

fn append(open: &mut [Node], node: Node) {
    if let Some(children) = open.last_mut().and_then(Node::children_mut) {
        children.push(node);
    }
}

fn close_top(open: &mut Vec<Node>) {
    if let Some(node) = open.pop() {
        append(open, node);
    }
}

/// Tokenize, build and number a document in one go.
pub fn parse_document(input: &str) -> Node {
    let mut dom = build_dom(&tokenize(input));
    assign_node_ids(&mut dom);
    dom
}
