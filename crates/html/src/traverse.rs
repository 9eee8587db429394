use crate::{Id, Node};

/// Numbers every node with an unset id, in document order starting at 1.
pub fn assign_node_ids(root: &mut Node) {
    let mut next = 1u32;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.id() == Id::UNASSIGNED {
            node.set_id(Id(next));
            next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}
