use crate::Node;

/// Attributes shown in outlines besides `id` and `class`.
const OUTLINE_ATTRIBUTES: &[&str] = &[
    "open",
    "data-open-dialog",
    "data-is-modal",
    "data-close-dialog",
];

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

/// Indented one-line-per-node rendering of a tree, capped at `cap` nodes.
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = INDENT_STEP.repeat(depth);
        match node {
            Node::Document { doctype, .. } => match doctype {
                Some(dt) => out.push(format!("{indent}<!{dt}>")),
                None => out.push(format!("{indent}#document")),
            },
            Node::Element { name, .. } => {
                let mut line = format!("{indent}<{name}");
                for key in ["id", "class"].iter().chain(OUTLINE_ATTRIBUTES) {
                    match node.attr(key) {
                        Some("") => {
                            line.push(' ');
                            line.push_str(key);
                        }
                        Some(value) => line.push_str(&format!(r#" {key}="{value}""#)),
                        None => {}
                    }
                }
                line.push('>');
                out.push(line);
            }
            Node::Text { text, .. } => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(format!("{indent}\"{}\"", preview(trimmed)));
                }
            }
            Node::Comment { text, .. } => {
                out.push(format!("{indent}<!-- {} -->", preview(text)));
            }
        }
        for c in node.children() {
            walk(c, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

fn preview(s: &str) -> String {
    let mut out: String = s
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if s.chars().nth(PREVIEW_CHARS).is_some() {
        out.push('…');
    }
    out
}
