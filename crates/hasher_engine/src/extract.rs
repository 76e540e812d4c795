use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

/// Elements whose text a reader never sees.
const DISCARD_PARENTS: &[&str] = &["script", "style"];

/// Extract the text a human would see from a DOM serialization.
///
/// Walks every text node in document order. Text under the document root or
/// inside `script`/`style` is invisible; comments are not text nodes and
/// never contribute. Visible pieces are trimmed, empties dropped, and the
/// rest joined with single spaces.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut pieces: Vec<String> = Vec::new();
    for node in doc.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        if !is_visible(&node) {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed.to_string());
        }
    }
    pieces.join(" ")
}

fn is_visible(node: &NodeRef<'_, Node>) -> bool {
    match node.parent().map(|parent| parent.value()) {
        Some(Node::Element(element)) => !DISCARD_PARENTS.contains(&element.name()),
        // Text hanging directly off the document root is not rendered.
        _ => false,
    }
}
