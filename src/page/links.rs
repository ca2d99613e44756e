//! Anchor `href` extraction from a parsed document.

use scraper::Html;
use tracing::debug;

use crate::config::DEFAULT_MAX_DEPTH;

const ANCHOR_TAG: &str = "a";
const HREF_ATTR: &str = "href";

/// Collects every anchor `href` value in document order.
///
/// Duplicates are kept. Uses the default depth limit.
#[must_use]
pub fn extract_links(document: &Html) -> Vec<String> {
    extract_links_with_depth(document, DEFAULT_MAX_DEPTH)
}

/// Collects every anchor `href` value, descending at most `max_depth` levels.
///
/// Depth-first pre-order walk over all nodes with an explicit stack, so
/// nested anchors are found and output order matches document order.
/// Nodes deeper than `max_depth` are not visited.
#[must_use]
pub fn extract_links_with_depth(document: &Html, max_depth: usize) -> Vec<String> {
    let mut links = Vec::new();
    let mut stack = vec![(document.tree.root(), 0_usize)];
    let mut pruned = 0_usize;

    while let Some((node, depth)) = stack.pop() {
        if let Some(element) = node.value().as_element()
            && element.name() == ANCHOR_TAG
        {
            links.extend(
                element
                    .attrs()
                    .filter(|(name, _)| *name == HREF_ATTR)
                    .map(|(_, value)| value.to_string()),
            );
        }

        if depth >= max_depth {
            if node.has_children() {
                pruned += 1;
            }
            continue;
        }

        // Reverse so the first child is popped first.
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }

    if pruned > 0 {
        debug!(pruned, max_depth, "depth limit reached during link walk");
    }
    links
}
