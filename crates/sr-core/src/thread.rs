//! Rebuilds comment threads from the flat list a store returns.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Comment, CommentId};

/// Replies deeper than this are drawn at this indent.
pub const MAX_INDENT_DEPTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    pub comment: Comment,
    /// 0 for top-level comments
    pub depth: usize,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn indent(&self) -> usize {
        self.depth.min(MAX_INDENT_DEPTH)
    }

    /// This node plus all of its descendants.
    pub fn size(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::size).sum::<usize>()
    }
}

/// Groups `comments` under their parents, keeping the input order among
/// siblings. A comment whose parent is not in the list is shown top-level.
pub fn build_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let known: HashSet<CommentId> = comments.iter().map(|c| c.id).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|c| attach(c, 0, &mut children))
        .collect()
}

fn attach(
    comment: Comment,
    depth: usize,
    children: &mut HashMap<CommentId, Vec<Comment>>,
) -> CommentNode {
    let replies = children
        .remove(&comment.id)
        .unwrap_or_default()
        .into_iter()
        .map(|c| attach(c, depth + 1, children))
        .collect();

    CommentNode {
        comment,
        depth,
        replies,
    }
}
