use std::collections::HashMap;

use crate::entities::{FamilyMember, Relationship};
use crate::value_objects::Snowflake;

/// A member placed in the hierarchy with an optional spouse beside them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'a> {
    pub member: &'a FamilyMember,
    pub spouse: Option<&'a FamilyMember>,
    pub children: Vec<TreeNode<'a>>,
}

impl TreeNode<'_> {
    /// Number of members placed in this subtree, spouses included
    pub fn size(&self) -> usize {
        1 + usize::from(self.spouse.is_some())
            + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Adjacency over member positions; positions follow the input order
struct Graph {
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    spouses: Vec<Vec<usize>>,
}

impl Graph {
    fn build(members: &[FamilyMember], relationships: &[Relationship]) -> Self {
        let index: HashMap<Snowflake, usize> =
            members.iter().enumerate().map(|(i, m)| (m.id, i)).collect();
        let n = members.len();
        let mut graph = Self {
            parents: vec![Vec::new(); n],
            children: vec![Vec::new(); n],
            spouses: vec![Vec::new(); n],
        };

        for edge in relationships {
            if let Some((parent, child)) = edge.parent_child() {
                let (Some(&p), Some(&c)) = (index.get(&parent), index.get(&child)) else {
                    continue;
                };
                if p != c {
                    push_unique(&mut graph.children[p], c);
                    push_unique(&mut graph.parents[c], p);
                }
            } else if edge.is_spouse() {
                let (Some(&a), Some(&b)) =
                    (index.get(&edge.from_member_id), index.get(&edge.to_member_id))
                else {
                    continue;
                };
                if a != b {
                    push_unique(&mut graph.spouses[a], b);
                    push_unique(&mut graph.spouses[b], a);
                }
            }
        }

        for list in graph.children.iter_mut().chain(graph.spouses.iter_mut()) {
            list.sort_unstable();
        }
        graph
    }

    fn has_parent(&self, i: usize) -> bool {
        !self.parents[i].is_empty()
    }
}

fn push_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Deepest chain of generations laid out under one root. A child below the
/// cap is left unplaced and later promoted to a root of its own, which keeps
/// every consumer of the nested nodes bounded.
pub const MAX_TREE_DEPTH: usize = 256;

/// A node whose children are still being placed
struct Frame<'a> {
    member: usize,
    spouse: Option<usize>,
    depth: usize,
    pending: std::vec::IntoIter<usize>,
    children: Vec<TreeNode<'a>>,
}

struct Walker<'a, 'g> {
    members: &'a [FamilyMember],
    graph: &'g Graph,
    visited: Vec<bool>,
}

impl<'a> Walker<'a, '_> {
    fn open(&mut self, i: usize, depth: usize) -> Frame<'a> {
        self.visited[i] = true;

        let spouse = self.graph.spouses[i]
            .iter()
            .copied()
            .find(|&s| !self.visited[s]);
        if let Some(s) = spouse {
            self.visited[s] = true;
        }

        let mut child_ids = self.graph.children[i].clone();
        if let Some(s) = spouse {
            child_ids.extend_from_slice(&self.graph.children[s]);
            child_ids.sort_unstable();
            child_ids.dedup();
        }

        Frame {
            member: i,
            spouse,
            depth,
            pending: child_ids.into_iter(),
            children: Vec::new(),
        }
    }

    fn close(&self, frame: Frame<'a>) -> TreeNode<'a> {
        TreeNode {
            member: &self.members[frame.member],
            spouse: frame.spouse.map(|s| &self.members[s]),
            children: frame.children,
        }
    }

    /// Depth-first placement of `root` and everything reachable below it
    fn place(&mut self, root: usize) -> Option<TreeNode<'a>> {
        let mut stack = vec![self.open(root, 0)];
        let mut placed = None;

        while let Some(mut top) = stack.pop() {
            if let Some(c) = top.pending.next() {
                let depth = top.depth + 1;
                // an earlier sibling's subtree may already have reached it
                let descend = !self.visited[c] && depth < MAX_TREE_DEPTH;
                stack.push(top);
                if descend {
                    stack.push(self.open(c, depth));
                }
                continue;
            }

            let node = self.close(top);
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => placed = Some(node),
            }
        }

        placed
    }
}

/// Lay members out as hierarchies rooted at members with no known parent
///
/// `parent`, `adopted_parent` and `step_parent` edges read "from is a parent
/// of to"; the `child` kinds read the other way. `spouse` edges pair members
/// in either direction and `sibling` edges are ignored. Edges naming members
/// outside `members` are skipped.
///
/// Every member appears exactly once. A member takes the first unplaced
/// spouse in input order. Members left unplaced by the root pass (parent
/// cycles, chains deeper than [`MAX_TREE_DEPTH`], or a married-in member
/// whose spouse was already paired with someone else) are promoted to roots
/// at the end, in input order.
pub fn resolve_tree<'a>(
    members: &'a [FamilyMember],
    relationships: &[Relationship],
) -> Vec<TreeNode<'a>> {
    let graph = Graph::build(members, relationships);
    let mut walker = Walker {
        members,
        graph: &graph,
        visited: vec![false; members.len()],
    };
    let mut roots = Vec::new();

    for i in 0..members.len() {
        if walker.visited[i] || graph.has_parent(i) {
            continue;
        }
        // married into a branch; their spouse will pick them up
        if graph.spouses[i]
            .iter()
            .any(|&s| graph.has_parent(s) && graph.spouses[s].first() == Some(&i))
        {
            continue;
        }
        roots.extend(walker.place(i));
    }

    for i in 0..members.len() {
        if !walker.visited[i] {
            roots.extend(walker.place(i));
        }
    }

    roots
}
