// scangen - generates dispatch code for hand-written scanners.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Character-keyed prefix trie over keyword and symbol strings.
//!
//! The trie is stored as an arena of nodes addressed by [NodeId].  Each node
//! keeps its outgoing edges, one per distinct next character, in the order in
//! which the characters were first inserted, and optionally the string that
//! ends at that node along with the token name associated with it.

/// Identifies a node in a [Trie].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A string inserted into a [Trie], together with its token name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal {
    pub value: String,
    pub token: String,
}

#[derive(Clone, Debug, Default)]
struct Node {
    children: Vec<(char, NodeId)>,
    terminal: Option<Terminal>,
}

#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Returns the number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Inserts `value` with associated `token`.  Inserting a value that is
    /// already present replaces its token.  Inserting the empty string has no
    /// effect.
    pub fn insert(&mut self, value: &str, token: &str) {
        if value.is_empty() {
            return;
        }

        let mut id = Self::ROOT;
        for c in value.chars() {
            id = match self.child(id, c) {
                Some(child) => child,
                None => self.push_child(id, c),
            };
        }
        self.nodes[id.0].terminal = Some(Terminal {
            value: value.into(),
            token: token.into(),
        });
    }

    /// Returns true if `prefix` is a path through the trie, that is, if it
    /// is a prefix of some inserted string.
    pub fn contains(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Returns the node reached by following `prefix` from the root.
    pub fn find(&self, prefix: &str) -> Option<Branch<'_>> {
        self.root().descend(prefix)
    }

    pub fn root(&self) -> Branch<'_> {
        self.branch(Self::ROOT)
    }

    pub fn branch(&self, id: NodeId) -> Branch<'_> {
        Branch { trie: self, id }
    }

    fn child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .find(|(child_c, _)| *child_c == c)
            .map(|(_, child)| *child)
    }

    fn push_child(&mut self, parent: NodeId, c: char) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::default());
        self.nodes[parent.0].children.push((c, id));
        id
    }
}

/// A view of one node of a [Trie] and the subtrie below it.
#[derive(Copy, Clone, Debug)]
pub struct Branch<'a> {
    trie: &'a Trie,
    id: NodeId,
}

impl<'a> Branch<'a> {
    fn node(&self) -> &'a Node {
        &self.trie.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The string that ends exactly at this node, if any.
    pub fn terminal(&self) -> Option<&'a Terminal> {
        self.node().terminal.as_ref()
    }

    /// The outgoing edges of this node, in first-insertion order.
    pub fn children(self) -> impl ExactSizeIterator<Item = (char, Branch<'a>)> + 'a {
        let trie = self.trie;
        self.node()
            .children
            .iter()
            .map(move |&(c, id)| (c, trie.branch(id)))
    }

    pub fn n_children(&self) -> usize {
        self.node().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    fn descend(self, prefix: &str) -> Option<Branch<'a>> {
        let mut chars = prefix.chars();
        match chars.next() {
            None => Some(self),
            Some(c) => self
                .trie
                .child(self.id, c)
                .and_then(|child| self.trie.branch(child).descend(chars.as_str())),
        }
    }

    /// Returns the single string in this subtrie, if the subtrie does not
    /// branch.
    ///
    /// A node without children yields its own terminal.  A node with exactly
    /// one child and no terminal of its own yields whatever its child yields.
    /// Any other node has more than one string below it and yields `None`.
    pub fn extract(&self) -> Option<&'a Terminal> {
        let node = self.node();
        match node.children.as_slice() {
            [] => node.terminal.as_ref(),
            [(_, only)] if node.terminal.is_none() => self.trie.branch(*only).extract(),
            _ => None,
        }
    }
}
