use super::{Matcher, TokenSpec};
use crate::core::{
    doc::{Doc, Sentence},
    error::RegistryError,
};

/// How a pattern node relates to the earlier node it links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The earlier node is this node's head.
    HeadOf,
    /// This node is the earlier node's head.
    DependentOf,
    /// The earlier node dominates this node within `n` head links.
    AncestorWithin(usize),
    /// This node is a dependent of the earlier node, to its left.
    LeftDependent,
    /// This node is a dependent of the earlier node, to its right.
    RightDependent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub to: usize,
    pub relation: Relation,
}

#[derive(Debug, Clone)]
pub struct GraphNode {
    pub spec: TokenSpec,
    /// `None` only for the root node.
    pub link: Option<Link>,
    /// Constrains the match but is left out of the reported span.
    pub phantom: bool,
}

/// Constraint graph over possibly non-contiguous tokens of one sentence.
///
/// Node 0 is the pattern root; every later node links to an earlier one.
/// A token is used at most once per assignment.
#[derive(Debug, Clone)]
pub struct GraphRule {
    pub nodes: Vec<GraphNode>,
}

impl GraphRule {
    pub fn new(root: TokenSpec) -> Self {
        Self {
            nodes: vec![GraphNode {
                spec: root,
                link: None,
                phantom: false,
            }],
        }
    }

    pub fn node(self, spec: TokenSpec, to: usize, relation: Relation) -> Self {
        self.push(spec, to, relation, false)
    }

    pub fn phantom(self, spec: TokenSpec, to: usize, relation: Relation) -> Self {
        self.push(spec, to, relation, true)
    }

    fn push(mut self, spec: TokenSpec, to: usize, relation: Relation, phantom: bool) -> Self {
        self.nodes.push(GraphNode {
            spec,
            link: Some(Link { to, relation }),
            phantom,
        });
        self
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidPattern {
            pattern: format!("graph of {} nodes", self.nodes.len()),
            reason,
        };
        if self.nodes.iter().all(|n| n.phantom) {
            return Err(invalid("every node is a phantom".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match (index, node.link) {
                (0, None) => {}
                (0, Some(_)) => return Err(invalid("root node cannot link".to_string())),
                (_, None) => return Err(invalid(format!("node {} has no link", index))),
                (_, Some(link)) if link.to >= index => {
                    return Err(invalid(format!(
                        "node {} links forward to node {}",
                        index, link.to
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn candidates(&self, doc: &Doc, sentence: Sentence, link: Link, anchor: usize) -> Vec<usize> {
        match link.relation {
            Relation::HeadOf => doc.children(anchor).map(|t| t.i).collect(),
            Relation::DependentOf => {
                let head = doc.tokens[anchor].head;
                if head == anchor { vec![] } else { vec![head] }
            }
            Relation::AncestorWithin(hops) => sentence
                .indices()
                .filter(|&i| i != anchor && doc.is_ancestor(anchor, i, hops))
                .collect(),
            Relation::LeftDependent => doc
                .children(anchor)
                .map(|t| t.i)
                .filter(|&i| i < anchor)
                .collect(),
            Relation::RightDependent => doc
                .children(anchor)
                .map(|t| t.i)
                .filter(|&i| i > anchor)
                .collect(),
        }
    }

    fn assign(
        &self,
        doc: &Doc,
        sentence: Sentence,
        assigned: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        let index = assigned.len();
        let Some(node) = self.nodes.get(index) else {
            let mut span: Vec<usize> = assigned
                .iter()
                .zip(&self.nodes)
                .filter(|(_, node)| !node.phantom)
                .map(|(&i, _)| i)
                .collect();
            span.sort_unstable();
            out.push(span);
            return;
        };
        let Some(link) = node.link else {
            return;
        };
        for candidate in self.candidates(doc, sentence, link, assigned[link.to]) {
            if assigned.contains(&candidate) || !node.spec.matches(&doc.tokens[candidate]) {
                continue;
            }
            assigned.push(candidate);
            self.assign(doc, sentence, assigned, out);
            assigned.pop();
        }
    }
}

impl Matcher for GraphRule {
    fn find(&self, doc: &Doc, sentence: Sentence, out: &mut Vec<Vec<usize>>) {
        let Some(root) = self.nodes.first() else {
            return;
        };
        let mut assigned = Vec::with_capacity(self.nodes.len());
        for i in sentence.indices() {
            if !root.spec.matches(&doc.tokens[i]) {
                continue;
            }
            assigned.push(i);
            self.assign(doc, sentence, &mut assigned, out);
            assigned.clear();
        }
    }
}
