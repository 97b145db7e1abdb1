// crates/fmu-rs-md/src/tree.rs

//! Hierarchical view of `.`-separated variable names.
//!
//! `"body.pos.x"` and `"body.pos.y"` become leaves `x` and `y` under the
//! node `body.pos`, which lets importers recover grouped quantities from the
//! flat variable list.

use crate::error::MdError;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use fmu_rs::VariableDescriptor;
use log::trace;

/// Upper bound on the segments of one name. Deeper names are rejected as
/// malformed.
pub const MAX_NAME_DEPTH: usize = 300;

/// One node of the namespace tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTreeNode {
    children: BTreeMap<String, VariableTreeNode>,
    /// Index into the descriptor slice the tree was built from.
    variable: Option<usize>,
}

impl VariableTreeNode {
    pub fn children(&self) -> impl Iterator<Item = (&str, &VariableTreeNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn child(&self, segment: &str) -> Option<&VariableTreeNode> {
        self.children.get(segment)
    }

    /// Index of the variable whose name ends at this node, if any.
    pub fn variable(&self) -> Option<usize> {
        self.variable
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// The namespace tree over a list of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTree {
    root: VariableTreeNode,
}

impl VariableTree {
    /// Builds the tree, attaching each variable's index at the node of its
    /// last name segment.
    pub fn build(variables: &[VariableDescriptor]) -> Result<Self, MdError> {
        let mut root = VariableTreeNode::default();
        for (index, variable) in variables.iter().enumerate() {
            let name = variable.name();
            let mut node = &mut root;
            for (depth, segment) in name.split('.').enumerate() {
                if depth >= MAX_NAME_DEPTH {
                    return Err(MdError::NameTooDeep {
                        name: name.to_string(),
                        depth: MAX_NAME_DEPTH,
                    });
                }
                node = node.children.entry(segment.to_string()).or_default();
            }
            if node.variable.is_some() {
                return Err(MdError::DuplicateName {
                    name: name.to_string(),
                });
            }
            trace!("Tree leaf '{}' -> variable {}", name, index);
            node.variable = Some(index);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &VariableTreeNode {
        &self.root
    }

    /// Looks up the node at a `.`-separated path. The empty path is the root.
    pub fn find(&self, path: &str) -> Option<&VariableTreeNode> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.')
            .try_fold(&self.root, |node, segment| node.children.get(segment))
    }

    /// All `(full name, variable index)` pairs, in name order.
    pub fn leaves(&self) -> Vec<(String, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(String, &VariableTreeNode)> = Vec::new();
        stack.push((String::new(), &self.root));
        while let Some((prefix, node)) = stack.pop() {
            if let Some(index) = node.variable {
                out.push((prefix.clone(), index));
            }
            for (segment, child) in node.children.iter().rev() {
                let path = if prefix.is_empty() {
                    segment.clone()
                } else {
                    let mut p = prefix.clone();
                    p.push('.');
                    p.push_str(segment);
                    p
                };
                stack.push((path, child));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use fmu_rs::{Causality, Initial, ValueType, Variability};

    fn local(name: &str) -> VariableDescriptor {
        VariableDescriptor::new(name, ValueType::Real, Causality::Local, Variability::Continuous, Initial::None)
            .unwrap()
    }

    #[test]
    fn test_siblings_share_parent() {
        let vars = [local("a.b.c"), local("a.b.d")];
        let tree = VariableTree::build(&vars).unwrap();

        let ab = tree.find("a.b").unwrap();
        assert_eq!(ab.len(), 2);
        assert!(ab.variable().is_none());
        assert_eq!(ab.child("c").unwrap().variable(), Some(0));
        assert_eq!(ab.child("d").unwrap().variable(), Some(1));
        assert!(ab.children().all(|(_, n)| n.is_leaf()));
    }

    #[test]
    fn test_leaves_in_name_order() {
        let vars = [local("z"), local("a.y"), local("a"), local("a.x")];
        let tree = VariableTree::build(&vars).unwrap();
        assert_eq!(
            tree.leaves(),
            vec![
                ("a".to_string(), 2),
                ("a.x".to_string(), 3),
                ("a.y".to_string(), 1),
                ("z".to_string(), 0),
            ]
        );
        assert!(tree.find("a.q").is_none());
        assert_eq!(tree.find("").unwrap().len(), 2);
    }

    #[test]
    fn test_name_too_deep() {
        let ok = vec!["s"; MAX_NAME_DEPTH].join(".");
        assert!(VariableTree::build(&[local(&ok)]).is_ok());

        let deep = format!("{}.s", ok);
        assert!(matches!(
            VariableTree::build(&[local(&deep)]),
            Err(MdError::NameTooDeep { depth: MAX_NAME_DEPTH, .. })
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let vars = [local("a.x"), local("a.y"), local("a.x")];
        assert!(matches!(
            VariableTree::build(&vars),
            Err(MdError::DuplicateName { name }) if name == "a.x"
        ));
    }
}
