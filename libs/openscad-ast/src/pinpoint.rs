//! # Pinpointer
//!
//! Finds the deepest node covering a source location.
//!
//! The search runs a binary search over a node's assembled parts and
//! descends into the child whose span brackets the location. A location in
//! the gap between two parts, or on a token owned directly by the node,
//! resolves to the node itself.
//!
//! A location belongs to a part when `part.start < loc <= part.end`: the
//! character to the left of a cursor decides what the cursor is "on".

use crate::assembler::{assembly_parts, AssemblyPart};
use crate::nodes::NodeRef;
use crate::span::CodeLocation;

/// Outcome of a pinpoint search.
#[derive(Debug, Clone, Copy)]
pub enum PinpointResult<'a> {
    /// The location is at or before the start of the searched node.
    BeforeFirst,
    /// The location is past the end of the searched node.
    AfterLast,
    /// Deepest node covering the location.
    Node(NodeRef<'a>),
}

impl<'a> PinpointResult<'a> {
    /// Returns the found node, if any.
    pub fn node(&self) -> Option<NodeRef<'a>> {
        match self {
            Self::Node(node) => Some(*node),
            _ => None,
        }
    }
}

/// Locates nodes under a fixed root.
#[derive(Debug, Clone, Copy)]
pub struct Pinpointer<'a> {
    root: NodeRef<'a>,
}

impl<'a> Pinpointer<'a> {
    /// Creates a pinpointer searching under `root`.
    pub fn new(root: NodeRef<'a>) -> Self {
        Self { root }
    }

    /// Returns the deepest node covering `loc`.
    pub fn pinpoint(&self, loc: &CodeLocation) -> PinpointResult<'a> {
        let mut path = Vec::new();
        search(self.root, loc.offset, &mut path)
    }

    /// Returns every node from the root down to the deepest one covering
    /// `loc`. Empty when the location is outside the root.
    pub fn path(&self, loc: &CodeLocation) -> Vec<NodeRef<'a>> {
        let mut path = Vec::new();
        match search(self.root, loc.offset, &mut path) {
            PinpointResult::Node(_) => path,
            _ => Vec::new(),
        }
    }
}

/// Convenience wrapper around [`Pinpointer::pinpoint`].
pub fn pinpoint<'a>(root: NodeRef<'a>, loc: &CodeLocation) -> PinpointResult<'a> {
    Pinpointer::new(root).pinpoint(loc)
}

fn search<'a>(node: NodeRef<'a>, offset: usize, path: &mut Vec<NodeRef<'a>>) -> PinpointResult<'a> {
    let parts: Vec<(AssemblyPart<'a>, usize, usize)> = assembly_parts(node)
        .into_iter()
        .filter_map(|part| {
            let span = part.span()?;
            Some((part, span.start.offset, span.end.offset))
        })
        .collect();

    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return PinpointResult::BeforeFirst;
    };
    if offset <= first.1 {
        return PinpointResult::BeforeFirst;
    }
    if offset > last.2 {
        return PinpointResult::AfterLast;
    }

    path.push(node);
    let index = parts.partition_point(|(_, _, end)| *end < offset);
    if let Some((AssemblyPart::Node(child), start, _)) = parts.get(index) {
        if *start < offset {
            if let PinpointResult::Node(found) = search(*child, offset, path) {
                return PinpointResult::Node(found);
            }
        }
    }
    PinpointResult::Node(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Expression, Statement};
    use crate::test_support::two_assignments;

    #[test]
    fn test_offset_on_literal_finds_literal() {
        let (src, file) = two_assignments();
        let found = pinpoint(NodeRef::File(&file), &src.file().location_at(3));
        match found.node() {
            Some(NodeRef::Expression(Expression::Literal(_))) => {}
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn test_offset_on_lookup_finds_lookup() {
        let (src, file) = two_assignments();
        let found = pinpoint(NodeRef::File(&file), &src.file().location_at(7));
        match found.node() {
            Some(NodeRef::Expression(Expression::Lookup(lookup))) => assert_eq!(lookup.name, "a"),
            other => panic!("expected lookup, got {other:?}"),
        }
    }

    #[test]
    fn test_offset_on_own_token_finds_parent() {
        let (src, file) = two_assignments();
        // Offset 2 is just after `=` of the first assignment.
        let found = pinpoint(NodeRef::File(&file), &src.file().location_at(2));
        match found.node() {
            Some(NodeRef::Statement(Statement::Assignment(node))) => {
                assert_eq!(node.name.as_deref(), Some("a"))
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_outside_locations() {
        let (src, file) = two_assignments();
        let first = &file.statements[0];
        let pinpointer = Pinpointer::new(NodeRef::Statement(first));
        assert!(matches!(
            pinpointer.pinpoint(&src.file().location_at(0)),
            PinpointResult::BeforeFirst
        ));
        assert!(matches!(
            pinpointer.pinpoint(&src.file().location_at(6)),
            PinpointResult::AfterLast
        ));
    }

    #[test]
    fn test_path_runs_from_root() {
        let (src, file) = two_assignments();
        let path = Pinpointer::new(NodeRef::File(&file)).path(&src.file().location_at(3));
        let names: Vec<_> = path.iter().map(|n| n.kind_name()).collect();
        assert_eq!(names, vec!["ScadFile", "AssignmentNode", "LiteralExpr"]);
    }
}
