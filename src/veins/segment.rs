//! Owned branch tree of directed line segments

use glam::DVec2;

/// Directed line element of a primary vein
///
/// A segment exclusively owns its children, so a vein is an acyclic tree
/// rooted at its generation-zero segment. Trees are built once and never
/// mutated; a parameter change discards and rebuilds the whole network.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start point
    pub position: DVec2,
    /// Unit direction
    pub direction: DVec2,
    /// Positive length
    pub length: f64,
    /// One-based index of the vein this segment belongs to
    pub root_index: usize,
    /// Depth below the root segment (root = 0)
    pub generation: u32,
    /// Ordered child segments
    pub children: Vec<Segment>,
}

impl Segment {
    /// End point `position + direction * length`
    pub fn endpoint(&self) -> DVec2 {
        self.position + self.direction * self.length
    }

    /// Direction scaled by length
    pub fn extent(&self) -> DVec2 {
        self.direction * self.length
    }

    /// Walk from this segment along `children[0]` until a leaf
    pub const fn spine(&self) -> Spine<'_> {
        Spine {
            next: Some(self),
        }
    }

    /// Leaf reached by following the first child of every segment
    pub fn tip(&self) -> &Self {
        self.spine().last().unwrap_or(self)
    }

    /// Start points of every spine segment followed by the tip endpoint
    pub fn spine_points(&self) -> Vec<DVec2> {
        let mut points: Vec<DVec2> = self.spine().map(|segment| segment.position).collect();
        points.push(self.tip().endpoint());
        points
    }

    /// Number of segments in the subtree rooted here
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Deepest generation in the subtree rooted here
    pub fn depth(&self) -> u32 {
        self.children
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or(self.generation)
    }

    /// Visit every segment of the subtree, parents before children
    pub fn for_each(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);
        for child in &self.children {
            child.for_each(visit);
        }
    }
}

/// Iterator along the first-child chain of a segment tree
#[derive(Debug, Clone)]
pub struct Spine<'a> {
    next: Option<&'a Segment>,
}

impl<'a> Iterator for Spine<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.children.first();
        Some(current)
    }
}
