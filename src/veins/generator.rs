//! Deterministic construction of primary vein trees from polynomial fields

use crate::io::error::{Result, VenationError};
use crate::io::parameters::ParameterSet;
use crate::veins::segment::Segment;
use glam::DVec2;

/// Builds one branching segment tree per root index
///
/// Output is a pure function of the parameter snapshot: no randomness and
/// no hidden state, so identical parameters always give identical geometry.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryVeinGenerator<'a> {
    parameters: &'a ParameterSet,
}

impl<'a> PrimaryVeinGenerator<'a> {
    /// Create a generator over a parameter snapshot
    pub const fn new(parameters: &'a ParameterSet) -> Self {
        Self { parameters }
    }

    /// Build every primary vein, ordered by root index `1..=num_root_segments`
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail validation or any summed
    /// direction vector has zero length
    pub fn generate(&self) -> Result<Vec<Segment>> {
        self.parameters.validate()?;
        (1..=self.parameters.num_root_segments)
            .map(|index| self.generate_vein(index))
            .collect()
    }

    /// Build the complete tree for one-based vein `index`
    ///
    /// # Errors
    ///
    /// Returns [`VenationError::DegenerateDirection`] if any direction vanishes
    pub fn generate_vein(&self, index: usize) -> Result<Segment> {
        let mut root = self.root_segment(index)?;
        let limit = self.max_generations(index);

        let mut descendants = Vec::new();
        let mut parent = (root.endpoint(), root.length, root.generation);
        while f64::from(parent.2) < limit {
            let generation = parent.2 + 1;
            let child = Segment {
                position: parent.0,
                direction: self.direction(index, generation)?,
                length: parent.1 * self.parameters.segment_len_factor,
                root_index: index,
                generation,
                children: Vec::new(),
            };
            parent = (child.endpoint(), child.length, generation);
            descendants.push(child);
        }

        let segment_count = descendants.len() + 1;
        let mut subtree: Option<Segment> = None;
        for mut segment in descendants.into_iter().rev() {
            segment.children.extend(subtree.take());
            subtree = Some(segment);
        }
        root.children.extend(subtree);

        tracing::debug!(
            root_index = index,
            segments = segment_count,
            limit,
            "generated primary vein"
        );
        Ok(root)
    }

    /// Root segment of vein `index` without descendants
    ///
    /// # Errors
    ///
    /// Returns [`VenationError::DegenerateDirection`] if the root direction vanishes
    pub fn root_segment(&self, index: usize) -> Result<Segment> {
        let root = &self.parameters.root_segment;
        let i = index as f64;
        let direction = normalize(root.direction.evaluate(i), index, 0)?;

        Ok(Segment {
            position: root.position.evaluate(i),
            direction,
            length: root.length,
            root_index: index,
            generation: 0,
            children: Vec::new(),
        })
    }

    /// Unit direction of a segment of vein `index` at `generation`
    ///
    /// The root direction polynomial in `index` plus generation and cross
    /// terms, normalized after summation.
    ///
    /// # Errors
    ///
    /// Returns [`VenationError::DegenerateDirection`] if the sum has zero length
    pub fn direction(&self, index: usize, generation: u32) -> Result<DVec2> {
        let i = index as f64;
        let g = f64::from(generation);
        let sum = self.parameters.root_segment.direction.evaluate(i)
            + self.parameters.segment_direction.offset(i, g);
        normalize(sum, index, generation)
    }

    /// Real-valued generation threshold of vein `index`
    pub fn max_generations(&self, index: usize) -> f64 {
        self.parameters.max_generations.evaluate(index)
    }
}

/// Generate every primary vein for a parameter snapshot
///
/// # Errors
///
/// See [`PrimaryVeinGenerator::generate`]
pub fn generate(parameters: &ParameterSet) -> Result<Vec<Segment>> {
    PrimaryVeinGenerator::new(parameters).generate()
}

fn normalize(vector: DVec2, root_index: usize, generation: u32) -> Result<DVec2> {
    vector
        .try_normalize()
        .ok_or(VenationError::DegenerateDirection {
            root_index,
            generation,
        })
}
