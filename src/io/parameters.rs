//! Typed parameter snapshot consumed by every stage of a network build
//!
//! The flat name/value document used by callers is resolved into nested
//! structs once, so generation never matches on parameter names.

use crate::io::configuration::MAX_GENERATIONS_LIMIT;
use crate::io::error::{Result, invalid_parameter};
use glam::DVec2;
use std::collections::BTreeMap;

/// Every key understood by [`ParameterSet::from_flat`], in document order
pub const PARAMETER_NAMES: [&str; 32] = [
    "alpha",
    "num_root_segments",
    "root_segment_pos_const_x",
    "root_segment_pos_const_y",
    "root_segment_pos_linear_x",
    "root_segment_pos_linear_y",
    "root_segment_pos_quadratic_x",
    "root_segment_pos_quadratic_y",
    "root_segment_len",
    "root_segment_dir_const_x",
    "root_segment_dir_const_y",
    "root_segment_dir_linear_x",
    "root_segment_dir_linear_y",
    "root_segment_dir_quadratic_x",
    "root_segment_dir_quadratic_y",
    "segment_dir_linear_x",
    "segment_dir_linear_y",
    "segment_dir_quadratic_x",
    "segment_dir_quadratic_y",
    "segment_dir_a_x",
    "segment_dir_a_y",
    "segment_dir_b_x",
    "segment_dir_b_y",
    "segment_dir_c_x",
    "segment_dir_c_y",
    "segment_dir_d_x",
    "segment_dir_d_y",
    "segment_len_factor",
    "max_generations_const",
    "max_generations_linear",
    "max_generations_quadratic",
    // Older documents carry this key; the generator never reads it
    "root_segment_len_factor",
];

/// Quadratic polynomial with independent x/y coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic2 {
    /// Constant term
    pub constant: DVec2,
    /// Coefficient of `x`
    pub linear: DVec2,
    /// Coefficient of `x²`
    pub quadratic: DVec2,
}

impl Quadratic2 {
    /// Evaluate `quadratic·x² + linear·x + constant`
    pub fn evaluate(&self, x: f64) -> DVec2 {
        self.quadratic * (x * x) + self.linear * x + self.constant
    }
}

/// Placement of root segment `i` as polynomials of its one-based index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSegmentParameters {
    /// Root position polynomial
    pub position: Quadratic2,
    /// Root direction polynomial, normalized after evaluation
    pub direction: Quadratic2,
    /// Length of every root segment
    pub length: f64,
    /// Carried for document compatibility, not read by the generator
    pub length_factor: f64,
}

/// Generation-dependent terms added to the root direction polynomial for child segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDirectionParameters {
    /// Coefficient of `g`
    pub linear: DVec2,
    /// Coefficient of `g²`
    pub quadratic: DVec2,
    /// Coefficient of `i²·g²`
    pub index_sq_generation_sq: DVec2,
    /// Coefficient of `i²·g`
    pub index_sq_generation: DVec2,
    /// Coefficient of `i·g²`
    pub index_generation_sq: DVec2,
    /// Coefficient of `i·g`
    pub index_generation: DVec2,
}

impl SegmentDirectionParameters {
    /// Sum of the generation and cross terms for vein `index` at `generation`
    pub fn offset(&self, index: f64, generation: f64) -> DVec2 {
        let i2 = index * index;
        let g2 = generation * generation;
        self.quadratic * g2
            + self.linear * generation
            + self.index_sq_generation_sq * (i2 * g2)
            + self.index_sq_generation * (i2 * generation)
            + self.index_generation_sq * (index * g2)
            + self.index_generation * (index * generation)
    }
}

/// Real-valued generation threshold `quadratic·i² + linear·i + constant`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationLimit {
    /// Constant term
    pub constant: f64,
    /// Coefficient of `i`
    pub linear: f64,
    /// Coefficient of `i²`
    pub quadratic: f64,
}

impl GenerationLimit {
    /// Threshold for vein `index`; children are added while `generation < threshold`
    pub fn evaluate(&self, index: usize) -> f64 {
        let i = index as f64;
        self.quadratic.mul_add(i * i, self.linear.mul_add(i, self.constant))
    }
}

/// Immutable snapshot of every coefficient a network build reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    /// Display alpha for rendered primary veins
    pub alpha: u8,
    /// Number of primary veins
    pub num_root_segments: usize,
    /// Root segment placement
    pub root_segment: RootSegmentParameters,
    /// Child direction terms
    pub segment_direction: SegmentDirectionParameters,
    /// Geometric length decay per generation
    pub segment_len_factor: f64,
    /// Generation threshold polynomial
    pub max_generations: GenerationLimit,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            alpha: 255,
            num_root_segments: 12,
            root_segment: RootSegmentParameters {
                position: Quadratic2 {
                    constant: DVec2::new(55.0, 300.0),
                    linear: DVec2::new(5.0, 10.0),
                    quadratic: DVec2::ZERO,
                },
                direction: Quadratic2 {
                    constant: DVec2::new(1.0, 1.0),
                    linear: DVec2::ZERO,
                    quadratic: DVec2::ZERO,
                },
                length: 50.0,
                length_factor: 0.9,
            },
            segment_direction: SegmentDirectionParameters {
                linear: DVec2::ZERO,
                quadratic: DVec2::ZERO,
                index_sq_generation_sq: DVec2::ZERO,
                index_sq_generation: DVec2::ZERO,
                index_generation_sq: DVec2::ZERO,
                index_generation: DVec2::ZERO,
            },
            segment_len_factor: 0.95,
            max_generations: GenerationLimit {
                constant: 12.0,
                linear: 0.0,
                quadratic: 0.0,
            },
        }
    }
}

impl ParameterSet {
    /// Resolve a flat name/value document into a validated parameter set
    ///
    /// Missing keys keep their default value. Unknown keys are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or the combined set fails [`Self::validate`]
    pub fn from_flat(document: &BTreeMap<String, f64>) -> Result<Self> {
        let mut parameters = Self::default();
        for (name, &value) in document {
            match PARAMETER_NAMES
                .iter()
                .copied()
                .find(|known| *known == name.as_str())
            {
                Some(known) => parameters.set(known, value)?,
                None => tracing::warn!(parameter = %name, "ignoring unknown parameter"),
            }
        }
        parameters.validate()?;
        Ok(parameters)
    }

    /// Flatten into the name/value document understood by [`Self::from_flat`]
    pub fn to_flat(&self) -> BTreeMap<String, f64> {
        PARAMETER_NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|value| ((*name).to_string(), value)))
            .collect()
    }

    /// Read a single parameter by its flat name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "alpha" => Some(f64::from(self.alpha)),
            "num_root_segments" => Some(self.num_root_segments as f64),
            _ => self.float_field(name),
        }
    }

    /// Overwrite a single parameter by its flat name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown, the value is not finite,
    /// or an integer parameter receives a fractional or out-of-range value
    pub fn set(&mut self, name: &'static str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(invalid_parameter(name, &value, &"must be finite"));
        }
        match name {
            "alpha" => {
                if !(0.0..=255.0).contains(&value) || value.fract() != 0.0 {
                    return Err(invalid_parameter(
                        name,
                        &value,
                        &"must be an integer in 0..=255",
                    ));
                }
                self.alpha = value as u8;
            }
            "num_root_segments" => {
                if value < 1.0 || value.fract() != 0.0 {
                    return Err(invalid_parameter(
                        name,
                        &value,
                        &"must be a positive integer",
                    ));
                }
                self.num_root_segments = value as usize;
            }
            _ => {
                let slot = self
                    .float_field_mut(name)
                    .ok_or_else(|| invalid_parameter(name, &value, &"unknown parameter"))?;
                *slot = value;
            }
        }
        Ok(())
    }

    /// Check cross-field constraints that individual setters cannot see
    ///
    /// # Errors
    ///
    /// Returns an error if the root length or decay factor is not positive,
    /// any coefficient is not finite, or a vein's generation threshold exceeds
    /// [`MAX_GENERATIONS_LIMIT`]
    pub fn validate(&self) -> Result<()> {
        if self.num_root_segments == 0 {
            return Err(invalid_parameter(
                "num_root_segments",
                &self.num_root_segments,
                &"at least one vein is required",
            ));
        }
        for name in PARAMETER_NAMES {
            if let Some(value) = self.get(name).filter(|value| !value.is_finite()) {
                return Err(invalid_parameter(name, &value, &"must be finite"));
            }
        }
        if self.root_segment.length <= 0.0 {
            return Err(invalid_parameter(
                "root_segment_len",
                &self.root_segment.length,
                &"segments must have positive length",
            ));
        }
        if self.segment_len_factor <= 0.0 {
            return Err(invalid_parameter(
                "segment_len_factor",
                &self.segment_len_factor,
                &"decay factor must be positive",
            ));
        }
        for index in 1..=self.num_root_segments {
            let limit = self.max_generations.evaluate(index);
            if limit > MAX_GENERATIONS_LIMIT {
                return Err(invalid_parameter(
                    "max_generations_const",
                    &limit,
                    &format!("vein {index} exceeds the generation limit of {MAX_GENERATIONS_LIMIT}"),
                ));
            }
        }
        Ok(())
    }
}

// One name table drives both the read and the write accessor
macro_rules! float_fields {
    ($($name:literal => $($field:ident).+),* $(,)?) => {
        impl ParameterSet {
            fn float_field(&self, name: &str) -> Option<f64> {
                match name {
                    $($name => Some(self.$($field).+),)*
                    _ => None,
                }
            }

            fn float_field_mut(&mut self, name: &str) -> Option<&mut f64> {
                match name {
                    $($name => Some(&mut self.$($field).+),)*
                    _ => None,
                }
            }
        }
    };
}

float_fields! {
    "root_segment_pos_const_x" => root_segment.position.constant.x,
    "root_segment_pos_const_y" => root_segment.position.constant.y,
    "root_segment_pos_linear_x" => root_segment.position.linear.x,
    "root_segment_pos_linear_y" => root_segment.position.linear.y,
    "root_segment_pos_quadratic_x" => root_segment.position.quadratic.x,
    "root_segment_pos_quadratic_y" => root_segment.position.quadratic.y,
    "root_segment_len" => root_segment.length,
    "root_segment_len_factor" => root_segment.length_factor,
    "root_segment_dir_const_x" => root_segment.direction.constant.x,
    "root_segment_dir_const_y" => root_segment.direction.constant.y,
    "root_segment_dir_linear_x" => root_segment.direction.linear.x,
    "root_segment_dir_linear_y" => root_segment.direction.linear.y,
    "root_segment_dir_quadratic_x" => root_segment.direction.quadratic.x,
    "root_segment_dir_quadratic_y" => root_segment.direction.quadratic.y,
    "segment_dir_linear_x" => segment_direction.linear.x,
    "segment_dir_linear_y" => segment_direction.linear.y,
    "segment_dir_quadratic_x" => segment_direction.quadratic.x,
    "segment_dir_quadratic_y" => segment_direction.quadratic.y,
    "segment_dir_a_x" => segment_direction.index_sq_generation_sq.x,
    "segment_dir_a_y" => segment_direction.index_sq_generation_sq.y,
    "segment_dir_b_x" => segment_direction.index_sq_generation.x,
    "segment_dir_b_y" => segment_direction.index_sq_generation.y,
    "segment_dir_c_x" => segment_direction.index_generation_sq.x,
    "segment_dir_c_y" => segment_direction.index_generation_sq.y,
    "segment_dir_d_x" => segment_direction.index_generation.x,
    "segment_dir_d_y" => segment_direction.index_generation.y,
    "segment_len_factor" => segment_len_factor,
    "max_generations_const" => max_generations.constant,
    "max_generations_linear" => max_generations.linear,
    "max_generations_quadratic" => max_generations.quadratic,
}
