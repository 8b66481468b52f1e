//! Categorical Scales (band, ordinal)
//!
//! Band scales slice a numeric range into equal slots, one per category,
//! for bar charts and grouped layouts:
//!
//! ```text
//! slot      = (r₁ - r₀) / n
//! position  = r₀ + i · slot + slot · padding / 2
//! bandwidth = slot · (1 - padding)
//! ```
//!
//! Ordinal scales map categories to a cycling list of discrete outputs
//! (typically a color palette). Both are stateless: a category absent
//! from the domain maps to `None` rather than registering itself.

use ahash::AHashMap;

use crate::error::{ChartError, Result};

/// Positions categories along a numeric range with inner padding.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    index: AHashMap<String, usize>,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    /// Build a band scale over the given categories.
    ///
    /// `padding` is the fraction of each slot left empty, split evenly
    /// on both sides of the band.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidDomain`] for an empty domain,
    /// [`ChartError::InvalidArgument`] for padding outside `[0, 1)`.
    pub fn new(domain: Vec<String>, range: [f64; 2], padding: f64) -> Result<Self> {
        if domain.is_empty() {
            return Err(ChartError::invalid_domain("band domain has no categories"));
        }
        if !(0.0..1.0).contains(&padding) {
            return Err(ChartError::invalid_argument(format!(
                "band padding must be in [0, 1), got {padding}"
            )));
        }

        let index = domain
            .iter()
            .enumerate()
            .map(|(i, category)| (category.clone(), i))
            .collect();

        Ok(Self {
            domain,
            index,
            range: (range[0], range[1]),
            padding,
        })
    }

    /// Leading edge of a category's band, or `None` for a category
    /// outside the domain.
    pub fn position(&self, category: &str) -> Option<f64> {
        let i = *self.index.get(category)?;
        let slot = self.step();
        Some(self.range.0 + i as f64 * slot + slot * self.padding / 2.0)
    }

    /// Center of a category's band.
    pub fn center(&self, category: &str) -> Option<f64> {
        Some(self.position(category)? + self.bandwidth() / 2.0)
    }

    /// Width available to each category's band.
    #[inline]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Distance between the leading edges of adjacent bands.
    #[inline]
    pub fn step(&self) -> f64 {
        (self.range.1 - self.range.0) / self.domain.len() as f64
    }

    #[inline]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Maps categories to discrete outputs, cycling when there are more
/// categories than outputs.
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    domain: Vec<String>,
    index: AHashMap<String, usize>,
    outputs: Vec<String>,
}

impl OrdinalScale {
    /// Build an ordinal scale.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidDomain`] for an empty domain,
    /// [`ChartError::InvalidArgument`] for an empty output list.
    pub fn new(domain: Vec<String>, outputs: Vec<String>) -> Result<Self> {
        if domain.is_empty() {
            return Err(ChartError::invalid_domain(
                "ordinal domain has no categories",
            ));
        }
        if outputs.is_empty() {
            return Err(ChartError::invalid_argument(
                "ordinal scale needs at least one output value",
            ));
        }

        let index = domain
            .iter()
            .enumerate()
            .map(|(i, category)| (category.clone(), i))
            .collect();

        Ok(Self {
            domain,
            index,
            outputs,
        })
    }

    /// Output assigned to a category, or `None` for a category outside
    /// the domain.
    pub fn output_for(&self, category: &str) -> Option<&str> {
        let i = *self.index.get(category)?;
        Some(self.outputs[i % self.outputs.len()].as_str())
    }

    #[inline]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[inline]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}
