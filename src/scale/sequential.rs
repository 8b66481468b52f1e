//! Sequential Color Scales
//!
//! Maps a numeric domain onto a color gradient for heatmaps and
//! intensity encodings. A gradient is a list of anchor stops
//! interpolated piecewise-linearly in RGB:
//!
//! ```text
//! t   = (v - d₀) / (d₁ - d₀)       clamped to [0, 1]
//! pos = t · (stops - 1)
//! color = lerp(stops[floor(pos)], stops[ceil(pos)], fract(pos))
//! ```
//!
//! Four gradients ship built in (`viridis`, `inferno`, `blues`, `reds`,
//! anchored on their canonical endpoints); custom interpolator closures
//! slot in through [`SequentialScale::with_interpolator`].

use std::fmt;

use crate::error::{ChartError, Result};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other` by `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// CSS hex form, e.g. `#1f77b4`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Anchor stops for the built-in gradients, dark-to-light where the
/// palette defines it that way.
const VIRIDIS: &[Rgb] = &[
    Rgb::new(0x44, 0x01, 0x54),
    Rgb::new(0x3b, 0x52, 0x8b),
    Rgb::new(0x21, 0x91, 0x8c),
    Rgb::new(0x5e, 0xc9, 0x62),
    Rgb::new(0xfd, 0xe7, 0x25),
];

const INFERNO: &[Rgb] = &[
    Rgb::new(0x00, 0x00, 0x04),
    Rgb::new(0x57, 0x10, 0x6e),
    Rgb::new(0xbc, 0x37, 0x54),
    Rgb::new(0xf9, 0x8e, 0x09),
    Rgb::new(0xfc, 0xff, 0xa4),
];

const BLUES: &[Rgb] = &[
    Rgb::new(0xf7, 0xfb, 0xff),
    Rgb::new(0xc6, 0xdb, 0xef),
    Rgb::new(0x6b, 0xae, 0xd6),
    Rgb::new(0x21, 0x71, 0xb5),
    Rgb::new(0x08, 0x30, 0x6b),
];

const REDS: &[Rgb] = &[
    Rgb::new(0xff, 0xf5, 0xf0),
    Rgb::new(0xfc, 0xbb, 0xa1),
    Rgb::new(0xfb, 0x6a, 0x4a),
    Rgb::new(0xcb, 0x18, 0x1d),
    Rgb::new(0x67, 0x00, 0x0d),
];

enum Interpolator {
    Stops(Vec<Rgb>),
    Custom(Box<dyn Fn(f64) -> Rgb + Send + Sync>),
}

/// Maps a numeric domain onto a color gradient.
pub struct SequentialScale {
    domain: (f64, f64),
    interpolator: Interpolator,
    name: Option<String>,
}

impl fmt::Debug for SequentialScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialScale")
            .field("domain", &self.domain)
            .field("interpolator", &self.name.as_deref().unwrap_or("custom"))
            .finish()
    }
}

impl SequentialScale {
    /// Build a sequential scale over a built-in gradient.
    ///
    /// # Errors
    ///
    /// [`ChartError::UnsupportedScaleKind`] for a gradient name this
    /// crate does not ship, [`ChartError::InvalidDomain`] for a
    /// non-finite or degenerate domain.
    pub fn named(domain: [f64; 2], gradient: &str) -> Result<Self> {
        let stops = match gradient {
            "viridis" => VIRIDIS,
            "inferno" => INFERNO,
            "blues" => BLUES,
            "reds" => REDS,
            other => return Err(ChartError::unsupported_kind(format!("gradient '{other}'"))),
        };
        Self::check_domain(domain)?;
        Ok(Self {
            domain: (domain[0], domain[1]),
            interpolator: Interpolator::Stops(stops.to_vec()),
            name: Some(gradient.to_string()),
        })
    }

    /// Build a sequential scale over a caller-supplied interpolator.
    pub fn with_interpolator<F>(domain: [f64; 2], interpolator: F) -> Result<Self>
    where
        F: Fn(f64) -> Rgb + Send + Sync + 'static,
    {
        Self::check_domain(domain)?;
        Ok(Self {
            domain: (domain[0], domain[1]),
            interpolator: Interpolator::Custom(Box::new(interpolator)),
            name: None,
        })
    }

    fn check_domain(domain: [f64; 2]) -> Result<()> {
        if !domain.iter().all(|v| v.is_finite()) {
            return Err(ChartError::invalid_domain(format!(
                "sequential domain bounds must be finite, got [{}, {}]",
                domain[0], domain[1]
            )));
        }
        if domain[0] == domain[1] {
            return Err(ChartError::invalid_domain(format!(
                "degenerate sequential domain [{}, {}]",
                domain[0], domain[1]
            )));
        }
        Ok(())
    }

    /// Color for a domain value. Out-of-domain values saturate at the
    /// gradient ends; non-finite values land on the low end.
    pub fn color_at(&self, value: f64) -> Rgb {
        let mut t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        if !t.is_finite() {
            t = 0.0;
        }
        let t = t.clamp(0.0, 1.0);

        match &self.interpolator {
            Interpolator::Custom(f) => f(t),
            Interpolator::Stops(stops) => {
                let pos = t * (stops.len() - 1) as f64;
                let i = pos.floor() as usize;
                if i + 1 >= stops.len() {
                    stops[stops.len() - 1]
                } else {
                    stops[i].lerp(stops[i + 1], pos - i as f64)
                }
            }
        }
    }

    /// Hex color for a domain value.
    pub fn hex_at(&self, value: f64) -> String {
        self.color_at(value).to_hex()
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Gradient name, or `None` for a custom interpolator.
    pub fn gradient_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
