//! Continuous Scales (linear, logarithmic, time)
//!
//! All three map a two-element domain onto a two-element numeric range
//! through a normalized parameter `t`:
//!
//! ```text
//! t = (v - d₀) / (d₁ - d₀)          linear, time (epoch ms)
//! t = (ln v - ln d₀) / (ln d₁ - ln d₀)   log
//! output = r₀ + t · (r₁ - r₀)
//! ```
//!
//! Descending domains and ranges work unchanged through the same formula.
//! With `clamp`, `t` is pinned to `[0, 1]` so out-of-domain inputs stay on
//! the chart; without it they extrapolate. Non-finite inputs map to NaN
//! and are the caller's to filter.
//!
//! # Nice Domains and Ticks
//!
//! `nice` widens domain bounds outward to multiples of a friendly step
//! from the 1/2/5 decade ladder (log scales widen to whole powers of ten,
//! time scales to natural durations). Widening is one-directional: a
//! niced domain always contains the raw extent.

use crate::error::{ChartError, Result};

/// Target tick count used when nicing a domain.
const DEFAULT_TICK_COUNT: usize = 10;

/// Millisecond tick intervals for time axes, ascending.
const TIME_TIERS: &[i64] = &[
    1_000,         // 1s
    5_000,         // 5s
    15_000,        // 15s
    30_000,        // 30s
    60_000,        // 1m
    300_000,       // 5m
    900_000,       // 15m
    1_800_000,     // 30m
    3_600_000,     // 1h
    10_800_000,    // 3h
    21_600_000,    // 6h
    43_200_000,    // 12h
    86_400_000,    // 1d
    604_800_000,   // 7d
    2_592_000_000, // 30d
];

/// A friendly step near `span / count` from the 1/2/5 ladder.
fn tick_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Widen `[lo, hi]` outward to multiples of a friendly step.
fn nice_bounds(lo: f64, hi: f64, count: usize) -> (f64, f64) {
    let step = tick_step(hi - lo, count);
    ((lo / step).floor() * step, (hi / step).ceil() * step)
}

/// Evenly spaced friendly ticks inside `[lo, hi]`.
fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(hi > lo) {
        return Vec::new();
    }
    let step = tick_step(hi - lo, count);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn check_finite_pair(pair: [f64; 2], what: &str) -> Result<()> {
    if pair.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::invalid_domain(format!(
            "{what} bounds must be finite, got [{}, {}]",
            pair[0], pair[1]
        )))
    }
}

// ============================================================================
// Linear
// ============================================================================

/// Straight-line domain→range mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    /// Build a linear scale.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidDomain`] when a bound is non-finite or the
    /// domain collapses to a single point.
    pub fn new(domain: [f64; 2], range: [f64; 2], nice: bool, clamp: bool) -> Result<Self> {
        check_finite_pair(domain, "linear domain")?;
        check_finite_pair(range, "linear range")?;
        if domain[0] == domain[1] {
            return Err(ChartError::invalid_domain(format!(
                "degenerate linear domain [{}, {}]",
                domain[0], domain[1]
            )));
        }

        let domain = if nice {
            let descending = domain[0] > domain[1];
            let (lo, hi) = nice_bounds(
                domain[0].min(domain[1]),
                domain[0].max(domain[1]),
                DEFAULT_TICK_COUNT,
            );
            if descending {
                (hi, lo)
            } else {
                (lo, hi)
            }
        } else {
            (domain[0], domain[1])
        };

        Ok(Self {
            domain,
            range: (range[0], range[1]),
            clamp,
        })
    }

    /// Map a domain value to the range.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        let mut t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map a range coordinate back to the domain.
    pub fn invert(&self, coordinate: f64) -> f64 {
        let mut t = (coordinate - self.range.0) / (self.range.1 - self.range.0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Friendly tick values inside the domain, ordered like the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (
            self.domain.0.min(self.domain.1),
            self.domain.0.max(self.domain.1),
        );
        let mut ticks = linear_ticks(lo, hi, count);
        if self.domain.0 > self.domain.1 {
            ticks.reverse();
        }
        ticks
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

// ============================================================================
// Logarithmic
// ============================================================================

/// Logarithmic domain→range mapping for data spanning magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
    // Precomputed for the hot path
    log_d0: f64,
    log_span: f64,
}

impl LogScale {
    /// Build a log scale. Both domain bounds must be strictly positive.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidDomain`] when a bound is zero, negative,
    /// non-finite, or the domain collapses to a single point.
    pub fn new(domain: [f64; 2], range: [f64; 2], nice: bool, clamp: bool) -> Result<Self> {
        check_finite_pair(domain, "log domain")?;
        check_finite_pair(range, "log range")?;
        if domain[0] <= 0.0 || domain[1] <= 0.0 {
            return Err(ChartError::invalid_domain(format!(
                "log scale requires strictly positive domain bounds, got [{}, {}]",
                domain[0], domain[1]
            )));
        }
        if domain[0] == domain[1] {
            return Err(ChartError::invalid_domain(format!(
                "degenerate log domain [{}, {}]",
                domain[0], domain[1]
            )));
        }

        let domain = if nice {
            let descending = domain[0] > domain[1];
            let lo = domain[0].min(domain[1]);
            let hi = domain[0].max(domain[1]);
            let lo = 10f64.powf(lo.log10().floor());
            let hi = 10f64.powf(hi.log10().ceil());
            if descending {
                (hi, lo)
            } else {
                (lo, hi)
            }
        } else {
            (domain[0], domain[1])
        };

        let log_d0 = domain.0.ln();
        let log_span = domain.1.ln() - log_d0;
        Ok(Self {
            domain,
            range: (range[0], range[1]),
            clamp,
            log_d0,
            log_span,
        })
    }

    /// Map a domain value to the range. Non-positive inputs yield NaN.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        let mut t = (value.ln() - self.log_d0) / self.log_span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map a range coordinate back to the domain.
    pub fn invert(&self, coordinate: f64) -> f64 {
        let mut t = (coordinate - self.range.0) / (self.range.1 - self.range.0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        (self.log_d0 + t * self.log_span).exp()
    }

    /// Tick values: whole powers of ten inside the domain, thinned to at
    /// most `count`. Domains narrower than two decades fall back to
    /// linear ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);

        let first = lo.log10().ceil() as i32;
        let last = hi.log10().floor() as i32;
        let decades: Vec<f64> = (first..=last).map(|d| 10f64.powi(d)).collect();

        let mut ticks = if decades.len() < 2 {
            linear_ticks(lo, hi, count)
        } else if decades.len() > count {
            let stride = (decades.len() + count - 1) / count;
            decades.into_iter().step_by(stride).collect()
        } else {
            decades
        };

        if self.domain.0 > self.domain.1 {
            ticks.reverse();
        }
        ticks
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

// ============================================================================
// Time
// ============================================================================

/// Epoch-millisecond time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64),
    range: (f64, f64),
    clamp: bool,
}

impl TimeScale {
    /// Build a time scale over an epoch-millisecond domain.
    ///
    /// # Errors
    ///
    /// [`ChartError::InvalidDomain`] when the domain collapses to a
    /// single instant.
    pub fn new(domain: [i64; 2], range: [f64; 2], nice: bool, clamp: bool) -> Result<Self> {
        check_finite_pair(range, "time range")?;
        if domain[0] == domain[1] {
            return Err(ChartError::invalid_domain(format!(
                "degenerate time domain [{}, {}]",
                domain[0], domain[1]
            )));
        }

        let domain = if nice {
            let descending = domain[0] > domain[1];
            let lo = domain[0].min(domain[1]);
            let hi = domain[0].max(domain[1]);
            let tier = Self::tier_for(hi - lo, DEFAULT_TICK_COUNT);
            let lo = floor_to(lo, tier);
            let hi = ceil_to(hi, tier);
            if descending {
                (hi, lo)
            } else {
                (lo, hi)
            }
        } else {
            (domain[0], domain[1])
        };

        Ok(Self {
            domain,
            range: (range[0], range[1]),
            clamp,
        })
    }

    /// Map an epoch-millisecond value (as f64) to the range.
    #[inline]
    pub fn scale(&self, time_ms: f64) -> f64 {
        let span = (self.domain.1 - self.domain.0) as f64;
        let mut t = (time_ms - self.domain.0 as f64) / span;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map an epoch-millisecond timestamp to the range.
    #[inline]
    pub fn scale_time(&self, time_ms: i64) -> f64 {
        self.scale(time_ms as f64)
    }

    /// Map a range coordinate back to an epoch-millisecond timestamp.
    pub fn invert(&self, coordinate: f64) -> i64 {
        let mut t = (coordinate - self.range.0) / (self.range.1 - self.range.0);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        let span = (self.domain.1 - self.domain.0) as f64;
        self.domain.0 + (t * span).round() as i64
    }

    /// Tick timestamps at natural duration boundaries (seconds, minutes,
    /// hours, days) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        if count == 0 {
            return Vec::new();
        }
        let lo = self.domain.0.min(self.domain.1);
        let hi = self.domain.0.max(self.domain.1);
        let tier = Self::tier_for(hi - lo, count);

        let mut ticks = Vec::new();
        let mut t = ceil_to(lo, tier);
        while t <= hi {
            ticks.push(t);
            t += tier;
        }
        if self.domain.0 > self.domain.1 {
            ticks.reverse();
        }
        ticks
    }

    /// Chrono format string suited to the domain span: seconds for
    /// sub-minute charts, dates once the span crosses a month.
    pub fn tick_format(&self) -> &'static str {
        let span = (self.domain.1 - self.domain.0).abs();
        if span <= 60_000 {
            "%H:%M:%S"
        } else if span <= 86_400_000 {
            "%H:%M"
        } else if span <= 2_592_000_000 {
            "%m-%d %H:%M"
        } else {
            "%Y-%m-%d"
        }
    }

    /// Render one tick timestamp with the span-appropriate format.
    pub fn format_tick(&self, time_ms: i64) -> String {
        match chrono::DateTime::from_timestamp_millis(time_ms) {
            Some(dt) => dt.format(self.tick_format()).to_string(),
            None => time_ms.to_string(), // out of chrono's representable span
        }
    }

    #[inline]
    pub fn domain(&self) -> (i64, i64) {
        self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Smallest tier that covers the span in at most `count` intervals.
    fn tier_for(span_ms: i64, count: usize) -> i64 {
        let target = span_ms / count.max(1) as i64;
        for &tier in TIME_TIERS {
            if tier >= target {
                return tier;
            }
        }
        // Beyond the ladder: whole multiples of the largest tier
        let largest = TIME_TIERS[TIME_TIERS.len() - 1];
        let factor = (target + largest - 1) / largest;
        largest * factor.max(1)
    }
}

fn floor_to(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

fn ceil_to(value: i64, step: i64) -> i64 {
    let r = value.rem_euclid(step);
    if r == 0 {
        value
    } else {
        value - r + step
    }
}
