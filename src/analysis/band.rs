//! Labeled threshold bands and validated band sets.
//!
//! A [`BandSet`] is an ordered list of [`Band`]s that together partition the real line:
//! every finite value lies in exactly one band. The order of the list is the order in
//! which values are matched and the order in which statistics are reported.

use crate::analysis::error::AnalysisError;
use log::warn;
use ordered_float::OrderedFloat;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

/// Threshold in °C separating the outer bands of the three- and four-band presets.
pub const DEFAULT_THRESHOLD: f64 = 1.5;

pub const ABOVE_OR_EQUAL_ZERO: &str = "above_or_equal_zero";
pub const BELOW_ZERO: &str = "below_zero";
pub const HIGH: &str = "high";
pub const MID: &str = "mid";
pub const MID_HIGH: &str = "mid_high";
pub const MID_LOW: &str = "mid_low";
pub const LOW: &str = "low";

/// A labeled interval of the real line. Each end is open, closed or unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    label: String,
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl Band {
    pub fn new(label: impl Into<String>, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    /// `[threshold, +inf)`
    pub fn at_least(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Included(threshold), Bound::Unbounded)
    }

    /// `(threshold, +inf)`
    pub fn above(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Excluded(threshold), Bound::Unbounded)
    }

    /// `(-inf, threshold]`
    pub fn at_most(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Unbounded, Bound::Included(threshold))
    }

    /// `(-inf, threshold)`
    pub fn below(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Unbounded, Bound::Excluded(threshold))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lower(&self) -> Bound<f64> {
        self.lower
    }

    pub fn upper(&self) -> Bound<f64> {
        self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }

    fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Bound::Included(l), Bound::Included(u)) => l > u,
            (Bound::Included(l), Bound::Excluded(u))
            | (Bound::Excluded(l), Bound::Included(u))
            | (Bound::Excluded(l), Bound::Excluded(u)) => l >= u,
            _ => false,
        }
    }

    fn thresholds(&self) -> impl Iterator<Item = f64> {
        [self.lower, self.upper]
            .into_iter()
            .filter_map(|bound| match bound {
                Bound::Included(x) | Bound::Excluded(x) => Some(x),
                Bound::Unbounded => None,
            })
    }

    // Sort key: unbounded first, then by value, closed before open at the same value.
    fn lower_key(&self) -> (u8, OrderedFloat<f64>, u8) {
        match self.lower {
            Bound::Unbounded => (0, OrderedFloat(f64::NEG_INFINITY), 0),
            Bound::Included(x) => (1, OrderedFloat(x), 0),
            Bound::Excluded(x) => (1, OrderedFloat(x), 1),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = match self.lower {
            Bound::Included(x) => format!("[{x}"),
            Bound::Excluded(x) => format!("({x}"),
            Bound::Unbounded => "(-inf".to_string(),
        };
        let upper = match self.upper {
            Bound::Included(x) => format!("{x}]"),
            Bound::Excluded(x) => format!("{x})"),
            Bound::Unbounded => "+inf)".to_string(),
        };
        write!(f, "{} {}, {}", self.label, lower, upper)
    }
}

/// An ordered, validated list of bands that partitions the real line.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSet {
    bands: Vec<Band>,
}

impl BandSet {
    /// Validates `bands` and keeps them in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidBandConfig`] if the list is empty, a label repeats,
    /// a threshold is not finite, a band is empty, or the bands overlap or leave a gap.
    pub fn new(bands: Vec<Band>) -> Result<Self, AnalysisError> {
        validate(&bands).inspect_err(|e| warn!("Rejected band configuration: {}", e))?;
        Ok(Self { bands })
    }

    /// `diff >= 0` is "above_or_equal_zero", `diff < 0` is "below_zero".
    pub fn two_band() -> Self {
        Self {
            bands: vec![Band::at_least(ABOVE_OR_EQUAL_ZERO, 0.0), Band::below(BELOW_ZERO, 0.0)],
        }
    }

    /// "high" / "mid" / "low" split at ±[`DEFAULT_THRESHOLD`].
    pub fn three_band() -> Self {
        Self {
            bands: three_bands(DEFAULT_THRESHOLD),
        }
    }

    /// "high" / "mid_high" / "mid_low" / "low" split at ±[`DEFAULT_THRESHOLD`] and zero.
    pub fn four_band() -> Self {
        Self {
            bands: four_bands(DEFAULT_THRESHOLD),
        }
    }

    /// Three-band set split at `±threshold`. `threshold` must be finite and positive.
    pub fn three_band_with(threshold: f64) -> Result<Self, AnalysisError> {
        Self::new(three_bands(threshold))
    }

    /// Four-band set split at `±threshold` and zero. `threshold` must be finite and positive.
    pub fn four_band_with(threshold: f64) -> Result<Self, AnalysisError> {
        Self::new(four_bands(threshold))
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(Band::label)
    }

    /// Index of the first band, in list order, containing `value`.
    pub fn classify(&self, value: f64) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(value))
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.bands.iter().position(|band| band.label == label)
    }
}

fn three_bands(threshold: f64) -> Vec<Band> {
    vec![
        Band::at_least(HIGH, threshold),
        Band::new(MID, Bound::Excluded(-threshold), Bound::Excluded(threshold)),
        Band::at_most(LOW, -threshold),
    ]
}

fn four_bands(threshold: f64) -> Vec<Band> {
    vec![
        Band::at_least(HIGH, threshold),
        Band::new(MID_HIGH, Bound::Included(0.0), Bound::Excluded(threshold)),
        Band::new(MID_LOW, Bound::Excluded(-threshold), Bound::Excluded(0.0)),
        Band::at_most(LOW, -threshold),
    ]
}

fn invalid(message: String) -> AnalysisError {
    AnalysisError::InvalidBandConfig(message)
}

fn validate(bands: &[Band]) -> Result<(), AnalysisError> {
    if bands.is_empty() {
        return Err(invalid("band set is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for band in bands {
        if !seen.insert(band.label.as_str()) {
            return Err(invalid(format!("duplicate label '{}'", band.label)));
        }
        if band.thresholds().any(|x| !x.is_finite()) {
            return Err(invalid(format!("band '{}' has a non-finite threshold", band)));
        }
        if band.is_empty() {
            return Err(invalid(format!("band '{}' contains no values", band)));
        }
    }

    let mut sorted: Vec<&Band> = bands.iter().collect();
    sorted.sort_by_key(|band| band.lower_key());

    if let Some(first) = sorted.first() {
        if first.lower != Bound::Unbounded {
            return Err(invalid(format!(
                "no band covers values below band '{}'",
                first
            )));
        }
    }
    if let Some(last) = sorted.last() {
        if last.upper != Bound::Unbounded {
            return Err(invalid(format!("no band covers values above band '{}'", last)));
        }
    }

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let joined = match (prev.upper, next.lower) {
            (Bound::Included(u), Bound::Excluded(l)) | (Bound::Excluded(u), Bound::Included(l)) => {
                if u == l {
                    Ok(())
                } else if u < l {
                    Err("leave a gap")
                } else {
                    Err("overlap")
                }
            }
            (Bound::Excluded(u), Bound::Excluded(l)) if u <= l => Err("leave a gap"),
            (Bound::Included(u), Bound::Included(l)) if u < l => Err("leave a gap"),
            _ => Err("overlap"),
        };
        joined.map_err(|problem| {
            invalid(format!("bands '{}' and '{}' {}", prev, next, problem))
        })?;
    }
    Ok(())
}

/// Named band configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPreset {
    /// Above-or-equal versus below zero.
    Two,
    Three,
    Four,
}

impl BandPreset {
    pub fn band_set(&self) -> BandSet {
        match self {
            BandPreset::Two => BandSet::two_band(),
            BandPreset::Three => BandSet::three_band(),
            BandPreset::Four => BandSet::four_band(),
        }
    }

    pub fn band_count(&self) -> usize {
        match self {
            BandPreset::Two => 2,
            BandPreset::Three => 3,
            BandPreset::Four => 4,
        }
    }
}

/// Formats a preset as its band count.
///
/// # Examples
///
/// ```
/// use soiltemp::BandPreset;
///
/// assert_eq!(BandPreset::Four.to_string(), "4");
/// ```
impl fmt::Display for BandPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.band_count())
    }
}

impl FromStr for BandPreset {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "two" => Ok(BandPreset::Two),
            "3" | "three" => Ok(BandPreset::Three),
            "4" | "four" => Ok(BandPreset::Four),
            other => Err(invalid(format!("unknown band preset '{}'", other))),
        }
    }
}
