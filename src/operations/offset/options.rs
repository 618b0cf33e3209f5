use std::fmt;
use std::str::FromStr;

use crate::error::{OffsetError, Result};

/// Default U-turn threshold: corners whose normals meet at a cosine of this
/// value or less (turns sharper than ~168.5°) are treated as U-turns.
pub const DEFAULT_U_TURN_COS: f64 = -0.98;

/// What to do with a corner that turns back on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UTurnBehavior {
    /// Reject the polyline with [`OffsetError::SharpTurn`].
    #[default]
    Fail,
    /// Cut the corner with a flat segment (two output points).
    Chamfer,
    /// Clamp the miter length to the one the threshold angle would give.
    UseThreshold,
    /// Drop the vertex.
    Skip,
}

impl UTurnBehavior {
    /// Canonical snake_case name, as accepted by `FromStr`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Chamfer => "chamfer",
            Self::UseThreshold => "use_threshold",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for UTurnBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UTurnBehavior {
    type Err = OffsetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "chamfer" => Ok(Self::Chamfer),
            "use_threshold" | "usethreshold" | "threshold" => Ok(Self::UseThreshold),
            "skip" => Ok(Self::Skip),
            _ => Err(OffsetError::UnrecognizedPolicy(s.to_owned())),
        }
    }
}

/// Per-call configuration of the offset engine.
///
/// Passed by value to every offset, so concurrent callers with different
/// thresholds never share state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OffsetOptions {
    /// Offset an open polyline as if its ends were joined by a segment.
    pub loop_open: bool,
    /// Negate the distance for clockwise closed or looped input so positive
    /// is always inward.
    pub check_orientation: bool,
    /// Policy for corners at or below `u_turn_threshold`.
    pub u_turn: UTurnBehavior,
    /// Cosine between adjacent normals at or below which a corner is a U-turn.
    pub u_turn_threshold: f64,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            loop_open: false,
            check_orientation: true,
            u_turn: UTurnBehavior::Fail,
            u_turn_threshold: DEFAULT_U_TURN_COS,
        }
    }
}

impl OffsetOptions {
    /// Creates options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether open polylines are walked as a loop.
    #[must_use]
    pub fn loop_open(mut self, loop_open: bool) -> Self {
        self.loop_open = loop_open;
        self
    }

    /// Sets whether clockwise rings have their distances negated.
    #[must_use]
    pub fn check_orientation(mut self, check: bool) -> Self {
        self.check_orientation = check;
        self
    }

    /// Sets the U-turn policy.
    #[must_use]
    pub fn u_turn(mut self, behavior: UTurnBehavior) -> Self {
        self.u_turn = behavior;
        self
    }

    /// Sets the U-turn cosine threshold.
    #[must_use]
    pub fn u_turn_threshold(mut self, cos: f64) -> Self {
        self.u_turn_threshold = cos;
        self
    }

    /// Checks that the threshold is a usable cosine.
    ///
    /// `1.0` is rejected because every corner, including a straight
    /// continuation, would then count as a U-turn.
    ///
    /// # Errors
    ///
    /// Returns `OffsetError::InvalidThreshold` outside `[-1, 1)` or for NaN.
    pub fn validate(&self) -> Result<()> {
        let t = self.u_turn_threshold;
        if (-1.0..1.0).contains(&t) {
            Ok(())
        } else {
            Err(OffsetError::InvalidThreshold(t).into())
        }
    }
}

/// Offset distance: one value for every segment, or one per segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OffsetDistance {
    Constant(f64),
    PerSegment(Vec<f64>),
}

impl OffsetDistance {
    /// Expands to exactly `segment_count` values, negated when `flip` is set.
    ///
    /// # Errors
    ///
    /// Returns `OffsetError::MismatchedDistanceCount` if a per-segment list
    /// has the wrong length.
    pub fn resolve(&self, segment_count: usize, flip: bool) -> Result<Vec<f64>> {
        let sign = if flip { -1.0 } else { 1.0 };
        match self {
            Self::Constant(d) => Ok(vec![d * sign; segment_count]),
            Self::PerSegment(ds) => {
                if ds.len() != segment_count {
                    return Err(OffsetError::MismatchedDistanceCount {
                        expected: segment_count,
                        actual: ds.len(),
                    }
                    .into());
                }
                Ok(ds.iter().map(|d| d * sign).collect())
            }
        }
    }
}

impl From<f64> for OffsetDistance {
    fn from(d: f64) -> Self {
        Self::Constant(d)
    }
}

impl From<Vec<f64>> for OffsetDistance {
    fn from(ds: Vec<f64>) -> Self {
        Self::PerSegment(ds)
    }
}

impl From<&[f64]> for OffsetDistance {
    fn from(ds: &[f64]) -> Self {
        Self::PerSegment(ds.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolyoffsetError;

    #[test]
    fn parse_behaviors() {
        assert_eq!("fail".parse::<UTurnBehavior>().unwrap(), UTurnBehavior::Fail);
        assert_eq!(
            "Chamfer".parse::<UTurnBehavior>().unwrap(),
            UTurnBehavior::Chamfer
        );
        assert_eq!(
            "use_threshold".parse::<UTurnBehavior>().unwrap(),
            UTurnBehavior::UseThreshold
        );
        assert_eq!(
            " UseThreshold ".parse::<UTurnBehavior>().unwrap(),
            UTurnBehavior::UseThreshold
        );
        assert_eq!("skip".parse::<UTurnBehavior>().unwrap(), UTurnBehavior::Skip);
    }

    #[test]
    fn parse_unknown_behavior() {
        let err = "round".parse::<UTurnBehavior>().unwrap_err();
        assert_eq!(err, OffsetError::UnrecognizedPolicy("round".to_owned()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for b in [
            UTurnBehavior::Fail,
            UTurnBehavior::Chamfer,
            UTurnBehavior::UseThreshold,
            UTurnBehavior::Skip,
        ] {
            assert_eq!(b.to_string().parse::<UTurnBehavior>().unwrap(), b);
        }
    }

    #[test]
    fn default_options() {
        let o = OffsetOptions::default();
        assert!(!o.loop_open);
        assert!(o.check_orientation);
        assert_eq!(o.u_turn, UTurnBehavior::Fail);
        assert!((o.u_turn_threshold - DEFAULT_U_TURN_COS).abs() < 1e-15);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn threshold_validation() {
        assert!(OffsetOptions::new().u_turn_threshold(-1.0).validate().is_ok());
        assert!(OffsetOptions::new().u_turn_threshold(0.5).validate().is_ok());
        for bad in [1.0, 1.5, -1.01, f64::NAN] {
            let err = OffsetOptions::new().u_turn_threshold(bad).validate();
            assert!(matches!(
                err,
                Err(PolyoffsetError::Offset(OffsetError::InvalidThreshold(_)))
            ));
        }
    }

    #[test]
    fn resolve_constant_and_flipped() {
        let d = OffsetDistance::from(2.0);
        assert_eq!(d.resolve(3, false).unwrap(), vec![2.0, 2.0, 2.0]);
        assert_eq!(d.resolve(2, true).unwrap(), vec![-2.0, -2.0]);
    }

    #[test]
    fn resolve_per_segment_count_mismatch() {
        let d = OffsetDistance::from(vec![1.0, 2.0]);
        assert_eq!(d.resolve(2, true).unwrap(), vec![-1.0, -2.0]);
        let err = d.resolve(3, false).unwrap_err();
        assert!(matches!(
            err,
            PolyoffsetError::Offset(OffsetError::MismatchedDistanceCount {
                expected: 3,
                actual: 2
            })
        ));
    }
}
