use std::str::FromStr;

use crate::error::{MosaixError, MosaixResult};

/// Shape drawn for every grid cell.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned filled square.
    #[default]
    Square,
    /// Filled circle.
    Circle,
    /// Square rotated 45 degrees.
    Diamond,
    /// Five-pointed star.
    Star,
}

impl FromStr for Shape {
    type Err = MosaixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "star" => Ok(Self::Star),
            other => Err(MosaixError::invalid_config(format!(
                "unrecognized shape '{other}' (expected square, circle, diamond or star)"
            ))),
        }
    }
}

/// Grid phase shift, accepted in three spellings.
///
/// Resolution precedence: explicit per-axis fields, then a two-element
/// pair, then one scalar applied to both axes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum OffsetSpec {
    /// Explicit `{x, y}` fields; a missing field defaults to 0.
    Axes {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    /// `[x, y]` pair.
    Pair([f64; 2]),
    /// One scalar applied to both axes.
    Scalar(f64),
}

impl Default for OffsetSpec {
    fn default() -> Self {
        Self::Scalar(0.0)
    }
}

impl OffsetSpec {
    /// Resolve to the canonical `(x, y)` pair.
    pub fn resolve(self) -> (f64, f64) {
        match self {
            Self::Axes { x, y } => (x, y),
            Self::Pair([x, y]) => (x, y),
            Self::Scalar(v) => (v, v),
        }
    }
}

/// One sampling layer's options. Every field has a default, so `{}`
/// deserializes to the default pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Grid spacing in surface units. Must be finite and > 0.
    pub resolution: f64,
    /// Shape size in surface units; defaults to `resolution`.
    pub size: Option<f64>,
    /// Shape drawn at each sample.
    pub shape: Shape,
    /// Opacity multiplier applied to each sampled pixel's alpha.
    pub alpha: f64,
    /// Grid phase shift.
    pub offset: OffsetSpec,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            resolution: 16.0,
            size: None,
            shape: Shape::default(),
            alpha: 1.0,
            offset: OffsetSpec::default(),
        }
    }
}

impl PassConfig {
    /// Validate and default into the canonical pass record.
    ///
    /// Fails before any drawing: a pass that does not normalize draws
    /// nothing.
    pub fn normalize(&self) -> MosaixResult<ResolvedPass> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(MosaixError::invalid_config(format!(
                "resolution must be finite and > 0, got {}",
                self.resolution
            )));
        }
        let (offset_x, offset_y) = self.offset.resolve();
        Ok(ResolvedPass {
            resolution: self.resolution,
            size: self.size.unwrap_or(self.resolution),
            shape: self.shape,
            alpha: self.alpha,
            offset_x,
            offset_y,
        })
    }
}

/// Canonical, validated form of a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPass {
    /// Grid spacing in surface units.
    pub resolution: f64,
    /// Shape size in surface units.
    pub size: f64,
    /// Shape drawn at each sample.
    pub shape: Shape,
    /// Opacity multiplier.
    pub alpha: f64,
    /// Horizontal grid phase shift.
    pub offset_x: f64,
    /// Vertical grid phase shift.
    pub offset_y: f64,
}

/// One pass or an ordered list of passes.
///
/// Layer 0 is drawn first, so layer N sits visually atop layers 0..N-1.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PassOptions {
    /// A single rendering layer.
    Single(PassConfig),
    /// An ordered list of layers composited onto the same surface.
    List(Vec<PassConfig>),
}

impl PassOptions {
    /// Deserialize from an untyped JSON value.
    ///
    /// Anything that is neither one config object nor a list of them fails
    /// with `UnsupportedOptions`.
    pub fn from_json(value: serde_json::Value) -> MosaixResult<Self> {
        serde_json::from_value(value).map_err(|err| {
            MosaixError::unsupported_options(format!(
                "pass options must be one config or a list of configs: {err}"
            ))
        })
    }

    /// Passes in draw order.
    pub fn passes(&self) -> &[PassConfig] {
        match self {
            Self::Single(config) => std::slice::from_ref(config),
            Self::List(list) => list,
        }
    }
}

impl From<PassConfig> for PassOptions {
    fn from(config: PassConfig) -> Self {
        Self::Single(config)
    }
}

impl From<Vec<PassConfig>> for PassOptions {
    fn from(list: Vec<PassConfig>) -> Self {
        Self::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let pass = PassConfig::default().normalize().unwrap();
        assert_eq!(pass.resolution, 16.0);
        assert_eq!(pass.size, 16.0);
        assert_eq!(pass.shape, Shape::Square);
        assert_eq!(pass.alpha, 1.0);
        assert_eq!((pass.offset_x, pass.offset_y), (0.0, 0.0));
    }

    #[test]
    fn size_defaults_to_resolution() {
        let config = PassConfig {
            resolution: 7.0,
            ..PassConfig::default()
        };
        assert_eq!(config.normalize().unwrap().size, 7.0);

        let config = PassConfig {
            resolution: 7.0,
            size: Some(3.0),
            ..PassConfig::default()
        };
        assert_eq!(config.normalize().unwrap().size, 3.0);
    }

    #[test]
    fn non_positive_resolution_is_invalid() {
        for resolution in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let config = PassConfig {
                resolution,
                ..PassConfig::default()
            };
            let err = config.normalize().unwrap_err();
            assert!(err.to_string().contains("invalid config:"), "{err}");
        }
    }

    #[test]
    fn offset_precedence_axes_pair_scalar_absent() {
        let axes: OffsetSpec = serde_json::from_value(serde_json::json!({"x": 5, "y": 3})).unwrap();
        assert_eq!(axes.resolve(), (5.0, 3.0));

        let pair: OffsetSpec = serde_json::from_value(serde_json::json!([5, 3])).unwrap();
        assert_eq!(pair.resolve(), (5.0, 3.0));

        let scalar: OffsetSpec = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(scalar.resolve(), (7.0, 7.0));

        assert_eq!(OffsetSpec::default().resolve(), (0.0, 0.0));
    }

    #[test]
    fn offset_axes_missing_field_defaults_to_zero() {
        let offset: OffsetSpec = serde_json::from_value(serde_json::json!({"x": 2})).unwrap();
        assert_eq!(offset.resolve(), (2.0, 0.0));
    }

    #[test]
    fn shape_parses_the_four_names_only() {
        assert_eq!("square".parse::<Shape>().unwrap(), Shape::Square);
        assert_eq!("circle".parse::<Shape>().unwrap(), Shape::Circle);
        assert_eq!("diamond".parse::<Shape>().unwrap(), Shape::Diamond);
        assert_eq!("star".parse::<Shape>().unwrap(), Shape::Star);

        let err = "hexagon".parse::<Shape>().unwrap_err();
        assert!(err.to_string().contains("invalid config:"), "{err}");
    }

    #[test]
    fn options_accept_one_config_or_a_list() {
        let single = PassOptions::from_json(serde_json::json!({"resolution": 8})).unwrap();
        assert_eq!(single.passes().len(), 1);
        assert_eq!(single.passes()[0].resolution, 8.0);

        let list = PassOptions::from_json(serde_json::json!([
            {"shape": "circle"},
            {"shape": "star", "offset": [4, 2]}
        ]))
        .unwrap();
        assert_eq!(list.passes().len(), 2);
        assert_eq!(list.passes()[0].shape, Shape::Circle);
        assert_eq!(list.passes()[1].offset.resolve(), (4.0, 2.0));
    }

    #[test]
    fn empty_object_is_the_default_pass() {
        let options = PassOptions::from_json(serde_json::json!({})).unwrap();
        assert_eq!(options.passes().len(), 1);
        assert_eq!(options.passes()[0], PassConfig::default());
    }

    #[test]
    fn other_option_shapes_are_unsupported() {
        for value in [
            serde_json::json!("square"),
            serde_json::json!(12),
            serde_json::json!(null),
        ] {
            let err = PassOptions::from_json(value).unwrap_err();
            assert!(err.to_string().contains("unsupported options:"), "{err}");
        }
    }
}
