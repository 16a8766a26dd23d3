//! Reconstruction options.
//!
//! [`Options`] is an immutable value handed to each builder at construction
//! time. It can be loaded from JSON and is validated once, before a builder
//! touches the scene.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VesselError};

/// Bounds of [`RadiusPolicy::Fixed`] in microns.
pub const FIXED_RADIUS_RANGE: (f32, f32) = (0.05, 5.0);

/// Bounds of [`RadiusPolicy::Scaled`].
pub const RADIUS_SCALE_RANGE: (f32, f32) = (0.01, 5.0);

/// Bounds of the profile side count.
pub const BEVEL_SIDES_RANGE: (u32, u32) = (4, 128);

/// Default number of palette slots for metric color coding.
pub const COLOR_MAP_RESOLUTION: usize = 10;

/// Default morphology color.
pub const GRAY: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Reconstruction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Strategy used to turn the skeleton into geometry.
    pub reconstruction_method: ReconstructionMethod,

    /// Global radius policy applied after assembly.
    pub radius_policy: RadiusPolicy,

    /// How each polyline picks its palette slot.
    pub color_coding: ColorCoding,

    /// What to do when the metric range is empty.
    pub degenerate_range: DegenerateRangePolicy,

    /// Base color of every produced object.
    pub color_mode: ColorMode,

    /// Name of the color map the palette is drawn from.
    pub color_map: String,

    /// Number of palette slots.
    pub color_map_resolution: usize,

    /// Surface material of the produced objects.
    pub material: Material,

    /// Number of sides of the tube cross-section.
    pub bevel_sides: u32,

    /// Drop samples that overlap their predecessor before assembly.
    pub adaptive_resampling: bool,

    /// Keep the morphology in its original coordinates instead of centering it.
    pub global_coordinates: bool,

    /// Seed for per-component random colors.
    pub random_seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reconstruction_method: ReconstructionMethod::DisconnectedSections,
            radius_policy: RadiusPolicy::AsSpecified,
            color_coding: ColorCoding::SingleColor,
            degenerate_range: DegenerateRangePolicy::FallBackToSingleColor,
            color_mode: ColorMode::Fixed(GRAY),
            color_map: "rgb".to_string(),
            color_map_resolution: COLOR_MAP_RESOLUTION,
            material: Material::Clay,
            bevel_sides: 8,
            adaptive_resampling: false,
            global_coordinates: true,
            random_seed: 0,
        }
    }
}

impl Options {
    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every bounded value.
    pub fn validate(&self) -> Result<()> {
        self.radius_policy.validate()?;

        let (min_sides, max_sides) = BEVEL_SIDES_RANGE;
        if !(min_sides..=max_sides).contains(&self.bevel_sides) {
            return Err(VesselError::InvalidOptions(format!(
                "bevel sides {} outside [{min_sides}, {max_sides}]",
                self.bevel_sides
            )));
        }

        if self.color_map_resolution == 0 {
            return Err(VesselError::InvalidOptions(
                "color map resolution must be at least 1".to_string(),
            ));
        }

        if let ColorMode::Fixed(color) = self.color_mode {
            if !color.is_finite() {
                return Err(VesselError::InvalidOptions(format!(
                    "color {color} is not finite"
                )));
            }
        }

        Ok(())
    }
}

/// Strategy used to reconstruct the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReconstructionMethod {
    /// Each segment is an independent primitive.
    DisconnectedSegments,
    /// Each section is an independent primitive.
    #[default]
    DisconnectedSections,
    /// The sections of one arbor are joined together.
    ConnectedSections,
    /// The whole morphology is one continuous skeleton.
    ConnectedSkeleton,
}

impl ReconstructionMethod {
    /// All methods, in menu order.
    pub const ALL: [Self; 4] = [
        Self::DisconnectedSegments,
        Self::DisconnectedSections,
        Self::ConnectedSections,
        Self::ConnectedSkeleton,
    ];
}

/// Global radius policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RadiusPolicy {
    /// Radii as reported by the morphology.
    #[default]
    AsSpecified,
    /// Every radius is set to this value.
    Fixed(f32),
    /// Every radius is multiplied by this factor.
    Scaled(f32),
}

impl RadiusPolicy {
    /// Parses a policy from its name and associated value.
    ///
    /// The value is ignored for `as-specified`.
    pub fn from_name(name: &str, value: f32) -> Result<Self> {
        let policy = match name.parse::<RadiusPolicyKind>()? {
            RadiusPolicyKind::AsSpecified => Self::AsSpecified,
            RadiusPolicyKind::Fixed => Self::Fixed(value),
            RadiusPolicyKind::Scaled => Self::Scaled(value),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the associated value against its bounds.
    pub fn validate(&self) -> Result<()> {
        let (value, (min, max), what) = match *self {
            Self::AsSpecified => return Ok(()),
            Self::Fixed(value) => (value, FIXED_RADIUS_RANGE, "fixed radius"),
            Self::Scaled(value) => (value, RADIUS_SCALE_RANGE, "radius scale"),
        };
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(VesselError::InvalidRadiusPolicy(format!(
                "{what} {value} outside [{min}, {max}]"
            )))
        }
    }
}

/// Name-only form of [`RadiusPolicy`], as exposed by configuration menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusPolicyKind {
    AsSpecified,
    Fixed,
    Scaled,
}

impl FromStr for RadiusPolicyKind {
    type Err = VesselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "as-specified" => Ok(Self::AsSpecified),
            "fixed" => Ok(Self::Fixed),
            "scaled" => Ok(Self::Scaled),
            other => Err(VesselError::InvalidRadiusPolicy(format!(
                "unknown policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RadiusPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AsSpecified => "as-specified",
            Self::Fixed => "fixed",
            Self::Scaled => "scaled",
        };
        f.write_str(name)
    }
}

/// How polylines choose their palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorCoding {
    /// Every polyline uses slot 0.
    #[default]
    SingleColor,
    /// Adjacent primitives alternate between slots 0 and 1.
    Alternating,
    /// Bucketed by average radius.
    Radius,
    /// Bucketed by length.
    Length,
    /// Bucketed by lateral surface area.
    SurfaceArea,
    /// Bucketed by volume.
    Volume,
}

/// Behaviour when a metric's global minimum equals its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegenerateRangePolicy {
    /// Log a warning and color every polyline with slot 0.
    #[default]
    FallBackToSingleColor,
    /// Abort the pass with [`VesselError::DegenerateRange`].
    Abort,
}

/// Base color of the produced objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorMode {
    /// One color for every object.
    Fixed(Vec3),
    /// A random color per component.
    RandomPerComponent,
    /// Black for even components, white for odd ones.
    BlackAndWhitePerComponent,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Fixed(GRAY)
    }
}

/// Surface material of the produced objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Clay,
    Wax,
    Candy,
    Flat,
    Mud,
    Ceramic,
    Jade,
    Normal,
}

impl Material {
    /// Returns the material name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Clay => "clay",
            Self::Wax => "wax",
            Self::Candy => "candy",
            Self::Flat => "flat",
            Self::Mud => "mud",
            Self::Ceramic => "ceramic",
            Self::Jade => "jade",
            Self::Normal => "normal",
        }
    }
}
