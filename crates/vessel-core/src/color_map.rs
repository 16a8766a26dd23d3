//! Color map system.
//!
//! A [`ColorMap`] is a continuous ramp; [`ColorMap::palette`] discretizes it
//! into the fixed-resolution palette that color indices point into.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Result, VesselError};
use crate::options::COLOR_MAP_RESOLUTION;

/// A color map for mapping normalized values to colors.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the color map at a given value (0 to 1).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);

        match self.colors.len() {
            0 => return Vec3::ZERO,
            1 => return self.colors[0],
            _ => {}
        }

        let n = self.colors.len() - 1;
        let idx = (t * n as f32).floor() as usize;
        let idx = idx.min(n - 1);
        let frac = t * n as f32 - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Discretizes the map into `resolution` colors, one per bucket.
    ///
    /// Slot `i` takes the color at the start of its bucket, so slot 0 is the
    /// first key color.
    #[allow(clippy::cast_precision_loss)]
    pub fn palette(&self, resolution: usize) -> Vec<Vec3> {
        if resolution <= 1 {
            return vec![self.sample(0.0); resolution];
        }
        let last = (resolution - 1) as f32;
        (0..resolution)
            .map(|i| self.sample(i as f32 / last))
            .collect()
    }
}

/// Linearly interpolates `count` colors from `from` towards `to`.
///
/// The end color itself is excluded, so two ramps can be chained without a
/// duplicated joint.
#[allow(clippy::cast_precision_loss)]
pub fn interpolate_colors(from: Vec3, to: Vec3, count: usize) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let delta = 1.0 / count as f32;
    (0..count).map(|i| from.lerp(to, i as f32 * delta)).collect()
}

/// Builds a `count`-color ramp through three key colors, half on each leg.
pub fn interpolate_three_colors(first: Vec3, second: Vec3, third: Vec3, count: usize) -> Vec<Vec3> {
    let head = count / 2;
    let mut colors = interpolate_colors(first, second, head);
    colors.extend(interpolate_colors(second, third, count - head));
    colors
}

/// Registry for managing color maps.
#[derive(Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // Red -> green -> blue, keyed so that the default palette hits every key
        self.register(ColorMap::new(
            "rgb",
            interpolate_three_colors(Vec3::X, Vec3::Y, Vec3::Z, COLOR_MAP_RESOLUTION),
        ));

        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        self.register(ColorMap::new(
            "blues",
            vec![
                Vec3::new(0.969, 0.984, 1.000),
                Vec3::new(0.776, 0.859, 0.937),
                Vec3::new(0.419, 0.682, 0.839),
                Vec3::new(0.129, 0.443, 0.710),
                Vec3::new(0.031, 0.188, 0.420),
            ],
        ));

        self.register(ColorMap::new(
            "reds",
            vec![
                Vec3::new(1.000, 0.961, 0.941),
                Vec3::new(0.988, 0.733, 0.631),
                Vec3::new(0.984, 0.416, 0.290),
                Vec3::new(0.796, 0.094, 0.114),
                Vec3::new(0.404, 0.000, 0.051),
            ],
        ));

        self.register(ColorMap::new(
            "coolwarm",
            vec![
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        self.register(ColorMap::new(
            "rainbow",
            vec![
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
        ));
    }

    /// Registers a color map, replacing any map with the same name.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Builds the palette of a registered map.
    pub fn palette(&self, name: &str, resolution: usize) -> Result<Vec<Vec3>> {
        self.get(name)
            .map(|map| map.palette(resolution))
            .ok_or_else(|| VesselError::UnknownColorMap(name.to_string()))
    }

    /// Returns all color map names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.color_maps.keys().map(String::as_str)
    }
}
