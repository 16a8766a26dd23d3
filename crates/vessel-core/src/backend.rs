//! Geometry backend trait and the handles it returns.
//!
//! A [`GeometryBackend`] turns polyline batches into scene objects. Builders
//! own the returned handles but never look inside them.

use glam::Vec3;

use crate::error::Result;
use crate::options::Material;
use crate::polyline::Polyline;

/// Opaque handle to a profile (bevel) curve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileHandle {
    id: u64,
    name: String,
}

impl ProfileHandle {
    /// Creates a handle. Only backends should call this.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the backend-assigned identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Opaque handle to a geometry object created from polylines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    id: u64,
    name: String,
}

impl ObjectHandle {
    /// Creates a handle. Only backends should call this.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the backend-assigned identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Everything a backend needs to create one geometry object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDescriptor<'a> {
    /// Unique object name.
    pub name: &'a str,
    /// Polylines swept along the profile.
    pub polylines: &'a [Polyline],
    /// Base color, used when the palette is empty.
    pub color: Vec3,
    /// Surface material.
    pub material: Material,
    /// Cross-section swept along every polyline.
    pub profile: &'a ProfileHandle,
    /// Colors that polyline color indices point into.
    pub palette: &'a [Vec3],
}

/// Scene-side collaborator that creates geometry.
///
/// Implemented by the host integration; `vessel_rs::SceneBackend` is the
/// in-memory implementation.
pub trait GeometryBackend {
    /// Removes every object from the scene.
    fn clear_scene(&mut self);

    /// Removes every material from the scene.
    fn clear_scene_materials(&mut self);

    /// Creates a circular profile curve with `sides` vertices.
    fn create_profile_curve(&mut self, radius: f32, sides: u32, name: &str)
        -> Result<ProfileHandle>;

    /// Creates one object from a polyline batch.
    fn create_geometry_object(&mut self, descriptor: &ObjectDescriptor<'_>) -> Result<ObjectHandle>;
}
