//! In-memory geometry backend.
//!
//! [`SceneBackend`] records every profile and object it is asked to create,
//! so builders can run headless and their output can be inspected.

use std::f32::consts::TAU;

use vessel_core::{
    GeometryBackend, Material, ObjectDescriptor, ObjectHandle, Polyline, ProfileHandle, Registry,
    Result, Vec3, VesselError,
};

const PROFILE_KIND: &str = "Profile";
const OBJECT_KIND: &str = "Object";
const MATERIAL_KIND: &str = "Material";

/// A circular cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneProfile {
    pub handle: ProfileHandle,
    pub radius: f32,
    /// Vertices in the XY plane, counter-clockwise from +X.
    pub vertices: Vec<Vec3>,
}

/// A tube object swept from polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub handle: ObjectHandle,
    pub polylines: Vec<Polyline>,
    pub color: Vec3,
    pub material: Material,
    pub profile: ProfileHandle,
    pub palette: Vec<Vec3>,
}

impl SceneObject {
    /// Returns the color of one polyline: its palette slot, or the object
    /// color when the palette is empty.
    pub fn polyline_color(&self, polyline: &Polyline) -> Vec3 {
        if self.palette.is_empty() {
            return self.color;
        }
        let slot = polyline.color_index().min(self.palette.len() - 1);
        self.palette[slot]
    }

    /// Returns the total number of samples over all polylines.
    pub fn number_of_samples(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }
}

#[derive(Debug, Clone)]
enum SceneEntry {
    Profile(SceneProfile),
    Object(SceneObject),
    Material,
}

/// A scene held in memory.
#[derive(Debug, Default)]
pub struct SceneBackend {
    registry: Registry<SceneEntry>,
    next_id: u64,
    clear_count: usize,
}

impl SceneBackend {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Returns the objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.registry
            .get_all_of_kind(OBJECT_KIND)
            .filter_map(|entry| match entry {
                SceneEntry::Object(object) => Some(object),
                _ => None,
            })
    }

    /// Returns an object by name.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        match self.registry.get(OBJECT_KIND, name) {
            Some(SceneEntry::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// Returns a profile by name.
    pub fn profile(&self, name: &str) -> Option<&SceneProfile> {
        match self.registry.get(PROFILE_KIND, name) {
            Some(SceneEntry::Profile(profile)) => Some(profile),
            _ => None,
        }
    }

    /// Returns the number of objects.
    pub fn object_count(&self) -> usize {
        self.registry.len_of_kind(OBJECT_KIND)
    }

    /// Returns the number of profiles.
    pub fn profile_count(&self) -> usize {
        self.registry.len_of_kind(PROFILE_KIND)
    }

    /// Returns the number of distinct materials in use.
    pub fn material_count(&self) -> usize {
        self.registry.len_of_kind(MATERIAL_KIND)
    }

    /// Returns how many times the scene was cleared.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl GeometryBackend for SceneBackend {
    fn clear_scene(&mut self) {
        self.registry.remove_all_of_kind(OBJECT_KIND);
        self.registry.remove_all_of_kind(PROFILE_KIND);
        self.clear_count += 1;
    }

    fn clear_scene_materials(&mut self) {
        self.registry.remove_all_of_kind(MATERIAL_KIND);
    }

    fn create_profile_curve(&mut self, radius: f32, sides: u32, name: &str) -> Result<ProfileHandle> {
        if sides < 3 {
            return Err(VesselError::DegenerateProfile { sides });
        }
        if self.registry.contains(PROFILE_KIND, name) {
            return Err(VesselError::ObjectExists(name.to_string()));
        }

        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU * i as f32 / sides as f32;
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect();
        let handle = ProfileHandle::new(self.allocate_id(), name);
        self.registry.register(
            PROFILE_KIND,
            name,
            SceneEntry::Profile(SceneProfile {
                handle: handle.clone(),
                radius,
                vertices,
            }),
        )?;
        log::debug!("created profile '{name}' with {sides} sides");
        Ok(handle)
    }

    fn create_geometry_object(&mut self, descriptor: &ObjectDescriptor<'_>) -> Result<ObjectHandle> {
        if self.registry.contains(OBJECT_KIND, descriptor.name) {
            return Err(VesselError::ObjectExists(descriptor.name.to_string()));
        }

        let material = descriptor.material.name();
        if !self.registry.contains(MATERIAL_KIND, material) {
            self.registry
                .register(MATERIAL_KIND, material, SceneEntry::Material)?;
        }

        let handle = ObjectHandle::new(self.allocate_id(), descriptor.name);
        self.registry.register(
            OBJECT_KIND,
            descriptor.name,
            SceneEntry::Object(SceneObject {
                handle: handle.clone(),
                polylines: descriptor.polylines.to_vec(),
                color: descriptor.color,
                material: descriptor.material,
                profile: descriptor.profile.clone(),
                palette: descriptor.palette.to_vec(),
            }),
        )?;
        log::debug!(
            "created object '{}' from {} poly-lines",
            descriptor.name,
            descriptor.polylines.len()
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vessel_core::Sample;

    fn descriptor<'a>(
        name: &'a str,
        polylines: &'a [Polyline],
        profile: &'a ProfileHandle,
        palette: &'a [Vec3],
    ) -> ObjectDescriptor<'a> {
        ObjectDescriptor {
            name,
            polylines,
            color: Vec3::splat(0.5),
            material: Material::Wax,
            profile,
            palette,
        }
    }

    #[test]
    fn test_profile_vertices() {
        let mut scene = SceneBackend::new();
        let handle = scene.create_profile_curve(2.0, 4, "bevel").unwrap();
        let profile = scene.profile("bevel").unwrap();
        assert_eq!(profile.handle, handle);
        assert_eq!(profile.vertices.len(), 4);
        assert!((profile.vertices[1] - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_profile_rejected() {
        let mut scene = SceneBackend::new();
        assert!(matches!(
            scene.create_profile_curve(1.0, 0, "bevel"),
            Err(VesselError::DegenerateProfile { sides: 0 })
        ));
        assert_eq!(scene.profile_count(), 0);
    }

    #[test]
    fn test_objects_and_clear() {
        let mut scene = SceneBackend::new();
        let profile = scene.create_profile_curve(1.0, 8, "bevel").unwrap();
        let polylines = vec![Polyline::new(
            vec![Sample::new(Vec3::ZERO, 1.0), Sample::new(Vec3::X, 1.0)],
            1,
        )];
        let palette = [Vec3::X, Vec3::Y];

        let handle = scene
            .create_geometry_object(&descriptor("a", &polylines, &profile, &palette))
            .unwrap();
        assert_eq!(handle.name(), "a");
        assert!(matches!(
            scene.create_geometry_object(&descriptor("a", &polylines, &profile, &palette)),
            Err(VesselError::ObjectExists(_))
        ));

        let object = scene.object("a").unwrap();
        assert_eq!(object.polyline_color(&object.polylines[0]), Vec3::Y);
        assert_eq!(object.number_of_samples(), 2);
        assert_eq!(scene.material_count(), 1);

        scene.clear_scene();
        scene.clear_scene_materials();
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.profile_count(), 0);
        assert_eq!(scene.material_count(), 0);
        assert_eq!(scene.clear_count(), 1);
    }
}
