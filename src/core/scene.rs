// Copyright @yucwang 2026

use crate::core::camera::Camera;
use crate::core::interaction::ShadeableIntersection;
use crate::core::material::Material;
use crate::core::shape::Shape;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

pub struct Primitive {
    pub shape: Box<dyn Shape>,
    pub material_id: usize,
}

/// Everything the renderer traces against. Immutable once rendering
/// starts; shared by reference across the worker threads.
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    camera: Camera,
    background: RGBSpectrum,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            primitives: Vec::new(),
            materials: Vec::new(),
            camera,
            background: RGBSpectrum::black(),
        }
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_primitive(&mut self, shape: Box<dyn Shape>, material_id: usize) {
        debug_assert!(material_id < self.materials.len());
        self.primitives.push(Primitive { shape, material_id });
    }

    pub fn set_background(&mut self, background: RGBSpectrum) {
        self.background = background;
    }

    pub fn background(&self) -> RGBSpectrum {
        self.background
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn material(&self, material_id: usize) -> &Material {
        &self.materials[material_id]
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest intersection of `ray` with any primitive, by linear scan.
    /// Keeps the first primitive on exact ties.
    pub fn nearest_hit(&self, ray: &Ray3f) -> Option<ShadeableIntersection> {
        let mut nearest: Option<ShadeableIntersection> = None;
        for primitive in self.primitives.iter() {
            if let Some(hit) = primitive.shape.ray_intersection(ray) {
                let closer = match nearest {
                    Some(ref best) => hit.t < best.t,
                    None => true,
                };
                if closer {
                    nearest = Some(ShadeableIntersection::new(hit, primitive.material_id));
                }
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::SurfaceHit;
    use crate::math::constants::{Float, Vector3f};

    struct TestShape {
        t: Float,
    }

    impl TestShape {
        fn new(t: Float) -> Self {
            Self { t }
        }
    }

    impl Shape for TestShape {
        fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
            if !ray.in_range(self.t) {
                return None;
            }
            Some(SurfaceHit::new(self.t, Vector3f::new(0.0, 0.0, 1.0)))
        }
    }

    fn test_camera() -> Camera {
        Camera::new(
            Vector3f::new(0.0, 0.0, 5.0),
            Vector3f::zeros(),
            Vector3f::new(0.0, 1.0, 0.0),
            1.0,
            4,
            4,
        )
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut scene = Scene::new(test_camera());
        let matte = scene.add_material(Material::Diffuse { albedo: RGBSpectrum::splat(0.5) });
        scene.add_primitive(Box::new(TestShape::new(5.0)), matte);
        scene.add_primitive(Box::new(TestShape::new(2.0)), matte);
        scene.add_primitive(Box::new(TestShape::new(10.0)), matte);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.t, 2.0);
    }

    #[test]
    fn test_nearest_hit_tie_keeps_first_primitive() {
        let mut scene = Scene::new(test_camera());
        let first = scene.add_material(Material::Diffuse { albedo: RGBSpectrum::splat(0.1) });
        let second = scene.add_material(Material::Diffuse { albedo: RGBSpectrum::splat(0.9) });
        scene.add_primitive(Box::new(TestShape::new(3.0)), first);
        scene.add_primitive(Box::new(TestShape::new(3.0)), second);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.material_id, first);
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new(test_camera());
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0));
        assert!(scene.nearest_hit(&ray).is_none());
        assert!(scene.is_empty());
    }
}
