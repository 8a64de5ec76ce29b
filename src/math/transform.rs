// Copyright 2020 @TwoCookingMice

use super::constants::{Matrix4f, Vector3f};

use nalgebra::{Point3, Rotation3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f,
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(), inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self {
            matrix,
            inv_matrix: matrix.try_inverse().unwrap_or_else(Matrix4f::identity),
        }
    }

    // Scale first, then rotate (euler angles in degrees, x/y/z order), then
    // translate. This is the placement vocabulary of the scene format.
    pub fn from_trs(translate: Vector3f, rotate_deg: Vector3f, scale: Vector3f) -> Self {
        let rotation = Rotation3::from_euler_angles(
            rotate_deg.x.to_radians(),
            rotate_deg.y.to_radians(),
            rotate_deg.z.to_radians(),
        );
        let matrix = Matrix4f::new_translation(&translate)
            * rotation.to_homogeneous()
            * Matrix4f::new_nonuniform_scaling(&scale);
        Self::new(matrix)
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        self.matrix.transform_point(&Point3::from(p)).coords
    }

    // Normals transform by the inverse transpose, which keeps them
    // perpendicular to the surface under nonuniform scaling.
    pub fn apply_normal(&self, n: Vector3f) -> Vector3f {
        self.inv_matrix.transpose().transform_vector(&n)
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        self.inv_matrix.transform_point(&Point3::from(p)).coords
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.transform_vector(&v)
    }
}

/* Tests for Transform */
