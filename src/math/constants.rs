/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;
pub type Int = i32;
pub type UInt = u32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;
pub type Matrix4f = nalgebra::Matrix4<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;
pub const TWO_PI: Float = 6.28318530718;
pub const SQRT_ONE_THIRD: Float = 0.57735026919;

pub const FLOAT_MAX: Float = std::f32::MAX;

// Offset applied to every scattered ray origin along its new direction so a
// path never re-hits the surface it just left.
pub const RAY_OFFSET: Float = 1e-3;
