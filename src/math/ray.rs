// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, FLOAT_MAX};

// Direction is normalized on construction and every transformation that
// produces a new ray goes back through a constructor, so `dir` is always
// unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float,
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self::with_range(o, d, 0.0, FLOAT_MAX)
    }

    pub fn with_range(o: Vector3f, d: Vector3f, min_t: Float, max_t: Float) -> Self {
        Self { origin: o, dir: d.normalize(), min_t, max_t }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn in_range(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */
