// Copyright @yucwang 2026

pub mod cube;
pub mod sphere;
