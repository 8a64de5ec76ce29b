// Copyright @yucwang 2021

pub mod camera;
pub mod film;
pub mod interaction;
pub mod material;
pub mod sampler;
pub mod scene;
pub mod scene_loader;
pub mod segment;
pub mod shape;
