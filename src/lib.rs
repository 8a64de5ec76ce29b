// Copyright @yucwang 2021

#![allow(dead_code)]

pub mod core;
pub mod io;
pub mod math;
pub mod renderers;
pub mod shapes;
