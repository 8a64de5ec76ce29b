// Copyright 2020 TwoCookingMice

#![allow(dead_code)]

pub extern crate nalgebra as na;

mod core;
mod io;
mod math;
mod renderers;
mod shapes;

use self::core::scene_loader::load_scene_with_settings;
use self::io::exr_utils;
use self::io::png_utils;
use self::renderers::wavefront::{ RenderSettings, WavefrontPathTracer };

use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::env;
use std::time::Instant;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <scene.xml> <output.(exr|png)> [--iterations N] [--depth N] [--threads N]", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let mut iterations_override: Option<u32> = None;
    let mut depth_override: Option<u32> = None;
    let mut threads: usize = 0;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" => {
                i += 1;
                iterations_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--depth" => {
                i += 1;
                depth_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--threads" => {
                i += 1;
                threads = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
            }
            _ => {}
        }
        i += 1;
    }

    let load_result = load_scene_with_settings(input_path)
        .expect("failed to load scene");

    let iterations = iterations_override.or(load_result.iterations).unwrap_or(16);
    let trace_depth = depth_override.or(load_result.trace_depth).unwrap_or(8);

    let scene = load_result.scene;
    let width = scene.camera().width();
    let height = scene.camera().height();
    log::info!(
        "Rendering {}x{}, {} iterations, trace depth {}.",
        width, height, iterations, trace_depth
    );

    let mut tracer = WavefrontPathTracer::new(scene, RenderSettings { trace_depth, threads });

    let started = Instant::now();
    let progress = ProgressBar::new(iterations as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} iterations")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    for iteration in 0..iterations {
        tracer.run_one_iteration(iteration);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let film = tracer.into_film();
    let image = film.average(iterations);
    if output_path.ends_with(".png") {
        png_utils::write_png_to_file(&image, width, height, output_path);
    } else {
        exr_utils::write_exr_to_file(&image, width as usize, height as usize, output_path);
    }

    println!(
        "{} {} iterations in {}",
        console::style("Rendered").green().bold(),
        iterations,
        HumanDuration(started.elapsed())
    );
}
