// Copyright @yucwang 2021

use crate::core::film::Film;
use crate::core::interaction::ShadeableIntersection;
use crate::core::material::ScatterRecord;
use crate::core::sampler::PathSampler;
use crate::core::scene::Scene;
use crate::core::segment::PathSegment;
use crate::math::constants::Vector2f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub trace_depth: u32,
    /// Worker threads per stage; 0 means one per available core.
    pub threads: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { trace_depth: 8, threads: 0 }
    }
}

/// Path tracer that advances every live path through the same bounce at
/// the same time. Each bounce runs an intersection pass and a scatter
/// pass over the whole working set, then settles finished paths onto
/// the film and compacts the survivors.
pub struct WavefrontPathTracer {
    scene: Scene,
    settings: RenderSettings,
    thread_count: usize,
    film: Film,
    segments: Vec<PathSegment>,
}

impl WavefrontPathTracer {
    pub fn new(scene: Scene, settings: RenderSettings) -> Self {
        let thread_count = if settings.threads == 0 {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            settings.threads
        };
        let film = Film::new(scene.camera().width(), scene.camera().height());
        let segments = Vec::with_capacity(scene.camera().pixel_count());

        Self { scene, settings, thread_count, film, segments }
    }

    /// Traces one jittered path per pixel and adds the results into the
    /// film. Iteration indices seed the per-path samplers, so the same
    /// index always reproduces the same paths.
    pub fn run_one_iteration(&mut self, iteration: u32) {
        self.segments = generate_paths(
            &self.scene,
            iteration,
            self.settings.trace_depth,
            self.thread_count,
        );

        let mut bounce = 0;
        while bounce < self.settings.trace_depth && !self.segments.is_empty() {
            let hits = intersection_stage(&self.scene, &self.segments, self.thread_count);
            let scatters = scatter_stage(
                &self.scene,
                &self.segments,
                &hits,
                iteration,
                bounce,
                self.thread_count,
            );
            settle_paths(&self.scene, &mut self.film, &mut self.segments, &hits, &scatters);
            log::debug!(
                "iteration {}: bounce {} leaves {} paths alive",
                iteration,
                bounce,
                self.segments.len()
            );
            bounce += 1;
        }

        // Paths still alive here never reached a light within the
        // bounce budget.
        for segment in self.segments.drain(..) {
            self.film.deposit(segment.pixel_index, RGBSpectrum::black());
        }
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn reset(&mut self) {
        self.film.clear();
    }

    pub fn into_film(self) -> Film {
        self.film
    }
}

fn generate_paths(
    scene: &Scene,
    iteration: u32,
    trace_depth: u32,
    thread_count: usize,
) -> Vec<PathSegment> {
    let camera = scene.camera();
    let width = camera.width() as usize;
    parallel_chunks(camera.pixel_count(), thread_count, |pixel_index| {
        // Jitter draws come from the one bounce stream no scatter pass
        // ever touches.
        let mut sampler = PathSampler::seeded(pixel_index, iteration, trace_depth);
        let jitter = Vector2f::new(sampler.next_f32(), sampler.next_f32());
        let x = (pixel_index % width) as u32;
        let y = (pixel_index / width) as u32;
        PathSegment::spawn(camera.generate_ray(x, y, jitter), pixel_index, trace_depth)
    })
}

fn intersection_stage(
    scene: &Scene,
    segments: &[PathSegment],
    thread_count: usize,
) -> Vec<Option<ShadeableIntersection>> {
    parallel_chunks(segments.len(), thread_count, |index| {
        scene.nearest_hit(&segments[index].ray)
    })
}

fn scatter_stage(
    scene: &Scene,
    segments: &[PathSegment],
    hits: &[Option<ShadeableIntersection>],
    iteration: u32,
    bounce: u32,
    thread_count: usize,
) -> Vec<Option<ScatterRecord>> {
    parallel_chunks(segments.len(), thread_count, |index| {
        let segment = &segments[index];
        hits[index].and_then(|hit| {
            let mut sampler = PathSampler::seeded(segment.pixel_index, iteration, bounce);
            scene
                .material(hit.material_id)
                .scatter(&segment.ray, &hit, &mut sampler)
        })
    })
}

// Single-threaded on purpose: all film writes happen here, in segment
// order, so results do not depend on worker scheduling.
fn settle_paths(
    scene: &Scene,
    film: &mut Film,
    segments: &mut Vec<PathSegment>,
    hits: &[Option<ShadeableIntersection>],
    scatters: &[Option<ScatterRecord>],
) {
    let mut survivors = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let mut segment = *segment;
        match hits[index] {
            None => {
                film.deposit(segment.pixel_index, segment.throughput * scene.background());
            }
            Some(hit) => match scatters[index] {
                None => {
                    let emission = scene.material(hit.material_id).emission();
                    film.deposit(segment.pixel_index, segment.throughput * emission);
                }
                Some(record) => {
                    segment.bounce(record.attenuation, record.ray);
                    if segment.remaining_bounces == 0 {
                        film.deposit(segment.pixel_index, RGBSpectrum::black());
                    } else {
                        survivors.push(segment);
                    }
                }
            },
        }
    }
    *segments = survivors;
}

// Chunked map over [0, total): workers claim chunks through an atomic
// cursor and send results back over a channel; the channel join is the
// stage barrier. Output index i holds op(i).
fn parallel_chunks<T, F>(total: usize, thread_count: usize, op: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    if total == 0 {
        return Vec::new();
    }

    let chunk_count = (total + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let next_chunk = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel::<(usize, Vec<T>)>();
    let mut gathered: Vec<(usize, Vec<T>)> = Vec::with_capacity(chunk_count);

    thread::scope(|scope| {
        for _ in 0..thread_count {
            let next_chunk = Arc::clone(&next_chunk);
            let tx = tx.clone();
            let op = &op;
            scope.spawn(move || {
                loop {
                    let chunk_index = next_chunk.fetch_add(1, Ordering::Relaxed);
                    if chunk_index >= chunk_count {
                        break;
                    }

                    let start = chunk_index * CHUNK_SIZE;
                    let end = (start + CHUNK_SIZE).min(total);
                    let mut results = Vec::with_capacity(end - start);
                    for index in start..end {
                        results.push(op(index));
                    }
                    if tx.send((start, results)).is_err() {
                        break;
                    }
                }
            });
        }

        drop(tx);
        for _ in 0..chunk_count {
            if let Ok(chunk) = rx.recv() {
                gathered.push(chunk);
            }
        }
    });

    gathered.sort_by_key(|&(start, _)| start);
    let mut output = Vec::with_capacity(total);
    for (_, mut results) in gathered {
        output.append(&mut results);
    }
    output
}
