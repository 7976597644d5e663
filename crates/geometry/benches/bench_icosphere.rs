use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use plume_geometry::{Cube, Icosphere};

fn bench_icosphere(level: u32, iterations: usize) {
    let sphere = Icosphere::new(Vec3::ZERO, 1.0, level);

    let start = Instant::now();
    let mut vertices = 0;
    for _ in 0..iterations {
        vertices = black_box(sphere.build()).vertex_count();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  icosphere (level {level}, {vertices} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_cube(iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        black_box(Cube::new(Vec3::splat(i as f32)).build());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cube ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== plume-geometry benchmarks ===");
    println!();

    println!("[cube]");
    bench_cube(100_000);
    println!();

    println!("[icosphere]");
    for level in 0..=6 {
        let iterations = if level < 4 { 1000 } else { 10 };
        bench_icosphere(level, iterations);
    }
}
