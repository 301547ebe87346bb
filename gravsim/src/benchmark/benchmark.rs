//! Wall-clock cost of the step loop for growing body counts.
//!
//! Output is plain text meant for pasting into a spreadsheet.

use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::space::Space;
use crate::simulation::states::{Body, NVec2};

/// Helper to build a space of `n` non-overlapping bodies on a jittered grid
pub fn make_space(n: usize) -> Space {
    let mut space = Space::new();
    let side = (n as f64).sqrt().ceil() as usize;
    let spacing = 40.0;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let jitter = NVec2::new((i_f * 0.37).sin(), (i_f * 0.13).cos()) * 5.0;
        let cell = NVec2::new((i % side) as f64, (i / side) as f64) * spacing;
        let density = (i * 97 % 1000) as u32;
        space.add_body(Body::new(cell + jitter, 8, density));
    }

    space
}

/// Time single `step`s of the direct O(n^2) loop
pub fn bench_step() {
    // Different space sizes to test
    let ns = [50, 100, 200, 400, 800, 1600];
    let dt = Engine::default().dt();

    for n in ns {
        let mut space = make_space(n);
        let steps = if n <= 400 { 20 } else { 3 };

        // Warm up
        space.step(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            space.step(dt);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, step = {:10.6} ms", per_step * 1000.0);
    }
}

/// Time whole frames (all sub-steps) and print CSV
pub fn bench_frame_curve() {
    let engine = Engine::default();
    println!("N,frame_ms");

    for n in (25..=400).step_by(25) {
        let mut space = make_space(n);

        let t0 = Instant::now();
        engine.advance_frame(&mut space);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", n, ms);
    }
}
