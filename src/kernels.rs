// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-family iteration kernels.  Each kernel applies its
//! recurrence to every grid point for exactly `itermax` iterations
//! and produces a raw numeric grid: a smoothed escape value for
//! Mandelbrot and Julia, a first-escape index for Phoenix, and a
//! root/hit-count triple for Newton.
//!
//! Divergent iterates overflow to infinity or decay to NaN as a
//! matter of course.  That is not an error: infinities contribute
//! nothing to the Julia accumulator (`exp(-inf) == 0`), NaN
//! components are masked out of it, and the escape predicates are
//! written so a NaN simply stops matching.
use std::f64::consts::LN_2;

use num::{clamp, Complex};

use functions::Function;
use iterate::map_plane;
use planes::ComplexGrid;

/// Escape radius shared by the escape-time families.  A point whose
/// iterate exceeds magnitude 2 is bound for infinity.
const ESCAPE_RADIUS: f64 = 2.0;

/// Mandelbrot set generalized to `z^p + c`, seeded with `z = c`.
/// The first iteration at which `|z| > 2` latches the classical
/// smoothed escape value `i + 1 - ln(ln|z|)/ln 2`; bounded points
/// record 0.  The whole grid is then normalized by the iteration
/// budget and clamped to [0, 1], so the result feeds straight into
/// the HSV mapper.
pub fn mandelbrot(grid: &ComplexGrid, itermax: usize, p: f64, threads: usize) -> Vec<f64> {
    map_plane(grid, threads, |c| {
        mandelbrot_pixel(c, p, itermax) / (itermax as f64)
    })
}

fn mandelbrot_pixel(c: Complex<f64>, p: f64, itermax: usize) -> f64 {
    let mut z = c;
    for i in 0..itermax {
        // Squaring runs much faster than the general power and is
        // numerically identical at p == 2.
        z = if p == 2.0 { z * z } else { z.powf(p) };
        z += c;
        if z.norm_sqr() > ESCAPE_RADIUS * ESCAPE_RADIUS {
            let smoothed = (i as f64) + 1.0 - z.norm().ln().ln() / LN_2;
            return clamp(smoothed, 0.0, itermax as f64);
        }
    }
    0.0
}

/// Julia set `z^2 + c` for a fixed complex constant `c`, seeded with
/// the grid point itself.  There is no escape latch; every iteration
/// adds `exp(-|z|)` to the pixel's accumulator, skipping iterates
/// with a NaN component.  Escaped points stop contributing on their
/// own because `exp(-inf)` is zero.  Normalized by the iteration
/// budget and clamped to [0, 1].
pub fn julia(grid: &ComplexGrid, itermax: usize, c: Complex<f64>, threads: usize) -> Vec<f64> {
    map_plane(grid, threads, |seed| {
        let mut z = seed;
        let mut acc = 0.0;
        for _ in 0..itermax {
            z = z * z + c;
            if !z.re.is_nan() && !z.im.is_nan() {
                acc += (-z.norm()).exp();
            }
        }
        clamp(acc / (itermax as f64), 0.0, 1.0)
    })
}

/// The two-state Phoenix recurrence `z1 <- z1^2 + c + P*z0`, where
/// `z0` trails one iteration behind `z1`.  The grid point seeds `z1`
/// and `z0` starts at zero.  Records the first iteration index at
/// which `|z1| > 2`, exactly once per pixel; bounded points record 0.
pub fn phoenix(grid: &ComplexGrid, itermax: usize, p: f64, c: f64, threads: usize) -> Vec<f64> {
    map_plane(grid, threads, |seed| {
        let mut z1 = seed;
        let mut z0 = Complex::new(0.0, 0.0);
        for i in 0..itermax {
            let previous = z1;
            z1 = z1 * z1 + Complex::new(c, 0.0) + z0.scale(p);
            z0 = previous;
            if z1.norm_sqr() > ESCAPE_RADIUS * ESCAPE_RADIUS {
                return (i + 1) as f64;
            }
        }
        0.0
    })
}

/// The three parallel grids a Newton render produces: the real and
/// imaginary parts of the final iterate, and the number of iterations
/// at which the iterate sat within epsilon of a root.
#[derive(Debug)]
pub struct RootGrids {
    /// Real part of the final iterate, per pixel.
    pub re: Vec<f64>,
    /// Imaginary part of the final iterate, per pixel.
    pub im: Vec<f64>,
    /// Convergence hit count, per pixel.  Cumulative: a pixel that
    /// re-enters the epsilon ball is counted again.
    pub hits: Vec<f64>,
}

/// Newton basins for a supplied `(f, f')` pair: `z <- z - a*f(z)/f'(z)`.
/// Every iteration whose iterate satisfies `|f(z)| < epsilon` bumps
/// the pixel's hit counter; there is no latch and no early exit, so
/// the counter accumulates the time spent near a root.
pub fn newton(
    grid: &ComplexGrid,
    itermax: usize,
    f: Function,
    a: f64,
    epsilon: f64,
    threads: usize,
) -> RootGrids {
    let triples = map_plane(grid, threads, |seed| {
        let mut z = seed;
        let mut hits = 0u32;
        for _ in 0..itermax {
            z = f.newton_step(z, a);
            if f.eval(z).norm() < epsilon {
                hits += 1;
            }
        }
        (z.re, z.im, f64::from(hits))
    });

    let mut roots = RootGrids {
        re: Vec::with_capacity(triples.len()),
        im: Vec::with_capacity(triples.len()),
        hits: Vec::with_capacity(triples.len()),
    };
    for (re, im, hits) in triples {
        roots.re.push(re);
        roots.im.push(im);
        roots.hits.push(hits);
    }
    roots
}
