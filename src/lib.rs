#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal rendering engine
//!
//! Computes raster images of escape-time and root-finding fractals
//! over a rectangular window of the complex plane.  Four families are
//! supported: the Mandelbrot set generalized to an arbitrary power
//! `z^p + c`, Julia sets `z^2 + c` for a fixed complex constant, the
//! two-state Phoenix recurrence, and Newton basins for a small table
//! of predefined analytic functions.
//!
//! A render is a pure function of its inputs: the caller supplies a
//! pixel resolution, a viewport (the region of the complex plane that
//! is mapped onto the pixels), an iteration budget, and the
//! family-specific parameters, and receives an RGB byte buffer.
//! Nothing is cached or retained between calls; a zoom or a parameter
//! change is simply a new render.

extern crate crossbeam;
extern crate itertools;
extern crate num;
#[macro_use]
extern crate failure;

pub mod color;
pub mod error;
pub mod functions;
pub mod iterate;
pub mod kernels;
pub mod planes;
pub mod render;

pub use color::{ColorOptions, Image};
pub use error::Error;
pub use functions::Function;
pub use planes::{ComplexGrid, Viewport};
pub use render::{render, render_threaded, Family, Params};
