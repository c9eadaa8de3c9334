// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The engine's single entry point: pick a family, hand over a
//! viewport, a resolution, an iteration budget and the family's
//! parameters, and get back an RGB image.  Each family is one arm of
//! a tagged dispatch from kernel to color mapper; adding a family
//! means adding an arm, not a type hierarchy.
use std::str::FromStr;

use num::Complex;

use color;
use color::{ColorOptions, Image};
use error::Error;
use functions::Function;
use kernels;
use planes::{ComplexGrid, Viewport};

/// The supported fractal families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Family {
    /// Escape-time `z^p + c` over the plane of `c` values.
    Mandelbrot,
    /// Escape-time `z^2 + c` over the plane of `z` seeds.
    Julia,
    /// The two-state Phoenix recurrence.
    Phoenix,
    /// Newton basin fractals for a predefined `(f, f')` pair.
    Newton,
}

impl Family {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Family::Mandelbrot => "mandelbrot",
            Family::Julia => "julia",
            Family::Phoenix => "phoenix",
            Family::Newton => "newton",
        }
    }

    /// A viewport that frames the family's classic view, for callers
    /// that have no better starting point.
    pub fn default_viewport(self) -> Viewport {
        let (xmin, xmax, ymin, ymax) = match self {
            Family::Mandelbrot => (-2.0, 0.5, -1.25, 1.25),
            Family::Julia => (-1.5, 1.5, -1.5, 1.5),
            Family::Phoenix => (-1.5, 1.5, -1.5, 1.5),
            Family::Newton => (-1.0, 1.0, -1.0, 1.0),
        };
        // The table above is strictly increasing on both axes.
        Viewport::new(xmin, xmax, ymin, ymax).unwrap()
    }

    /// Every family, in presentation order, so a UI can populate a
    /// selector without a registry.
    pub fn all() -> &'static [Family] {
        &[
            Family::Mandelbrot,
            Family::Julia,
            Family::Phoenix,
            Family::Newton,
        ]
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Family, String> {
        match s {
            "mandelbrot" => Ok(Family::Mandelbrot),
            "julia" => Ok(Family::Julia),
            "phoenix" => Ok(Family::Phoenix),
            "newton" => Ok(Family::Newton),
            other => Err(format!("unknown fractal family `{}`", other)),
        }
    }
}

/// Per-render parameters.  Each family reads only the fields it
/// needs and rejects the render with `MissingParameter` if a required
/// one is `None`; color options always carry usable defaults.
#[derive(Copy, Clone, Debug, Default)]
pub struct Params {
    /// Mandelbrot exponent `p`.
    pub power: Option<f64>,
    /// Julia constant `c`.
    pub seed: Option<Complex<f64>>,
    /// Phoenix constant `P`, the weight on the trailing iterate.
    pub phoenix_p: Option<f64>,
    /// Phoenix additive constant `c`.
    pub phoenix_c: Option<f64>,
    /// Newton function/derivative pair.
    pub function: Option<Function>,
    /// Newton relaxation factor `a`.
    pub relaxation: Option<f64>,
    /// Newton convergence threshold `epsilon`.
    pub epsilon: Option<f64>,
    /// Color mapping knobs.
    pub color: ColorOptions,
}

impl Params {
    fn require<T: Copy>(field: Option<T>, name: &'static str) -> Result<T, Error> {
        field.ok_or(Error::MissingParameter(name))
    }
}

/// Renders one fractal image on the current thread.  A pure function
/// of its arguments: identical inputs produce bit-identical images.
pub fn render(
    family: Family,
    width: usize,
    height: usize,
    viewport: &Viewport,
    itermax: usize,
    params: &Params,
) -> Result<Image, Error> {
    render_threaded(family, width, height, viewport, itermax, params, 1)
}

/// Renders one fractal image, splitting the pixels across the given
/// number of threads.  Pixels are independent, so the output is
/// bit-identical to `render` for any thread count.
pub fn render_threaded(
    family: Family,
    width: usize,
    height: usize,
    viewport: &Viewport,
    itermax: usize,
    params: &Params,
    threads: usize,
) -> Result<Image, Error> {
    let grid = ComplexGrid::generate(width, height, viewport)?;

    match family {
        Family::Mandelbrot => {
            let p = Params::require(params.power, "p")?;
            let raw = kernels::mandelbrot(&grid, itermax, p, threads);
            Ok(color::colorize_mandelbrot(&raw, width, height, &params.color))
        }
        Family::Julia => {
            let c = Params::require(params.seed, "c")?;
            let raw = kernels::julia(&grid, itermax, c, threads);
            Ok(color::colorize_julia(&raw, width, height, &params.color))
        }
        Family::Phoenix => {
            let p = Params::require(params.phoenix_p, "P")?;
            let c = Params::require(params.phoenix_c, "c")?;
            let raw = kernels::phoenix(&grid, itermax, p, c, threads);
            Ok(color::colorize_phoenix(&raw, width, height))
        }
        Family::Newton => {
            let f = Params::require(params.function, "f")?;
            let a = Params::require(params.relaxation, "a")?;
            let epsilon = Params::require(params.epsilon, "epsilon")?;
            let raw = kernels::newton(&grid, itermax, f, a, epsilon, threads);
            Ok(color::colorize_newton(&raw, width, height, &params.color))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use functions::CUBIC;
    use std::collections::HashSet;

    fn mandel_params() -> Params {
        Params {
            power: Some(2.0),
            ..Params::default()
        }
    }

    #[test]
    fn classic_mandelbrot_has_a_continuous_palette() {
        let vp = Viewport::new(-2.0, 0.5, -1.25, 1.25).unwrap();
        let img = render(Family::Mandelbrot, 50, 50, &vp, 100, &mandel_params()).unwrap();
        assert_eq!(img.width, 50);
        assert_eq!(img.height, 50);
        assert_eq!(img.data.len(), 50 * 50 * 3);

        let distinct: HashSet<[u8; 3]> = (0..50)
            .flat_map(|j| (0..50).map(move |i| (i, j)))
            .map(|(i, j)| img.at(i, j))
            .collect();
        assert!(
            distinct.len() > 2,
            "smoothing should yield more than {} distinct colors",
            distinct.len()
        );
    }

    #[test]
    fn render_is_idempotent() {
        let vp = Viewport::new(-2.0, 0.5, -1.25, 1.25).unwrap();
        let a = render(Family::Mandelbrot, 40, 30, &vp, 60, &mandel_params()).unwrap();
        let b = render(Family::Mandelbrot, 40, 30, &vp, 60, &mandel_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn threaded_render_matches_single_threaded() {
        let vp = Viewport::new(-2.0, 0.5, -1.25, 1.25).unwrap();
        let one = render(Family::Mandelbrot, 41, 29, &vp, 60, &mandel_params()).unwrap();
        let many =
            render_threaded(Family::Mandelbrot, 41, 29, &vp, 60, &mandel_params(), 4).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn julia_divergence_does_not_panic() {
        let vp = Viewport::new(-1.5, 1.5, -1.5, 1.5).unwrap();
        let params = Params {
            seed: Some(Complex::new(0.0, 0.64)),
            ..Params::default()
        };
        let img = render(Family::Julia, 30, 30, &vp, 50, &params).unwrap();
        assert_eq!(img.data.len(), 30 * 30 * 3);
    }

    #[test]
    fn phoenix_renders_red_channel_only() {
        let vp = Family::Phoenix.default_viewport();
        let params = Params {
            phoenix_p: Some(0.5667),
            phoenix_c: Some(-0.5),
            ..Params::default()
        };
        let img = render(Family::Phoenix, 20, 20, &vp, 40, &params).unwrap();
        for j in 0..20 {
            for i in 0..20 {
                let [_, g, b] = img.at(i, j);
                assert_eq!((g, b), (0, 0));
            }
        }
    }

    #[test]
    fn newton_renders_root_basins() {
        let vp = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        let params = Params {
            function: Some(CUBIC),
            relaxation: Some(1.0),
            epsilon: Some(1e-8),
            ..Params::default()
        };
        let img = render(Family::Newton, 24, 24, &vp, 50, &params).unwrap();
        let distinct: HashSet<[u8; 3]> = (0..24)
            .flat_map(|j| (0..24).map(move |i| (i, j)))
            .map(|(i, j)| img.at(i, j))
            .collect();
        // Three roots plus fractal boundaries: plenty of colors.
        assert!(distinct.len() > 3);
    }

    #[test]
    fn missing_parameters_are_rejected_before_iterating() {
        let vp = Family::Mandelbrot.default_viewport();
        let empty = Params::default();
        assert!(render(Family::Mandelbrot, 10, 10, &vp, 10, &empty).is_err());
        assert!(render(Family::Julia, 10, 10, &vp, 10, &empty).is_err());
        assert!(render(Family::Phoenix, 10, 10, &vp, 10, &empty).is_err());
        assert!(render(Family::Newton, 10, 10, &vp, 10, &empty).is_err());
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let vp = Family::Mandelbrot.default_viewport();
        assert!(render(Family::Mandelbrot, 0, 10, &vp, 10, &mandel_params()).is_err());
    }

    #[test]
    fn family_parses_from_str() {
        assert_eq!("newton".parse::<Family>().unwrap(), Family::Newton);
        assert!("nova".parse::<Family>().is_err());
    }
}
