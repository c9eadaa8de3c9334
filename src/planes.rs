//! Describes the relationship between a rectangle on the integral
//! (pixel) plane with an origin at 0,0 and a rectangle on the complex
//! plane, and materializes that relationship as a grid of complex
//! seed values, one per pixel.
use itertools::iproduct;
use num::Complex;

use error::Error;

/// The rectangular window of the complex plane currently mapped onto
/// the pixel grid.  The bounds must be strictly increasing on both
/// axes; the engine only ever reads a viewport, zooming and resetting
/// are the caller's business.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Minimum coordinate on the real axis.
    pub xmin: f64,
    /// Maximum coordinate on the real axis.
    pub xmax: f64,
    /// Minimum coordinate on the imaginary axis.
    pub ymin: f64,
    /// Maximum coordinate on the imaginary axis.
    pub ymax: f64,
}

impl Viewport {
    /// Constructor.  Rejects bounds that are not strictly increasing.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Viewport, Error> {
        if !(xmin < xmax) {
            return Err(Error::InvalidViewport(format!(
                "xmin ({}) must be less than xmax ({})",
                xmin, xmax
            )));
        }
        if !(ymin < ymax) {
            return Err(Error::InvalidViewport(format!(
                "ymin ({}) must be less than ymax ({})",
                ymin, ymax
            )));
        }
        Ok(Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Returns a new viewport shrunk symmetrically about its center
    /// by the given factor, the way a UI zooms in on a point of
    /// interest.  A factor of 0.5 halves both spans; a factor of 0
    /// returns the viewport unchanged.
    pub fn zoomed(&self, factor: f64) -> Viewport {
        let dx = factor * (self.xmax - self.xmin) / 2.0;
        let dy = factor * (self.ymax - self.ymin) / 2.0;
        Viewport {
            xmin: self.xmin + dx,
            xmax: self.xmax - dx,
            ymin: self.ymin + dy,
            ymax: self.ymax - dy,
        }
    }
}

/// A grid of complex numbers sampled from a viewport, one per pixel,
/// stored row-major by scanline: the point for pixel `(i, j)` lives
/// at index `j * width + i`.  Built once per render and immutable
/// thereafter; the kernels read seed values out of it and keep their
/// iterates elsewhere.
#[derive(Debug)]
pub struct ComplexGrid {
    /// Pixel resolution along the real axis.
    pub width: usize,
    /// Pixel resolution along the imaginary axis.
    pub height: usize,
    points: Vec<Complex<f64>>,
}

impl ComplexGrid {
    /// Samples `width` points linearly from `xmin` to `xmax` and
    /// `height` points from `ymin` to `ymax` and combines them as
    /// `real + i*imag` per cell.  The interpolation is evaluated as
    /// `(1-t)*min + t*max` so the corner cells land bit-exactly on
    /// the viewport bounds.  A zero resolution on either axis is
    /// rejected; a resolution of one collapses that axis onto its
    /// minimum bound.
    pub fn generate(width: usize, height: usize, viewport: &Viewport) -> Result<ComplexGrid, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport(format!(
                "resolution must be positive, got {}x{}",
                width, height
            )));
        }

        let xs: Vec<f64> = (0..width)
            .map(|i| lerp(viewport.xmin, viewport.xmax, i, width))
            .collect();
        let ys: Vec<f64> = (0..height)
            .map(|j| lerp(viewport.ymin, viewport.ymax, j, height))
            .collect();

        let points = iproduct!(ys.iter(), xs.iter())
            .map(|(&y, &x)| Complex::new(x, y))
            .collect();

        Ok(ComplexGrid {
            width,
            height,
            points,
        })
    }

    /// The total number of points in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the grid holds no points.  Never true for a
    /// grid built by `generate`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All grid points in storage order.
    pub fn points(&self) -> &[Complex<f64>] {
        &self.points
    }

    /// The complex seed value for pixel `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> Complex<f64> {
        self.points[j * self.width + i]
    }
}

/// Endpoint-exact linear interpolation of sample `i` out of `count`
/// between `min` and `max`.
fn lerp(min: f64, max: f64, i: usize, count: usize) -> f64 {
    if count < 2 {
        return min;
    }
    let t = (i as f64) / ((count - 1) as f64);
    (1.0 - t) * min + t * max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_fails_on_bad_bounds() {
        assert!(Viewport::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, 1.0, -1.0).is_err());
        assert!(Viewport::new(0.0, 0.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn viewport_passes_on_good_bounds() {
        assert!(Viewport::new(-2.0, 0.5, -1.25, 1.25).is_ok());
    }

    #[test]
    fn grid_fails_on_zero_resolution() {
        let vp = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        assert!(ComplexGrid::generate(0, 10, &vp).is_err());
        assert!(ComplexGrid::generate(10, 0, &vp).is_err());
    }

    #[test]
    fn grid_corners_are_exact() {
        let vp = Viewport::new(-2.0, 0.5, -1.25, 1.25).unwrap();
        let grid = ComplexGrid::generate(7, 5, &vp).unwrap();
        assert_eq!(grid.at(0, 0), Complex::new(-2.0, -1.25));
        assert_eq!(grid.at(6, 0), Complex::new(0.5, -1.25));
        assert_eq!(grid.at(0, 4), Complex::new(-2.0, 1.25));
        assert_eq!(grid.at(6, 4), Complex::new(0.5, 1.25));
    }

    #[test]
    fn grid_is_deterministic() {
        let vp = Viewport::new(-1.7, 0.3, -0.9, 1.1).unwrap();
        let a = ComplexGrid::generate(13, 9, &vp).unwrap();
        let b = ComplexGrid::generate(13, 9, &vp).unwrap();
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn grid_midpoint_on_symmetric_viewport() {
        let vp = Viewport::new(-2.0, 2.0, -2.0, 2.0).unwrap();
        let grid = ComplexGrid::generate(5, 5, &vp).unwrap();
        assert_eq!(grid.at(2, 2), Complex::new(0.0, 0.0));
    }

    #[test]
    fn degenerate_axis_collapses_to_minimum() {
        let vp = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let grid = ComplexGrid::generate(1, 3, &vp).unwrap();
        assert_eq!(grid.at(0, 0), Complex::new(-1.0, -1.0));
        assert_eq!(grid.at(0, 2), Complex::new(-1.0, 1.0));
    }

    #[test]
    fn zoomed_shrinks_about_center() {
        let vp = Viewport::new(-2.0, 2.0, -1.0, 1.0).unwrap();
        let z = vp.zoomed(0.5);
        assert_eq!(z, Viewport::new(-1.0, 1.0, -0.5, 0.5).unwrap());
    }
}
