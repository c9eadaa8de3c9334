// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns raw kernel output into RGB pixels.  Two steps live here:
//! the normalizer, which compresses an arbitrary scalar grid into an
//! 8-bit channel range, and the per-family color mappers, which
//! assemble the final interleaved RGB buffer.
use num::clamp;

use kernels::RootGrids;

/// Tunable knobs for the color mappers.  The defaults reproduce the
/// classic appearance of each family.
#[derive(Copy, Clone, Debug)]
pub struct ColorOptions {
    /// How many times the hue wheel is traversed as the fractal value
    /// sweeps 0 to 1 in the smooth escape-time mappers.
    pub color_count: f64,
    /// Constant hue offset, letting a UI rotate the palette.
    pub color_offset: f64,
    /// Channel range the Newton root coordinates are compressed into.
    pub root_range: (u8, u8),
    /// Channel range the Newton convergence counts are compressed
    /// into.  The count channel is added on top of the root channels,
    /// so the two range maxima should sum to at most 255.
    pub count_range: (u8, u8),
}

impl Default for ColorOptions {
    fn default() -> ColorOptions {
        ColorOptions {
            color_count: 5.0,
            color_offset: 0.0,
            root_range: (0, 127),
            count_range: (0, 128),
        }
    }
}

/// An RGB image buffer: `data` holds `width * height` interleaved
/// 8-bit RGB triples, row-major.  The engine hands it to the caller
/// and keeps no reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Interleaved RGB bytes, `width * height * 3` of them.
    pub data: Vec<u8>,
}

impl Image {
    fn from_pixels<I>(width: usize, height: usize, pixels: I) -> Image
    where
        I: Iterator<Item = [u8; 3]>,
    {
        let mut data = Vec::with_capacity(width * height * 3);
        for rgb in pixels {
            data.extend_from_slice(&rgb);
        }
        debug_assert_eq!(data.len(), width * height * 3);
        Image {
            width,
            height,
            data,
        }
    }

    /// The RGB triple at pixel `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> [u8; 3] {
        let k = (j * self.width + i) * 3;
        [self.data[k], self.data[k + 1], self.data[k + 2]]
    }
}

/// Compresses a scalar grid into `[vmin, vmax]` anchored at zero:
/// each value is divided by the grid's NaN-ignoring maximum, so the
/// maximum cell lands exactly on `vmax` and a zero cell exactly on
/// `vmin`.  The true minimum is deliberately not stretched to `vmin`;
/// the zero anchor is the documented behavior.
///
/// Degenerate grids (empty, all-NaN, or a non-positive maximum) come
/// back as all-`vmin` rather than failing the render.  NaN cells and
/// negative cells also land on `vmin`.
pub fn adjust_range(values: &[f64], vmin: u8, vmax: u8) -> Vec<u8> {
    let max = values
        .iter()
        .cloned()
        .filter(|v| !v.is_nan())
        .fold(::std::f64::NEG_INFINITY, f64::max);

    if !max.is_finite() || max <= 0.0 {
        return vec![vmin; values.len()];
    }

    let span = f64::from(vmax) - f64::from(vmin);
    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return vmin;
            }
            clamp(v / max * span + f64::from(vmin), f64::from(vmin), f64::from(vmax)) as u8
        })
        .collect()
}

/// Classic sextant HSV to RGB conversion; all inputs in [0, 1], hue
/// wrapping around.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let h = fract(h) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i as i32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [channel(r), channel(g), channel(b)]
}

fn channel(x: f64) -> u8 {
    (clamp(x, 0.0, 1.0) * 255.0) as u8
}

fn fract(x: f64) -> f64 {
    let f = x - x.floor();
    if f < 0.0 {
        f + 1.0
    } else {
        f
    }
}

/// Smooth escape-time mapper for Mandelbrot values in [0, 1]: hue
/// cycles with the value, saturation is full wherever the point
/// escaped at all, and brightness inverts the value so the set's
/// boundary glows against a dark interior.
pub fn colorize_mandelbrot(values: &[f64], width: usize, height: usize, opts: &ColorOptions) -> Image {
    Image::from_pixels(
        width,
        height,
        values.iter().map(|&f| {
            let hue = fract((f + opts.color_offset) * opts.color_count);
            let sat = if f > 0.0 { 1.0 } else { 0.0 };
            hsv_to_rgb(hue, sat, 1.0 - f)
        }),
    )
}

/// Smooth escape-time mapper for Julia values in [0, 1]: the same
/// hue cycle, but saturation tracks the value itself at constant full
/// brightness, which washes the divergent exterior out to white.
pub fn colorize_julia(values: &[f64], width: usize, height: usize, opts: &ColorOptions) -> Image {
    Image::from_pixels(
        width,
        height,
        values.iter().map(|&f| {
            let hue = fract((f + opts.color_offset) * opts.color_count);
            hsv_to_rgb(hue, f, 1.0)
        }),
    )
}

/// Phoenix mapper: escape indices compressed into the red channel,
/// green and blue left dark.
pub fn colorize_phoenix(values: &[f64], width: usize, height: usize) -> Image {
    let red = adjust_range(values, 0, 255);
    Image::from_pixels(width, height, red.into_iter().map(|r| [r, 0, 0]))
}

/// Newton mapper: the three raw grids are each compressed into their
/// own sub-range, then composed additively, with the convergence
/// count brightening both the red and green channels.  With the
/// default ranges the sums top out at exactly 255; saturating
/// arithmetic keeps custom ranges safe.
pub fn colorize_newton(roots: &RootGrids, width: usize, height: usize, opts: &ColorOptions) -> Image {
    let re = adjust_range(&roots.re, opts.root_range.0, opts.root_range.1);
    let im = adjust_range(&roots.im, opts.root_range.0, opts.root_range.1);
    let hits = adjust_range(&roots.hits, opts.count_range.0, opts.count_range.1);

    Image::from_pixels(
        width,
        height,
        re.into_iter()
            .zip(im.into_iter())
            .zip(hits.into_iter())
            .map(|((r, g), n)| [r.saturating_add(n), g.saturating_add(n), n]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_range_maps_max_and_zero_exactly() {
        let out = adjust_range(&[0.0, 2.5, 10.0], 16, 240);
        assert_eq!(out[0], 16);
        assert_eq!(out[2], 240);
        assert!(out[1] > 16 && out[1] < 240);
    }

    #[test]
    fn adjust_range_is_zero_anchored_not_min_stretched() {
        // The minimum is NOT pulled down to vmin; only zero is.
        let out = adjust_range(&[5.0, 10.0], 0, 200);
        assert_eq!(out, vec![100, 200]);
    }

    #[test]
    fn adjust_range_handles_degenerate_grids() {
        assert_eq!(adjust_range(&[0.0, 0.0], 7, 255), vec![7, 7]);
        let nan = ::std::f64::NAN;
        assert_eq!(adjust_range(&[nan, nan], 7, 255), vec![7, 7]);
        assert_eq!(adjust_range(&[], 7, 255), Vec::<u8>::new());
    }

    #[test]
    fn adjust_range_masks_nan_and_negative_cells() {
        let nan = ::std::f64::NAN;
        let out = adjust_range(&[nan, -3.0, 4.0], 10, 250);
        assert_eq!(out[0], 10);
        assert_eq!(out[1], 10);
        assert_eq!(out[2], 250);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    }

    #[test]
    fn hsv_grayscale_when_desaturated() {
        assert_eq!(hsv_to_rgb(0.42, 0.0, 1.0), [255, 255, 255]);
        assert_eq!(hsv_to_rgb(0.42, 0.0, 0.0), [0, 0, 0]);
    }

    #[test]
    fn hsv_hue_wraps() {
        assert_eq!(hsv_to_rgb(1.25, 1.0, 1.0), hsv_to_rgb(0.25, 1.0, 1.0));
    }

    #[test]
    fn mandelbrot_interior_is_white() {
        // Value 0 means never escaped: saturation drops to 0 and
        // brightness is 1 - 0, so the set's interior renders white.
        let img = colorize_mandelbrot(&[0.0], 1, 1, &ColorOptions::default());
        assert_eq!(img.at(0, 0), [255, 255, 255]);
    }

    #[test]
    fn newton_composition_tops_out_at_255() {
        let roots = RootGrids {
            re: vec![1.0],
            im: vec![1.0],
            hits: vec![1.0],
        };
        let img = colorize_newton(&roots, 1, 1, &ColorOptions::default());
        assert_eq!(img.at(0, 0), [255, 255, 128]);
    }

    #[test]
    fn phoenix_uses_only_the_red_channel() {
        let img = colorize_phoenix(&[0.0, 5.0, 10.0], 3, 1);
        assert_eq!(img.at(0, 0), [0, 0, 0]);
        assert_eq!(img.at(2, 0), [255, 0, 0]);
        let mid = img.at(1, 0);
        assert!(mid[0] > 0 && mid[1] == 0 && mid[2] == 0);
    }
}
