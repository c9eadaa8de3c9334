//! The shared bulk-update driver behind every kernel.  Each family
//! supplies a per-pixel closure that runs the full iteration budget
//! for one seed point; this module applies it to the whole grid,
//! either sequentially or split across scoped threads.  Pixels are
//! independent of one another, so chunking the output buffer is safe
//! and the threaded path is bit-identical to the sequential one.
extern crate crossbeam;

use num::Complex;

use planes::ComplexGrid;

/// Applies `pixel` to every point of the grid, producing one output
/// value per pixel in grid storage order.  With `threads <= 1` the
/// grid is walked sequentially; otherwise the output buffer is split
/// into one contiguous chunk per thread and the chunks are filled in
/// parallel under a crossbeam scope.
pub fn map_plane<T, F>(grid: &ComplexGrid, threads: usize, pixel: F) -> Vec<T>
where
    T: Default + Clone + Send,
    F: Fn(Complex<f64>) -> T + Sync,
{
    let mut out = vec![T::default(); grid.len()];

    if threads <= 1 {
        for (slot, point) in out.iter_mut().zip(grid.points()) {
            *slot = pixel(*point);
        }
        return out;
    }

    let chunk_size = (grid.len() + threads - 1) / threads;
    crossbeam::scope(|spawner| {
        let pixel = &pixel;
        for (slots, points) in out
            .chunks_mut(chunk_size)
            .zip(grid.points().chunks(chunk_size))
        {
            spawner.spawn(move |_| {
                for (slot, point) in slots.iter_mut().zip(points) {
                    *slot = pixel(*point);
                }
            });
        }
    })
    .unwrap();

    out
}
