use super::*;
use crate::Error;
use crate::Feature;
use crate::Result;

/// Foreground fraction in each cell of a `g × g` grid laid over the raster.
///
/// Cells are `height / g` by `width / g` pixels; trailing rows and columns
/// that do not fill a whole cell are ignored. Cells are emitted row-major.
pub fn density(raster: &Raster, g: usize) -> Result<Vec<Feature>> {
    let cell_h = raster.height() / g;
    let cell_w = raster.width() / g;
    if cell_h == 0 || cell_w == 0 {
        return Err(Error::Raster(format!(
            "of {}x{} is smaller than a {}x{} density grid",
            raster.width(),
            raster.height(),
            g,
            g
        )));
    }
    let cell = (cell_h * cell_w) as Feature;
    Ok((0..g)
        .flat_map(|i| (0..g).map(move |j| (i, j)))
        .map(|(i, j)| {
            (i * cell_h..(i + 1) * cell_h)
                .flat_map(|y| (j * cell_w..(j + 1) * cell_w).map(move |x| (x, y)))
                .filter(|&(x, y)| raster.at(x, y))
                .count() as Feature
                / cell
        })
        .collect())
}

/// Mean foreground position divided by the image extent, as `(x, y)` in `[0, 1]`.
/// An empty raster reports the image centre.
pub fn centroid(raster: &Raster) -> (Feature, Feature) {
    let w = raster.width() as Feature;
    let h = raster.height() as Feature;
    let (n, sx, sy) = raster
        .foreground()
        .fold((0usize, 0., 0.), |(n, sx, sy), (x, y)| {
            (n + 1, sx + x as Feature, sy + y as Feature)
        });
    match n {
        0 => (0.5, 0.5),
        n => (sx / n as Feature / w, sy / n as Feature / h),
    }
}
