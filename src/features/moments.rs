use super::*;
use crate::Feature;
use crate::HU_MOMENTS;

/// Central image moments of a binary raster, up to third order.
///
/// Pixels have unit mass, so `m00` is the foreground area. Central moments
/// are accumulated directly around the centroid rather than derived from raw
/// moments, which keeps the higher orders accurate for large images.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    m00: Feature,
    mu20: Feature,
    mu11: Feature,
    mu02: Feature,
    mu30: Feature,
    mu21: Feature,
    mu12: Feature,
    mu03: Feature,
}

impl Moments {
    pub fn area(&self) -> Feature {
        self.m00
    }

    /// Scale-normalized central moment η_pq = μ_pq / m00^(1 + (p+q)/2).
    fn eta(&self, mu: Feature, order: i32) -> Feature {
        mu / self.m00.powf(1. + order as Feature / 2.)
    }

    /// The seven Hu invariants. All zero for an empty raster.
    pub fn hu(&self) -> [Feature; HU_MOMENTS] {
        if self.m00 == 0. {
            return [0.; HU_MOMENTS];
        }
        let n20 = self.eta(self.mu20, 2);
        let n11 = self.eta(self.mu11, 2);
        let n02 = self.eta(self.mu02, 2);
        let n30 = self.eta(self.mu30, 3);
        let n21 = self.eta(self.mu21, 3);
        let n12 = self.eta(self.mu12, 3);
        let n03 = self.eta(self.mu03, 3);
        let a = n30 + n12;
        let b = n21 + n03;
        let c = n30 - 3. * n12;
        let d = 3. * n21 - n03;
        [
            n20 + n02,
            (n20 - n02).powi(2) + 4. * n11 * n11,
            c * c + d * d,
            a * a + b * b,
            c * a * (a * a - 3. * b * b) + d * b * (3. * a * a - b * b),
            (n20 - n02) * (a * a - b * b) + 4. * n11 * a * b,
            d * a * (a * a - 3. * b * b) - c * b * (3. * a * a - b * b),
        ]
    }
}

impl From<&Raster> for Moments {
    fn from(raster: &Raster) -> Self {
        let m00 = raster.area() as Feature;
        if m00 == 0. {
            return Self::default();
        }
        let (sx, sy) = raster
            .foreground()
            .fold((0., 0.), |(sx, sy), (x, y)| (sx + x as Feature, sy + y as Feature));
        let (cx, cy) = (sx / m00, sy / m00);
        raster
            .foreground()
            .map(|(x, y)| (x as Feature - cx, y as Feature - cy))
            .fold(Self { m00, ..Self::default() }, |mut m, (dx, dy)| {
                m.mu20 += dx * dx;
                m.mu11 += dx * dy;
                m.mu02 += dy * dy;
                m.mu30 += dx * dx * dx;
                m.mu21 += dx * dx * dy;
                m.mu12 += dx * dy * dy;
                m.mu03 += dy * dy * dy;
                m
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An L-shaped figure drawn at an offset inside a blank canvas.
    fn ell(width: usize, height: usize, ox: usize, oy: usize) -> Raster {
        let mut pixels = vec![false; width * height];
        for y in 0..6 {
            pixels[(oy + y) * width + ox] = true;
            pixels[(oy + y) * width + ox + 1] = true;
        }
        for x in 0..4 {
            pixels[(oy + 5) * width + ox + x] = true;
        }
        Raster::new(width, height, pixels).unwrap()
    }

    #[test]
    fn hu_is_translation_invariant() {
        let a = Moments::from(&ell(16, 16, 1, 2)).hu();
        let b = Moments::from(&ell(16, 16, 9, 7)).hu();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= 1e-12 * x.abs().max(1.), "{} vs {}", x, y);
        }
    }

    #[test]
    fn square_has_no_skew_or_eccentricity() {
        let mut pixels = vec![false; 64];
        for y in 2..6 {
            for x in 2..6 {
                pixels[y * 8 + x] = true;
            }
        }
        let m = Moments::from(&Raster::new(8, 8, pixels).unwrap());
        let hu = m.hu();
        assert_eq!(m.area(), 16.);
        // μ20 = μ02 = 4 · (2·1.5² + 2·0.5²) = 20, η20 = 20 / 16² per axis
        assert!((hu[0] - 40. / 256.).abs() < 1e-12);
        assert!(hu[1].abs() < 1e-15);
        assert!(hu[2].abs() < 1e-15);
    }

    #[test]
    fn empty_raster_is_all_zero() {
        let m = Moments::from(&Raster::new(4, 4, vec![false; 16]).unwrap());
        assert_eq!(m.hu(), [0.; HU_MOMENTS]);
        assert_eq!(m.area(), 0.);
    }
}
