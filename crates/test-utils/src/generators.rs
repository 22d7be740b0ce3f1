//! Generators for synthetic extraction-tool output.
//!
//! The extraction executable prints one `z r T aux` row per grid point,
//! sweeping r fastest. These helpers produce the same layout so loader and
//! pipeline tests can run without a solver.

use annulus_common::DomainBounds;

/// Cell-centre coordinates of `n` points spanning `[min, max]`.
pub fn cell_centres(min: f64, max: f64, n: usize) -> Vec<f64> {
    let step = (max - min) / n.max(1) as f64;
    (0..n).map(|i| min + (i as f64 + 0.5) * step).collect()
}

/// Creates extraction text for an `nz x nr` grid over `bounds`.
///
/// Row `i` (z index) and point `j` (r index) carry the temperature
/// `temperature(z, r)` and an auxiliary value of `1.0` outside the inner
/// radius `1.0`, `0.0` inside it.
pub fn extraction_text<F>(bounds: &DomainBounds, nz: usize, nr: usize, temperature: F) -> String
where
    F: Fn(f64, f64) -> f64,
{
    let zs = cell_centres(bounds.z_min, bounds.z_max, nz);
    let rs = cell_centres(bounds.r_min, bounds.r_max, nr);

    let mut text = String::with_capacity(nz * nr * 32);
    for &z in &zs {
        for &r in &rs {
            let aux = if z * z + r * r > 1.0 { 1.0 } else { 0.0 };
            text.push_str(&format!("{} {} {} {}\n", z, r, temperature(z, r), aux));
        }
    }
    text
}

/// Creates extraction text whose columns are running indices.
///
/// Row `k` (0-based, in output order) is `k k+0.25 k+0.5 k+0.75`, making it
/// easy to check where each value lands after reshaping.
pub fn indexed_extraction_text(rows: usize) -> String {
    let mut text = String::new();
    for k in 0..rows {
        let k = k as f64;
        text.push_str(&format!("{} {} {} {}\n", k, k + 0.25, k + 0.5, k + 0.75));
    }
    text
}

/// Temperature decaying from 1 at the inner radius to 0 at the outer radius.
///
/// Mimics the steady conduction profile between two concentric circles.
pub fn annulus_temperature(inner: f64, outer: f64) -> impl Fn(f64, f64) -> f64 {
    move |z, r| {
        let rho = (z * z + r * r).sqrt().clamp(inner, outer);
        (outer / rho).ln() / (outer / inner).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_centres() {
        assert_eq!(cell_centres(0.0, 4.0, 4), vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_extraction_text_row_count() {
        let text = extraction_text(&DomainBounds::default(), 3, 5, |_, _| 0.5);
        assert_eq!(text.lines().count(), 15);
        for line in text.lines() {
            assert_eq!(line.split_whitespace().count(), 4);
        }
    }

    #[test]
    fn test_indexed_extraction_text() {
        let text = indexed_extraction_text(2);
        assert_eq!(text, "0 0.25 0.5 0.75\n1 1.25 1.5 1.75\n");
    }

    #[test]
    fn test_annulus_temperature_limits() {
        let t = annulus_temperature(1.0, 4.0);
        assert!((t(0.0, 1.0) - 1.0).abs() < 1e-12);
        assert!(t(0.0, 4.0).abs() < 1e-12);
        assert!(t(0.0, 2.0) > 0.0 && t(0.0, 2.0) < 1.0);
    }
}
