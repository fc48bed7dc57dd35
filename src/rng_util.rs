//! Variate transforms shared by the sampling paths.

/// Draws a standard normal variate via the Box-Muller transform.
pub(crate) fn standard_normal(rng: &mut fastrand::Rng) -> f64 {
    // 1 - f64() keeps the argument of ln() in (0, 1].
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Draws an exponential variate by inverse-CDF: `-ln(1 - U) / lambda`.
pub(crate) fn exponential(rng: &mut fastrand::Rng, lambda: f64) -> f64 {
    -(1.0 - rng.f64()).ln() / lambda
}

/// Draws a gamma variate.
///
/// Marsaglia-Tsang squeeze for `shape >= 1`; a Weibull-based rejection
/// scheme for `shape < 1`.
pub(crate) fn gamma(rng: &mut fastrand::Rng, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let c = 1.0 / shape;
        let d = (1.0 - shape) * shape.powf(shape / (1.0 - shape));
        loop {
            let z = -rng.f64().ln();
            let e = -rng.f64().ln();
            if z + e >= d {
                return scale * z.powf(c);
            }
        }
    } else {
        let d = shape - 1.0 / 3.0;
        let c = 1.0 / (9.0 * d).sqrt();
        loop {
            let x = standard_normal(rng);
            let v = 1.0 + c * x;
            if v <= 0.0 {
                continue;
            }
            let v = v * v * v;
            let u = rng.f64();
            if u < 1.0 - 0.0331 * x.powi(4) {
                return scale * d * v;
            }
            if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
                return scale * d * v;
            }
        }
    }
}
