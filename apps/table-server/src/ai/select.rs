use rand::Rng;

/// Pick an index with probability proportional to `weights`.
///
/// Negative and non-finite weights count as zero. When nothing has positive
/// weight the choice is uniform. `None` only for an empty slice.
pub fn pick_weighted<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().copied().map(clean).sum();
    if total <= 0.0 {
        return Some(rng.random_range(0..weights.len()));
    }

    let mut threshold = rng.random::<f64>() * total;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        let w = clean(w);
        if w == 0.0 {
            continue;
        }
        last_positive = i;
        if threshold < w {
            return Some(i);
        }
        threshold -= w;
    }
    // float rounding
    Some(last_positive)
}
