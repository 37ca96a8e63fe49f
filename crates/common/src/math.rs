/// Map `v` from `[vmin, vmax]` onto `[tmin, tmax]`.
///
/// The input is clamped to the source range first, so values outside it
/// land exactly on the nearest target bound.
pub fn normalize(v: f32, vmin: f32, vmax: f32, tmin: f32, tmax: f32) -> f32 {
    let nv = v.max(vmin).min(vmax);
    let pct = (nv - vmin) / (vmax - vmin);
    tmin + pct * (tmax - tmin)
}

/// Move `current` toward `target` by `factor` of the remaining distance.
pub fn ease_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
