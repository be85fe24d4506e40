//! Conversion between web-map zoom levels and scale denominators.
//!
//! Zoom `z` corresponds to the scale denominator `559082264 / 2^z`, the
//! Web-Mercator tile scale at 96 DPI. Both directions use the same constant
//! so `scale_to_zoom_level(zoom_to_scale(z)) == z`.

/// Scale denominator at zoom level 0.
pub const SCALE_AT_ZOOM_ZERO: f64 = 559_082_264.0;

/// Highest zoom level produced by [`scale_to_zoom_level`].
pub const MAX_ZOOM: u8 = 24;

/// Scale denominator at which a zoom level begins.
pub fn zoom_to_scale(zoom: u8) -> f64 {
    SCALE_AT_ZOOM_ZERO / 2f64.powi(i32::from(zoom))
}

/// Fractional zoom level for a scale denominator.
///
/// Returns `None` for non-positive or non-finite scales, which carry no
/// zoom gate.
pub fn scale_to_zoom(scale: f64) -> Option<f64> {
    if scale.is_finite() && scale > 0.0 {
        Some((SCALE_AT_ZOOM_ZERO / scale).log2())
    } else {
        None
    }
}

/// Integer zoom level for a scale denominator, rounded to nearest and
/// clamped to `0..=MAX_ZOOM`.
pub fn scale_to_zoom_level(scale: f64) -> Option<u8> {
    scale_to_zoom(scale).map(|zoom| zoom.round().clamp(0.0, f64::from(MAX_ZOOM)) as u8)
}
