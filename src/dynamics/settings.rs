use crate::math::Real;

/// Parameters controlling contact detection and persistence.
///
/// # Example
///
/// ```
/// use rebound3d::dynamics::ContactSettings;
///
/// let settings = ContactSettings {
///     prediction_distance: 0.01,
///     ..ContactSettings::default()
/// };
/// assert_eq!(settings.aabb_extension, 0.2);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ContactSettings {
    /// Two shapes closer than this distance produce manifold points even if they are not
    /// penetrating yet.
    pub prediction_distance: Real,
    /// Margin added to the bounding boxes of the broad-phase proxies and of the bounds of the
    /// shapes tested against meshes.
    pub aabb_extension: Real,
    /// Factor applied to the displacement of a shape when predicting its enlarged bounding box.
    pub aabb_multiplier: Real,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            prediction_distance: 0.002,
            aabb_extension: 0.2,
            aabb_multiplier: 2.0,
        }
    }
}
