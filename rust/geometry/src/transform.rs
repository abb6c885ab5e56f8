// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate conversion from decoded triples to nalgebra types
//!
//! Locations are lengths and get the unit scale; directions do not.

use bcf_lite_core::Triple;
use nalgebra::{Point3, Vector3};

/// Convert an authored location (meters) into host units
#[inline]
pub fn to_point3(raw: &Triple, scale: f64) -> Point3<f64> {
    Point3::new(raw.x * scale, raw.y * scale, raw.z * scale)
}

/// Convert an authored direction; directions are unit-system invariant
#[inline]
pub fn to_vector3(raw: &Triple) -> Vector3<f64> {
    Vector3::new(raw.x, raw.y, raw.z)
}

/// Normalize a vector, leaving zero-length vectors untouched
#[inline]
pub fn normalize_or_keep(v: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(f64::EPSILON).unwrap_or(v)
}
