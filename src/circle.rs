// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Evenly-spaced points on a circle.

use crate::constants::TAU;

/// Get `n + 1` points evenly spaced around a circle of `radius` centred on
/// the origin, starting at angle 0. The last point closes the loop, so it
/// coincides with the first. `n == 0` gives the single point `(radius, 0)`.
pub fn points_on_circle(radius: f64, n: usize) -> Vec<(f64, f64)> {
    if n == 0 {
        return vec![(radius, 0.0)];
    }
    let step = TAU / n as f64;
    (0..=n)
        .map(|i| {
            let (s, c) = (step * i as f64).sin_cos();
            (c * radius, s * radius)
        })
        .collect()
}
