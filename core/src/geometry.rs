//! Planar helpers shared by the simulator and the pure systems.
//!
//! Every normalization in the engine goes through [`normalize_or_fallback`]
//! so that a caller-supplied `dt`, coincident entities or a zero velocity can
//! never produce a division by zero.

use glam::Vec2;

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Creates a rectangle spanning the provided inclusive corners.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Pulls the point onto the closest location inside the rectangle.
    #[must_use]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Scales the vector to unit length, dividing by 1.0 when its magnitude is zero.
#[must_use]
pub fn normalize_or_fallback(vector: Vec2) -> Vec2 {
    let length = vector.length();
    if length > 0.0 {
        vector / length
    } else {
        vector
    }
}

/// Unit vector pointing from `from` toward `to`.
#[must_use]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    normalize_or_fallback(to - from)
}

/// Bearing in radians of `to` as seen from `from`.
#[must_use]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Blends the current heading toward the desired heading and renormalizes.
///
/// This is a linear interpolation of unit vectors rather than a true angular
/// turn. `strength` is the per-frame blend factor (turn rate × dt), clamped
/// to `[0, 1]` so long frames cannot overshoot the desired heading.
#[must_use]
pub fn steer_towards(current: Vec2, desired: Vec2, strength: f32) -> Vec2 {
    let current = normalize_or_fallback(current);
    let strength = strength.clamp(0.0, 1.0);
    normalize_or_fallback(current + (desired - current) * strength)
}

/// Index of the point closest to `origin`, preferring the earliest on ties.
#[must_use]
pub fn nearest_index<I>(origin: Vec2, points: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, point) in points.into_iter().enumerate() {
        let distance_sq = origin.distance_squared(point);
        match best {
            Some((_, best_sq)) if distance_sq >= best_sq => {}
            _ => best = Some((index, distance_sq)),
        }
    }
    best.map(|(index, _)| index)
}
