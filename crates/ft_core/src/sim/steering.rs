//! Steering helpers (minimal set)
//!
//! All helpers work on the floor plane: `y` of the inputs is ignored and the
//! returned velocity always has `y == 0`.

use nalgebra::Vector3;

use crate::models::Position;

const EPSILON: f32 = 0.0001;

#[inline]
fn flat(v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, 0.0, v.z)
}

/// Seek: move toward a target at the given speed.
pub fn seek(current: &Position, target: &Position, speed: f32) -> Vector3<f32> {
    if speed <= 0.0 {
        return Vector3::zeros();
    }
    let to_target = flat(target - current);
    match to_target.try_normalize(EPSILON) {
        Some(dir) => dir * speed,
        None => Vector3::zeros(),
    }
}

/// Flee: move directly away from a threat.
pub fn flee(current: &Position, threat: &Position, speed: f32) -> Vector3<f32> {
    -seek(current, threat, speed)
}

/// Arrive: slow down when approaching the target.
pub fn arrive(
    current: &Position,
    target: &Position,
    max_speed: f32,
    slowing_distance: f32,
) -> Vector3<f32> {
    if max_speed <= 0.0 {
        return Vector3::zeros();
    }
    let to_target = flat(target - current);
    let distance = to_target.norm();
    if distance < EPSILON {
        return Vector3::zeros();
    }

    let speed = if slowing_distance > 0.0 {
        max_speed * (distance / slowing_distance).clamp(0.0, 1.0)
    } else {
        max_speed
    };
    to_target / distance * speed
}

/// Keep a position inside the `(half_x, half_z)` floor rectangle.
pub fn clamp_to_arena(position: &Position, half_extents: (f32, f32)) -> Position {
    let (hx, hz) = half_extents;
    Position::new(position.x.clamp(-hx, hx), position.y, position.z.clamp(-hz, hz))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_has_requested_speed() {
        let v = seek(&Position::origin(), &Position::new(3.0, 0.0, 4.0), 2.0);
        assert!((v.norm() - 2.0).abs() < 1e-5);
        assert!(v.x > 0.0 && v.z > 0.0);
    }

    #[test]
    fn test_seek_ignores_height() {
        let v = seek(&Position::origin(), &Position::new(0.0, 10.0, 0.0), 2.0);
        assert_eq!(v, Vector3::zeros());
    }

    #[test]
    fn test_flee_points_away() {
        let v = flee(&Position::origin(), &Position::new(1.0, 0.0, 0.0), 1.5);
        assert!((v.x + 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_arrive_slows_down() {
        let far = arrive(&Position::origin(), &Position::new(10.0, 0.0, 0.0), 4.0, 2.0);
        let near = arrive(&Position::origin(), &Position::new(1.0, 0.0, 0.0), 4.0, 2.0);
        assert!((far.norm() - 4.0).abs() < 1e-5);
        assert!((near.norm() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed() {
        let target = Position::new(1.0, 0.0, 1.0);
        assert_eq!(seek(&Position::origin(), &target, 0.0), Vector3::zeros());
        assert_eq!(arrive(&Position::origin(), &target, -1.0, 1.0), Vector3::zeros());
    }

    #[test]
    fn test_clamp_to_arena() {
        let p = clamp_to_arena(&Position::new(50.0, 1.0, -50.0), (10.0, 5.0));
        assert_eq!(p, Position::new(10.0, 1.0, -5.0));
    }
}
