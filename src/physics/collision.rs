use bevy::prelude::*;

/// Vertical cylinder footprint on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub center: Vec2,
    pub radius: f32,
}

impl Collider {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True when a circle of `radius` at `point` overlaps this collider.
    pub fn blocks(&self, point: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        self.center.distance_squared(point) < reach * reach
    }
}

pub fn check_collision<'a>(
    colliders: impl IntoIterator<Item = &'a Collider>,
    point: Vec2,
    radius: f32,
) -> bool {
    colliders
        .into_iter()
        .any(|collider| collider.blocks(point, radius))
}

/// Resolves a horizontal step one axis at a time so the player slides along obstacles.
pub fn resolve_step(from: Vec2, delta: Vec2, mut blocked: impl FnMut(Vec2) -> bool) -> Vec2 {
    let mut position = from;

    let along_x = Vec2::new(position.x + delta.x, position.y);
    if delta.x != 0.0 && !blocked(along_x) {
        position = along_x;
    }

    let along_z = Vec2::new(position.x, position.y + delta.y);
    if delta.y != 0.0 && !blocked(along_z) {
        position = along_z;
    }

    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_is_inflated_by_query_radius() {
        let tree = Collider::new(Vec2::new(4.0, 4.0), 1.0);
        assert!(tree.blocks(Vec2::new(5.4, 4.0), 0.5));
        assert!(!tree.blocks(Vec2::new(5.6, 4.0), 0.5));
        assert!(!tree.blocks(Vec2::ZERO, 0.5));
    }

    #[test]
    fn check_collision_scans_every_collider() {
        let colliders = vec![
            Collider::new(Vec2::new(-10.0, 0.0), 1.0),
            Collider::new(Vec2::new(10.0, 0.0), 1.0),
        ];
        assert!(check_collision(&colliders, Vec2::new(10.5, 0.0), 0.5));
        assert!(!check_collision(&colliders, Vec2::ZERO, 0.5));
        assert!(!check_collision(&[], Vec2::ZERO, 0.5));
    }

    #[test]
    fn blocked_axis_is_dropped_but_the_other_slides() {
        let wall = Collider::new(Vec2::new(1.0, 0.0), 0.6);
        let end = resolve_step(Vec2::ZERO, Vec2::new(0.5, 0.5), |p| wall.blocks(p, 0.5));
        assert_eq!(end, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn free_step_moves_on_both_axes() {
        let end = resolve_step(Vec2::new(1.0, 1.0), Vec2::new(-0.25, 0.5), |_| false);
        assert_eq!(end, Vec2::new(0.75, 1.5));
    }
}
