/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current entities
/// and returns new values.  Nothing here reads the clock or the page, so a
/// sequence of calls with the same inputs always yields the same trajectory.

use std::collections::HashSet;

use crate::config::{BulletConfig, ShipConfig};
use crate::entities::{Bullet, HeldKeys, Rect, Ship, Target, Viewport};

// ── Constructors ─────────────────────────────────────────────────────────────

/// The ship starts centred horizontally, `spawn_offset` above the bottom edge,
/// at rest and pointing up.
pub fn spawn_ship(viewport: &Viewport, cfg: &ShipConfig) -> Ship {
    Ship {
        x: viewport.width / 2.0,
        y: viewport.height - cfg.spawn_offset,
        vx: 0.0,
        vy: 0.0,
        angle: 0.0,
    }
}

/// Unit vector for a heading in degrees (0° = up, clockwise positive).
pub fn heading_vector(angle: f32) -> (f32, f32) {
    let rad = (angle - 90.0).to_radians();
    (rad.cos(), rad.sin())
}

// ── Kinematics ───────────────────────────────────────────────────────────────

/// Advance the ship by one frame.
///
/// Order matters: steering and thrust first, then brake and friction, then
/// the speed cap, then integration and clamping.  The cap is applied after
/// friction so the reported speed never exceeds `max_speed`.
pub fn steer_ship(ship: &Ship, keys: &HeldKeys, viewport: &Viewport, cfg: &ShipConfig) -> Ship {
    let mut angle = ship.angle;
    if keys.left {
        angle -= cfg.rotation_step;
    }
    if keys.right {
        angle += cfg.rotation_step;
    }

    let (mut vx, mut vy) = (ship.vx, ship.vy);
    if keys.forward {
        let (dx, dy) = heading_vector(angle);
        vx += dx * cfg.thrust;
        vy += dy * cfg.thrust;
    }
    if keys.brake {
        vx *= cfg.brake;
        vy *= cfg.brake;
    }

    vx *= cfg.friction;
    vy *= cfg.friction;

    let speed = vx.hypot(vy);
    if speed > cfg.max_speed {
        vx = vx / speed * cfg.max_speed;
        vy = vy / speed * cfg.max_speed;
    }

    let x = clamp_axis(
        ship.x + vx,
        cfg.side_margin,
        viewport.width - cfg.side_margin,
    );
    let y = clamp_axis(
        ship.y + vy,
        cfg.top_margin,
        viewport.height - cfg.bottom_margin,
    );

    Ship { x, y, vx, vy, angle }
}

// `f32::clamp` panics when the viewport is smaller than the margins; the
// lower bound wins in that case.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Spawn a bullet at the ship's position, travelling along its heading.
pub fn fire_bullet(ship: &Ship, cfg: &BulletConfig) -> Bullet {
    let (dx, dy) = heading_vector(ship.angle);
    Bullet {
        x: ship.x,
        y: ship.y,
        vx: dx * cfg.speed,
        vy: dy * cfg.speed,
    }
}

/// True while `(x, y)` is on screen; the edges themselves count as inside.
pub fn in_viewport(x: f32, y: f32, viewport: &Viewport) -> bool {
    x >= 0.0 && x <= viewport.width && y >= 0.0 && y <= viewport.height
}

/// Move every bullet one step and discard those that left the viewport.
pub fn advance_bullets(bullets: &[Bullet], viewport: &Viewport) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            x: b.x + b.vx,
            y: b.y + b.vy,
            ..*b
        })
        .filter(|b| in_viewport(b.x, b.y, viewport))
        .collect()
}

// ── Collision ────────────────────────────────────────────────────────────────

pub fn bullet_rect(bullet: &Bullet, size: f32) -> Rect {
    Rect::centered(bullet.x, bullet.y, size)
}

/// Outcome of one collision pass.
#[derive(Clone, Debug, Default)]
pub struct HitResolution {
    /// Bullets that did not score this frame.
    pub bullets: Vec<Bullet>,
    /// Targets credited this frame, in the order they were hit.
    pub hits: Vec<Target>,
}

/// Test every bullet against every remaining target.
///
/// The first overlapping target that is still standing wins; the bullet is
/// consumed and cannot score twice.  Targets without an identifier, or whose
/// identifier is in `destroyed` (or was hit earlier this pass), never score,
/// and bullets crossing them keep flying.
pub fn resolve_hits(
    bullets: &[Bullet],
    targets: &[Target],
    destroyed: &HashSet<String>,
    bullet_size: f32,
) -> HitResolution {
    let mut credited: HashSet<&str> = HashSet::new();
    let mut resolution = HitResolution::default();

    for bullet in bullets {
        let hit_box = bullet_rect(bullet, bullet_size);
        let struck = targets.iter().find(|target| {
            let Some(id) = target.hit_id() else {
                return false;
            };
            !destroyed.contains(id) && !credited.contains(id) && hit_box.overlaps(&target.rect)
        });

        match struck {
            Some(target) => {
                if let Some(id) = target.hit_id() {
                    credited.insert(id);
                }
                resolution.hits.push(target.clone());
            }
            None => resolution.bullets.push(*bullet),
        }
    }

    resolution
}
