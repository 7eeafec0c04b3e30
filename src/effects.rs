/// Destruction effects: text particles, screen shake and impact flashes.
///
/// Particles live in one list advanced by a single call per frame.  Nothing
/// here is tied to a session, so effects keep playing after the game ends
/// until the owner stops advancing them or calls [`Effects::clear`].

use std::time::Duration;

use rand::Rng;

use crate::config::EffectsConfig;
use crate::entities::{Particle, Pulse, PulseKind, Target, Viewport};

/// Text pieces that fly off a destroyed card: title, date, client and the
/// first few description words.  Blank pieces are dropped.
pub fn text_fragments(target: &Target, description_words: usize) -> Vec<String> {
    [&target.title, &target.date, &target.client]
        .into_iter()
        .map(|s| s.trim().to_string())
        .chain(
            target
                .description
                .split_whitespace()
                .take(description_words)
                .map(str::to_string),
        )
        .filter(|s| !s.is_empty())
        .collect()
}

/// One particle per fragment, fanned out evenly around a full circle from the
/// card centre with a random launch speed.
pub fn launch_particles(
    target: &Target,
    cfg: &EffectsConfig,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let fragments = text_fragments(target, cfg.description_words);
    let count = fragments.len();
    let (cx, cy) = target.rect.center();

    fragments
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let speed = (cfg.speed_min + rng.gen::<f32>() * cfg.speed_spread) * cfg.speed_scale;
            Particle {
                text,
                x: cx,
                y: cy,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                opacity: 1.0,
                scale: 1.0,
            }
        })
        .collect()
}

/// Advance one particle by a frame.  Returns `None` once it has faded out or
/// fallen well below the viewport.
pub fn step_particle(p: &Particle, viewport: &Viewport, cfg: &EffectsConfig) -> Option<Particle> {
    let mut vy = p.vy + cfg.gravity;
    let mut vx = p.vx;
    let x = p.x + vx;
    let mut y = p.y + vy;
    vx *= cfg.damping;
    vy *= cfg.damping;
    let opacity = p.opacity - cfg.fade;
    let scale = p.scale + cfg.growth;

    let floor = viewport.height - cfg.floor_margin;
    if y > floor && vy > 0.0 {
        vy *= -cfg.restitution;
        y = floor;
    }

    let right_wall = viewport.width - cfg.wall_margin;
    if (x < cfg.wall_margin && vx < 0.0) || (x > right_wall && vx > 0.0) {
        vx *= -cfg.restitution;
    }

    if opacity <= 0.0 || y >= viewport.height + cfg.despawn_below {
        return None;
    }

    Some(Particle {
        text: p.text.clone(),
        x,
        y,
        vx,
        vy,
        opacity,
        scale,
    })
}

// ── Driver ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Effects {
    particles: Vec<Particle>,
    pulses: Vec<Pulse>,
}

impl Effects {
    pub fn new() -> Effects {
        Effects::default()
    }

    /// Start every effect for one destroyed card.
    pub fn burst(&mut self, target: &Target, now: Duration, cfg: &EffectsConfig, rng: &mut impl Rng) {
        self.particles.extend(launch_particles(target, cfg, rng));

        let (x, y) = target.rect.center();
        self.pulses.push(Pulse {
            kind: PulseKind::ScreenShake,
            started_at: now,
            duration: Duration::from_millis(cfg.shake_ms),
        });
        self.pulses.push(Pulse {
            kind: PulseKind::ImpactFlash { x, y },
            started_at: now,
            duration: Duration::from_millis(cfg.flash_ms),
        });
    }

    /// Step every particle once and drop expired particles and pulses.
    pub fn advance(&mut self, now: Duration, viewport: &Viewport, cfg: &EffectsConfig) {
        self.particles = self
            .particles
            .iter()
            .filter_map(|p| step_particle(p, viewport, cfg))
            .collect();
        self.pulses
            .retain(|pulse| now < pulse.started_at + pulse.duration);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.pulses.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.pulses.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn is_shaking(&self) -> bool {
        self.pulses
            .iter()
            .any(|p| p.kind == PulseKind::ScreenShake)
    }
}
