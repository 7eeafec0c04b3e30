/// Game session controller.
///
/// A `Session` owns everything that lives for one run of the mini-game: the
/// ship, the live bullets, the destroyed-set and the countdown.  Time is a
/// caller-supplied monotonic `Duration` so tests can drive it frame by frame.
///
/// The driver calls, once per display frame:
///   * [`Session::pump`]: fires due countdown ticks and the post-win deadline;
///   * [`Session::frame`]: ship, bullets, collisions and effects.
///
/// Every way out (timeout, win, cancel) goes through [`Session::end`].

use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::compute::{advance_bullets, fire_bullet, resolve_hits, spawn_ship, steer_ship};
use crate::config::GameConfig;
use crate::effects::Effects;
use crate::entities::{
    Bullet, EndReason, HeldKeys, Scoreboard, Ship, Summary, Target, Viewport,
};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// What the game needs from the page it is played on.
pub trait Page {
    /// Current cards and their on-screen rectangles.
    fn targets(&self) -> Vec<Target>;

    /// Clear the content of the card that was struck; it stays in place.
    /// `target` is the entry returned by [`Page::targets`] for this frame.
    fn destroy_target(&mut self, target: &Target);

    /// Put every card back to its original content.
    fn restore_targets(&mut self);

    /// Hide or show page furniture that would sit under the play area.
    fn set_chrome_hidden(&mut self, hidden: bool);

    fn update_scoreboard(&mut self, scoreboard: &Scoreboard);

    /// Append a line to the console history.
    fn post_message(&mut self, line: &str);
}

/// Per-run state, present only while a session is active.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub destroyed: HashSet<String>,
    pub total: usize,
    pub started_at: Duration,
    pub remaining_secs: u32,
    next_countdown: Duration,
    win_deadline: Option<Duration>,
}

impl SessionState {
    fn scoreboard(&self, now: Duration) -> Scoreboard {
        Scoreboard {
            elapsed_secs: now.saturating_sub(self.started_at).as_secs_f32(),
            remaining_secs: self.remaining_secs,
            hits: self.destroyed.len(),
            total: self.total,
        }
    }
}

pub struct Session {
    config: GameConfig,
    viewport: Viewport,
    state: Option<SessionState>,
    effects: Effects,
}

impl Session {
    pub fn new(config: GameConfig, viewport: Viewport) -> Session {
        Session {
            config,
            viewport,
            state: None,
            effects: Effects::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.state.as_ref().map(|s| &s.ship)
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.state.as_ref().map(|s| s.bullets.as_slice()).unwrap_or(&[])
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut Effects {
        &mut self.effects
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Follow a terminal/window resize.  The ship is re-clamped on its next
    /// frame.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn scoreboard(&self, now: Duration) -> Option<Scoreboard> {
        self.state.as_ref().map(|s| s.scoreboard(now))
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Begin a run.  Returns `false` and changes nothing if one is already
    /// active.
    pub fn start(&mut self, now: Duration, page: &mut impl Page) -> bool {
        if self.state.is_some() {
            return false;
        }

        page.set_chrome_hidden(true);
        page.restore_targets();
        let total = page.targets().len();

        let state = SessionState {
            ship: spawn_ship(&self.viewport, &self.config.ship),
            bullets: Vec::new(),
            destroyed: HashSet::new(),
            total,
            started_at: now,
            remaining_secs: self.config.session.countdown_secs,
            next_countdown: now + COUNTDOWN_PERIOD,
            win_deadline: None,
        };
        page.update_scoreboard(&state.scoreboard(now));
        self.state = Some(state);

        info!(total, "game session started");
        true
    }

    /// Finish the run and report the result.  Returns `None` when no session
    /// is active, so calling it twice is harmless.
    pub fn end(&mut self, now: Duration, reason: EndReason, page: &mut impl Page) -> Option<Summary> {
        let state = self.state.take()?;

        let summary = Summary {
            elapsed_secs: now.saturating_sub(state.started_at).as_secs_f32(),
            hits: state.destroyed.len(),
            total: state.total,
            reason,
        };

        page.set_chrome_hidden(false);
        for line in summary.history_lines() {
            page.post_message(&line);
        }
        page.restore_targets();

        info!(
            ?reason,
            hits = summary.hits,
            total = summary.total,
            elapsed = summary.elapsed_secs,
            "game session ended"
        );
        Some(summary)
    }

    /// Explicit quit from the player.
    pub fn cancel(&mut self, now: Duration, page: &mut impl Page) -> Option<Summary> {
        self.end(now, EndReason::Cancelled, page)
    }

    /// Fire one bullet from the ship.  Ignored when no session is active.
    pub fn fire(&mut self) {
        if let Some(state) = self.state.as_mut() {
            let bullet = fire_bullet(&state.ship, &self.config.bullets);
            state.bullets.push(bullet);
        }
    }

    // ── Timers ───────────────────────────────────────────────────────────────

    /// Run every timer that is due at `now`: the post-win deadline and the
    /// 1 Hz countdown.  Returns the summary if the session ended.
    pub fn pump(&mut self, now: Duration, page: &mut impl Page) -> Option<Summary> {
        let state = self.state.as_mut()?;

        if state.win_deadline.is_some_and(|deadline| now >= deadline) {
            return self.end(now, EndReason::Cleared, page);
        }

        while now >= state.next_countdown {
            state.next_countdown += COUNTDOWN_PERIOD;
            state.remaining_secs = state.remaining_secs.saturating_sub(1);
            page.update_scoreboard(&state.scoreboard(now));

            if state.remaining_secs == 0 {
                return self.end(now, EndReason::TimedOut, page);
            }
        }

        None
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Advance the game by one display frame.
    ///
    /// Effects are advanced even when no session is active so that bursts
    /// from the final hit finish playing.
    pub fn frame(
        &mut self,
        now: Duration,
        keys: &HeldKeys,
        page: &mut impl Page,
        rng: &mut impl Rng,
    ) -> Option<Summary> {
        self.effects.advance(now, &self.viewport, &self.config.effects);

        let state = self.state.as_mut()?;

        state.ship = steer_ship(&state.ship, keys, &self.viewport, &self.config.ship);

        let before = state.bullets.len();
        let moved = advance_bullets(&state.bullets, &self.viewport);
        if moved.len() < before {
            debug!(retired = before - moved.len(), "bullets left the viewport");
        }

        // Rectangles can shift as cards are cleared, so ask the page again.
        let targets = page.targets();
        let resolution = resolve_hits(
            &moved,
            &targets,
            &state.destroyed,
            self.config.bullets.size,
        );
        state.bullets = resolution.bullets;

        for target in &resolution.hits {
            let Some(id) = target.hit_id() else {
                continue;
            };
            if !state.destroyed.insert(id.to_string()) {
                continue;
            }
            debug!(id, hits = state.destroyed.len(), "target destroyed");
            page.update_scoreboard(&state.scoreboard(now));
            self.effects.burst(target, now, &self.config.effects, rng);
            page.destroy_target(target);
        }

        if state.win_deadline.is_none() && state.destroyed.len() >= state.total {
            if state.total == 0 {
                return self.end(now, EndReason::Cleared, page);
            }
            state.win_deadline = Some(now + self.config.session.win_delay());
        }

        None
    }
}
