/// Game entity types: pure data plus a few geometry helpers.
///
/// Coordinates are viewport pixels with the origin at the top-left corner
/// and y growing downwards.  Angles are degrees, 0° pointing up.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle, `left`/`top` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Rect {
        Rect { left, top, width, height }
    }

    /// Square of edge `size` centred on `(x, y)`.
    pub fn centered(x: f32, y: f32, size: f32) -> Rect {
        let half = size / 2.0;
        Rect::new(x - half, y - half, size, size)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap on both axes; rectangles that only touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// A destructible card on the page, as seen by the game.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// `None` or empty means the card can never be hit.
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub client: String,
    pub description: String,
    pub rect: Rect,
}

impl Target {
    /// The identifier if it is usable for scoring.
    pub fn hit_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

// ── Player input ──────────────────────────────────────────────────────────────

/// Direction keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub brake: bool,
}

// ── Ship & bullets ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Grows without bound while turning; only its direction matters.
    pub angle: f32,
}

impl Ship {
    pub fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// A text fragment flying away from a destroyed card.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PulseKind {
    ScreenShake,
    /// Radial flash centred on the destroyed card.
    ImpactFlash { x: f32, y: f32 },
}

/// A one-shot visual that disappears after `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub kind: PulseKind,
    pub started_at: std::time::Duration,
    pub duration: std::time::Duration,
}

// ── Session outcome ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Every target was destroyed.
    Cleared,
    TimedOut,
    Cancelled,
}

/// Live HUD figures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scoreboard {
    pub elapsed_secs: f32,
    pub remaining_secs: u32,
    pub hits: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub elapsed_secs: f32,
    pub hits: usize,
    pub total: usize,
    pub reason: EndReason,
}

impl Summary {
    /// Console lines announcing the result.
    pub fn history_lines(&self) -> Vec<String> {
        if self.hits >= self.total {
            vec![
                format!("ALL TARGETS DESTROYED IN {:.1}s!", self.elapsed_secs),
                "amazing speed! try to beat your record".to_string(),
            ]
        } else {
            vec![
                format!("game ended - time: {:.1}s", self.elapsed_secs),
                format!("targets destroyed: {}/{}", self.hits, self.total),
            ]
        }
    }
}
