/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// board and session.  No game logic is performed; this module only
/// translates viewport pixels into terminal cells and queues commands.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use portfolio_arcade::board::{Board, Card};
use portfolio_arcade::entities::{PulseKind, Scoreboard, Viewport};
use portfolio_arcade::session::Session;

/// Viewport pixels covered by one terminal cell.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HEADER: Color = Color::White;
const C_CARD_BORDER: Color = Color::DarkCyan;
const C_CARD_TITLE: Color = Color::White;
const C_CARD_YEAR: Color = Color::DarkGrey;
const C_CARD_CLIENT: Color = Color::Cyan;
const C_CARD_TEXT: Color = Color::Grey;
const C_CARD_DESTROYED: Color = Color::DarkGrey;
const C_SHIP: Color = Color::Green;
const C_BULLET: Color = Color::Yellow;
const C_PARTICLE: Color = Color::White;
const C_PARTICLE_FADED: Color = Color::DarkGrey;
const C_FLASH: Color = Color::White;
const C_HUD: Color = Color::Green;
const C_HISTORY: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport {
        width: cols as f32 * CELL_WIDTH,
        height: rows as f32 * CELL_HEIGHT,
    }
}

/// Clipping wrapper around the terminal: every draw call goes through `put`.
struct Screen<'a, W: Write> {
    out: &'a mut W,
    cols: u16,
    rows: u16,
    /// Horizontal offset in cells applied while the screen shakes.
    shake: i32,
}

impl<W: Write> Screen<'_, W> {
    fn put(&mut self, col: i32, row: i32, text: &str, color: Color) -> std::io::Result<()> {
        let col = col + self.shake;
        if row < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return Ok(());
        }
        // Drop characters that would land left of the screen.
        let skip = (-col).max(0) as usize;
        let col = col.max(0);
        let room = (self.cols as i32 - col) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn put_px(&mut self, x: f32, y: f32, text: &str, color: Color) -> std::io::Result<()> {
        let width = text.chars().count() as i32;
        let col = (x / CELL_WIDTH).floor() as i32 - width / 2;
        let row = (y / CELL_HEIGHT).floor() as i32;
        self.put(col, row, text, color)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    board: &Board,
    session: &Session,
    now: Duration,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let shake = if session.effects().is_shaking() {
        if (now.as_millis() / 40) % 2 == 0 { 1 } else { -1 }
    } else {
        0
    };
    let mut screen = Screen { out: &mut *out, cols, rows, shake };

    draw_header(&mut screen)?;
    for card in board.cards() {
        draw_card(&mut screen, card)?;
    }

    screen.shake = 0;
    draw_effects(&mut screen, session, now)?;
    draw_bullets(&mut screen, session)?;
    draw_ship(&mut screen, session)?;

    if session.is_active() {
        if let Some(scoreboard) = board.scoreboard() {
            draw_scoreboard(&mut screen, scoreboard)?;
        }
    }
    if !board.chrome_hidden() {
        draw_footer(&mut screen, board)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Page ──────────────────────────────────────────────────────────────────────

fn draw_header<W: Write>(screen: &mut Screen<W>) -> std::io::Result<()> {
    screen.put(2, 1, "PORTFOLIO — selected projects", C_HEADER)
}

fn draw_card<W: Write>(screen: &mut Screen<W>, card: &Card) -> std::io::Result<()> {
    let left = (card.rect.left / CELL_WIDTH).round() as i32;
    let top = (card.rect.top / CELL_HEIGHT).round() as i32;
    let width = ((card.rect.width / CELL_WIDTH).round() as i32).max(4);
    let height = ((card.rect.height / CELL_HEIGHT).round() as i32).max(3);
    let inner = (width - 4).max(0) as usize;

    let border = if card.destroyed { C_CARD_DESTROYED } else { C_CARD_BORDER };
    let bar = "─".repeat((width - 2) as usize);
    screen.put(left, top, &format!("┌{}┐", bar), border)?;
    for row in top + 1..top + height - 1 {
        screen.put(left, row, "│", border)?;
        screen.put(left + width - 1, row, "│", border)?;
    }
    screen.put(left, top + height - 1, &format!("└{}┘", bar), border)?;

    // Shot cards keep their frame but lose their content.
    if card.destroyed {
        return Ok(());
    }

    let target = card.to_target();
    let body_rows = (height - 2).max(0) as usize;
    let mut lines: Vec<(String, Color)> = Vec::new();

    let year_width = target.date.chars().count();
    let title_room = inner.saturating_sub(year_width + 1);
    let title: String = target.title.chars().take(title_room).collect();
    let pad = inner.saturating_sub(title.chars().count() + year_width);
    lines.push((format!("{}{}", title, " ".repeat(pad)), C_CARD_TITLE));
    if !target.client.is_empty() {
        lines.push((target.client.chars().take(inner).collect(), C_CARD_CLIENT));
    }
    lines.extend(
        wrap(&target.description, inner)
            .into_iter()
            .map(|l| (l, C_CARD_TEXT)),
    );

    for (i, (line, color)) in lines.iter().take(body_rows).enumerate() {
        screen.put(left + 2, top + 1 + i as i32, line, *color)?;
    }
    if body_rows > 0 && !target.date.is_empty() {
        let col = left + 2 + (inner - year_width.min(inner)) as i32;
        screen.put(col, top + 1, &target.date, C_CARD_YEAR)?;
    }

    Ok(())
}

/// Greedy word wrap; words longer than `width` are cut.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    if width == 0 {
        return lines;
    }
    for word in text.split_whitespace() {
        let word: String = word.chars().take(width).collect();
        let needed = if line.is_empty() { 0 } else { line.chars().count() + 1 };
        if needed + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ── Game entities ─────────────────────────────────────────────────────────────

/// Eight-way arrow closest to the ship's heading.
fn ship_glyph(angle: f32) -> &'static str {
    const GLYPHS: [&str; 8] = ["▲", "◥", "▶", "◢", "▼", "◣", "◀", "◤"];
    let sector = ((angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    GLYPHS[sector]
}

fn draw_ship<W: Write>(screen: &mut Screen<W>, session: &Session) -> std::io::Result<()> {
    match session.ship() {
        Some(ship) => screen.put_px(ship.x, ship.y, ship_glyph(ship.angle), C_SHIP),
        None => Ok(()),
    }
}

fn draw_bullets<W: Write>(screen: &mut Screen<W>, session: &Session) -> std::io::Result<()> {
    for bullet in session.bullets() {
        screen.put_px(bullet.x, bullet.y, "•", C_BULLET)?;
    }
    Ok(())
}

fn draw_effects<W: Write>(
    screen: &mut Screen<W>,
    session: &Session,
    now: Duration,
) -> std::io::Result<()> {
    for pulse in session.effects().pulses() {
        if let PulseKind::ImpactFlash { x, y } = pulse.kind {
            // The ring widens as the flash ages.
            let age = now.saturating_sub(pulse.started_at).as_secs_f32();
            let progress = (age / pulse.duration.as_secs_f32().max(f32::EPSILON)).min(1.0);
            let radius = 1.0 + progress * 4.0;
            screen.put_px(x, y, "✺", C_FLASH)?;
            for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -0.5), (0.0, 0.5)] {
                screen.put_px(
                    x + dx * radius * CELL_WIDTH,
                    y + dy * radius * CELL_HEIGHT,
                    "·",
                    C_FLASH,
                )?;
            }
        }
    }
    for particle in session.effects().particles() {
        let color = if particle.opacity > 0.5 { C_PARTICLE } else { C_PARTICLE_FADED };
        screen.put_px(particle.x, particle.y, &particle.text, color)?;
    }
    Ok(())
}

// ── HUD & footer ──────────────────────────────────────────────────────────────

fn draw_scoreboard<W: Write>(screen: &mut Screen<W>, scoreboard: &Scoreboard) -> std::io::Result<()> {
    let lines = [
        format!("TIME: {:.1}s", scoreboard.elapsed_secs),
        format!("REMAINING: {}s", scoreboard.remaining_secs),
        format!("TARGETS: {}/{}", scoreboard.hits, scoreboard.total),
        "ESC to quit".to_string(),
    ];
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let bar = "─".repeat(width);
    screen.put(1, 0, &format!("┌{}┐", bar), C_HUD)?;
    for (i, line) in lines.iter().enumerate() {
        screen.put(1, 1 + i as i32, &format!("│ {:<w$} │", line, w = width - 2), C_HUD)?;
    }
    screen.put(1, 1 + lines.len() as i32, &format!("└{}┘", bar), C_HUD)
}

fn draw_footer<W: Write>(screen: &mut Screen<W>, board: &Board) -> std::io::Result<()> {
    let rows = screen.rows as i32;
    for (i, line) in board.history().iter().rev().take(2).enumerate() {
        screen.put(2, rows - 2 - i as i32, &format!("> {}", line), C_HISTORY)?;
    }
    screen.put(
        2,
        rows - 1,
        "G : play   ← → ↑ ↓ / WASD : steer   SPACE : shoot   ESC : stop   Q : quit",
        C_HINT,
    )
}
