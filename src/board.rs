/// The page the game is played on: a grid of project cards, a footer, a
/// scoreboard slot and a console history.

use crate::entities::{Rect, Scoreboard, Target, Viewport};
use crate::portfolio::{short_description, Project};
use crate::session::Page;

/// Lines kept in the console history.
pub const HISTORY_LIMIT: usize = 50;

// ── Layout constants (viewport pixels) ───────────────────────────────────────

const PAGE_PADDING: f32 = 20.0;
/// Room for the page header above the grid.
const HEADER_HEIGHT: f32 = 60.0;
/// Room kept free below the grid for the footer.
const FOOTER_HEIGHT: f32 = 60.0;
const CARD_GAP: f32 = 20.0;
const CARD_MIN_WIDTH: f32 = 260.0;
const CARD_MIN_HEIGHT: f32 = 80.0;
const CARD_MAX_HEIGHT: f32 = 140.0;

#[derive(Clone, Debug)]
pub struct Card {
    pub project: Project,
    pub rect: Rect,
    /// Set once the card has been shot; its content is blank until restored.
    pub destroyed: bool,
}

impl Card {
    pub fn to_target(&self) -> Target {
        if self.destroyed {
            return Target {
                id: self.project.target_id(),
                title: String::new(),
                date: String::new(),
                client: String::new(),
                description: String::new(),
                rect: self.rect,
            };
        }
        Target {
            id: self.project.target_id(),
            title: self.project.title.clone(),
            date: self.project.date_label(),
            client: self.project.client.clone().unwrap_or_default(),
            description: short_description(&self.project.description),
            rect: self.rect,
        }
    }
}

pub struct Board {
    cards: Vec<Card>,
    viewport: Viewport,
    chrome_hidden: bool,
    scoreboard: Option<Scoreboard>,
    history: Vec<String>,
}

impl Board {
    pub fn new(projects: Vec<Project>, viewport: Viewport) -> Board {
        let rects = layout_cards(projects.len(), &viewport);
        let cards = projects
            .into_iter()
            .zip(rects)
            .map(|(project, rect)| Card { project, rect, destroyed: false })
            .collect();
        Board {
            cards,
            viewport,
            chrome_hidden: false,
            scoreboard: None,
            history: Vec::new(),
        }
    }

    /// Re-flow the grid for a new viewport, keeping card state.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let rects = layout_cards(self.cards.len(), &viewport);
        for (card, rect) in self.cards.iter_mut().zip(rects) {
            card.rect = rect;
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn chrome_hidden(&self) -> bool {
        self.chrome_hidden
    }

    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    pub fn clear_scoreboard(&mut self) {
        self.scoreboard = None;
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Page for Board {
    fn targets(&self) -> Vec<Target> {
        self.cards.iter().map(Card::to_target).collect()
    }

    // Cards never overlap, so the rectangle picks out the struck card even
    // when several cards share an identifier.
    fn destroy_target(&mut self, target: &Target) {
        let struck = self.cards.iter_mut().find(|card| {
            !card.destroyed && card.rect == target.rect && card.project.target_id() == target.id
        });
        if let Some(card) = struck {
            card.destroyed = true;
        }
    }

    fn restore_targets(&mut self) {
        for card in &mut self.cards {
            card.destroyed = false;
        }
    }

    fn set_chrome_hidden(&mut self, hidden: bool) {
        self.chrome_hidden = hidden;
    }

    fn update_scoreboard(&mut self, scoreboard: &Scoreboard) {
        self.scoreboard = Some(*scoreboard);
    }

    fn post_message(&mut self, line: &str) {
        self.history.push(line.to_string());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }
}

/// Grid rectangles for `count` cards, left to right then top to bottom.
///
/// Columns are as many `CARD_MIN_WIDTH` cards as fit; card height shrinks to
/// fit every row between header and footer, down to `CARD_MIN_HEIGHT`, after
/// which rows run past the bottom edge.
pub fn layout_cards(count: usize, viewport: &Viewport) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let inner_width = (viewport.width - 2.0 * PAGE_PADDING).max(CARD_MIN_WIDTH);
    let columns = (((inner_width + CARD_GAP) / (CARD_MIN_WIDTH + CARD_GAP)) as usize)
        .clamp(1, count);
    let rows = count.div_ceil(columns);

    let card_width = (inner_width - CARD_GAP * (columns - 1) as f32) / columns as f32;
    let inner_height = viewport.height - HEADER_HEIGHT - FOOTER_HEIGHT;
    let card_height = ((inner_height - CARD_GAP * (rows - 1) as f32) / rows as f32)
        .min(CARD_MAX_HEIGHT)
        .max(CARD_MIN_HEIGHT);

    (0..count)
        .map(|i| {
            let col = (i % columns) as f32;
            let row = (i / columns) as f32;
            Rect::new(
                PAGE_PADDING + col * (card_width + CARD_GAP),
                HEADER_HEIGHT + row * (card_height + CARD_GAP),
                card_width,
                card_height,
            )
        })
        .collect()
}
