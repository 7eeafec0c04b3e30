use portfolio_arcade::board::*;
use portfolio_arcade::entities::*;
use portfolio_arcade::portfolio::Project;
use portfolio_arcade::session::Page;

fn project(id: Option<&str>, title: &str, year: i32) -> Project {
    Project {
        id: id.map(str::to_string),
        title: title.to_string(),
        year,
        client: Some("Client".to_string()),
        description: "Some **markdown** text.\n\nMore.".to_string(),
        images: Vec::new(),
    }
}

fn viewport() -> Viewport {
    Viewport { width: 1200.0, height: 800.0 }
}

/// Shoot card `index` the way a session does: with this frame's target.
fn shoot(b: &mut Board, index: usize) {
    let target = b.targets()[index].clone();
    b.destroy_target(&target);
}

fn board(n: usize) -> Board {
    let projects = (0..n)
        .map(|i| project(Some(&format!("p{}", i)), &format!("Project {}", i), 2020))
        .collect();
    Board::new(projects, viewport())
}

// ── layout_cards ──────────────────────────────────────────────────────────────

#[test]
fn layout_of_nothing_is_empty() {
    assert!(layout_cards(0, &viewport()).is_empty());
}

#[test]
fn layout_fills_rows_left_to_right() {
    let rects = layout_cards(5, &viewport());
    assert_eq!(rects.len(), 5);
    // 1200px wide fits four 260px columns
    assert_eq!(rects[0].top, rects[3].top);
    assert!(rects[4].top > rects[0].top);
    assert_eq!(rects[4].left, rects[0].left);
    for pair in rects[..4].windows(2) {
        assert!(pair[0].right() < pair[1].left);
    }
}

#[test]
fn layout_cards_never_overlap() {
    for count in 1..20 {
        let rects = layout_cards(count, &viewport());
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{} cards: {:?} overlaps {:?}", count, a, b);
            }
        }
    }
}

#[test]
fn narrow_viewport_gets_one_column() {
    let rects = layout_cards(3, &Viewport { width: 200.0, height: 800.0 });
    assert!(rects.iter().all(|r| r.left == rects[0].left));
}

// ── Page implementation ───────────────────────────────────────────────────────

#[test]
fn targets_carry_card_text() {
    let b = board(2);
    let targets = b.targets();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].id.as_deref(), Some("p0"));
    assert_eq!(targets[0].title, "Project 0");
    assert_eq!(targets[0].date, "2020");
    assert_eq!(targets[0].client, "Client");
    assert_eq!(targets[0].description, "Some markdown text.");
    assert_eq!(targets[0].rect, b.cards()[0].rect);
}

#[test]
fn destroyed_card_keeps_its_place_but_loses_content() {
    let mut b = board(2);
    let before = b.targets()[1].rect;
    shoot(&mut b, 1);

    let t = &b.targets()[1];
    assert!(b.cards()[1].destroyed);
    assert_eq!(t.rect, before);
    assert_eq!(t.id.as_deref(), Some("p1"));
    assert!(t.title.is_empty() && t.description.is_empty());
    assert!(!b.cards()[0].destroyed);

    b.restore_targets();
    assert!(b.cards().iter().all(|c| !c.destroyed));
    assert_eq!(b.targets()[1].title, "Project 1");
}

#[test]
fn card_without_id_is_targeted_by_title() {
    let mut b = Board::new(vec![project(None, "Untitled Work", 2019)], viewport());
    assert_eq!(b.targets()[0].id.as_deref(), Some("Untitled Work"));
    shoot(&mut b, 0);
    assert!(b.cards()[0].destroyed);
}

#[test]
fn only_the_struck_card_is_cleared_when_titles_repeat() {
    let mut b = Board::new(
        vec![project(None, "Same", 2020), project(None, "Same", 2020)],
        viewport(),
    );
    shoot(&mut b, 1);
    let flags: Vec<bool> = b.cards().iter().map(|c| c.destroyed).collect();
    assert_eq!(flags, vec![false, true]);
    assert_eq!(b.targets()[0].title, "Same");
}

#[test]
fn stale_target_does_not_clear_a_moved_card() {
    let mut b = board(2);
    let stale = b.targets()[1].clone();
    b.resize(Viewport { width: 400.0, height: 900.0 });
    b.destroy_target(&stale);
    assert!(b.cards().iter().all(|c| !c.destroyed));
}

#[test]
fn chrome_and_scoreboard_follow_the_session() {
    let mut b = board(1);
    assert!(!b.chrome_hidden());
    b.set_chrome_hidden(true);
    assert!(b.chrome_hidden());

    let score = Scoreboard { elapsed_secs: 1.0, remaining_secs: 29, hits: 0, total: 1 };
    b.update_scoreboard(&score);
    assert_eq!(b.scoreboard(), Some(&score));
    b.clear_scoreboard();
    assert!(b.scoreboard().is_none());
}

#[test]
fn history_is_bounded() {
    let mut b = board(1);
    for i in 0..(HISTORY_LIMIT + 10) {
        b.post_message(&format!("line {}", i));
    }
    assert_eq!(b.history().len(), HISTORY_LIMIT);
    assert_eq!(b.history()[0], "line 10");
    assert_eq!(b.history().last().map(String::as_str), Some("line 59"));
}

#[test]
fn resize_reflows_but_keeps_state() {
    let mut b = board(3);
    shoot(&mut b, 2);
    b.resize(Viewport { width: 400.0, height: 900.0 });
    assert!(b.cards()[2].destroyed);
    assert_eq!(b.cards()[0].rect.left, b.cards()[2].rect.left);
}
