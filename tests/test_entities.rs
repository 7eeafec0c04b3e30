use portfolio_arcade::entities::*;

#[test]
fn rect_edges_and_centre() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), (60.0, 45.0));

    let c = Rect::centered(60.0, 45.0, 8.0);
    assert_eq!(c, Rect::new(56.0, 41.0, 8.0, 8.0));
}

#[test]
fn rect_overlap_needs_both_axes() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(5.0, 20.0, 10.0, 10.0))); // x only
    assert!(!a.overlaps(&Rect::new(20.0, 5.0, 10.0, 10.0))); // y only
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0))); // touching
}

#[test]
fn hit_id_filters_empty() {
    let mut t = Target {
        id: Some("a".to_string()),
        title: String::new(),
        date: String::new(),
        client: String::new(),
        description: String::new(),
        rect: Rect::new(0.0, 0.0, 1.0, 1.0),
    };
    assert_eq!(t.hit_id(), Some("a"));
    t.id = Some(String::new());
    assert_eq!(t.hit_id(), None);
    t.id = None;
    assert_eq!(t.hit_id(), None);
}

#[test]
fn summary_lines_for_cleared_board() {
    let s = Summary { elapsed_secs: 7.26, hits: 3, total: 3, reason: EndReason::Cleared };
    assert_eq!(
        s.history_lines(),
        vec![
            "ALL TARGETS DESTROYED IN 7.3s!".to_string(),
            "amazing speed! try to beat your record".to_string(),
        ]
    );
}

#[test]
fn summary_lines_for_partial_run() {
    let s = Summary { elapsed_secs: 30.0, hits: 1, total: 4, reason: EndReason::TimedOut };
    assert_eq!(
        s.history_lines(),
        vec![
            "game ended - time: 30.0s".to_string(),
            "targets destroyed: 1/4".to_string(),
        ]
    );
}

#[test]
fn ship_clone_is_independent() {
    let original = Ship { x: 1.0, y: 2.0, vx: 3.0, vy: 4.0, angle: 0.0 };
    let mut copy = original;
    copy.x = 99.0;
    assert_eq!(original.x, 1.0);
    assert_eq!(original.speed(), 5.0);
}
