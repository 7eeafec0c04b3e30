use portfolio_arcade::error::ArcadeError;
use portfolio_arcade::portfolio::*;

const DATA: &str = r#"[
    {"id": "a", "title": "Alpha", "year": "2019", "description": "First."},
    {"title": "Beta", "year": 2023, "client": "Acme", "description": "Second."},
    {"id": "", "title": "Gamma", "year": "2021-2022"},
    {"title": "Delta", "year": "n/a", "images": ["d.webp"]}
]"#;

// ── parse_projects ────────────────────────────────────────────────────────────

#[test]
fn projects_sorted_newest_first() {
    let projects = parse_projects(DATA).expect("valid data");
    let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Beta", "Gamma", "Alpha", "Delta"]);
}

#[test]
fn years_parse_leniently() {
    let projects = parse_projects(DATA).expect("valid data");
    let year = |title: &str| {
        projects
            .iter()
            .find(|p| p.title == title)
            .map(|p| p.year)
    };
    assert_eq!(year("Alpha"), Some(2019));
    assert_eq!(year("Beta"), Some(2023));
    assert_eq!(year("Gamma"), Some(2021));
    assert_eq!(year("Delta"), Some(0));
}

#[test]
fn optional_fields_default() {
    let projects = parse_projects(DATA).expect("valid data");
    let delta = projects.iter().find(|p| p.title == "Delta").expect("present");
    assert_eq!(delta.client, None);
    assert_eq!(delta.description, "");
    assert_eq!(delta.images, vec!["d.webp"]);
    assert_eq!(delta.date_label(), "");
}

#[test]
fn target_id_falls_back_to_title() {
    let projects = parse_projects(DATA).expect("valid data");
    let id = |title: &str| {
        projects
            .iter()
            .find(|p| p.title == title)
            .and_then(|p| p.target_id())
    };
    assert_eq!(id("Alpha").as_deref(), Some("a"));
    assert_eq!(id("Beta").as_deref(), Some("Beta"));
    assert_eq!(id("Gamma").as_deref(), Some("Gamma")); // empty id counts as missing
}

#[test]
fn malformed_data_is_a_json_error() {
    assert!(matches!(parse_projects("{not json"), Err(ArcadeError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_projects("/definitely/not/here.json"),
        Err(ArcadeError::Io(_))
    ));
}

#[test]
fn bundled_demo_parses() {
    let projects = parse_projects(include_str!("../demos/data.json")).expect("demo data");
    assert_eq!(projects.len(), 5);
    assert_eq!(projects[0].year, 2023);
}

// ── short_description ─────────────────────────────────────────────────────────

#[test]
fn short_description_keeps_first_paragraph() {
    let md = "A **bold** start with `code`.\n\nSecond paragraph.";
    assert_eq!(short_description(md), "A bold start with code.");
}

#[test]
fn short_description_keeps_link_text() {
    let md = "See [the map](https://example.com/map) for details.";
    assert_eq!(short_description(md), "See the map for details.");
}

#[test]
fn short_description_truncates_long_text() {
    let md = "word ".repeat(40);
    let short = short_description(&md);
    assert!(short.ends_with("..."));
    assert_eq!(short.chars().count(), SHORT_DESCRIPTION_CHARS + 3);
}

#[test]
fn short_description_skips_leading_heading() {
    assert_eq!(short_description("# Overview\n\nBuilt the site."), "Built the site.");
}

#[test]
fn short_description_keeps_intraword_symbols() {
    let md = "Wrote C# and snake_case tools, 5 * 3 teams.";
    assert_eq!(short_description(md), md);
}

#[test]
fn short_description_splits_crlf_paragraphs() {
    assert_eq!(short_description("First para.\r\n\r\nSecond para."), "First para.");
}

#[test]
fn short_description_without_paragraph_uses_all_text() {
    assert_eq!(short_description("## Case study"), "Case study");
}

#[test]
fn short_description_of_empty_is_empty() {
    assert_eq!(short_description(""), "");
    assert_eq!(short_description("\n\n\n"), "");
}
