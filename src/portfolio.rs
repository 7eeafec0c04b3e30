/// Portfolio data: the project entries that become cards on the board.
///
/// The file format is the site's `data.json`: an array of objects with a
/// markdown `description`.  Years may be written as numbers or strings.

use std::path::Path;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Deserializer};

use crate::error::ArcadeError;

/// Longest description shown on a card before it is cut with `...`.
pub const SHORT_DESCRIPTION_CHARS: usize = 120;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: i32,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Project {
    /// Identifier used for scoring: the explicit id, else the title.
    pub fn target_id(&self) -> Option<String> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(Some(self.title.as_str()).filter(|t| !t.is_empty()))
            .map(str::to_string)
    }

    /// Year as printed on the card; unknown years print nothing.
    pub fn date_label(&self) -> String {
        if self.year == 0 {
            String::new()
        } else {
            self.year.to_string()
        }
    }
}

// Years that fail to parse count as 0, like a missing year.
fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let year = match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(s) => leading_int(&s),
        _ => None,
    };
    Ok(year.unwrap_or(0))
}

/// Parse the leading integer of a string, ignoring anything after it
/// ("2021-2023" → 2021).
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let digits_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..digits_end].parse().ok()
}

/// Parse projects and order them newest first.  Projects from the same year
/// keep their file order.
pub fn parse_projects(json: &str) -> Result<Vec<Project>, ArcadeError> {
    let mut projects: Vec<Project> = serde_json::from_str(json)?;
    projects.sort_by(|a, b| b.year.cmp(&a.year));
    Ok(projects)
}

pub fn load_projects(path: impl AsRef<Path>) -> Result<Vec<Project>, ArcadeError> {
    let text = std::fs::read_to_string(path)?;
    parse_projects(&text)
}

/// First paragraph of a markdown description as plain text, cut to
/// [`SHORT_DESCRIPTION_CHARS`].
pub fn short_description(markdown: &str) -> String {
    let plain = first_paragraph_text(markdown);

    if plain.chars().count() > SHORT_DESCRIPTION_CHARS {
        let cut: String = plain.chars().take(SHORT_DESCRIPTION_CHARS).collect();
        format!("{}...", cut)
    } else {
        plain
    }
}

/// Text of the first rendered paragraph.  A description with no paragraph
/// at all (a lone heading or list) yields all of its text instead.
fn first_paragraph_text(markdown: &str) -> String {
    let mut all = String::new();
    let mut paragraph: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => paragraph = Some(String::new()),
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = paragraph.take() {
                    return collapse_whitespace(&text);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                all.push_str(&text);
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                all.push(' ');
                if let Some(p) = paragraph.as_mut() {
                    p.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => all.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&all)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
