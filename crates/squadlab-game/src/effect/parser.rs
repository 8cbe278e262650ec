use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use squadlab_core::Character;

use super::clause::{ClauseContext, Contribution, GRAMMAR};

/// Separator between the alternatives of a multi-choice effect
static OR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)- OR -").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Everything the parser needs besides the effect text
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectContext<'a> {
    pub character: Option<&'a Character>,
    pub multiplier: u8,
    /// Active alternative of a multi-choice effect; clamped to the options
    pub selection: usize,
}

/// Raw alternatives of a multi-choice effect and the active one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    pub options: Vec<String>,
    pub selected: usize,
}

/// What an effect leaves behind for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Leftover {
    Text { text: String },
    Selector(Selector),
}

/// Result of parsing one effect text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedEffect {
    pub contributions: Vec<Contribution>,
    pub conditional: bool,
    pub leftover: Option<Leftover>,
}

/// Alternatives of an effect text, trimmed. Always at least one.
pub fn split_options(text: &str) -> Vec<&str> {
    OR_SPLIT.split(text).map(str::trim).collect()
}

pub fn option_count(text: &str) -> usize {
    split_options(text).len()
}

/// Parse one effect text into stat contributions and leftover text.
///
/// A multi-choice effect only parses its active alternative; every
/// contribution it yields is flagged conditional and the leftover is a
/// [`Selector`] carrying all alternatives.
pub fn parse_effect(text: &str, ctx: &EffectContext<'_>) -> ParsedEffect {
    let options = split_options(text);
    let conditional = options.len() > 1;
    let selected = ctx.selection.min(options.len() - 1);

    let clause_ctx = ClauseContext {
        character: ctx.character,
        multiplier: ctx.multiplier,
    };
    let (mut contributions, remainder) = extract(options[selected], &clause_ctx);

    let leftover = if conditional {
        for contribution in &mut contributions {
            contribution.conditional = true;
        }
        Some(Leftover::Selector(Selector {
            options: options.iter().map(|s| s.to_string()).collect(),
            selected,
        }))
    } else {
        clean_leftover(&remainder).map(|text| Leftover::Text { text })
    };

    ParsedEffect {
        contributions,
        conditional,
        leftover,
    }
}

/// Run the clause grammar over one alternative
fn extract(text: &str, ctx: &ClauseContext<'_>) -> (Vec<Contribution>, String) {
    let mut contributions = Vec::new();
    let mut remainder = text.to_string();
    for clause in GRAMMAR.iter() {
        remainder = clause.apply(&remainder, ctx, &mut contributions);
    }
    (contributions, remainder)
}

/// Leftover text worth showing: whitespace collapsed, trimmed, leading
/// sign removed, and at least one letter or digit left.
fn clean_leftover(remainder: &str) -> Option<String> {
    let collapsed = WHITESPACE.replace_all(remainder, " ");
    let trimmed = collapsed.trim();
    let trimmed = trimmed
        .strip_prefix(['+', '-'])
        .map_or(trimmed, str::trim_start);
    trimmed
        .chars()
        .any(char::is_alphanumeric)
        .then(|| trimmed.to_string())
}
