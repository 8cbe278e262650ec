//! Clause grammar
//!
//! Clauses are tried in a fixed order and every match is removed from the
//! text before the next clause runs:
//!
//! 1. tag-conditional (`12% to Strike Attack if this character is "Tag: Saiyan"`)
//! 2. per battle member (`4% to Blast Defense per 'Tag: Saiyan' battle member`)
//! 3. battle member threshold (`20% to Blast Defense when 'Tag: Saiyan' is a battle member`)
//! 4. compound pairs, qualified before unqualified (`Base Strike & Blast Attack 10%`)
//! 5. single stats, qualified before unqualified (`Base Health +5 ~ 12%`)
//!
//! Tag-conditional phrases match stats by the words of their names, so
//! `Guard` and `Recovery` count as keywords and `Inflicted Damage` does not
//! also credit `Damage Guard` the way the legacy keyword list did.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use squadlab_core::{strip_category_prefix, Character, StatKey};

/// Signed decimal
const NUM: &str = r"([+-]?\d+(?:\.\d+)?)";

/// `N%` or `low ~ high %`
fn amount() -> String {
    format!(r"{NUM}(?:\s*~\s*{NUM})?\s*%")
}

/// One numeric stat delta produced by a clause
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub stat: StatKey,
    pub value: f64,
    /// Came from one alternative of a multi-choice effect
    pub conditional: bool,
}

/// Inputs a clause may depend on besides the text itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseContext<'a> {
    pub character: Option<&'a Character>,
    /// Battle member multiplier, 0..=3
    pub multiplier: u8,
}

/// A two-stat phrase such as `Strike & Blast Defense`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compound {
    pub phrase: &'static str,
    pub targets: [StatKey; 2],
    /// Skip matches directly preceded by `Base `
    pub unqualified: bool,
}

const COMPOUNDS: [Compound; 4] = [
    Compound {
        phrase: "Base Strike & Blast Attack",
        targets: [StatKey::BaseStrikeAttack, StatKey::BaseBlastAttack],
        unqualified: false,
    },
    Compound {
        phrase: "Base Strike & Blast Defense",
        targets: [StatKey::BaseStrikeDefense, StatKey::BaseBlastDefense],
        unqualified: false,
    },
    Compound {
        phrase: "Strike & Blast Attack",
        targets: [StatKey::StrikeAttack, StatKey::BlastAttack],
        unqualified: true,
    },
    Compound {
        phrase: "Strike & Blast Defense",
        targets: [StatKey::StrikeDefense, StatKey::BlastDefense],
        unqualified: true,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    TagConditional,
    PerMember,
    Threshold,
    Compound(Compound),
    Single(StatKey),
}

/// A clause pattern and how to interpret its matches
#[derive(Debug, Clone)]
pub struct Clause {
    pub kind: ClauseKind,
    pattern: Regex,
}

/// The full grammar in application order
pub static GRAMMAR: LazyLock<Vec<Clause>> = LazyLock::new(|| {
    let amount = amount();
    let mut clauses = vec![
        Clause::new(
            ClauseKind::TagConditional,
            &format!(r#"(?i){amount}\s*to\s*([^.]+?)\s*if\s*this character is\s*"([^"]+)""#),
        ),
        Clause::new(
            ClauseKind::PerMember,
            &format!(r"(?i){amount}\s*to\s*([^.]+?)\s*\b(?:per|for each)\b\s*(?:.*?)\s*member"),
        ),
        Clause::new(
            ClauseKind::Threshold,
            &format!(r"(?i){amount}\s*to\s*([^.]+?)\s*\bwhen\b\s*(?:.*?)\s*is a battle member"),
        ),
    ];
    clauses.extend(COMPOUNDS.into_iter().map(|compound| {
        Clause::new(
            ClauseKind::Compound(compound),
            &format!(r"(?i){}\s*{amount}", regex::escape(compound.phrase)),
        )
    }));
    clauses.extend(StatKey::ALL.into_iter().map(|key| {
        Clause::new(
            ClauseKind::Single(key),
            &format!(r"(?i){}\s*{amount}", regex::escape(key.name())),
        )
    }));
    clauses
});

impl Clause {
    fn new(kind: ClauseKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("valid clause regex"),
        }
    }

    /// Consume every match of this clause in `text`, pushing contributions
    /// into `out`. Returns the remaining text.
    pub fn apply(&self, text: &str, ctx: &ClauseContext<'_>, out: &mut Vec<Contribution>) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                match self.interpret(text, caps, ctx) {
                    Some(contributions) => {
                        out.extend(contributions);
                        String::new()
                    }
                    None => whole.to_string(),
                }
            })
            .into_owned()
    }

    /// Contributions for one match, or `None` to leave the match in place
    fn interpret(
        &self,
        text: &str,
        caps: &Captures<'_>,
        ctx: &ClauseContext<'_>,
    ) -> Option<Vec<Contribution>> {
        let value = capture_amount(caps, 1, 2);
        let phrase = caps.get(3).map_or("", |m| m.as_str());

        let (keys, value) = match self.kind {
            ClauseKind::TagConditional => {
                let tag = caps.get(4).map_or("", |m| m.as_str());
                let character = ctx.character?;
                if !character_matches(character, tag) {
                    return None;
                }
                (keys_implied_by(phrase), value)
            }
            ClauseKind::PerMember => (keys_named_by(phrase), value * f64::from(ctx.multiplier)),
            ClauseKind::Threshold => {
                let value = if ctx.multiplier > 0 { value } else { 0.0 };
                (keys_named_by(phrase), value)
            }
            ClauseKind::Compound(compound) => {
                let start = caps.get(0).map_or(0, |m| m.start());
                if compound.unqualified && preceded_by_base(text, start) {
                    return None;
                }
                (compound.targets.to_vec(), value)
            }
            ClauseKind::Single(key) => (vec![key], value),
        };

        Some(
            keys.into_iter()
                .map(|stat| Contribution {
                    stat,
                    value,
                    conditional: false,
                })
                .collect(),
        )
    }
}

/// Resolve a captured amount: the upper bound of a range when present and
/// numeric, else the single value, else 0.
pub fn capture_amount(caps: &Captures<'_>, low: usize, high: usize) -> f64 {
    let parse = |group: usize| {
        caps.get(group)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };
    parse(high).or_else(|| parse(low)).unwrap_or(0.0)
}

/// Whether the text right before `idx` is the word `Base` plus whitespace
pub fn preceded_by_base(text: &str, idx: usize) -> bool {
    let Some(before) = text.get(..idx) else {
        return false;
    };
    let trimmed = before.trim_end();
    if trimmed.len() == before.len() {
        return false;
    }
    trimmed
        .len()
        .checked_sub(4)
        .and_then(|start| trimmed.get(start..))
        .is_some_and(|word| word.eq_ignore_ascii_case("base"))
}

/// Tag-conditional match: the character carries the tag, or its name
/// contains the tag (conditions sometimes name a character directly).
fn character_matches(character: &Character, tag: &str) -> bool {
    let clean = strip_category_prefix(tag.trim());
    !clean.is_empty() && (character.has_tag(clean) || character.name.contains(clean))
}

fn words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Keys whose whole vocabulary appears in the phrase, with a matching
/// `Base ` qualifier. `Strike & Blast Attack` implies both attack stats.
pub fn keys_implied_by(phrase: &str) -> Vec<StatKey> {
    let phrase_words = words(phrase);
    let base = phrase_words.contains("base");
    StatKey::ALL
        .into_iter()
        .filter(|key| key.is_base() == base)
        .filter(|key| words(key.unqualified_name()).is_subset(&phrase_words))
        .collect()
}

/// Keys whose name appears verbatim in the phrase, with compound pairs
/// expanded and a matching `Base ` qualifier. Unlike [`keys_implied_by`],
/// `Strike Attack & Blast Defense` does not reach `Strike Defense`.
pub fn keys_named_by(phrase: &str) -> Vec<StatKey> {
    let lowered = phrase.to_lowercase();
    let expanded = lowered
        .replace("strike & blast attack", "strike attack & blast attack")
        .replace("strike & blast defense", "strike defense & blast defense");
    let base = words(&lowered).contains("base");
    StatKey::ALL
        .into_iter()
        .filter(|key| key.is_base() == base)
        .filter(|key| expanded.contains(&key.unqualified_name().to_lowercase()))
        .collect()
}
