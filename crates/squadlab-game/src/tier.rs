//! Tier analyzer
//!
//! Ranks every catalog item from its rarity, its conditions and the
//! percentages in its effect text:
//!
//! - each item gets a class (`platinum`, `gold_specific`, `silver_team`, ...)
//! - a score sums the upper-bound percentages of each effect, weighted by
//!   the strongest stat keyword in it, then reduced by condition penalties
//! - scores map to tiers by absolute thresholds; large `_specific` groups
//!   are re-ranked by percentile within the group instead

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use squadlab_core::{rarity_key, Item};

/// Absolute score thresholds, best first
const SCORE_TIERS: [(f64, Tier); 7] = [
    (280.0, Tier::God),
    (200.0, Tier::ZPlus),
    (140.0, Tier::Z),
    (90.0, Tier::S),
    (55.0, Tier::A),
    (25.0, Tier::B),
    (0.0, Tier::C),
];

/// Percentile thresholds for relative ranking, best first
const PERCENTILE_TIERS: [(f64, Tier); 7] = [
    (90.0, Tier::God),
    (75.0, Tier::ZPlus),
    (50.0, Tier::Z),
    (30.0, Tier::S),
    (15.0, Tier::A),
    (5.0, Tier::B),
    (0.0, Tier::C),
];

/// Weight applied to an effect's percentages when the phrase appears in it.
/// The strongest matching weight wins.
const KEYWORD_WEIGHTS: &[(&str, f64)] = &[
    ("inflicted damage", 2.0),
    ("damage guard", 1.8),
    ("damage inflicted", 2.0),
    ("base health", 1.5),
    ("health restoration", 1.3),
    ("base strike attack", 1.4),
    ("base blast attack", 1.4),
    ("base strike defense", 1.3),
    ("base blast defense", 1.3),
    ("base strike & blast attack", 1.6),
    ("base strike & blast defense", 1.5),
    ("base ki recovery", 1.2),
    ("special move damage", 1.4),
    ("ultimate damage", 1.4),
    ("awakened arts damage", 1.4),
    ("strike attack", 1.6),
    ("blast attack", 1.6),
    ("strike defense", 1.5),
    ("blast defense", 1.5),
    ("strike & blast attack", 1.7),
    ("strike & blast defense", 1.6),
    ("ki recovery", 1.7),
];

/// Effects mentioning these only grant drops or medals and are not scored
const EVENT_KEYWORDS: [&str; 4] = ["raid medal", "z power", "drops", "anniversary"];

/// Condition tag substring, score factor, reason
const CONDITION_PENALTIES: [(&str, f64, &str); 4] = [
    ("HERO", 0.50, "HERO rarity, long unsupported"),
    ("EXTREME", 0.65, "EXTREME rarity, reduced use"),
    ("Event Exclusive", 0.75, "event exclusive character"),
    ("DBL", 0.85, "single character tag (DBL)"),
];

/// Smallest `_specific` group ranked by percentile
pub const MIN_RELATIVE_GROUP: usize = 10;

const PLATINUM_SCORE: f64 = 9999.0;

static PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(?:\s*~\s*(\d+(?:\.\d+)?))?\s*%").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    God,
    ZPlus,
    Z,
    S,
    A,
    B,
    C,
}

impl Tier {
    pub const ALL: [Tier; 7] = [
        Tier::God,
        Tier::ZPlus,
        Tier::Z,
        Tier::S,
        Tier::A,
        Tier::B,
        Tier::C,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::God => "神",
            Self::ZPlus => "Z+",
            Self::Z => "Z",
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    fn from_thresholds(value: f64, thresholds: &[(f64, Tier)]) -> Tier {
        thresholds
            .iter()
            .find(|(min, _)| value >= *min)
            .map_or(Tier::C, |(_, tier)| *tier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Who an item's conditions restrict it to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A single character (a `DBL...` code in the conditions)
    Specific,
    /// A group of characters
    Team,
    /// Anyone
    Independent,
}

impl Scope {
    fn suffix(self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Team => "team",
            Self::Independent => "independent",
        }
    }
}

/// Item class used for scoring and grouping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemClass {
    Platinum,
    Event,
    Iron,
    /// `bronze` or `awakenedbronze`
    Bronze(String),
    /// Any other rarity, split by condition scope
    Graded { rarity: String, scope: Scope },
}

impl ItemClass {
    pub fn classify(item: &Item) -> Self {
        let rarity = rarity_key(&item.rarity);
        match rarity.as_str() {
            "platinum" => Self::Platinum,
            "event" => Self::Event,
            "iron" => Self::Iron,
            "bronze" | "awakenedbronze" => Self::Bronze(rarity),
            _ => {
                let scope = if has_character_code(item) {
                    Scope::Specific
                } else if item.has_conditions() {
                    Scope::Team
                } else {
                    Scope::Independent
                };
                Self::Graded { rarity, scope }
            }
        }
    }

    pub fn is_specific(&self) -> bool {
        matches!(self, Self::Graded { scope: Scope::Specific, .. })
    }

    /// Fixed score for classes that are not scored from their effects
    fn fixed_score(&self) -> Option<f64> {
        match self {
            Self::Platinum => Some(PLATINUM_SCORE),
            Self::Event | Self::Iron => Some(0.0),
            _ => None,
        }
    }

    fn fixed_tier(&self) -> Option<Tier> {
        match self {
            Self::Platinum => Some(Tier::God),
            Self::Event | Self::Iron => Some(Tier::C),
            _ => None,
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platinum => f.write_str("platinum"),
            Self::Event => f.write_str("event"),
            Self::Iron => f.write_str("iron"),
            Self::Bronze(rarity) => f.write_str(rarity),
            Self::Graded { rarity, scope } => write!(f, "{rarity}_{}", scope.suffix()),
        }
    }
}

impl Serialize for ItemClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How the tier was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierMethod {
    Absolute,
    /// A `_specific` group too small for percentiles
    SmallGroup(usize),
    Relative,
}

impl fmt::Display for TierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => f.write_str("absolute"),
            Self::SmallGroup(n) => write!(f, "absolute (group too small: {n})"),
            Self::Relative => f.write_str("relative"),
        }
    }
}

impl Serialize for TierMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One ranked item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub class: ItemClass,
    pub tier: Tier,
    pub score: f64,
    pub penalties: Vec<&'static str>,
    #[serde(rename = "tier_method")]
    pub method: TierMethod,
}

fn has_character_code(item: &Item) -> bool {
    item.conditions_data
        .iter()
        .flat_map(|group| group.requirements())
        .any(|tag| tag.to_uppercase().starts_with("DBL"))
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Sum of the upper-bound percentages in one effect, weighted by the
/// strongest keyword it mentions
pub fn effect_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let weight = KEYWORD_WEIGHTS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, weight)| *weight)
        .fold(1.0, f64::max);

    let sum: f64 = PERCENT
        .captures_iter(text)
        .map(|caps| {
            let parse = |group: usize| {
                caps.get(group)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
            };
            parse(2).or_else(|| parse(1)).unwrap_or(0.0)
        })
        .sum();

    sum * weight
}

/// Combined penalty factor for the item's condition tags, with reasons
pub fn condition_penalty(item: &Item) -> (f64, Vec<&'static str>) {
    let tags = item
        .conditions_data
        .iter()
        .flat_map(|group| group.requirements())
        .collect::<Vec<_>>()
        .join(" ");

    let mut factor = 1.0;
    let mut reasons = Vec::new();
    for (needle, penalty, reason) in CONDITION_PENALTIES {
        if tags.contains(needle) {
            factor *= penalty;
            reasons.push(reason);
        }
    }
    (round_to(factor, 4), reasons)
}

/// Score of one item of the given class
pub fn item_score(item: &Item, class: &ItemClass) -> f64 {
    if let Some(score) = class.fixed_score() {
        return score;
    }
    let total: f64 = item
        .slots
        .iter()
        .map(|slot| slot.effect.as_str())
        .filter(|effect| {
            let lowered = effect.to_lowercase();
            !EVENT_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        })
        .map(effect_score)
        .sum();
    let (factor, _) = condition_penalty(item);
    round_to(total * factor, 2)
}

/// Absolute tier for a score
pub fn score_tier(score: f64, class: &ItemClass) -> Tier {
    class
        .fixed_tier()
        .unwrap_or_else(|| Tier::from_thresholds(score, &SCORE_TIERS))
}

fn evaluate(item: &Item) -> TierEntry {
    let class = ItemClass::classify(item);
    let score = item_score(item, &class);
    let (_, penalties) = condition_penalty(item);
    TierEntry {
        name: item.name.clone(),
        tier: score_tier(score, &class),
        class,
        score,
        penalties,
        method: TierMethod::Absolute,
    }
}

/// Re-rank `_specific` groups by percentile within each group
fn rank_specific_groups(entries: &mut [TierEntry]) {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, entry) in entries.iter().enumerate() {
        if entry.class.is_specific() {
            groups.entry(entry.class.to_string()).or_default().push(i);
        }
    }

    for mut indices in groups.into_values() {
        let n = indices.len();
        if n < MIN_RELATIVE_GROUP {
            for i in indices {
                entries[i].method = TierMethod::SmallGroup(n);
            }
            continue;
        }

        indices.sort_by(|&a, &b| entries[a].score.total_cmp(&entries[b].score));
        let span = (n - 1).max(1) as f64;
        for (rank, i) in indices.into_iter().enumerate() {
            let percentile = rank as f64 / span * 100.0;
            entries[i].tier = Tier::from_thresholds(percentile, &PERCENTILE_TIERS);
            entries[i].method = TierMethod::Relative;
        }
    }
}

/// Rank every item, best score first
pub fn analyze(items: &[Item]) -> Vec<TierEntry> {
    let mut entries: Vec<TierEntry> = items.iter().map(evaluate).collect();
    rank_specific_groups(&mut entries);
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries
}

/// Number of entries per tier, every tier present
pub fn tier_counts(entries: &[TierEntry]) -> BTreeMap<Tier, usize> {
    let mut counts: BTreeMap<Tier, usize> = Tier::ALL.into_iter().map(|t| (t, 0)).collect();
    for entry in entries {
        *counts.entry(entry.tier).or_default() += 1;
    }
    counts
}

/// Number of entries per class, most common first
pub fn class_counts(entries: &[TierEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.class.to_string()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadlab_core::{ConditionGroup, EffectSlot};

    fn make_item(name: &str, rarity: &str, groups: &[&[&str]], effects: &[&str]) -> Item {
        Item {
            name: name.to_string(),
            rarity: rarity.to_string(),
            conditions_data: groups.iter().map(|g| ConditionGroup::new(g.iter().copied())).collect(),
            slots: effects.iter().map(|e| EffectSlot::new(*e)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify() {
        let cases = [
            (make_item("p", "rarity platinum", &[], &[]), "platinum"),
            (make_item("e", "rarityevent", &[], &[]), "event"),
            (make_item("b", "rarity awakenedbronze", &[], &[]), "awakenedbronze"),
            (make_item("s", "rarity gold", &[&["DBL01-01S"]], &[]), "gold_specific"),
            (make_item("t", "rarity silver", &[&["Tag: Saiyan"]], &[]), "silver_team"),
            (make_item("i", "rarityawakenedunique", &[], &[]), "awakenedunique_independent"),
        ];
        for (item, expected) in cases {
            assert_eq!(ItemClass::classify(&item).to_string(), expected);
        }
    }

    #[test]
    fn test_effect_score_upper_bound_and_weight() {
        assert_eq!(effect_score("Critical 10%"), 10.0);
        assert_eq!(effect_score("Strike Attack 10 ~ 20%"), 32.0);
        assert_eq!(effect_score("Inflicted Damage 5% Damage Guard 5%"), 20.0);
    }

    #[test]
    fn test_penalties_accumulate() {
        let item = make_item("x", "rarity gold", &[&["Tag: EXTREME", "DBL20-03S"]], &[]);
        let (factor, reasons) = condition_penalty(&item);
        assert_eq!(factor, round_to(0.65 * 0.85, 4));
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_event_slots_skipped() {
        let item = make_item(
            "x",
            "rarity gold",
            &[],
            &["Critical 10%", "Raid Medal drops +50%"],
        );
        let class = ItemClass::classify(&item);
        assert_eq!(item_score(&item, &class), 10.0);
    }

    #[test]
    fn test_fixed_classes() {
        let platinum = make_item("p", "rarity platinum", &[], &["Critical 1%"]);
        let iron = make_item("i", "rarity iron", &[], &["Strike Attack 99%"]);
        let entries = analyze(&[iron, platinum]);
        assert_eq!(entries[0].name, "p");
        assert_eq!(entries[0].score, PLATINUM_SCORE);
        assert_eq!(entries[0].tier, Tier::God);
        assert_eq!(entries[1].score, 0.0);
        assert_eq!(entries[1].tier, Tier::C);
    }

    #[test]
    fn test_absolute_tiers() {
        let class = ItemClass::Graded {
            rarity: "gold".into(),
            scope: Scope::Independent,
        };
        assert_eq!(score_tier(280.0, &class), Tier::God);
        assert_eq!(score_tier(199.99, &class), Tier::Z);
        assert_eq!(score_tier(55.0, &class), Tier::A);
        assert_eq!(score_tier(3.0, &class), Tier::C);
    }

    #[test]
    fn test_small_specific_group_stays_absolute() {
        let items: Vec<_> = (0..3)
            .map(|i| make_item(&format!("s{i}"), "rarity gold", &[&["DBL01-01S"]], &["Critical 100%"]))
            .collect();
        let entries = analyze(&items);
        assert!(entries.iter().all(|e| e.method == TierMethod::SmallGroup(3)));
        // 100% at weight 1.0, times the DBL penalty
        assert!(entries.iter().all(|e| e.score == 85.0 && e.tier == Tier::A));
    }

    #[test]
    fn test_large_specific_group_ranked_by_percentile() {
        let items: Vec<_> = (0..11)
            .map(|i| {
                let effect = format!("Critical {}%", (i + 1) * 10);
                make_item(&format!("s{i}"), "rarity gold", &[&["DBL01-01S"]], &[effect.as_str()])
            })
            .collect();
        let entries = analyze(&items);
        assert!(entries.iter().all(|e| e.method == TierMethod::Relative));
        assert_eq!(entries[0].name, "s10");
        assert_eq!(entries[0].tier, Tier::God);
        assert_eq!(entries[10].name, "s0");
        assert_eq!(entries[10].tier, Tier::C);
        let counts = tier_counts(&entries);
        assert_eq!(counts.values().sum::<usize>(), 11);
    }

    #[test]
    fn test_serialized_entry() {
        let entries = analyze(&[make_item("p", "rarity platinum", &[], &[])]);
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["type"], "platinum");
        assert_eq!(json["tier"], "神");
        assert_eq!(json["tier_method"], "absolute");
    }
}
