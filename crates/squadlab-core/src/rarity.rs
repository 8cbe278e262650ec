//! Rarity labels
//!
//! Catalogs spell rarity classes inconsistently (`rarity gold`,
//! `rarityawakenedgold`, `Rarity Awakened Gold`). These helpers reduce them
//! to a compact key and to a display label.

/// Border image per rarity key
const BORDER_ASSETS: &[(&str, &str)] = &[
    ("awakenedbronze", "Awakened_Bronze.png"),
    ("awakenedgold", "Awakened_Gold.png"),
    ("awakenedsilver", "Awakened_Silver.png"),
    ("awakenedunique", "Awakened_Unique.png"),
    ("bronze", "Bronze.png"),
    ("event", "Event.png"),
    ("gold", "Gold.png"),
    ("iron", "Iron.png"),
    ("platinum", "Platinum.png"),
    ("silver", "Silver.png"),
    ("unique", "Unique.png"),
];

/// Compact rarity key: lowercased, whitespace removed, `rarity` prefix
/// stripped (`"rarity awakened gold"` -> `"awakenedgold"`).
pub fn rarity_key(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    match compact.strip_prefix("rarity") {
        Some(rest) => rest.to_string(),
        None => compact,
    }
}

/// Display label: `rarity` prefix stripped, `awakened` split off as its own
/// word, every word title-cased (`"rarityawakenedgold"` -> `"Awakened Gold"`).
///
/// Falls back to the raw string when nothing is left after stripping.
pub fn rarity_label(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = lowered.strip_prefix("rarity").unwrap_or(&lowered).trim_start();
    let spaced = match stripped.strip_prefix("awakened") {
        Some(rest) => format!("awakened {rest}"),
        None => stripped.to_string(),
    };

    let label = spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        raw.to_string()
    } else {
        label
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Border image file for a rarity, if one exists
pub fn border_asset(raw: &str) -> Option<&'static str> {
    let key = rarity_key(raw);
    BORDER_ASSETS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, asset)| *asset)
}
