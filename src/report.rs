//! Plain-text rendering of squad results

use std::io::{self, Write};

use squadlab_core::{border_asset, rarity_label, Character, Item, StatKey};
use squadlab_game::{has_member_scaling, OtherEffect, StatReport, Tier, TierEntry};

use crate::settings::ReportSettings;

/// `+12.5%` for gains, `0%` otherwise
fn format_value(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        "0%".to_string()
    }
}

fn gauge(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}

pub fn write_stats<W: Write>(out: &mut W, report: &StatReport, settings: &ReportSettings) -> io::Result<()> {
    writeln!(out, "Stats")?;
    for key in StatKey::ALL {
        let value = report.get(key);
        if value == 0.0 && !settings.show_zero {
            continue;
        }
        let mark = if report.is_conditional(key) { " (choice)" } else { "" };
        writeln!(
            out,
            "  {:<20} {:>8} {}{}",
            key.name(),
            format_value(value),
            gauge(report.gauge(key, settings.gauge_scale), settings.gauge_width),
            mark
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Other effects")?;
    if report.other_effects.is_empty() {
        writeln!(out, "  none")?;
    }
    for effect in &report.other_effects {
        match effect {
            OtherEffect::Text { text } => writeln!(out, "  - {text}")?,
            OtherEffect::Selector {
                item_index,
                slot_index,
                options,
                selected,
            } => {
                writeln!(
                    out,
                    "  - item {} slot {}, option {} of {}:",
                    item_index + 1,
                    slot_index + 1,
                    selected + 1,
                    options.len()
                )?;
                for (i, option) in options.iter().enumerate() {
                    let marker = if i == *selected { '>' } else { ' ' };
                    writeln!(out, "    {marker} {option}")?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_items<W: Write>(out: &mut W, items: &[&Item]) -> io::Result<()> {
    for item in items {
        let id = item.id.as_ref().map_or_else(|| "-".to_string(), |id| id.to_string());
        let scaling = if has_member_scaling(item) { " [xN]" } else { "" };
        let border = border_asset(&item.rarity).unwrap_or("-");
        writeln!(
            out,
            "{:>6}  {:<40} {:<16} {}{}",
            id,
            item.name,
            rarity_label(&item.rarity),
            border,
            scaling
        )?;
    }
    writeln!(out, "{} items", items.len())
}

pub fn write_characters<W: Write>(out: &mut W, characters: &[&Character]) -> io::Result<()> {
    for character in characters {
        let tags: Vec<&str> = character.visual_tags.iter().map(String::as_str).collect();
        writeln!(
            out,
            "{:<10} {:<40} {:<5} {}",
            character.id.as_deref().unwrap_or("-"),
            character.name,
            character.element,
            tags.join(", ")
        )?;
    }
    writeln!(out, "{} characters", characters.len())
}

pub fn write_options<W: Write>(out: &mut W, title: &str, options: &[String]) -> io::Result<()> {
    writeln!(out, "{title}: {}", options.join(" | "))
}

pub fn write_tier_summary<W: Write>(out: &mut W, entries: &[TierEntry]) -> io::Result<()> {
    writeln!(out, "{} items analyzed", entries.len())?;
    for (tier, count) in squadlab_game::tier::tier_counts(entries) {
        writeln!(out, "  {:>3}  {} ({count})", tier.label(), "█".repeat(count.min(50)))?;
    }
    writeln!(out)?;
    for (class, count) in squadlab_game::tier::class_counts(entries) {
        writeln!(out, "  {class:<35} {count}")?;
    }
    let top = entries.iter().filter(|e| e.tier == Tier::God).take(10);
    writeln!(out)?;
    for entry in top {
        writeln!(out, "  {} {:<40} {:>8.2}", entry.tier, entry.name, entry.score)?;
    }
    Ok(())
}
