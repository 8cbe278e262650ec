//! End-to-end squad evaluation over catalogs decoded from JSON

use squadlab_core::{Character, Item, StatKey};
use squadlab_game::{
    aggregate, filter_items, is_eligible, parse_effect, EffectContext, EquipError, EquipSlots,
    FilterContext, OtherEffect,
};

fn character(json: &str) -> Character {
    serde_json::from_str(json).unwrap()
}

fn item(json: &str) -> Item {
    serde_json::from_str(json).unwrap()
}

fn goku() -> Character {
    character(r#"{"id": "c1", "name": "Goku", "element": "YEL", "visual_tags": ["Saiyan", "Son Family"]}"#)
}

#[test]
fn test_condition_shapes_agree() {
    let shapes = [
        r#"[["Tag: Saiyan", "Son Family"]]"#,
        r#"[{"tags": ["Tag: Saiyan", "Son Family"]}]"#,
        r#"[{"values": {"0": "Tag: Saiyan", "1": "Son Family"}}]"#,
        r#"[{"value": ["Tag: Saiyan", "Son Family"]}]"#,
        r#"{"0": {"0": "Tag: Saiyan", "1": "Son Family"}}"#,
    ];
    let saiyan = goku();
    let namekian =
        character(r#"{"id": "c2", "name": "Piccolo", "visual_tags": {"0": "Namekian"}}"#);

    for shape in shapes {
        let equip = item(&format!(r#"{{"name": "Badge", "conditions_data": {shape}}}"#));
        assert!(is_eligible(&saiyan, &equip), "shape {shape}");
        assert!(!is_eligible(&namekian, &equip), "shape {shape}");
    }
}

#[test]
fn test_single_string_and_original_text_groups() {
    let saiyan = goku();
    for shape in [r#"["Tag: Saiyan"]"#, r#"[{"original_text": "Tag: Saiyan"}]"#, r#"[{"value": "Saiyan"}]"#] {
        let equip = item(&format!(r#"{{"name": "Badge", "conditions_data": {shape}}}"#));
        assert!(is_eligible(&saiyan, &equip), "shape {shape}");
    }
}

#[test]
fn test_unrecognized_group_is_universal() {
    let equip = item(r#"{"name": "Odd", "conditions_data": [42, {"weird": 1}]}"#);
    assert!(is_eligible(&goku(), &equip));
}

#[test]
fn test_or_logic() {
    let equip = item(
        r#"{"name": "Either", "condition_logic": "OR", "conditions_data": [["Tag: A"], ["Tag: B"]]}"#,
    );
    let with = |tags: &str| character(&format!(r#"{{"name": "x", "visual_tags": {tags}}}"#));
    assert!(is_eligible(&with(r#"["A"]"#), &equip));
    assert!(is_eligible(&with(r#"["B"]"#), &equip));
    assert!(is_eligible(&with(r#"["A", "B"]"#), &equip));
    assert!(!is_eligible(&with(r#"["C"]"#), &equip));
}

#[test]
fn test_filtered_list_keeps_catalog_order() {
    let items: Vec<Item> = serde_json::from_str(
        r#"[
            {"id": 3, "name": "Third", "slots": [{"effect": "Critical +5%"}]},
            {"id": 1, "name": "First", "conditions_data": [["Tag: Android"]], "slots": [{"effect": "Critical +5%"}]},
            {"id": 2, "name": "Second", "slots": [{"effect": "Base Critical +5%"}]}
        ]"#,
    )
    .unwrap();
    let ctx = FilterContext {
        effects: ["Critical".to_string(), "Base Critical".to_string()].into(),
        ..Default::default()
    };
    let names: Vec<_> = filter_items(Some(&goku()), &items, &ctx)
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["Third", "Second"]);
}

#[test]
fn test_full_loadout() {
    let mut slots = EquipSlots::new();
    slots
        .equip(item(
            r#"{"id": 1, "name": "Pride", "slots": [{"effect": "Strike & Blast Attack +10%"}, {"effect": "Base Health +5 ~ 12%"}]}"#,
        ))
        .unwrap();
    slots
        .equip(item(
            r#"{"id": 2, "name": "Choice", "slots": [{"effect": "Critical +5% - OR - Damage Guard +8%"}]}"#,
        ))
        .unwrap();
    slots
        .equip(item(
            r#"{"id": 3, "name": "Bond", "slots": [{"effect": "4% to Blast Defense per 'Tag: Saiyan' battle member"}, {"effect": "Ki +1 at start of battle"}]}"#,
        ))
        .unwrap();

    let before = slots.clone();
    assert_eq!(
        slots.equip(item(r#"{"id": 1, "name": "Pride again"}"#)),
        Err(EquipError::AlreadyEquipped {
            name: "Pride again".to_string()
        })
    );
    assert_eq!(slots, before);

    slots.cycle_multiplier(2);
    slots.cycle_multiplier(2);
    let report = aggregate(&slots, Some(&goku()));
    assert_eq!(report.get(StatKey::StrikeAttack), 10.0);
    assert_eq!(report.get(StatKey::BlastAttack), 10.0);
    assert_eq!(report.get(StatKey::BaseStrikeAttack), 0.0);
    assert_eq!(report.get(StatKey::BaseHealth), 12.0);
    assert_eq!(report.get(StatKey::Critical), 5.0);
    assert_eq!(report.get(StatKey::BlastDefense), 8.0);
    assert!(report.is_conditional(StatKey::Critical));
    assert_eq!(report.other_effects.len(), 2);
    assert!(matches!(report.other_effects[0], OtherEffect::Selector { item_index: 1, .. }));

    slots.toggle_selection(1, 0);
    let report = aggregate(&slots, Some(&goku()));
    assert_eq!(report.get(StatKey::Critical), 0.0);
    assert_eq!(report.get(StatKey::DamageGuard), 8.0);
    assert!(report.is_conditional(StatKey::DamageGuard));
}

#[test]
fn test_threshold_clause() {
    let text = "20% to Blast Defense when 'Tag: Saiyan' is a battle member";
    for (multiplier, expected) in [(0, 0.0), (1, 20.0)] {
        let ctx = EffectContext {
            multiplier,
            ..Default::default()
        };
        let parsed = parse_effect(text, &ctx);
        let total: f64 = parsed
            .contributions
            .iter()
            .filter(|c| c.stat == StatKey::BlastDefense)
            .map(|c| c.value)
            .sum();
        assert_eq!(total, expected);
        assert_eq!(parsed.leftover, None);
    }
}
