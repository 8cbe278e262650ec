//! Canonical stat keys and the aggregated stat vector

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Number of canonical stats
pub const STAT_COUNT: usize = 17;

/// The 17 stat categories tracked by the aggregator.
///
/// Declaration order matters: qualified (`Base ...`) keys come before their
/// unqualified counterparts so text scanning consumes the longer phrase first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKey {
    BaseStrikeAttack,
    BaseBlastAttack,
    StrikeAttack,
    BlastAttack,
    InflictedDamage,
    SpecialMoveDamage,
    UltimateDamage,
    BaseStrikeDefense,
    BaseBlastDefense,
    StrikeDefense,
    BlastDefense,
    HealthRestoration,
    BaseHealth,
    DamageGuard,
    BaseKiRecovery,
    BaseCritical,
    Critical,
}

impl StatKey {
    /// All keys in scanning order
    pub const ALL: [StatKey; STAT_COUNT] = [
        Self::BaseStrikeAttack,
        Self::BaseBlastAttack,
        Self::StrikeAttack,
        Self::BlastAttack,
        Self::InflictedDamage,
        Self::SpecialMoveDamage,
        Self::UltimateDamage,
        Self::BaseStrikeDefense,
        Self::BaseBlastDefense,
        Self::StrikeDefense,
        Self::BlastDefense,
        Self::HealthRestoration,
        Self::BaseHealth,
        Self::DamageGuard,
        Self::BaseKiRecovery,
        Self::BaseCritical,
        Self::Critical,
    ];

    /// Canonical display name, as it appears in effect text
    pub fn name(self) -> &'static str {
        match self {
            Self::BaseStrikeAttack => "Base Strike Attack",
            Self::BaseBlastAttack => "Base Blast Attack",
            Self::StrikeAttack => "Strike Attack",
            Self::BlastAttack => "Blast Attack",
            Self::InflictedDamage => "Inflicted Damage",
            Self::SpecialMoveDamage => "Special Move Damage",
            Self::UltimateDamage => "Ultimate Damage",
            Self::BaseStrikeDefense => "Base Strike Defense",
            Self::BaseBlastDefense => "Base Blast Defense",
            Self::StrikeDefense => "Strike Defense",
            Self::BlastDefense => "Blast Defense",
            Self::HealthRestoration => "Health Restoration",
            Self::BaseHealth => "Base Health",
            Self::DamageGuard => "Damage Guard",
            Self::BaseKiRecovery => "Base Ki Recovery",
            Self::BaseCritical => "Base Critical",
            Self::Critical => "Critical",
        }
    }

    /// Whether the key carries the `Base ` qualifier
    pub fn is_base(self) -> bool {
        self.name().starts_with("Base ")
    }

    /// Name without the `Base ` qualifier
    pub fn unqualified_name(self) -> &'static str {
        let name = self.name();
        name.strip_prefix("Base ").unwrap_or(name)
    }

    /// Dense index into a [`StatVector`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a key up by its canonical name (exact match)
    pub fn from_name(name: &str) -> Option<StatKey> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a stat name outside the canonical set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stat: {0}")]
pub struct UnknownStatKey(pub String);

impl FromStr for StatKey {
    type Err = UnknownStatKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| UnknownStatKey(s.to_string()))
    }
}

/// Accumulated percentage per canonical stat. Always holds all 17 keys.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatVector {
    values: [f64; STAT_COUNT],
}

impl StatVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to a stat. Non-finite deltas are dropped so the vector
    /// never holds NaN.
    pub fn add(&mut self, key: StatKey, delta: f64) {
        if delta.is_finite() {
            self.values[key.index()] += delta;
        }
    }

    pub fn get(&self, key: StatKey) -> f64 {
        self.values[key.index()]
    }

    /// `(key, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        StatKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }

    /// Keys with a non-zero total
    pub fn nonzero(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.iter().filter(|(_, v)| *v != 0.0)
    }
}

impl Index<StatKey> for StatVector {
    type Output = f64;

    fn index(&self, key: StatKey) -> &f64 {
        &self.values[key.index()]
    }
}

impl Serialize for StatVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STAT_COUNT))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.name(), &value)?;
        }
        map.end()
    }
}

/// Per-stat boolean flags, used to mark stats fed by a multi-choice effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatFlags {
    flags: [bool; STAT_COUNT],
}

impl StatFlags {
    pub fn set(&mut self, key: StatKey) {
        self.flags[key.index()] = true;
    }

    pub fn is_set(&self, key: StatKey) -> bool {
        self.flags[key.index()]
    }

    /// Keys whose flag is set, in canonical order
    pub fn keys(&self) -> impl Iterator<Item = StatKey> + '_ {
        StatKey::ALL.into_iter().filter(|key| self.is_set(*key))
    }
}

impl Index<StatKey> for StatFlags {
    type Output = bool;

    fn index(&self, key: StatKey) -> &bool {
        &self.flags[key.index()]
    }
}

impl IndexMut<StatKey> for StatFlags {
    fn index_mut(&mut self, key: StatKey) -> &mut bool {
        &mut self.flags[key.index()]
    }
}

impl Serialize for StatFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STAT_COUNT))?;
        for key in StatKey::ALL {
            map.serialize_entry(key.name(), &self.is_set(key))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_count() {
        assert_eq!(StatKey::ALL.len(), STAT_COUNT);
        for (i, key) in StatKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_base_qualifier() {
        assert!(StatKey::BaseHealth.is_base());
        assert!(!StatKey::HealthRestoration.is_base());
        assert_eq!(StatKey::BaseKiRecovery.unqualified_name(), "Ki Recovery");
        assert_eq!(StatKey::Critical.unqualified_name(), "Critical");
    }

    #[test]
    fn test_qualified_keys_scan_first() {
        let pos = |k: StatKey| StatKey::ALL.iter().position(|x| *x == k).unwrap();
        assert!(pos(StatKey::BaseStrikeAttack) < pos(StatKey::StrikeAttack));
        assert!(pos(StatKey::BaseBlastDefense) < pos(StatKey::BlastDefense));
        assert!(pos(StatKey::BaseCritical) < pos(StatKey::Critical));
    }

    #[test]
    fn test_from_name_roundtrip() {
        for key in StatKey::ALL {
            assert_eq!(key.name().parse::<StatKey>(), Ok(key));
        }
        assert!("Speed".parse::<StatKey>().is_err());
    }

    #[test]
    fn test_vector_never_nan() {
        let mut v = StatVector::new();
        v.add(StatKey::Critical, 5.0);
        v.add(StatKey::Critical, f64::NAN);
        v.add(StatKey::Critical, f64::INFINITY);
        assert_eq!(v[StatKey::Critical], 5.0);
        assert_eq!(v.iter().count(), STAT_COUNT);
    }

    #[test]
    fn test_vector_serializes_all_keys() {
        let mut v = StatVector::new();
        v.add(StatKey::BaseHealth, 12.0);
        let json = serde_json::to_value(v).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), STAT_COUNT);
        assert_eq!(map["Base Health"], 12.0);
        assert_eq!(map["Critical"], 0.0);
    }

    #[test]
    fn test_flags() {
        let mut flags = StatFlags::default();
        flags.set(StatKey::DamageGuard);
        assert!(flags[StatKey::DamageGuard]);
        assert_eq!(flags.keys().collect::<Vec<_>>(), vec![StatKey::DamageGuard]);
    }
}
