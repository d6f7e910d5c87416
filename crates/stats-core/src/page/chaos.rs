//! Chaos / moveset data (`{timeframe}/chaos/{format}.json`)
//!
//! The raw JSON keys its nested maps with display names ("Raw count",
//! "Checks and Counters", ...). [`map_chaos_data`] turns that shape into
//! [`Chaos`], decomposing spread keys into [`Spread`] values on the way.
//!
//! Spreads keep their source order. The name-keyed maps (entities, moves,
//! abilities, ...) are sorted by key.

use crate::convert::convert_number;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const SPREAD_DELIMITER: char = '/';

/// (De)serialize a JSON object as a list of entries in document order
mod ordered_entries {
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, T>(entries: &Vec<(String, T)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_map(entries.iter().map(|(key, value)| (key, value)))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Vec<(String, T)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Chaos JSON as published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChaos {
    pub info: RawChaosInfo,
    pub data: BTreeMap<String, RawEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChaosInfo {
    #[serde(rename = "team type")]
    pub team_type: Option<String>,
    pub cutoff: f64,
    #[serde(rename = "cutoff deviation")]
    pub cutoff_deviation: f64,
    pub metagame: String,
    #[serde(rename = "number of battles")]
    pub number_of_battles: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "Moves")]
    pub moves: BTreeMap<String, f64>,
    #[serde(rename = "Checks and Counters")]
    pub checks_and_counters: BTreeMap<String, [f64; 3]>,
    #[serde(rename = "Abilities")]
    pub abilities: BTreeMap<String, f64>,
    #[serde(rename = "Teammates")]
    pub teammates: BTreeMap<String, f64>,
    pub usage: f64,
    #[serde(rename = "Items")]
    pub items: BTreeMap<String, f64>,
    #[serde(rename = "Raw count")]
    pub raw_count: i64,
    /// In source order
    #[serde(rename = "Spreads", with = "ordered_entries")]
    pub spreads: Vec<(String, f64)>,
    #[serde(rename = "Happiness", default)]
    pub happiness: BTreeMap<String, f64>,
    #[serde(rename = "Viability Ceiling")]
    pub viability_ceiling: [f64; 4],
}

/// Nature plus the six stat investments of one spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub nature: String,
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub spa: f64,
    pub spd: f64,
    pub spe: f64,
}

impl Spread {
    /// Decompose a `Nature/hp/atk/def/spa/spd/spe` key.
    ///
    /// Never fails: segment 0 is the nature, a missing stat segment is NaN and
    /// the others go through [`convert_number`]. Segments past the seventh are
    /// ignored.
    pub fn from_key(key: &str) -> Self {
        let split: Vec<&str> = key.split(SPREAD_DELIMITER).collect();
        let stat = |i: usize| split.get(i).map_or(f64::NAN, |s| convert_number(s));

        Spread {
            nature: split[0].to_string(),
            hp: stat(1),
            atk: stat(2),
            def: stat(3),
            spa: stat(4),
            spd: stat(5),
            spe: stat(6),
        }
    }
}

impl From<&str> for Spread {
    fn from(key: &str) -> Self {
        Spread::from_key(key)
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}/{}",
            self.nature, self.hp, self.atk, self.def, self.spa, self.spd, self.spe
        )
    }
}

/// Chaos data with normalized keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chaos {
    pub info: ChaosInfo,
    /// Per-entity statistics keyed by entity name
    pub data: BTreeMap<String, EntityStats>,
}

impl Chaos {
    /// Look up one entity by name
    pub fn entity(&self, name: &str) -> Option<&EntityStats> {
        self.data.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosInfo {
    pub team_type: Option<String>,
    pub cutoff: f64,
    pub cutoff_deviation: f64,
    pub metagame: String,
    pub number_of_battles: i64,
}

/// Aggregate statistics for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    pub usage: f64,
    pub raw_count: i64,
    pub moves: BTreeMap<String, f64>,
    pub abilities: BTreeMap<String, f64>,
    pub items: BTreeMap<String, f64>,
    /// Spread and its weight
    pub spreads: Vec<(Spread, f64)>,
    /// Read from the raw `Spreads` keys, not from `Happiness`
    pub happiness: Vec<(f64, f64)>,
    pub teammates: BTreeMap<String, f64>,
    pub checks_and_counters: BTreeMap<String, [f64; 3]>,
    pub viability_ceiling: [f64; 4],
}

impl EntityStats {
    /// Weight of one spread, if present
    pub fn spread_weight(&self, spread: &Spread) -> Option<f64> {
        self.spreads
            .iter()
            .find(|(s, _)| s == spread)
            .map(|(_, weight)| *weight)
    }
}

fn map_entity(raw: RawEntity) -> EntityStats {
    let spreads = raw
        .spreads
        .iter()
        .map(|(key, weight)| (Spread::from_key(key), *weight))
        .collect();

    // Keys are spread strings, so these come out as NaN. Kept as published.
    let happiness = raw
        .spreads
        .iter()
        .map(|(key, weight)| (convert_number(key), *weight))
        .collect();

    EntityStats {
        usage: raw.usage,
        raw_count: raw.raw_count,
        moves: raw.moves,
        abilities: raw.abilities,
        items: raw.items,
        spreads,
        happiness,
        teammates: raw.teammates,
        checks_and_counters: raw.checks_and_counters,
        viability_ceiling: raw.viability_ceiling,
    }
}

/// Restructure raw chaos JSON into [`Chaos`]
pub fn map_chaos_data(raw: RawChaos) -> Chaos {
    let info = ChaosInfo {
        team_type: raw.info.team_type,
        cutoff: raw.info.cutoff,
        cutoff_deviation: raw.info.cutoff_deviation,
        metagame: raw.info.metagame,
        number_of_battles: raw.info.number_of_battles,
    };

    let data: BTreeMap<String, EntityStats> = raw
        .data
        .into_iter()
        .map(|(name, entity)| (name, map_entity(entity)))
        .collect();

    tracing::debug!(metagame = %info.metagame, entities = data.len(), "mapped chaos data");

    Chaos { info, data }
}

impl From<RawChaos> for Chaos {
    fn from(raw: RawChaos) -> Self {
        map_chaos_data(raw)
    }
}

/// Parse a chaos JSON body
pub fn parse_chaos_page(text: &str) -> Result<Chaos> {
    let raw: RawChaos = serde_json::from_str(text)?;
    Ok(map_chaos_data(raw))
}
