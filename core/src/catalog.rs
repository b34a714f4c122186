use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable piece identifier, 1-based in catalog load order. The decimal
/// rendering is the layout-string token for an occupied slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PieceId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<u32>().map(PieceId)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    Gold,
    Purple,
    Blue,
}

pub const QUALITY_DISPLAY_ORDER: [Quality; 3] = [Quality::Gold, Quality::Purple, Quality::Blue];

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Gold => "gold",
            Quality::Purple => "purple",
            Quality::Blue => "blue",
        };
        f.pad(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackType {
    Internal,
    External,
    NoAttack,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttackType::Internal => "internal",
            AttackType::External => "external",
            AttackType::NoAttack => "no-attack",
        };
        f.pad(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeType {
    Single,
    Area,
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RangeType::Single => "single",
            RangeType::Area => "area",
        };
        f.pad(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilityType {
    ShieldBreak,
    Control,
    Buff,
    Dispel,
    Core,
    Coin,
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UtilityType::ShieldBreak => "shield-break",
            UtilityType::Control => "control",
            UtilityType::Buff => "buff",
            UtilityType::Dispel => "dispel",
            UtilityType::Core => "core",
            UtilityType::Coin => "coin",
        };
        f.pad(label)
    }
}

/// Identity of a piece as carried by board slots and drag sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceRef {
    pub id: PieceId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PieceRecord {
    pub name: String,
    pub quality: Quality,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub attack: Option<AttackType>,
    #[serde(default)]
    pub range: Option<RangeType>,
    #[serde(default)]
    pub utility: Option<UtilityType>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynergyRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_count: usize,
    pub pieces: Vec<String>,
}

/// Source tables for a catalog. Record order defines piece ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogData {
    pub pieces: Vec<PieceRecord>,
    pub synergies: Vec<SynergyRecord>,
}

impl CatalogData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Clone, Debug)]
pub struct Piece {
    pub id: PieceId,
    pub name: String,
    pub quality: Quality,
    pub skill: String,
    /// Synergy ids this piece contributes to, in synergy declaration order.
    pub synergies: Vec<String>,
    pub attack: Option<AttackType>,
    pub range: Option<RangeType>,
    pub utility: Option<UtilityType>,
}

impl Piece {
    pub fn piece_ref(&self) -> PieceRef {
        PieceRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Synergy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required_count: usize,
    /// Declared member names, order preserved. May exceed `required_count`;
    /// names that fail catalog resolution stay listed (they still raise the
    /// maxed threshold) but are never indexed or auto-filled.
    pub members: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogWarning {
    #[error("synergy \"{synergy}\" references unknown piece \"{piece}\"")]
    UnknownPieceReference { synergy: String, piece: String },
}

/// Conjunctive classification filter; unset categories match everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub attack: Option<AttackType>,
    pub range: Option<RangeType>,
    pub utility: Option<UtilityType>,
}

impl TagFilter {
    pub fn is_empty(&self) -> bool {
        self.attack.is_none() && self.range.is_none() && self.utility.is_none()
    }

    pub fn matches(&self, piece: &Piece) -> bool {
        if let Some(attack) = self.attack {
            if piece.attack != Some(attack) {
                return false;
            }
        }
        if let Some(range) = self.range {
            if piece.range != Some(range) {
                return false;
            }
        }
        if let Some(utility) = self.utility {
            if piece.utility != Some(utility) {
                return false;
            }
        }
        true
    }
}

/// Read-only piece and synergy registry, indexed once at construction.
#[derive(Clone, Debug)]
pub struct Catalog {
    pieces: Vec<Piece>,
    synergies: Vec<Synergy>,
    by_id: HashMap<PieceId, usize>,
    by_name: HashMap<String, usize>,
    warnings: Vec<CatalogWarning>,
}

impl Catalog {
    pub fn from_data(data: CatalogData) -> Self {
        Self::new(data.pieces, data.synergies)
    }

    pub fn new(piece_records: Vec<PieceRecord>, synergy_records: Vec<SynergyRecord>) -> Self {
        let known: HashSet<&str> = piece_records
            .iter()
            .map(|record| record.name.as_str())
            .collect();

        let mut warnings = Vec::new();
        let mut memberships: HashMap<String, Vec<String>> = HashMap::new();
        for record in &synergy_records {
            for member in &record.pieces {
                if known.contains(member.as_str()) {
                    memberships
                        .entry(member.clone())
                        .or_default()
                        .push(record.id.clone());
                } else {
                    warnings.push(CatalogWarning::UnknownPieceReference {
                        synergy: record.name.clone(),
                        piece: member.clone(),
                    });
                }
            }
        }

        let pieces: Vec<Piece> = piece_records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let synergies = memberships.remove(&record.name).unwrap_or_default();
                Piece {
                    id: PieceId(index as u32 + 1),
                    name: record.name,
                    quality: record.quality,
                    skill: record.skill,
                    synergies,
                    attack: record.attack,
                    range: record.range,
                    utility: record.utility,
                }
            })
            .collect();

        let synergies: Vec<Synergy> = synergy_records
            .into_iter()
            .map(|record| Synergy {
                id: record.id,
                name: record.name,
                description: record.description,
                required_count: record.required_count,
                members: record.pieces,
            })
            .collect();

        let mut by_id = HashMap::with_capacity(pieces.len());
        let mut by_name = HashMap::with_capacity(pieces.len());
        for (index, piece) in pieces.iter().enumerate() {
            by_id.insert(piece.id, index);
            by_name.insert(piece.name.clone(), index);
        }

        Self {
            pieces,
            synergies,
            by_id,
            by_name,
            warnings,
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.by_id.get(&id).map(|index| &self.pieces[*index])
    }

    pub fn piece_by_name(&self, name: &str) -> Option<&Piece> {
        self.by_name.get(name).map(|index| &self.pieces[*index])
    }

    pub fn synergy(&self, id: &str) -> Option<&Synergy> {
        let trimmed = id.trim();
        self.synergies.iter().find(|synergy| synergy.id == trimmed)
    }

    pub fn synergies_for(&self, piece_name: &str) -> &[String] {
        self.piece_by_name(piece_name)
            .map(|piece| piece.synergies.as_slice())
            .unwrap_or(&[])
    }

    pub fn pieces_with_quality(&self, quality: Quality) -> Vec<&Piece> {
        self.pieces
            .iter()
            .filter(|piece| piece.quality == quality)
            .collect()
    }

    pub fn filter_pieces(&self, filter: &TagFilter) -> Vec<&Piece> {
        self.pieces
            .iter()
            .filter(|piece| filter.matches(piece))
            .collect()
    }
}

/// List-panel ordering: primary first-synergy id (synergy-less pieces last),
/// secondary piece name.
pub fn sort_for_display(pieces: &mut [&Piece]) {
    pieces.sort_by(|a, b| {
        let key_a = a.synergies.first().map(String::as_str);
        let key_b = b.synergies.first().map(String::as_str);
        match (key_a, key_b) {
            (Some(syn_a), Some(syn_b)) => syn_a.cmp(syn_b).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    });
}
