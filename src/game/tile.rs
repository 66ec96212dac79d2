//! # Tiles
//!
//! Tile types, the precious stone catalogue and the capability table that
//! tells the movement rules what each tile allows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a character may do with a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// The character may stand on the tile
    Move,
    /// The interact key does something here
    Interact,
    /// The tile blocks movement
    Stop,
}

/// The 21 collectible precious stones.
///
/// Serialized by display name, which is also the key used in the
/// persistent collection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PreciousStone {
    Agate,
    Amber,
    Amethyst,
    Aventurine,
    Azurite,
    Citrine,
    Diamond,
    Emerald,
    Fluorine,
    Garnet,
    Jade,
    #[serde(rename = "Lapis lazuli")]
    LapisLazuli,
    Malachite,
    Obsidian,
    Onyx,
    Opal,
    #[serde(rename = "Rose quartz")]
    RoseQuartz,
    Ruby,
    Sapphire,
    #[serde(rename = "Tiger eye")]
    TigerEye,
    Turquoise,
}

impl PreciousStone {
    /// Every stone kind, in catalogue order.
    pub const ALL: [PreciousStone; 21] = [
        PreciousStone::Agate,
        PreciousStone::Amber,
        PreciousStone::Amethyst,
        PreciousStone::Aventurine,
        PreciousStone::Azurite,
        PreciousStone::Citrine,
        PreciousStone::Diamond,
        PreciousStone::Emerald,
        PreciousStone::Fluorine,
        PreciousStone::Garnet,
        PreciousStone::Jade,
        PreciousStone::LapisLazuli,
        PreciousStone::Malachite,
        PreciousStone::Obsidian,
        PreciousStone::Onyx,
        PreciousStone::Opal,
        PreciousStone::RoseQuartz,
        PreciousStone::Ruby,
        PreciousStone::Sapphire,
        PreciousStone::TigerEye,
        PreciousStone::Turquoise,
    ];

    /// Two-letter map code.
    pub fn code(self) -> &'static str {
        match self {
            PreciousStone::Agate => "Ag",
            PreciousStone::Amber => "Am",
            PreciousStone::Amethyst => "Ay",
            PreciousStone::Aventurine => "Av",
            PreciousStone::Azurite => "Az",
            PreciousStone::Citrine => "Ci",
            PreciousStone::Diamond => "Di",
            PreciousStone::Emerald => "Em",
            PreciousStone::Fluorine => "Fl",
            PreciousStone::Garnet => "Ga",
            PreciousStone::Jade => "Ja",
            PreciousStone::LapisLazuli => "Ll",
            PreciousStone::Malachite => "Ma",
            PreciousStone::Obsidian => "Ob",
            PreciousStone::Onyx => "On",
            PreciousStone::Opal => "Op",
            PreciousStone::RoseQuartz => "Qu",
            PreciousStone::Ruby => "Ru",
            PreciousStone::Sapphire => "Sa",
            PreciousStone::TigerEye => "Ti",
            PreciousStone::Turquoise => "Tu",
        }
    }

    /// Looks up a stone by its two-letter map code.
    pub fn from_code(code: &str) -> Option<PreciousStone> {
        Self::ALL.iter().copied().find(|stone| stone.code() == code)
    }

    /// Human readable name, as stored in the collection record.
    pub fn display_name(self) -> &'static str {
        match self {
            PreciousStone::Agate => "Agate",
            PreciousStone::Amber => "Amber",
            PreciousStone::Amethyst => "Amethyst",
            PreciousStone::Aventurine => "Aventurine",
            PreciousStone::Azurite => "Azurite",
            PreciousStone::Citrine => "Citrine",
            PreciousStone::Diamond => "Diamond",
            PreciousStone::Emerald => "Emerald",
            PreciousStone::Fluorine => "Fluorine",
            PreciousStone::Garnet => "Garnet",
            PreciousStone::Jade => "Jade",
            PreciousStone::LapisLazuli => "Lapis lazuli",
            PreciousStone::Malachite => "Malachite",
            PreciousStone::Obsidian => "Obsidian",
            PreciousStone::Onyx => "Onyx",
            PreciousStone::Opal => "Opal",
            PreciousStone::RoseQuartz => "Rose quartz",
            PreciousStone::Ruby => "Ruby",
            PreciousStone::Sapphire => "Sapphire",
            PreciousStone::TigerEye => "Tiger eye",
            PreciousStone::Turquoise => "Turquoise",
        }
    }
}

impl fmt::Display for PreciousStone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The content of one world tile.
///
/// # Examples
///
/// ```
/// use world_explorer::{Capability, TileType};
///
/// assert!(TileType::Ground.allows(Capability::Move));
/// assert!(!TileType::Rock.allows(Capability::Move));
/// assert_eq!(TileType::from_code("b"), Some(TileType::Beacon { active: true }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Ground,
    Rock,
    Crystal,
    Stone(PreciousStone),
    Beacon { active: bool },
    /// Unexplored space outside every generated room
    Blank,
}

const MOVE_ONLY: &[Capability] = &[Capability::Move];
const PICKUP: &[Capability] = &[Capability::Interact, Capability::Move];
const SOLID: &[Capability] = &[Capability::Stop];
const DROP_OFF: &[Capability] = &[Capability::Interact, Capability::Stop];

impl TileType {
    /// The capability set of this tile.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            TileType::Ground => MOVE_ONLY,
            TileType::Crystal | TileType::Stone(_) => PICKUP,
            TileType::Rock | TileType::Blank => SOLID,
            TileType::Beacon { .. } => DROP_OFF,
        }
    }

    /// Whether this tile grants the given capability.
    pub fn allows(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether the character may stand on this tile.
    pub fn is_walkable(self) -> bool {
        self.allows(Capability::Move)
    }

    /// Whether the tile can be collected into the inventory.
    pub fn is_resource(self) -> bool {
        matches!(self, TileType::Crystal | TileType::Stone(_))
    }

    /// Map text code of the tile.
    pub fn code(self) -> &'static str {
        match self {
            TileType::Ground => "G",
            TileType::Rock => "R",
            TileType::Crystal => "C",
            TileType::Beacon { active: true } => "b",
            TileType::Beacon { active: false } => "B",
            TileType::Blank => "O",
            TileType::Stone(stone) => stone.code(),
        }
    }

    /// Parses a map text code.
    pub fn from_code(code: &str) -> Option<TileType> {
        match code {
            "G" => Some(TileType::Ground),
            "R" => Some(TileType::Rock),
            "C" => Some(TileType::Crystal),
            "b" => Some(TileType::Beacon { active: true }),
            "B" => Some(TileType::Beacon { active: false }),
            "O" => Some(TileType::Blank),
            other => PreciousStone::from_code(other).map(TileType::Stone),
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_capability_table() {
        assert_eq!(TileType::Ground.capabilities(), &[Capability::Move]);
        assert!(TileType::Crystal.allows(Capability::Interact));
        assert!(TileType::Crystal.allows(Capability::Move));
        assert!(TileType::Rock.allows(Capability::Stop));
        assert!(TileType::Blank.allows(Capability::Stop));
        assert!(!TileType::Blank.allows(Capability::Interact));

        for active in [true, false] {
            let beacon = TileType::Beacon { active };
            assert!(beacon.allows(Capability::Interact));
            assert!(!beacon.is_walkable());
        }

        for stone in PreciousStone::ALL {
            assert!(TileType::Stone(stone).allows(Capability::Interact));
            assert!(TileType::Stone(stone).is_walkable());
        }
    }

    #[test]
    fn test_stone_codes_are_unique() {
        let codes: HashSet<_> = PreciousStone::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes.len(), PreciousStone::ALL.len());

        for stone in PreciousStone::ALL {
            assert_eq!(PreciousStone::from_code(stone.code()), Some(stone));
            assert_eq!(TileType::from_code(stone.code()), Some(TileType::Stone(stone)));
        }
    }

    #[test]
    fn test_stone_serializes_by_display_name() {
        let json = serde_json::to_string(&PreciousStone::LapisLazuli).unwrap();
        assert_eq!(json, "\"Lapis lazuli\"");
        assert_eq!(PreciousStone::TigerEye.to_string(), "Tiger eye");
        assert_eq!(PreciousStone::Ruby.display_name(), "Ruby");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(TileType::from_code("Zz"), None);
        assert_eq!(TileType::from_code(""), None);
    }
}
