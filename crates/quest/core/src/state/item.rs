//! Inventory item entity and equip-slot derivation.

use std::collections::BTreeMap;

use crate::state::{ItemId, OwnerId, Timestamp};

/// Kind of an inventory item.
///
/// The kind determines whether an item is equipment (occupies a slot),
/// consumable (quantity decrements on use), or neither.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemType {
    Weapon,
    Armor,
    Potion,
    Scroll,
    QuestItem,
    Cosmetic,
}

impl ItemType {
    /// The equip slot this item kind occupies, if it is equippable at all.
    pub const fn equip_slot(self) -> Option<EquipSlot> {
        match self {
            Self::Weapon => Some(EquipSlot::Weapon),
            Self::Armor => Some(EquipSlot::Armor),
            Self::Potion | Self::Scroll | Self::QuestItem | Self::Cosmetic => None,
        }
    }

    /// True for items whose quantity decrements on use.
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Potion | Self::Scroll)
    }
}

/// Equip category admitting at most one equipped item at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// An item owned by one character.
///
/// Stats and effects are named numeric modifiers; they are summed across
/// the equip set on demand rather than cached on the character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub acquired_at: Timestamp,
    pub item_type: ItemType,
    /// Rarity on an ordered integer scale (1 = common).
    pub rarity: u32,
    pub level_requirement: u32,
    pub stats: BTreeMap<String, i64>,
    pub effects: BTreeMap<String, i64>,
    pub quantity: u32,
    pub is_equipped: bool,
    pub owner_id: OwnerId,
}

impl InventoryItem {
    pub fn new(
        id: ItemId,
        owner_id: OwnerId,
        name: impl Into<String>,
        item_type: ItemType,
        acquired_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            icon_url: None,
            acquired_at,
            item_type,
            rarity: 1,
            level_requirement: 1,
            stats: BTreeMap::new(),
            effects: BTreeMap::new(),
            quantity: 1,
            is_equipped: false,
            owner_id,
        }
    }

    /// Sets the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: u32) -> Self {
        self.rarity = rarity;
        self
    }

    /// Sets the level requirement (builder pattern).
    #[must_use]
    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    /// Sets the starting quantity (builder pattern).
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Adds a named stat modifier (builder pattern).
    #[must_use]
    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        self.stats.insert(name.into(), value);
        self
    }

    /// Adds a named effect modifier (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, name: impl Into<String>, value: i64) -> Self {
        self.effects.insert(name.into(), value);
        self
    }

    pub fn equip_slot(&self) -> Option<EquipSlot> {
        self.item_type.equip_slot()
    }
}
