//! Inventory rule engine: acquire, equip, unequip, consume.
//!
//! Slot exclusivity is the load-bearing invariant here: at most one
//! equipped item per slot, maintained by atomically unequipping the
//! displaced item inside the same operation. Derived stat totals are
//! recomputed from the equip set on demand and never cached.

use std::collections::BTreeMap;

use crate::engine::EngineEvent;
use crate::error::EngineError;
use crate::state::{AggregateSnapshot, EquipSlot, InventoryItem, ItemId};

/// Adds a newly acquired item to the aggregate.
///
/// Items arrive unequipped regardless of how the caller built them;
/// equipping is a separate, validated step.
pub fn acquire(
    snapshot: &mut AggregateSnapshot,
    mut item: InventoryItem,
    events: &mut Vec<EngineEvent>,
) -> Result<(), EngineError> {
    item.is_equipped = false;
    let id = item.id;
    snapshot.insert_item(item)?;
    events.push(EngineEvent::ItemAcquired { item: id });
    Ok(())
}

/// Equips an item, displacing whatever currently occupies its slot.
///
/// Fails with a requirement error when the character's level is below the
/// item's `level_requirement`; the item stays unequipped in that case.
/// Equipping an already-equipped item is a no-op.
pub fn equip(
    snapshot: &mut AggregateSnapshot,
    id: ItemId,
    events: &mut Vec<EngineEvent>,
) -> Result<(), EngineError> {
    let item = snapshot.item(id).ok_or(EngineError::ItemNotFound(id))?;
    let slot = item.equip_slot().ok_or(EngineError::NotEquippable { item: id })?;
    if snapshot.character.level < item.level_requirement {
        return Err(EngineError::LevelRequirement {
            item: id,
            required: item.level_requirement,
            level: snapshot.character.level,
        });
    }
    if item.is_equipped {
        return Ok(());
    }

    let displaced = snapshot
        .equipped_items()
        .find(|i| i.equip_slot() == Some(slot))
        .map(|i| i.id);
    if let Some(previous) = displaced {
        if let Some(prev) = snapshot.item_mut(previous) {
            prev.is_equipped = false;
        }
    }
    if let Some(target) = snapshot.item_mut(id) {
        target.is_equipped = true;
    }
    events.push(EngineEvent::ItemEquipped {
        item: id,
        replaced: displaced,
    });

    debug_assert!(slot_exclusive(snapshot));
    Ok(())
}

/// Unequips an item. Unequipping an item that is not equipped is a no-op.
pub fn unequip(
    snapshot: &mut AggregateSnapshot,
    id: ItemId,
    events: &mut Vec<EngineEvent>,
) -> Result<(), EngineError> {
    let item = snapshot.item_mut(id).ok_or(EngineError::ItemNotFound(id))?;
    if item.is_equipped {
        item.is_equipped = false;
        events.push(EngineEvent::ItemUnequipped { item: id });
    }
    debug_assert!(slot_exclusive(snapshot));
    Ok(())
}

/// Consumes `amount` units of a consumable item.
///
/// Equipment and quest/cosmetic items cannot be consumed. The item is
/// removed from the aggregate when its quantity reaches zero.
pub fn consume(
    snapshot: &mut AggregateSnapshot,
    id: ItemId,
    amount: u32,
    events: &mut Vec<EngineEvent>,
) -> Result<(), EngineError> {
    if amount == 0 {
        return Err(EngineError::ZeroConsume);
    }
    let item = snapshot.item(id).ok_or(EngineError::ItemNotFound(id))?;
    if !item.item_type.is_consumable() {
        return Err(EngineError::NotConsumable { item: id });
    }
    if amount > item.quantity {
        return Err(EngineError::InsufficientQuantity {
            item: id,
            requested: amount,
            available: item.quantity,
        });
    }

    let remaining = {
        let item = snapshot
            .item_mut(id)
            .ok_or(EngineError::ItemNotFound(id))?;
        item.quantity -= amount;
        item.quantity
    };
    if remaining == 0 {
        snapshot.remove_item(id)?;
    }
    events.push(EngineEvent::ItemConsumed {
        item: id,
        amount,
        remaining,
    });
    Ok(())
}

/// Sum of `stats` and `effects` maps across all currently equipped items.
///
/// Recomputed from scratch on every call; the equip set is the only
/// input, so there is no cached total to go stale.
pub fn equipped_totals(snapshot: &AggregateSnapshot) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for item in snapshot.equipped_items() {
        for (name, value) in item.stats.iter().chain(item.effects.iter()) {
            *totals.entry(name.clone()).or_insert(0) += value;
        }
    }
    totals
}

/// At most one equipped item per slot.
fn slot_exclusive(snapshot: &AggregateSnapshot) -> bool {
    let mut weapon = 0usize;
    let mut armor = 0usize;
    for item in snapshot.equipped_items() {
        match item.equip_slot() {
            Some(EquipSlot::Weapon) => weapon += 1,
            Some(EquipSlot::Armor) => armor += 1,
            None => return false,
        }
    }
    weapon <= 1 && armor <= 1
}
