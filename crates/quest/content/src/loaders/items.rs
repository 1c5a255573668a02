//! Item catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use quest_core::{InventoryItem, ItemId, ItemType, OwnerId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One item definition as written in catalog files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub item_type: ItemType,
    #[serde(default = "default_one")]
    pub rarity: u32,
    #[serde(default = "default_one")]
    pub level_requirement: u32,
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
    #[serde(default)]
    pub effects: BTreeMap<String, i64>,
    #[serde(default = "default_one")]
    pub quantity: u32,
}

fn default_one() -> u32 {
    1
}

impl ItemSpec {
    /// Instantiates the definition for one owner at acquisition time.
    pub fn into_item(self, id: ItemId, owner: OwnerId, acquired_at: Timestamp) -> InventoryItem {
        let mut item = InventoryItem::new(id, owner, self.name, self.item_type, acquired_at)
            .with_rarity(self.rarity)
            .with_level_requirement(self.level_requirement)
            .with_quantity(self.quantity);
        item.description = self.description;
        item.icon_url = self.icon_url;
        item.stats = self.stats;
        item.effects = self.effects;
        item
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemSpec>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        tracing::debug!(
            path = %path.display(),
            count = catalog.items.len(),
            "loaded item catalog"
        );
        Ok(catalog.items)
    }
}
