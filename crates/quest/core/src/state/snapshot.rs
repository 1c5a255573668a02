//! Aggregate snapshot: one character plus everything it owns.

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::state::{
    Achievement, AchievementId, CategoryId, Character, InventoryItem, ItemId, OwnerId, Task,
    TaskId, Timestamp,
};

/// In-memory state of one character aggregate: the character itself and
/// the tasks, achievements, and inventory items it exclusively owns.
///
/// The snapshot is the unit of consistency. The engine mutates it through
/// pure, synchronous operations; the surrounding service is responsible
/// for applying one event at a time per owner.
///
/// The subtask tree is kept as a parent -> children index rather than
/// back-pointers inside tasks, and inserts reject any task that would
/// become its own ancestor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateSnapshot {
    pub character: Character,
    tasks: BTreeMap<TaskId, Task>,
    achievements: BTreeMap<AchievementId, Achievement>,
    items: BTreeMap<ItemId, InventoryItem>,
    children: BTreeMap<TaskId, Vec<TaskId>>,
}

impl AggregateSnapshot {
    /// Creates an empty aggregate for a fresh character.
    pub fn new(character: Character) -> Self {
        Self {
            character,
            tasks: BTreeMap::new(),
            achievements: BTreeMap::new(),
            items: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.character.id
    }

    // ===== tasks =====

    /// Inserts a task, validating ownership, parent existence, and that
    /// the subtask tree stays acyclic.
    pub fn insert_task(&mut self, task: Task) -> Result<(), EngineError> {
        if task.owner_id != self.owner() {
            return Err(EngineError::OwnerMismatch);
        }
        if self.tasks.contains_key(&task.id) {
            return Err(EngineError::DuplicateId);
        }
        if let Some(parent) = task.parent_id {
            if !self.tasks.contains_key(&parent) {
                return Err(EngineError::ParentNotFound { parent });
            }
            if self.is_ancestor(task.id, parent) {
                return Err(EngineError::TaskCycle { task: task.id });
            }
            self.children.entry(parent).or_default().push(task.id);
        }
        self.tasks.insert(task.id, task);
        Ok(())
    }

    /// Removes a task. Its direct subtasks become root tasks.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, EngineError> {
        let task = self.tasks.remove(&id).ok_or(EngineError::TaskNotFound(id))?;
        if let Some(parent) = task.parent_id {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|child| *child != id);
            }
        }
        if let Some(orphans) = self.children.remove(&id) {
            for child in orphans {
                if let Some(t) = self.tasks.get_mut(&child) {
                    t.parent_id = None;
                }
            }
        }
        Ok(task)
    }

    /// Moves a task under a new parent (or to the root with `None`),
    /// rejecting moves that would make the task its own ancestor.
    pub fn set_parent(&mut self, id: TaskId, parent: Option<TaskId>) -> Result<(), EngineError> {
        if !self.tasks.contains_key(&id) {
            return Err(EngineError::TaskNotFound(id));
        }
        if let Some(parent) = parent {
            if !self.tasks.contains_key(&parent) {
                return Err(EngineError::ParentNotFound { parent });
            }
            if self.is_ancestor(id, parent) {
                return Err(EngineError::TaskCycle { task: id });
            }
        }
        let previous = self.tasks.get(&id).and_then(|t| t.parent_id);
        if let Some(prev) = previous {
            if let Some(siblings) = self.children.get_mut(&prev) {
                siblings.retain(|child| *child != id);
            }
        }
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(id);
        }
        if let Some(task) = self.tasks.get_mut(&id) {
            task.parent_id = parent;
        }
        Ok(())
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Direct subtasks of the given task, in insertion order.
    pub fn subtasks(&self, parent: TaskId) -> impl Iterator<Item = &Task> {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id))
    }

    /// Number of direct subtasks still open.
    pub fn open_subtasks(&self, parent: TaskId) -> usize {
        self.subtasks(parent).filter(|t| !t.is_completed).count()
    }

    /// Completed task count, optionally restricted to one category.
    pub fn completed_task_count(&self, category: Option<CategoryId>) -> u32 {
        self.tasks
            .values()
            .filter(|t| t.is_completed)
            .filter(|t| category.is_none() || t.category_id == category)
            .count() as u32
    }

    /// Open tasks past their due date.
    pub fn overdue_tasks(&self, now: Timestamp) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(move |t| t.is_overdue(now))
    }

    /// Open tasks due within the UTC day containing `now`.
    pub fn tasks_due_today(&self, now: Timestamp) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(move |t| t.is_due_today(now))
    }

    /// Largest streak carried by any task in the aggregate.
    pub fn best_streak(&self) -> u32 {
        self.tasks.values().map(|t| t.streak_count).max().unwrap_or(0)
    }

    /// True if `ancestor` is `task` itself or lies on the parent chain
    /// above `start`.
    fn is_ancestor(&self, task: TaskId, start: TaskId) -> bool {
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            if current == task {
                return true;
            }
            cursor = self.tasks.get(&current).and_then(|t| t.parent_id);
        }
        false
    }

    // ===== achievements =====

    pub fn insert_achievement(&mut self, achievement: Achievement) -> Result<(), EngineError> {
        if achievement.user_id != self.owner() {
            return Err(EngineError::OwnerMismatch);
        }
        if self.achievements.contains_key(&achievement.id) {
            return Err(EngineError::DuplicateId);
        }
        self.achievements.insert(achievement.id, achievement);
        Ok(())
    }

    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.get(&id)
    }

    pub fn achievement_mut(&mut self, id: AchievementId) -> Option<&mut Achievement> {
        self.achievements.get_mut(&id)
    }

    pub fn achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.values()
    }

    /// Ids of achievements that have not yet unlocked, in id order.
    pub fn locked_achievement_ids(&self) -> Vec<AchievementId> {
        self.achievements
            .values()
            .filter(|a| !a.is_unlocked())
            .map(|a| a.id)
            .collect()
    }

    // ===== inventory =====

    pub fn insert_item(&mut self, item: InventoryItem) -> Result<(), EngineError> {
        if item.owner_id != self.owner() {
            return Err(EngineError::OwnerMismatch);
        }
        if self.items.contains_key(&item.id) {
            return Err(EngineError::DuplicateId);
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<InventoryItem, EngineError> {
        self.items.remove(&id).ok_or(EngineError::ItemNotFound(id))
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut InventoryItem> {
        self.items.get_mut(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values().filter(|i| i.is_equipped)
    }

    /// True if any item matches rarity `>= rarity`.
    pub fn owns_item_of_rarity(&self, rarity: u32) -> bool {
        self.items.values().any(|i| i.rarity >= rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::state::{Difficulty, Priority};

    fn snapshot() -> AggregateSnapshot {
        AggregateSnapshot::new(Character::new(OwnerId(7)))
    }

    fn task(id: u64) -> Task {
        Task::new(
            TaskId(id),
            OwnerId(7),
            format!("task {id}"),
            Difficulty::Easy,
            Priority::Low,
            Timestamp::EPOCH,
            &EngineConfig::default(),
        )
    }

    #[test]
    fn rejects_foreign_owner() {
        let mut snap = snapshot();
        let mut t = task(1);
        t.owner_id = OwnerId(99);
        assert_eq!(snap.insert_task(t), Err(EngineError::OwnerMismatch));
    }

    #[test]
    fn rejects_missing_parent_and_cycles() {
        let mut snap = snapshot();
        snap.insert_task(task(1)).unwrap();
        snap.insert_task(task(2).with_parent(TaskId(1))).unwrap();

        let dangling = task(3).with_parent(TaskId(42));
        assert_eq!(
            snap.insert_task(dangling),
            Err(EngineError::ParentNotFound { parent: TaskId(42) })
        );

        // 1 <- 2 exists; moving 1 under 2 would make 1 its own ancestor.
        assert_eq!(
            snap.set_parent(TaskId(1), Some(TaskId(2))),
            Err(EngineError::TaskCycle { task: TaskId(1) })
        );
        // So would parenting a task to itself.
        assert_eq!(
            snap.set_parent(TaskId(2), Some(TaskId(2))),
            Err(EngineError::TaskCycle { task: TaskId(2) })
        );
        // A legal reparent updates both the index and the task.
        snap.insert_task(task(3)).unwrap();
        snap.set_parent(TaskId(3), Some(TaskId(2))).unwrap();
        assert_eq!(snap.task(TaskId(3)).unwrap().parent_id, Some(TaskId(2)));
        assert_eq!(snap.subtasks(TaskId(2)).count(), 1);
    }

    #[test]
    fn removal_promotes_subtasks_to_roots() {
        let mut snap = snapshot();
        snap.insert_task(task(1)).unwrap();
        snap.insert_task(task(2).with_parent(TaskId(1))).unwrap();
        snap.insert_task(task(3).with_parent(TaskId(1))).unwrap();

        snap.remove_task(TaskId(1)).unwrap();
        assert!(snap.task(TaskId(2)).unwrap().parent_id.is_none());
        assert!(snap.task(TaskId(3)).unwrap().parent_id.is_none());
        assert_eq!(snap.subtasks(TaskId(1)).count(), 0);
    }

    #[test]
    fn completed_count_honors_category_filter() {
        let mut snap = snapshot();
        let mut a = task(1).with_category(CategoryId(1));
        a.is_completed = true;
        let mut b = task(2).with_category(CategoryId(2));
        b.is_completed = true;
        let c = task(3).with_category(CategoryId(1));
        snap.insert_task(a).unwrap();
        snap.insert_task(b).unwrap();
        snap.insert_task(c).unwrap();

        assert_eq!(snap.completed_task_count(None), 2);
        assert_eq!(snap.completed_task_count(Some(CategoryId(1))), 1);
        assert_eq!(snap.completed_task_count(Some(CategoryId(3))), 0);
    }
}
