mod checklist_item;

pub use checklist_item::{
    ChecklistItem, ChecklistItemUpdate, Condition, ConditionRow, NewChecklistItem,
};
