use std::fmt;
use std::str::FromStr;

use crate::core::error::AppError;
use crate::modules::supabase::{CHECKLIST_ITEMS_TABLE, SITES_TABLE};

/// Tables reachable through the pass-through surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Sites,
    ChecklistItems,
}

impl Resource {
    pub fn table(&self) -> &'static str {
        match self {
            Resource::Sites => SITES_TABLE,
            Resource::ChecklistItems => CHECKLIST_ITEMS_TABLE,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SITES_TABLE => Ok(Resource::Sites),
            CHECKLIST_ITEMS_TABLE => Ok(Resource::ChecklistItems),
            other => Err(AppError::NotFound(format!("Unknown resource: {}", other))),
        }
    }
}
