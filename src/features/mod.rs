pub mod checklists;
pub mod dashboard;
pub mod map;
pub mod proxy;
pub mod sites;
