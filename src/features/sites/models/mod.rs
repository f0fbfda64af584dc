mod site;

pub use site::{Coordinate, LocationCategory, NewSite, Site, SiteUpdate};
