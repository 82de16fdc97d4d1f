//! Parsed output records.

use crate::coordsys::CoordSystem;
use crate::decode::ParsedField;
use crate::properties::Properties;

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub region_type: &'static str,
    pub system: CoordSystem,
    pub fields: Vec<ParsedField>,
    pub exclude: bool,
    pub properties: Properties,
}

impl Region {
    pub fn new(region_type: &'static str, system: CoordSystem, fields: Vec<ParsedField>) -> Self {
        Region {
            region_type,
            system,
            fields,
            exclude: false,
            properties: Properties::default(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.properties.tags
    }
}

/// Regions chained with the `||` continuation marker.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRegion {
    pub members: Vec<Region>,
}

impl CompositeRegion {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One item of the parse output, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Region(Region),
    Composite(CompositeRegion),
}

impl Entry {
    pub fn as_region(&self) -> Option<&Region> {
        match self {
            Entry::Region(region) => Some(region),
            Entry::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeRegion> {
        match self {
            Entry::Composite(composite) => Some(composite),
            Entry::Region(_) => None,
        }
    }

    /// The regions this entry holds, one for a plain region.
    pub fn regions(&self) -> &[Region] {
        match self {
            Entry::Region(region) => std::slice::from_ref(region),
            Entry::Composite(composite) => &composite.members,
        }
    }
}
