//! Value objects that routes reference by GUID.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::Guid;

/// A domain that routes are created under (e.g. `cfapps.io`).
///
/// Routes hold a copy of the domain they belong to, not a live reference.
/// The zero value (empty GUID and name) stands for "not returned".
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub guid: Guid,
    pub name: String,
}

impl Domain {
    pub fn new(guid: impl Into<Guid>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }

    /// A domain known only by its identity.
    pub fn with_guid(guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.guid.is_empty() && self.name.is_empty()
    }
}

impl Entity for Domain {
    fn guid(&self) -> &Guid {
        &self.guid
    }
}

/// An application. Only the GUID matters for binding.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub guid: Guid,
    pub name: String,
}

impl Application {
    pub fn new(guid: impl Into<Guid>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }

    pub fn with_guid(guid: impl Into<Guid>) -> Self {
        Self {
            guid: guid.into(),
            name: String::new(),
        }
    }
}

impl Entity for Application {
    fn guid(&self) -> &Guid {
        &self.guid
    }
}

/// The space new routes are created in. Supplied by configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub guid: Guid,
    pub name: String,
}

impl Space {
    pub fn new(guid: impl Into<Guid>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

impl Entity for Space {
    fn guid(&self) -> &Guid {
        &self.guid
    }
}
