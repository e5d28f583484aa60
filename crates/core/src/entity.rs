//! References to managed infrastructure entities.

use serde::{Deserialize, Serialize};

/// Kind of managed entity a command may target.
///
/// The display form is the stable wire/instance-type label recorded on async
/// jobs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Host,
    Volume,
    Snapshot,
    VirtualMachine,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Host => "Host",
            EntityKind::Volume => "Volume",
            EntityKind::Snapshot => "Snapshot",
            EntityKind::VirtualMachine => "VirtualMachine",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference to one managed entity.
///
/// Used as the authorization subject of entity-scoped commands and as the
/// back-reference stored on async jobs. It is a reference, not an ownership
/// edge: the entity's lifecycle belongs to its manager.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
