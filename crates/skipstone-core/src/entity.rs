use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a simulated stone.
///
/// Picking code hands back whatever id sits under the pointer; comparing it
/// against the session's `StoneId` is the only "is this the stone?" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoneId(Uuid);

impl StoneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stone-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(StoneId::new(), StoneId::new());
    }

    #[test]
    fn copies_compare_equal() {
        let id = StoneId::new();
        let copy = id;
        assert_eq!(id, copy);
        assert_eq!(id.as_uuid(), copy.as_uuid());
        assert!(id.to_string().starts_with("stone-"));
    }
}
