//! Snapshot of what the host screen is showing
//!
//! The host rebuilds this on every render or scroll. The pipeline only
//! reads it, and a chained command reuses one snapshot for all its steps.

use crate::core::types::{EntityId, EntityKind, EntityOrigin, UserId};
use serde::{Deserialize, Serialize};

/// Summary of one visible entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: EntityId,
    /// Author name for posts, sponsor name for ads, user name for profiles
    pub display_name: String,
    pub kind: EntityKind,
    /// Account that owns the entity, if any
    pub owner: Option<UserId>,
    pub origin: EntityOrigin,
}

impl EntitySummary {
    /// An organic post
    pub fn post(id: impl Into<EntityId>, author: impl Into<String>, owner: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            display_name: author.into(),
            kind: EntityKind::Post,
            owner: Some(owner.into()),
            origin: EntityOrigin::Organic,
        }
    }

    /// A sponsored post shown under the sponsor's name
    pub fn sponsored(id: impl Into<EntityId>, sponsor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: sponsor.into(),
            kind: EntityKind::Post,
            owner: None,
            origin: EntityOrigin::Sponsored,
        }
    }

    /// Whether the entity can be addressed by name
    pub fn is_addressable(&self) -> bool {
        self.origin == EntityOrigin::Organic
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner.as_ref() == Some(user)
    }
}

/// Focused entity plus the ordered list of visible entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusContext {
    pub active_entity_id: Option<EntityId>,
    pub visible: Vec<EntitySummary>,
}

impl FocusContext {
    pub fn new(active_entity_id: Option<EntityId>, visible: Vec<EntitySummary>) -> Self {
        Self {
            active_entity_id,
            visible,
        }
    }

    /// The focused entity, if it is still visible
    pub fn focused(&self) -> Option<&EntitySummary> {
        let active = self.active_entity_id.as_ref()?;
        self.visible.iter().find(|e| &e.id == active)
    }

    /// First addressable entity whose display name contains `name`
    /// (case-insensitive). List order is the only ranking.
    pub fn find_by_name(&self, name: &str) -> Option<&EntitySummary> {
        let name_lower = name.trim().to_lowercase();
        if name_lower.is_empty() {
            return None;
        }
        self.visible
            .iter()
            .filter(|e| e.is_addressable())
            .find(|e| e.display_name.to_lowercase().contains(&name_lower))
    }

    /// Display names of all visible entities, in order
    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|e| e.display_name.as_str())
    }

    /// Name of the focused entity when it is addressable
    pub fn focused_name(&self) -> Option<&str> {
        self.focused()
            .filter(|e| e.is_addressable())
            .map(|e| e.display_name.as_str())
    }
}
