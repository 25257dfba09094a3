// ============================================================================
// Menu Core - Menu Node Entity
// File: crates/menu-core/src/domain/menu_node.rs
// Description: Persisted menu tree node and its write models
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Menu node entity, one row of the menu table.
///
/// `depth` is derived: 0 for roots, otherwise the parent's depth plus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: String,

    pub parent_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Menu depth cannot be negative"))]
    pub depth: i32,

    #[validate(range(min = 0, message = "Menu position cannot be negative"))]
    pub position: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuNode {
    pub fn new(
        name: &str,
        parent_id: Option<Uuid>,
        depth: i32,
        position: i32,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let node = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            parent_id,
            depth,
            position,
            created_at: now,
            updated_at: now,
        };

        node.validate()?;
        Ok(node)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input for creating a menu node. Depth is never supplied by callers.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewMenu {
    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: String,

    pub parent_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Menu position cannot be negative"))]
    pub position: Option<i32>,
}

/// Partial update of a menu node as requested by a caller.
///
/// `parent_id` is tri-state: `None` leaves the parent untouched,
/// `Some(None)` moves the node to the root level, `Some(Some(id))` moves it under `id`.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateMenu {
    #[validate(length(min = 1, max = 255, message = "Menu name must be between 1 and 255 characters"))]
    pub name: Option<String>,

    pub parent_id: Option<Option<Uuid>>,

    #[validate(range(min = 0, message = "Menu position cannot be negative"))]
    pub position: Option<i32>,
}

/// Column-level partial update handed to the node store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuNodePatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
    pub depth: Option<i32>,
    pub position: Option<i32>,
}

impl MenuNodePatch {
    pub fn depth_only(depth: i32) -> Self {
        Self {
            depth: Some(depth),
            ..Default::default()
        }
    }

    /// Applies the supplied fields and bumps `updated_at`.
    pub fn apply_to(&self, node: &mut MenuNode) {
        if let Some(name) = &self.name {
            node.name = name.clone();
        }
        if let Some(parent_id) = self.parent_id {
            node.parent_id = parent_id;
        }
        if let Some(depth) = self.depth {
            node.depth = depth;
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        node.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_root_menu() {
        let menu = MenuNode::new("  Food ", None, 0, 0).unwrap();
        assert_eq!(menu.name, "Food");
        assert!(menu.is_root());
        assert_eq!(menu.created_at, menu.updated_at);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(MenuNode::new("   ", None, 0, 0).is_err());
    }

    #[test]
    fn test_negative_position_rejected() {
        assert!(MenuNode::new("Drinks", None, 0, -1).is_err());
    }

    #[test]
    fn test_patch_leaves_unspecified_fields() {
        let parent = Uuid::new_v4();
        let mut menu = MenuNode::new("Drinks", Some(parent), 1, 3).unwrap();

        MenuNodePatch {
            name: Some("Beverages".to_string()),
            ..Default::default()
        }
        .apply_to(&mut menu);

        assert_eq!(menu.name, "Beverages");
        assert_eq!(menu.parent_id, Some(parent));
        assert_eq!(menu.depth, 1);
        assert_eq!(menu.position, 3);
    }

    #[test]
    fn test_patch_moves_to_root() {
        let mut menu = MenuNode::new("Drinks", Some(Uuid::new_v4()), 1, 0).unwrap();
        let patch = MenuNodePatch {
            parent_id: Some(None),
            depth: Some(0),
            ..Default::default()
        };

        patch.apply_to(&mut menu);
        assert!(menu.is_root());
        assert_eq!(menu.depth, 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let menu = MenuNode::new("Food", None, 0, 0).unwrap();
        let json = serde_json::to_value(&menu).unwrap();
        assert!(json.get("parentId").unwrap().is_null());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["depth"], 0);
    }
}
