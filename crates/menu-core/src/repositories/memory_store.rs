// ============================================================================
// Menu Core - In-Memory Node Store
// File: crates/menu-core/src/repositories/memory_store.rs
// ============================================================================
//! Process-local `NodeStore` used by tests and the `memory` backend.
//!
//! Mirrors the constraints of the SQL schema: parent references must exist
//! and deleting a node removes its whole subtree.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{MenuNode, MenuNodePatch};
use crate::error::DomainError;
use crate::repositories::NodeStore;

#[derive(Debug, Default)]
pub struct InMemoryNodeStore {
    nodes: RwLock<HashMap<Uuid, MenuNode>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

fn sibling_order(a: &MenuNode, b: &MenuNode) -> Ordering {
    a.position
        .cmp(&b.position)
        .then(a.created_at.cmp(&b.created_at))
        .then(a.id.cmp(&b.id))
}

/// A parent removed after the caller resolved it surfaces as that parent not found.
fn missing_parent(parent_id: Uuid) -> DomainError {
    debug!("Parent menu {} is gone; rejecting write", parent_id);
    DomainError::MenuNotFound(parent_id)
}

#[async_trait]
impl NodeStore for InMemoryNodeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuNode>, DomainError> {
        Ok(self.nodes.read().await.get(&id).cloned())
    }

    async fn list_by_parent(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError> {
        let nodes = self.nodes.read().await;
        let mut siblings: Vec<MenuNode> = nodes
            .values()
            .filter(|n| n.parent_id == parent_id)
            .cloned()
            .collect();
        siblings.sort_by(sibling_order);
        Ok(siblings)
    }

    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError> {
        let nodes = self.nodes.read().await;
        let mut all: Vec<MenuNode> = nodes.values().cloned().collect();
        all.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| sibling_order(a, b)));
        Ok(all)
    }

    async fn insert(&self, node: MenuNode) -> Result<MenuNode, DomainError> {
        let mut nodes = self.nodes.write().await;
        if nodes.contains_key(&node.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate key: menu {} already exists",
                node.id
            )));
        }
        if let Some(parent_id) = node.parent_id {
            if !nodes.contains_key(&parent_id) {
                return Err(missing_parent(parent_id));
            }
        }

        nodes.insert(node.id, node.clone());
        Ok(node)
    }

    async fn update(&self, id: Uuid, patch: MenuNodePatch) -> Result<Option<MenuNode>, DomainError> {
        let mut nodes = self.nodes.write().await;
        if let Some(Some(parent_id)) = patch.parent_id {
            if !nodes.contains_key(&parent_id) {
                return Err(missing_parent(parent_id));
            }
        }

        Ok(nodes.get_mut(&id).map(|node| {
            patch.apply_to(node);
            node.clone()
        }))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut nodes = self.nodes.write().await;
        if nodes.remove(&id).is_none() {
            return Ok(false);
        }

        // Sweep orphans until none remain; each pass removes one more generation.
        let mut removed = vec![id];
        while !removed.is_empty() {
            let orphans: Vec<Uuid> = nodes
                .values()
                .filter(|n| n.parent_id.is_some_and(|p| removed.contains(&p)))
                .map(|n| n.id)
                .collect();
            for orphan in &orphans {
                nodes.remove(orphan);
            }
            debug!("Cascade removed {} menus below {}", orphans.len(), id);
            removed = orphans;
        }

        Ok(true)
    }
}
