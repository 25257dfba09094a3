//! Node store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MenuNode, MenuNodePatch};
use crate::error::DomainError;

/// Persistence capabilities the menu service relies on.
///
/// Sibling lists are ordered by `position`, then creation time, then id.
/// `delete_cascade` must remove every transitive descendant together with the node.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuNode>, DomainError>;

    async fn list_by_parent(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError>;

    /// All nodes ordered by depth, then position.
    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError>;

    async fn insert(&self, node: MenuNode) -> Result<MenuNode, DomainError>;

    /// Returns `None` when no row with `id` exists.
    async fn update(&self, id: Uuid, patch: MenuNodePatch) -> Result<Option<MenuNode>, DomainError>;

    /// Returns `false` when no row with `id` exists.
    async fn delete_cascade(&self, id: Uuid) -> Result<bool, DomainError>;
}
