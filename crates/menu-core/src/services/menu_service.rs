// ============================================================================
// Menu Core - Menu Tree Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Hierarchy maintenance over a `NodeStore`: depth and position assignment,
//! cycle prevention, and bounded-depth tree projections.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use menu_shared::config::MenuSettings;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{ChildIndex, Children, MenuNode, MenuNodePatch, MenuTree, NewMenu, UpdateMenu};
use crate::error::DomainError;
use crate::repositories::NodeStore;

/// Menu tree manager. Owns every hierarchy invariant; the store only persists rows.
pub struct MenuService {
    store: Arc<dyn NodeStore>,
    settings: MenuSettings,
}

impl MenuService {
    pub fn new(store: Arc<dyn NodeStore>, settings: MenuSettings) -> Self {
        Self { store, settings }
    }

    /// Round-trips to the store; used by readiness probes.
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.store.list_by_parent(None).await.map(|_| ())
    }

    /// Every menu ordered by depth then position, each with its parent and
    /// `levels` generations of children (default `list_all_depth`).
    pub async fn list_all(&self, levels: Option<u32>) -> Result<Vec<MenuTree>, DomainError> {
        let levels = self.check_levels(levels.unwrap_or(self.settings.list_all_depth))?;
        let nodes = self.store.list_all().await?;

        let index = ChildIndex::from_nodes(&nodes);
        let by_id: HashMap<Uuid, &MenuNode> = nodes.iter().map(|n| (n.id, n)).collect();

        let trees = nodes
            .iter()
            .map(|node| {
                let parent = node
                    .parent_id
                    .and_then(|p| by_id.get(&p).map(|parent| (*parent).clone()));
                index.build(node.clone(), levels).with_parent(parent)
            })
            .collect();

        Ok(trees)
    }

    /// Root menus ordered by position with `levels` generations of children
    /// (default `hierarchy_depth`). Deeper menus are left out.
    pub async fn get_hierarchy(&self, levels: Option<u32>) -> Result<Vec<MenuTree>, DomainError> {
        let levels = self.check_levels(levels.unwrap_or(self.settings.hierarchy_depth))?;
        let roots = self.store.list_by_parent(None).await?;

        let root_ids: Vec<Uuid> = roots.iter().map(|r| r.id).collect();
        let index = self.collect_children(&root_ids, levels).await?;

        Ok(roots
            .into_iter()
            .map(|root| index.build(root, levels))
            .collect())
    }

    /// A menu with its parent and immediate children.
    pub async fn get_by_id(&self, id: Uuid) -> Result<MenuTree, DomainError> {
        self.project(id, 1).await
    }

    /// A menu with its parent and a subtree expanded exactly `max_depth`
    /// levels (default `default_expand_depth`). Zero lists child ids only.
    pub async fn get_with_depth(&self, id: Uuid, max_depth: Option<u32>) -> Result<MenuTree, DomainError> {
        let levels = self.check_levels(max_depth.unwrap_or(self.settings.default_expand_depth))?;
        self.project(id, levels).await
    }

    pub async fn create(&self, input: NewMenu) -> Result<MenuTree, DomainError> {
        let input = NewMenu {
            name: input.name.trim().to_string(),
            ..input
        };
        input.validate()?;

        let parent = match input.parent_id {
            Some(parent_id) => Some(self.find_existing(parent_id).await?),
            None => None,
        };
        let depth = parent.as_ref().map_or(0, |p| p.depth + 1);

        let position = match input.position {
            Some(position) => position,
            None => self.next_position(input.parent_id).await?,
        };

        let node = MenuNode::new(&input.name, input.parent_id, depth, position)?;
        let created = self.store.insert(node).await?;
        info!(
            "Menu created: {} (parent: {:?}, depth: {}, position: {})",
            created.id, created.parent_id, created.depth, created.position
        );

        Ok(MenuTree {
            node: created,
            parent: Some(parent),
            children: Children::Expanded(Vec::new()),
        })
    }

    pub async fn update(&self, id: Uuid, input: UpdateMenu) -> Result<MenuTree, DomainError> {
        let existing = self.find_existing(id).await?;

        let input = UpdateMenu {
            name: input.name.map(|n| n.trim().to_string()),
            ..input
        };
        input.validate()?;

        let depth = match input.parent_id {
            None => existing.depth,
            Some(None) => 0,
            Some(Some(parent_id)) => {
                let parent = self.find_existing(parent_id).await?;
                self.ensure_not_descendant(id, &parent).await?;
                parent.depth + 1
            }
        };

        let patch = MenuNodePatch {
            name: input.name,
            parent_id: input.parent_id,
            depth: input.parent_id.map(|_| depth),
            position: input.position,
        };

        let updated = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| {
                warn!("Menu {} vanished during update", id);
                DomainError::MenuNotFound(id)
            })?;
        info!("Menu updated: {}", id);

        if updated.depth != existing.depth {
            let cascaded = self.cascade_depth(updated.id, updated.depth).await?;
            debug!("Recomputed depth for {} descendants of {}", cascaded, id);
        }

        self.get_by_id(id).await
    }

    /// Removes a menu and its whole subtree, returning the menu as it was.
    pub async fn delete(&self, id: Uuid) -> Result<MenuTree, DomainError> {
        let snapshot = self.get_by_id(id).await?;

        if !self.store.delete_cascade(id).await? {
            warn!("Menu {} vanished before delete", id);
            return Err(DomainError::MenuNotFound(id));
        }
        info!("Menu deleted with its subtree: {}", id);

        Ok(snapshot)
    }

    async fn find_existing(&self, id: Uuid) -> Result<MenuNode, DomainError> {
        self.store.find_by_id(id).await?.ok_or_else(|| {
            warn!("Menu not found: {}", id);
            DomainError::MenuNotFound(id)
        })
    }

    async fn project(&self, id: Uuid, levels: u32) -> Result<MenuTree, DomainError> {
        let node = self.find_existing(id).await?;
        let parent = match node.parent_id {
            Some(parent_id) => self.store.find_by_id(parent_id).await?,
            None => None,
        };

        let index = self.collect_children(&[node.id], levels).await?;
        Ok(index.build(node, levels).with_parent(parent))
    }

    /// Loads sibling lists for `levels + 1` generations starting at `roots`,
    /// enough for `ChildIndex::build` to expand `levels` and list ids at the bound.
    async fn collect_children(&self, roots: &[Uuid], levels: u32) -> Result<ChildIndex, DomainError> {
        let mut index = ChildIndex::new();
        let mut seen: HashSet<Uuid> = roots.iter().copied().collect();
        let mut frontier = roots.to_vec();

        for generation in 0..=levels {
            let mut next = Vec::new();
            for parent_id in frontier {
                let children = self.store.list_by_parent(Some(parent_id)).await?;
                if generation < levels {
                    next.extend(children.iter().map(|c| c.id).filter(|id| seen.insert(*id)));
                }
                index.insert(parent_id, children);
            }
            frontier = next;
        }

        debug!("Collected {} generations below {} menus", levels, roots.len());
        Ok(index)
    }

    async fn next_position(&self, parent_id: Option<Uuid>) -> Result<i32, DomainError> {
        let siblings = self.store.list_by_parent(parent_id).await?;
        Ok(siblings
            .iter()
            .map(|s| s.position)
            .max()
            .map_or(0, |max| max.saturating_add(1)))
    }

    /// Fails when `menu_id` is `parent` itself or one of its ancestors.
    async fn ensure_not_descendant(&self, menu_id: Uuid, parent: &MenuNode) -> Result<(), DomainError> {
        let cycle = || {
            warn!("Rejected move of {} under {}: cycle", menu_id, parent.id);
            DomainError::CycleDetected {
                menu_id,
                parent_id: parent.id,
            }
        };

        if parent.id == menu_id {
            return Err(cycle());
        }

        let mut visited = HashSet::from([parent.id]);
        let mut cursor = parent.parent_id;
        while let Some(ancestor_id) = cursor {
            if ancestor_id == menu_id {
                return Err(cycle());
            }
            if !visited.insert(ancestor_id) {
                break;
            }
            cursor = self
                .store
                .find_by_id(ancestor_id)
                .await?
                .and_then(|ancestor| ancestor.parent_id);
        }

        Ok(())
    }

    /// Rewrites stored depths below a moved menu. Returns the number of rows changed.
    async fn cascade_depth(&self, root_id: Uuid, root_depth: i32) -> Result<usize, DomainError> {
        let mut queue = VecDeque::from([(root_id, root_depth)]);
        let mut visited = HashSet::from([root_id]);
        let mut changed = 0;

        while let Some((parent_id, parent_depth)) = queue.pop_front() {
            let depth = parent_depth + 1;
            for child in self.store.list_by_parent(Some(parent_id)).await? {
                if !visited.insert(child.id) {
                    continue;
                }
                if child.depth != depth
                    && self
                        .store
                        .update(child.id, MenuNodePatch::depth_only(depth))
                        .await?
                        .is_some()
                {
                    changed += 1;
                }
                queue.push_back((child.id, depth));
            }
        }

        Ok(changed)
    }

    fn check_levels(&self, levels: u32) -> Result<u32, DomainError> {
        if levels > self.settings.max_expand_depth {
            warn!("Rejected expansion depth {}", levels);
            return Err(DomainError::ValidationError(format!(
                "depth {} exceeds the maximum of {}",
                levels, self.settings.max_expand_depth
            )));
        }
        Ok(levels)
    }
}
