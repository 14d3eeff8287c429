//! Parent/child menu tree with cascading permission toggles.

use std::collections::{HashMap, HashSet};

use ustr::Ustr;

use super::model::{MenuId, MenuNode, MenuPermission, MenuRecord, Permission, Permissions};

/// Root menus sharing a `module_code`, shown as one collapsible group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGroup {
    pub module_code: Ustr,
    pub roots: Vec<MenuId>,
}

/// A node positioned for display: pre-order within its module group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow {
    pub id: MenuId,
    pub depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    index: HashMap<MenuId, usize>,
    children: HashMap<MenuId, Vec<MenuId>>,
    roots: Vec<MenuId>,
    modules: Vec<ModuleGroup>,
}

impl MenuTree {
    /// Merge the global catalog with a role's sparse assignments.
    ///
    /// Catalog order is preserved. Assignments whose menu is missing from the
    /// catalog are appended after it.
    pub fn merge(catalog: &[MenuRecord], assigned: &[MenuRecord]) -> Self {
        let mut assignments: HashMap<MenuId, &MenuRecord> = HashMap::new();
        for record in assigned {
            assignments.entry(record.id()).or_insert(record);
        }

        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(catalog.len());

        for record in catalog {
            if !seen.insert(record.id()) {
                log::warn!("menu {} listed twice in catalog, keeping first", record.id());
                continue;
            }
            nodes.push(MenuNode::from_record(
                record,
                assignments.get(&record.id()).copied(),
            ));
        }

        for record in assigned {
            if seen.insert(record.id()) {
                // Assignment for a menu the catalog does not know about.
                log::warn!(
                    "role assignment references menu {} ({}) missing from catalog",
                    record.id(),
                    record.menu_code
                );
                nodes.push(MenuNode::from_record(record, Some(record)));
            }
        }

        Self::from_nodes(nodes)
    }

    /// Build adjacency, roots and module groups from already-merged nodes.
    pub fn from_nodes(nodes: Vec<MenuNode>) -> Self {
        let index: HashMap<MenuId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i))
            .collect();

        let mut children: HashMap<MenuId, Vec<MenuId>> = HashMap::new();
        let mut roots = Vec::new();

        for node in &nodes {
            match node.parent_id {
                Some(parent) if parent != node.id && index.contains_key(&parent) => {
                    children.entry(parent).or_default().push(node.id);
                }
                _ => roots.push(node.id),
            }
        }

        let mut tree = Self {
            nodes,
            index,
            children,
            roots,
            modules: Vec::new(),
        };
        tree.promote_unreachable();
        tree.modules = tree.group_modules();
        tree
    }

    /// Nodes caught in a parent cycle are never reached from a root. Detach
    /// the first node of each such cycle from its parent and make it a root.
    fn promote_unreachable(&mut self) {
        let mut reachable = HashSet::new();
        for root in self.roots.clone() {
            self.mark_subtree(root, &mut reachable);
        }

        let ids: Vec<MenuId> = self.nodes.iter().map(|n| n.id).collect();
        for id in ids {
            if reachable.contains(&id) {
                continue;
            }
            log::warn!("menu {id} is part of a parent cycle, showing it as a root");

            let parent = self.node(id).and_then(|n| n.parent_id);
            if let Some(siblings) = parent.and_then(|p| self.children.get_mut(&p)) {
                siblings.retain(|child| *child != id);
            }
            self.roots.push(id);
            self.mark_subtree(id, &mut reachable);
        }
    }

    fn mark_subtree(&self, id: MenuId, reachable: &mut HashSet<MenuId>) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if reachable.insert(current) {
                stack.extend(self.children(current).iter().copied());
            }
        }
    }

    fn group_modules(&self) -> Vec<ModuleGroup> {
        let mut modules: Vec<ModuleGroup> = Vec::new();
        for root in &self.roots {
            let Some(node) = self.node(*root) else {
                continue;
            };
            match modules
                .iter_mut()
                .find(|group| group.module_code == node.module_code)
            {
                Some(group) => group.roots.push(*root),
                None => modules.push(ModuleGroup {
                    module_code: node.module_code,
                    roots: vec![*root],
                }),
            }
        }
        modules
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    pub fn node(&self, id: MenuId) -> Option<&MenuNode> {
        self.index.get(&id).map(|i| &self.nodes[*i])
    }

    pub fn roots(&self) -> &[MenuId] {
        &self.roots
    }

    pub fn modules(&self) -> &[ModuleGroup] {
        &self.modules
    }

    pub fn children(&self, id: MenuId) -> &[MenuId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, id: MenuId) -> bool {
        !self.children(id).is_empty()
    }

    /// Every node below `id`, excluding `id` itself.
    pub fn descendants(&self, id: MenuId) -> Vec<MenuId> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<MenuId> = self.children(id).iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Pre-order rows of a module group, with depth relative to the group roots.
    pub fn module_rows(&self, group: &ModuleGroup) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<TreeRow> = group
            .roots
            .iter()
            .rev()
            .map(|id| TreeRow { id: *id, depth: 0 })
            .collect();

        while let Some(row) = stack.pop() {
            if !visited.insert(row.id) {
                continue;
            }
            rows.push(row);
            stack.extend(self.children(row.id).iter().rev().map(|child| TreeRow {
                id: *child,
                depth: row.depth + 1,
            }));
        }
        rows
    }

    /// Flip one permission bit on `id` and force the new value onto every
    /// descendant. Returns the new value, or `None` for an unknown menu.
    pub fn toggle(&mut self, id: MenuId, permission: Permission) -> Option<bool> {
        let current = self.node(id)?.permissions.get(permission);
        self.set(id, permission, !current)
    }

    /// Set one permission bit on `id` and all of its descendants.
    pub fn set(&mut self, id: MenuId, permission: Permission, value: bool) -> Option<bool> {
        let own = *self.index.get(&id)?;
        self.nodes[own].permissions.set(permission, value);

        for descendant in self.descendants(id) {
            if let Some(i) = self.index.get(&descendant) {
                self.nodes[*i].permissions.set(permission, value);
            }
        }
        Some(value)
    }

    /// Replace all six bits of a single node (no cascade).
    pub fn set_permissions(&mut self, id: MenuId, permissions: Permissions) -> bool {
        match self.index.get(&id) {
            Some(i) => {
                self.nodes[*i].permissions = permissions;
                true
            }
            None => false,
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_assigned()).count()
    }

    /// The full bulk-save payload: one entry per node, in tree order.
    pub fn to_payload(&self) -> Vec<MenuPermission> {
        self.nodes.iter().map(MenuNode::to_permission).collect()
    }
}
