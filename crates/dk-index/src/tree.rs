//! `EntityIndex` — binary search tree of exclusively owned boxed nodes.
//!
//! Each node owns its children through `Option<Box<Node>>` links, so a
//! deletion can never leave a dangling reference behind.  The tree owns every
//! `Entity` it holds; the scheduler and queues only refer to entities by key.
//!
//! # Deletion
//!
//! ```text
//! leaf / one child  → splice the child into the parent link
//! two children      → detach the in-order successor (leftmost node of the
//!                     right subtree) and move its whole Entity — key,
//!                     category and subrecords — into the doomed node
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use dk_core::Entity;

type Link = Option<Box<Node>>;

struct Node {
    entity: Entity,
    left:   Link,
    right:  Link,
}

impl Node {
    fn leaf(entity: Entity) -> Box<Node> {
        Box::new(Node { entity, left: None, right: None })
    }
}

// ── EntityIndex ───────────────────────────────────────────────────────────────

/// Ordered index over entities keyed by their unique string key.
#[derive(Default)]
pub struct EntityIndex {
    root: Link,
    len:  usize,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a fresh entity with no subrecords.
    ///
    /// Returns `false` — and leaves the existing entity and its subrecords
    /// untouched — if `key` is already present.
    pub fn insert(&mut self, key: &str, category: &str) -> bool {
        self.insert_entity(Entity::new(key, category)).is_ok()
    }

    /// Insert a fully formed entity (used when restoring a deleted or renamed
    /// entity together with its subrecords).
    ///
    /// On a duplicate key the tree is unchanged and the entity is handed back.
    pub fn insert_entity(&mut self, entity: Entity) -> Result<(), Entity> {
        let link = self.link_for(&entity.key);
        if link.is_some() {
            return Err(entity);
        }
        *link = Some(Node::leaf(entity));
        self.len += 1;
        Ok(())
    }

    /// Exact-key lookup.  O(height).
    pub fn search(&self, key: &str) -> Option<&Entity> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(node.entity.key.as_str()) {
                Ordering::Equal   => return Some(&node.entity),
                Ordering::Less    => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Mutable lookup, used to attach or detach subrecords in place.
    ///
    /// Callers must not change `key`; the tree position depends on it.
    pub fn search_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.link_for(key).as_deref_mut().map(|node| &mut node.entity)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Remove `key` and return the entity that carried it.
    pub fn delete(&mut self, key: &str) -> Option<Entity> {
        let link = self.link_for(key);
        let node = link.as_mut()?;
        let removed = if node.left.is_some() && node.right.is_some() {
            // Right subtree is non-empty, so a successor always exists.
            let successor = take_min(&mut node.right)?;
            mem::replace(&mut node.entity, successor)
        } else {
            let doomed = link.take()?;
            let Node { entity, left, right } = *doomed;
            *link = left.or(right);
            entity
        };
        self.len -= 1;
        Some(removed)
    }

    /// Ascending-key traversal.  Every call starts a fresh walk.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    /// Entities whose category matches `category` ignoring case, in
    /// ascending key order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.in_order().filter(move |e| e.in_category(category))
    }

    /// Ascending keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.in_order().map(|e| e.key.as_str())
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// The link holding `key`, or the empty link where it would be inserted.
    fn link_for(&mut self, key: &str) -> &mut Link {
        let mut cur = &mut self.root;
        loop {
            let ord = cur.as_deref().map(|node| key.cmp(node.entity.key.as_str()));
            match (ord, cur) {
                (Some(Ordering::Less), Some(node))    => cur = &mut node.left,
                (Some(Ordering::Greater), Some(node)) => cur = &mut node.right,
                (_, link) => return link,
            }
        }
    }
}

/// Detach the leftmost node under `link`, splicing its right child into its
/// place, and return its entity.
fn take_min(link: &mut Link) -> Option<Entity> {
    let mut cur = link;
    while cur.as_ref()?.left.is_some() {
        cur = &mut cur.as_mut()?.left;
    }
    let Node { entity, right, .. } = *cur.take()?;
    *cur = right;
    Some(entity)
}

/// Content equality: same entities in the same key order.  Tree shape is
/// not compared, since undoing a delete may rebuild a different shape.
impl PartialEq for EntityIndex {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.in_order().eq(other.in_order())
    }
}

impl Eq for EntityIndex {}

impl fmt::Debug for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl Drop for EntityIndex {
    /// Tear down iteratively so a degenerate (list-shaped) tree cannot
    /// overflow the stack through recursive `Box` drops.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

// ── InOrder ───────────────────────────────────────────────────────────────────

/// Lazy ascending-key iterator over an [`EntityIndex`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut it = Self { stack: Vec::new() };
        it.descend_left(root);
        it
    }

    fn descend_left(&mut self, mut cur: Option<&'a Node>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Entity;

    fn next(&mut self) -> Option<&'a Entity> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.entity)
    }
}
