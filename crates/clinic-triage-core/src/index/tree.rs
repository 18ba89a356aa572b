//! Ordered appointment index.
//!
//! A binary search tree keyed by appointment id. The store hands out ids in
//! ascending order and reloads insert in fetch order, so the live tree is
//! expected to degrade into a linear chain; every walk here uses an explicit
//! cursor or stack instead of recursing per node, and the tree is never
//! rebalanced.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{Appointment, AppointmentId};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    record: Appointment,
    left: Link,
    right: Link,
}

impl Node {
    fn new(record: Appointment) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree over appointments, keyed by id.
///
/// Each node exclusively owns its subtrees. Contents are copies of the store
/// as of the last reload; mutating the tree never writes back.
#[derive(Debug, Default)]
pub struct AppointmentTree {
    root: Link,
    len: usize,
}

impl AppointmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as a new leaf.
    ///
    /// An id already present in the tree is dropped unchanged: there is no
    /// update path, and the existing node keeps its record.
    pub fn insert(&mut self, record: Appointment) {
        let mut link = &mut self.root;
        loop {
            match link {
                None => {
                    *link = Some(Box::new(Node::new(record)));
                    self.len += 1;
                    return;
                }
                Some(node) => match record.id.cmp(&node.record.id) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Greater => link = &mut node.right,
                    Ordering::Equal => {
                        debug!(id = record.id, "duplicate id dropped by ordered index");
                        return;
                    }
                },
            }
        }
    }

    /// Search by id.
    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match id.cmp(&n.record.id) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Greater => node = n.right.as_deref(),
                Ordering::Equal => return Some(&n.record),
            }
        }
        None
    }

    /// Remove the node holding `id`, returning its record.
    ///
    /// A node with at most one child is replaced by that child; a node with
    /// two children takes over its in-order successor's record, and the
    /// successor is in turn removed from the right subtree by this same
    /// routine.
    pub fn remove(&mut self, id: AppointmentId) -> Option<Appointment> {
        let removed = remove_link(&mut self.root, id);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// In-order walk: records in ascending id order. Fresh traversal per
    /// call, non-destructive.
    pub fn iter(&self) -> Inorder<'_> {
        Inorder::new(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Remove `id` from the subtree hanging off `link`.
fn remove_link(link: &mut Link, id: AppointmentId) -> Option<Appointment> {
    let mut link = link;
    loop {
        let ordering = match link {
            None => return None,
            Some(node) => id.cmp(&node.record.id),
        };
        match ordering {
            Ordering::Less => link = &mut link.as_mut().unwrap().left,
            Ordering::Greater => link = &mut link.as_mut().unwrap().right,
            Ordering::Equal => break,
        }
    }

    let (has_left, has_right) = {
        let node = link.as_ref()?;
        (node.left.is_some(), node.right.is_some())
    };

    if has_left && has_right {
        // The successor is the leftmost node of the right subtree; it has no
        // left child, so the nested removal bottoms out immediately.
        let node = link.as_mut()?;
        let successor_id = min_id(&node.right)?;
        let successor = remove_link(&mut node.right, successor_id)?;
        Some(std::mem::replace(&mut node.record, successor))
    } else {
        let mut node = link.take()?;
        *link = if has_left {
            node.left.take()
        } else {
            node.right.take()
        };
        Some(node.record)
    }
}

fn min_id(link: &Link) -> Option<AppointmentId> {
    let mut node = link.as_deref()?;
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    Some(node.record.id)
}

impl Drop for AppointmentTree {
    fn drop(&mut self) {
        // A linear tree would otherwise cost one drop frame per node.
        let mut pending: Vec<Box<Node>> = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Explicit-stack in-order iterator.
pub struct Inorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Inorder<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Inorder { stack: Vec::new() };
        iter.push_left(root.as_deref());
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Inorder<'a> {
    type Item = &'a Appointment;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.record)
    }
}
