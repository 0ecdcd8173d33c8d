//! In-memory document that records its mutations.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rz_dom::{
    Document, DomError, DomResult, LayoutRect, ListenerId, ListenerScope, PointerEvent,
    PointerKind, PointerListener, StyleSink,
};

use crate::selector::SimpleSelector;

/// Element handle in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Records a document mutation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCall {
    CreateElement {
        node: NodeId,
        tag: String,
    },
    InsertChild {
        parent: NodeId,
        child: NodeId,
        before: Option<NodeId>,
    },
    RemoveNode {
        node: NodeId,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttribute {
        node: NodeId,
        name: String,
    },
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
    RemoveStyle {
        node: NodeId,
        property: String,
    },
    AddListener {
        id: ListenerId,
        kind: PointerKind,
    },
    RemoveListener {
        id: ListenerId,
    },
}

struct DomNode {
    tag: String,
    attributes: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: LayoutRect,
}

impl DomNode {
    fn new(tag: String) -> Self {
        Self {
            tag,
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            layout: LayoutRect::default(),
        }
    }
}

struct ListenerEntry {
    scope: ListenerScope<NodeId>,
    kind: PointerKind,
    /// Taken out while the listener runs.
    callback: Option<PointerListener>,
}

struct DomTree {
    nodes: IndexMap<NodeId, DomNode>,
    body: NodeId,
    next_node: usize,
    listeners: IndexMap<ListenerId, ListenerEntry>,
    next_listener: u64,
    calls: Vec<DomCall>,
}

impl DomTree {
    fn new() -> Self {
        let body = NodeId(0);
        let mut nodes = IndexMap::new();
        nodes.insert(body, DomNode::new("body".to_string()));
        Self {
            nodes,
            body,
            next_node: 1,
            listeners: IndexMap::new(),
            next_listener: 0,
            calls: Vec::new(),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(&node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|&c| c != node);
        }
    }

    /// Pre-order walk of the subtree under `root`, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(&root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(n) = self.nodes.get(&node) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn find(&self, candidates: impl IntoIterator<Item = NodeId>, selector: &SimpleSelector) -> Option<NodeId> {
        candidates.into_iter().find(|id| {
            self.nodes
                .get(id)
                .is_some_and(|n| selector.matches(&n.tag, &n.attributes))
        })
    }
}

/// An in-memory element tree rooted at a `body` element.
///
/// Layout is not computed. Tests assign each element's box with
/// [`MemoryDocument::set_layout`]; `client_width` and `page_left` read it
/// back.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// [`Document`] methods take `&self`, so the tree lives in an
/// `Rc<RefCell<..>>`. Listeners call back into the document, so
/// [`MemoryDocument::dispatch`] takes each callback out of the table, drops
/// the borrow, runs it, and puts it back only if it is still registered.
#[derive(Clone)]
pub struct MemoryDocument {
    tree: Rc<RefCell<DomTree>>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("MemoryDocument")
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .field("calls", &tree.calls.len())
            .finish()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(DomTree::new())),
        }
    }

    pub fn body(&self) -> NodeId {
        self.tree.borrow().body
    }

    /// Whether `node` exists and is attached under `body`.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.nodes.contains_key(&node) && tree.is_ancestor_or_self(tree.body, node)
    }

    pub fn set_layout(&self, node: NodeId, layout: LayoutRect) {
        if let Some(n) = self.tree.borrow_mut().nodes.get_mut(&node) {
            n.layout = layout;
        }
    }

    pub fn layout(&self, node: NodeId) -> Option<LayoutRect> {
        self.tree.borrow().nodes.get(&node).map(|n| n.layout)
    }

    /// Deliver `event` to the listeners it reaches.
    ///
    /// Element listeners run first, from `target` up through its ancestors,
    /// then document listeners. Returns how many listeners ran.
    pub fn dispatch(&self, target: NodeId, event: &mut PointerEvent) -> usize {
        let ids: Vec<ListenerId> = {
            let tree = self.tree.borrow();
            let mut path = vec![target];
            let mut current = target;
            while let Some(parent) = tree.nodes.get(&current).and_then(|n| n.parent) {
                path.push(parent);
                current = parent;
            }

            let kind = event.kind;
            let listeners = &tree.listeners;
            let element_ids = path.iter().flat_map(|node| {
                listeners.iter().filter_map(move |(id, entry)| {
                    (entry.kind == kind && entry.scope == ListenerScope::Element(*node))
                        .then_some(*id)
                })
            });
            let document_ids = listeners.iter().filter_map(|(id, entry)| {
                (entry.kind == kind && entry.scope == ListenerScope::Document).then_some(*id)
            });
            element_ids.chain(document_ids).collect()
        };

        tracing::trace!(
            "Dispatching {:?} to {:?}: {} listener(s)",
            event.kind,
            target,
            ids.len()
        );

        let mut fired = 0;
        for id in ids {
            let callback = self
                .tree
                .borrow_mut()
                .listeners
                .get_mut(&id)
                .and_then(|entry| entry.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };

            callback(event);
            fired += 1;

            if let Some(entry) = self.tree.borrow_mut().listeners.get_mut(&id) {
                entry.callback = Some(callback);
            }
        }
        fired
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<DomCall> {
        self.tree.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.tree.borrow_mut().calls.clear();
    }

    /// Number of `set_style` calls for `property` on `node`.
    pub fn count_style_writes(&self, node: NodeId, property: &str) -> usize {
        self.tree
            .borrow()
            .calls
            .iter()
            .filter(|call| {
                matches!(call, DomCall::SetStyle { node: n, property: p, .. } if *n == node && p == property)
            })
            .count()
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    /// Number of nodes held by the document, detached ones included.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    /// Free every node that is not connected to the body, along with the
    /// listeners bound to it. Handles to freed nodes become unknown elements.
    ///
    /// Returns the number of nodes freed.
    pub fn collect_detached(&self) -> usize {
        let mut tree = self.tree.borrow_mut();
        let body = tree.body;
        let detached: Vec<NodeId> = tree
            .nodes
            .keys()
            .copied()
            .filter(|&node| !tree.is_ancestor_or_self(body, node))
            .collect();

        for node in &detached {
            tree.nodes.shift_remove(node);
        }
        tree.listeners.retain(|_, entry| match &entry.scope {
            ListenerScope::Element(node) => !detached.contains(node),
            ListenerScope::Document => true,
        });
        detached.len()
    }

    fn record(&self, call: DomCall) {
        self.tree.borrow_mut().calls.push(call);
    }
}

impl StyleSink for MemoryDocument {
    type Element = NodeId;

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        {
            let mut tree = self.tree.borrow_mut();
            let Some(node) = tree.nodes.get_mut(element) else {
                return;
            };
            if value.is_empty() {
                node.styles.shift_remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
        self.record(DomCall::SetStyle {
            node: *element,
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_style(&self, element: &NodeId, property: &str) {
        {
            let mut tree = self.tree.borrow_mut();
            let Some(node) = tree.nodes.get_mut(element) else {
                return;
            };
            node.styles.shift_remove(property);
        }
        self.record(DomCall::RemoveStyle {
            node: *element,
            property: property.to_string(),
        });
    }

    fn style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(element)
            .and_then(|n| n.styles.get(property).cloned())
    }
}

impl Document for MemoryDocument {
    fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = SimpleSelector::parse(selector)?;
        let tree = self.tree.borrow();
        let candidates = std::iter::once(tree.body).chain(tree.descendants(tree.body));
        Ok(tree.find(candidates, &selector))
    }

    fn query_selector_in(&self, scope: &NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = SimpleSelector::parse(selector)?;
        let tree = self.tree.borrow();
        if !tree.nodes.contains_key(scope) {
            return Err(DomError::UnknownElement);
        }
        Ok(tree.find(tree.descendants(*scope), &selector))
    }

    fn create_element(&self, tag: &str) -> DomResult<NodeId> {
        if tag.is_empty()
            || !tag.starts_with(|c: char| c.is_ascii_alphabetic())
            || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }

        let tag = tag.to_ascii_lowercase();
        let node = {
            let mut tree = self.tree.borrow_mut();
            let node = NodeId(tree.next_node);
            tree.next_node += 1;
            tree.nodes.insert(node, DomNode::new(tag.clone()));
            node
        };
        self.record(DomCall::CreateElement { node, tag });
        Ok(node)
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.tree
            .borrow()
            .nodes
            .get(element)
            .map(|n| n.tag.to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    fn insert_before(
        &self,
        parent: &NodeId,
        child: &NodeId,
        reference: Option<&NodeId>,
    ) -> DomResult<()> {
        let before = {
            let mut tree = self.tree.borrow_mut();
            if !tree.nodes.contains_key(parent) || !tree.nodes.contains_key(child) {
                return Err(DomError::UnknownElement);
            }
            if tree.is_ancestor_or_self(*child, *parent) {
                return Err(DomError::HierarchyRequest);
            }

            let siblings = &tree.nodes[parent].children;
            let mut reference = reference.copied();
            if let Some(r) = reference {
                let Some(index) = siblings.iter().position(|&c| c == r) else {
                    return Err(DomError::NotAChild);
                };
                if r == *child {
                    reference = siblings.get(index + 1).copied();
                }
            }

            tree.detach(*child);

            let parent_node = &mut tree.nodes[parent];
            let index = reference
                .and_then(|r| parent_node.children.iter().position(|&c| c == r))
                .unwrap_or(parent_node.children.len());
            parent_node.children.insert(index, *child);
            tree.nodes[child].parent = Some(*parent);
            reference
        };
        self.record(DomCall::InsertChild {
            parent: *parent,
            child: *child,
            before,
        });
        Ok(())
    }

    fn remove_node(&self, element: &NodeId) {
        let attached = {
            let mut tree = self.tree.borrow_mut();
            let attached = tree.nodes.get(element).is_some_and(|n| n.parent.is_some());
            tree.detach(*element);
            attached
        };
        if attached {
            self.record(DomCall::RemoveNode { node: *element });
        }
    }

    fn children(&self, element: &NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .nodes
            .get(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes.get(element).and_then(|n| n.parent)
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        // "class" is always a valid attribute name.
        let _ = self.set_attribute(element, "class", class_name);
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> DomResult<()> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomError::InvalidAttributeName(name.to_string()));
        }
        let name = name.to_ascii_lowercase();
        {
            let mut tree = self.tree.borrow_mut();
            let node = tree.nodes.get_mut(element).ok_or(DomError::UnknownElement)?;
            node.attributes.insert(name.clone(), value.to_string());
        }
        self.record(DomCall::SetAttribute {
            node: *element,
            name,
            value: value.to_string(),
        });
        Ok(())
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(element)
            .and_then(|n| n.attributes.get(&name.to_ascii_lowercase()).cloned())
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) {
        let name = name.to_ascii_lowercase();
        let removed = self
            .tree
            .borrow_mut()
            .nodes
            .get_mut(element)
            .and_then(|n| n.attributes.shift_remove(&name))
            .is_some();
        if removed {
            self.record(DomCall::RemoveAttribute {
                node: *element,
                name,
            });
        }
    }

    fn client_width(&self, element: &NodeId) -> f32 {
        self.layout(*element).map_or(0.0, |l| l.width)
    }

    fn page_left(&self, element: &NodeId) -> f32 {
        self.layout(*element).map_or(0.0, |l| l.x)
    }

    fn add_listener(
        &self,
        scope: ListenerScope<NodeId>,
        kind: PointerKind,
        listener: PointerListener,
    ) -> ListenerId {
        let id = {
            let mut tree = self.tree.borrow_mut();
            let id = ListenerId(tree.next_listener);
            tree.next_listener += 1;
            tree.listeners.insert(
                id,
                ListenerEntry {
                    scope,
                    kind,
                    callback: Some(listener),
                },
            );
            id
        };
        self.record(DomCall::AddListener { id, kind });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let removed = self.tree.borrow_mut().listeners.shift_remove(&id).is_some();
        if removed {
            self.record(DomCall::RemoveListener { id });
        }
    }
}
