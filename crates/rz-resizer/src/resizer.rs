//! The resizer widget.

use std::cell::RefCell;
use std::rc::Rc;

use rz_core::profiling::profile_function;
use rz_dom::{Document, DomResult, ListenerId, ListenerScope, PointerEvent, PointerKind};

use crate::drag::DragTracker;
use crate::error::{ConstructionError, ConstructionResult};
use crate::options::ResizerOptions;
use crate::registry::{self, Detach, InstanceId};

/// Attribute on the handle holding the class it was created with.
pub const HANDLE_ATTRIBUTE: &str = "data-rz-handle";

/// Attribute on the container holding the active [`InstanceId`].
pub const INSTANCE_ATTRIBUTE: &str = "data-rz-instance";

/// Stacking order of the ghost overlay.
pub const GHOST_Z_INDEX: i32 = 9999;

fn px(value: f32) -> String {
    format!("{}px", value)
}

/// The container a resizer binds to.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ContainerRef<E> {
    /// Nothing given. Construction fails.
    #[default]
    Unset,
    /// Resolved with [`Document::query_selector`].
    Selector(String),
    /// Used as-is.
    Element(E),
}

impl<E> From<&str> for ContainerRef<E> {
    fn from(selector: &str) -> Self {
        ContainerRef::Selector(selector.to_string())
    }
}

impl<E> From<String> for ContainerRef<E> {
    fn from(selector: String) -> Self {
        ContainerRef::Selector(selector)
    }
}

impl<E, T: Into<ContainerRef<E>>> From<Option<T>> for ContainerRef<E> {
    fn from(value: Option<T>) -> Self {
        value.map_or(ContainerRef::Unset, Into::into)
    }
}

/// A finished resize, reported when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeCommit {
    /// Final handle offset from the container's left edge.
    pub handle_x: f32,
    /// Flex basis given to the target.
    pub basis: f32,
}

type ResizeCallback = Box<dyn FnMut(ResizeCommit)>;

struct ResizerState<D: Document> {
    doc: D,
    id: InstanceId,
    container: D::Element,
    target: D::Element,
    handle: D::Element,
    ghost: D::Element,
    options: ResizerOptions,
    tracker: DragTracker,
    listeners: Vec<ListenerId>,
    on_resize: Option<ResizeCallback>,
    removed: bool,
}

impl<D: Document> ResizerState<D> {
    fn set_handle_x(&mut self, x: f32) -> f32 {
        let max = self.doc.client_width(&self.container);
        let x = self.tracker.set_handle_x(x, max);
        self.doc.set_style(&self.ghost, "left", &px(x));
        x
    }

    fn set_dragging(&mut self, dragging: bool) -> bool {
        let dragging = self.tracker.set_dragging(dragging);
        let display = if dragging { "block" } else { "none" };
        self.doc.set_style(&self.ghost, "display", display);
        dragging
    }

    fn on_down(&mut self, evt: &mut PointerEvent) {
        profile_function!();
        evt.prevent_default();

        if !self.tracker.begin(evt.offset.x) {
            tracing::trace!("Resizer {} ignored down while dragging", self.id);
            return;
        }

        self.set_dragging(true);
        tracing::trace!(
            "Resizer {} drag started, offset {}",
            self.id,
            self.tracker.offset_x()
        );
    }

    fn on_move(&mut self, evt: &mut PointerEvent) {
        profile_function!();
        evt.prevent_default();

        if !self.tracker.is_dragging() {
            return;
        }

        let container_left = self.doc.page_left(&self.container);
        let x = self.tracker.pointer_to_handle_x(evt.page.x, container_left);
        let x = self.set_handle_x(x);
        tracing::trace!("Resizer {} handle at {}", self.id, x);
    }

    fn on_up(&mut self, evt: &mut PointerEvent) -> Option<ResizeCommit> {
        profile_function!();
        evt.prevent_default();

        let was_dragging = self.tracker.is_dragging();
        self.set_dragging(false);
        self.tracker.end();

        if !was_dragging || self.removed {
            return None;
        }

        let container_width = self.doc.client_width(&self.container);
        let commit = ResizeCommit {
            handle_x: self.tracker.handle_x(),
            basis: self.tracker.target_basis(container_width, self.options.width),
        };
        self.doc
            .set_style(&self.target, "flex", &format!("0 0 {}", px(commit.basis)));
        tracing::debug!(
            "Resizer {} committed basis {} at handle {}",
            self.id,
            commit.basis,
            commit.handle_x
        );
        Some(commit)
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        for id in self.listeners.drain(..) {
            self.doc.remove_listener(id);
        }
        self.doc.remove_node(&self.handle);
        self.doc.remove_node(&self.ghost);
        self.doc.remove_style(&self.container, "position");
        self.doc.remove_attribute(&self.container, INSTANCE_ATTRIBUTE);
        self.doc.remove_style(&self.target, "flex");
        self.tracker.end();
        registry::unregister(self.id);

        tracing::debug!("Resizer {} removed", self.id);
    }
}

impl<D: Document> Detach for RefCell<ResizerState<D>> {
    fn detach(&self) {
        match self.try_borrow_mut() {
            Ok(mut state) => state.remove(),
            Err(_) => tracing::warn!("Resizer is busy handling an event; not detached"),
        }
    }
}

fn handle_event<D: Document>(state: &Rc<RefCell<ResizerState<D>>>, evt: &mut PointerEvent) {
    let Ok(mut guard) = state.try_borrow_mut() else {
        tracing::warn!("Dropped re-entrant {:?} event", evt.kind);
        return;
    };
    let kind = evt.kind;
    match kind {
        PointerKind::Down => guard.on_down(evt),
        PointerKind::Move => guard.on_move(evt),
        PointerKind::Up => {
            let commit = guard.on_up(evt);
            drop(guard);
            if let Some(commit) = commit {
                notify_resize(state, commit);
            }
        }
    }
}

/// Run the resize callback without holding the state borrow, so it may call
/// back into the resizer.
fn notify_resize<D: Document>(state: &Rc<RefCell<ResizerState<D>>>, commit: ResizeCommit) {
    let callback = state.borrow_mut().on_resize.take();
    let Some(mut callback) = callback else {
        return;
    };
    callback(commit);

    let mut state = state.borrow_mut();
    if state.on_resize.is_none() {
        state.on_resize = Some(callback);
    }
}

fn listen<D: Document>(
    doc: &D,
    state: &Rc<RefCell<ResizerState<D>>>,
    scope: ListenerScope<D::Element>,
    kind: PointerKind,
) -> ListenerId {
    let weak = Rc::downgrade(state);
    doc.add_listener(
        scope,
        kind,
        Box::new(move |evt: &mut PointerEvent| {
            if let Some(state) = weak.upgrade() {
                handle_event(&state, evt);
            }
        }),
    )
}

/// A draggable handle resizing the flex sibling that follows it.
///
/// `Resizer` is a cheap handle; clones refer to the same widget. The widget
/// stays attached until [`Resizer::remove`], whether or not any handle is
/// kept around.
///
/// # Example
///
/// ```rust
/// use rz_resizer::{Resizer, ResizerOptions};
/// use rz_test_utils::{MemoryDocument, create_container};
///
/// let doc = MemoryDocument::new();
/// create_container(&doc, 300.0);
///
/// let rz = Resizer::new(&doc, ".container", ResizerOptions::new().width(10.0)).unwrap();
/// assert_eq!(rz.options().width, 10.0);
/// assert_eq!(rz.set_handle_x(500.0), 300.0);
/// ```
pub struct Resizer<D: Document> {
    state: Rc<RefCell<ResizerState<D>>>,
}

impl<D: Document> Clone for Resizer<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<D: Document> std::fmt::Debug for Resizer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Resizer")
            .field("id", &state.id)
            .field("container", &state.container)
            .field("target", &state.target)
            .field("tracker", &state.tracker)
            .field("removed", &state.removed)
            .finish()
    }
}

impl<D: Document> Resizer<D> {
    /// Bind a resizer to `container`.
    ///
    /// A container that already has a live resizer loses it first. The
    /// handle is inserted before the container's second child, which
    /// becomes the target.
    pub fn new(
        doc: &D,
        container: impl Into<ContainerRef<D::Element>>,
        options: ResizerOptions,
    ) -> ConstructionResult<Self> {
        profile_function!();

        let container = match container.into() {
            ContainerRef::Unset => return Err(ConstructionError::MissingContainer),
            ContainerRef::Selector(sel) if sel.trim().is_empty() => {
                return Err(ConstructionError::MissingContainer);
            }
            ContainerRef::Selector(sel) => match doc.query_selector(&sel)? {
                Some(el) => el,
                None => return Err(ConstructionError::ContainerNotFound(sel)),
            },
            ContainerRef::Element(el) => el,
        };

        if let Some(prior) = Self::lookup(doc, &container) {
            tracing::debug!("Replacing resizer {} on container", prior);
            registry::detach(prior);
        }

        let target = doc
            .children(&container)
            .get(1)
            .cloned()
            .ok_or(ConstructionError::NoTarget)?;

        let handle = Self::create_handle(doc, &options.handle_class)?;
        let ghost = Self::create_ghost(doc)?;
        let id = InstanceId::next();

        let attach = || -> DomResult<()> {
            doc.set_style(&handle, "width", &px(options.width));
            doc.set_style(&handle, "flex", &format!("0 0 {}", px(options.width)));
            doc.set_style(&ghost, "width", &px(options.width));
            doc.insert_before(&container, &handle, Some(&target))?;
            doc.append_child(&container, &ghost)?;
            doc.set_attribute(&container, INSTANCE_ATTRIBUTE, &id.to_string())
        };
        if let Err(e) = attach() {
            doc.remove_node(&handle);
            doc.remove_node(&ghost);
            return Err(e.into());
        }

        doc.set_style(&container, "position", "relative");
        doc.set_style(&target, "flex", "0 0 auto");

        let state = Rc::new(RefCell::new(ResizerState {
            doc: doc.clone(),
            id,
            container,
            target,
            handle: handle.clone(),
            ghost,
            options,
            tracker: DragTracker::new(),
            listeners: Vec::new(),
            on_resize: None,
            removed: false,
        }));

        let listeners = vec![
            listen(doc, &state, ListenerScope::Element(handle), PointerKind::Down),
            listen(doc, &state, ListenerScope::Document, PointerKind::Move),
            listen(doc, &state, ListenerScope::Document, PointerKind::Up),
        ];
        state.borrow_mut().listeners = listeners;
        registry::register(id, state.clone());

        tracing::debug!("Resizer {} attached", id);
        Ok(Self { state })
    }

    /// Shorthand for [`Resizer::new`] with an element.
    pub fn with_element(
        doc: &D,
        container: D::Element,
        options: ResizerOptions,
    ) -> ConstructionResult<Self> {
        Self::new(doc, ContainerRef::Element(container), options)
    }

    /// Build a handle: a `div` with `class`, an `ew-resize` cursor and
    /// `data-rz-handle` set to `class`.
    pub fn create_handle(doc: &D, class: &str) -> DomResult<D::Element> {
        let handle = doc.create_element("div")?;
        doc.set_class_name(&handle, class);
        doc.set_style(&handle, "cursor", "ew-resize");
        doc.set_attribute(&handle, HANDLE_ATTRIBUTE, class)?;
        Ok(handle)
    }

    /// Build a hidden, absolutely positioned, full-height overlay `div`.
    pub fn create_ghost(doc: &D) -> DomResult<D::Element> {
        let ghost = doc.create_element("div")?;
        doc.set_style(&ghost, "position", "absolute");
        doc.set_style(&ghost, "top", "0px");
        doc.set_style(&ghost, "bottom", "0px");
        doc.set_style(&ghost, "display", "none");
        doc.set_style(&ghost, "z-index", &GHOST_Z_INDEX.to_string());
        Ok(ghost)
    }

    /// The live resizer bound to `container`, if any.
    pub fn lookup(doc: &D, container: &D::Element) -> Option<InstanceId> {
        doc.attribute(container, INSTANCE_ATTRIBUTE)
            .and_then(|value| InstanceId::parse(&value))
            .filter(|id| registry::is_active(*id))
    }

    /// Move the handle to `x` pixels from the container's left edge,
    /// clamped to the container's client width. Returns the stored value.
    pub fn set_handle_x(&self, x: f32) -> f32 {
        self.state.borrow_mut().set_handle_x(x)
    }

    /// Set the dragging flag and show or hide the ghost. `None` means
    /// `true`. Returns the new flag.
    pub fn set_dragging(&self, dragging: impl Into<Option<bool>>) -> bool {
        let dragging = dragging.into().unwrap_or(true);
        self.state.borrow_mut().set_dragging(dragging)
    }

    /// Pointer-down on the handle.
    pub fn on_down(&self, evt: &mut PointerEvent) {
        self.state.borrow_mut().on_down(evt);
    }

    /// Pointer-move anywhere in the document.
    pub fn on_move(&self, evt: &mut PointerEvent) {
        self.state.borrow_mut().on_move(evt);
    }

    /// Pointer-up anywhere in the document. Ends the drag and, if one was
    /// in progress, commits the target's flex basis.
    pub fn on_up(&self, evt: &mut PointerEvent) {
        let commit = self.state.borrow_mut().on_up(evt);
        if let Some(commit) = commit {
            notify_resize(&self.state, commit);
        }
    }

    /// Call `callback` after each committed resize. Replaces any previous
    /// callback.
    pub fn on_resize(&self, callback: impl FnMut(ResizeCommit) + 'static) {
        self.state.borrow_mut().on_resize = Some(Box::new(callback));
    }

    /// Detach listeners, remove the handle and ghost, and restore the
    /// container and target styles. Safe to call more than once.
    pub fn remove(&self) {
        self.state.borrow_mut().remove();
    }

    pub fn id(&self) -> InstanceId {
        self.state.borrow().id
    }

    pub fn document(&self) -> D {
        self.state.borrow().doc.clone()
    }

    pub fn container(&self) -> D::Element {
        self.state.borrow().container.clone()
    }

    pub fn target(&self) -> D::Element {
        self.state.borrow().target.clone()
    }

    pub fn handle(&self) -> D::Element {
        self.state.borrow().handle.clone()
    }

    pub fn ghost(&self) -> D::Element {
        self.state.borrow().ghost.clone()
    }

    pub fn options(&self) -> ResizerOptions {
        self.state.borrow().options.clone()
    }

    pub fn handle_x(&self) -> f32 {
        self.state.borrow().tracker.handle_x()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().tracker.is_dragging()
    }

    pub fn offset_x(&self) -> f32 {
        self.state.borrow().tracker.offset_x()
    }

    pub fn is_removed(&self) -> bool {
        self.state.borrow().removed
    }
}
