//! Traits a document backend implements.

use std::fmt::Debug;

use crate::error::DomResult;
use crate::event::{ListenerId, ListenerScope, PointerKind, PointerListener};

/// Writes inline style properties.
///
/// Property names are CSS names (`z-index`, not `zIndex`). An empty value
/// reads back as `None`.
pub trait StyleSink {
    /// Element handle type. Cheap to clone; equality is node identity.
    type Element: Clone + PartialEq + Debug + 'static;

    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn remove_style(&self, element: &Self::Element, property: &str);

    fn style(&self, element: &Self::Element, property: &str) -> Option<String>;
}

/// A shared handle on an element tree.
///
/// Cloning yields another handle to the same tree. All methods take `&self`;
/// implementations use interior mutability, and none may hold an internal
/// borrow while running a listener, since listeners call back into the
/// document.
pub trait Document: StyleSink + Clone + 'static {
    /// First element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> DomResult<Option<Self::Element>>;

    /// First descendant of `scope` matching `selector`.
    fn query_selector_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> DomResult<Option<Self::Element>>;

    fn create_element(&self, tag: &str) -> DomResult<Self::Element>;

    /// Upper-case tag name, e.g. `"DIV"`.
    fn tag_name(&self, element: &Self::Element) -> String;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> DomResult<()>;

    /// Insert `child` before `reference`, or append when `reference` is `None`.
    fn insert_before(
        &self,
        parent: &Self::Element,
        child: &Self::Element,
        reference: Option<&Self::Element>,
    ) -> DomResult<()>;

    /// Detach `element` from its parent. Detached elements are left alone.
    fn remove_node(&self, element: &Self::Element);

    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    fn set_class_name(&self, element: &Self::Element, class_name: &str);

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> DomResult<()>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// Inner width in pixels, excluding borders and scrollbars.
    fn client_width(&self, element: &Self::Element) -> f32;

    /// Left edge relative to the document origin, in pixels.
    fn page_left(&self, element: &Self::Element) -> f32;

    fn add_listener(
        &self,
        scope: ListenerScope<Self::Element>,
        kind: PointerKind,
        listener: PointerListener,
    ) -> ListenerId;

    /// Unknown or already removed ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
