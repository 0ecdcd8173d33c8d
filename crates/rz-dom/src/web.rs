//! Browser backend over `web-sys`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rz_core::alloc::HashMap;
use rz_core::math::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventTarget, HtmlElement, MouseEvent};

use crate::document::{Document, StyleSink};
use crate::error::{DomError, DomResult};
use crate::event::{ListenerId, ListenerScope, Modifiers, PointerEvent, PointerKind, PointerListener};

struct WebListener {
    target: EventTarget,
    kind: PointerKind,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

/// [`Document`] implementation over the page's `window.document`.
#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
    listeners: Rc<RefCell<HashMap<ListenerId, WebListener>>>,
    next_listener: Rc<Cell<u64>>,
}

impl std::fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDocument")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl WebDocument {
    /// Handle on the current page's document, if running in a window.
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::from_document(document))
    }

    pub fn from_document(document: web_sys::Document) -> Self {
        Self {
            document,
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_listener: Rc::new(Cell::new(0)),
        }
    }

    fn to_pointer_event(kind: PointerKind, event: &MouseEvent) -> PointerEvent {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, event.shift_key());
        modifiers.set(Modifiers::CONTROL, event.ctrl_key());
        modifiers.set(Modifiers::ALT, event.alt_key());
        modifiers.set(Modifiers::META, event.meta_key());

        PointerEvent::new(
            kind,
            Vec2::new(event.page_x() as f32, event.page_y() as f32),
            Vec2::new(event.offset_x() as f32, event.offset_y() as f32),
        )
        .with_modifiers(modifiers)
    }
}

fn js_error(value: JsValue) -> DomError {
    DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn html_elements(collection: web_sys::HtmlCollection) -> Vec<HtmlElement> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl StyleSink for WebDocument {
    type Element = HtmlElement;

    fn set_style(&self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            tracing::warn!("Failed to set style {}: {:?}", property, e);
        }
    }

    fn remove_style(&self, element: &HtmlElement, property: &str) {
        if let Err(e) = element.style().remove_property(property) {
            tracing::warn!("Failed to remove style {}: {:?}", property, e);
        }
    }

    fn style(&self, element: &HtmlElement, property: &str) -> Option<String> {
        element
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl Document for WebDocument {
    fn query_selector(&self, selector: &str) -> DomResult<Option<HtmlElement>> {
        let found = self
            .document
            .query_selector(selector)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))?;
        Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    fn query_selector_in(
        &self,
        scope: &HtmlElement,
        selector: &str,
    ) -> DomResult<Option<HtmlElement>> {
        let found = scope
            .query_selector(selector)
            .map_err(|_| DomError::InvalidSelector(selector.to_string()))?;
        Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    fn create_element(&self, tag: &str) -> DomResult<HtmlElement> {
        self.document
            .create_element(tag)
            .map_err(|_| DomError::InvalidTagName(tag.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::InvalidTagName(tag.to_string()))
    }

    fn tag_name(&self, element: &HtmlElement) -> String {
        element.tag_name()
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> DomResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn insert_before(
        &self,
        parent: &HtmlElement,
        child: &HtmlElement,
        reference: Option<&HtmlElement>,
    ) -> DomResult<()> {
        let reference: Option<&web_sys::Node> = reference.map(|el| el.as_ref());
        parent
            .insert_before(child, reference)
            .map(|_| ())
            .map_err(js_error)
    }

    fn remove_node(&self, element: &HtmlElement) {
        element.remove();
    }

    fn children(&self, element: &HtmlElement) -> Vec<HtmlElement> {
        html_elements(element.children())
    }

    fn parent(&self, element: &HtmlElement) -> Option<HtmlElement> {
        element
            .parent_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_class_name(&self, element: &HtmlElement, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_attribute(&self, element: &HtmlElement, name: &str, value: &str) -> DomResult<()> {
        element
            .set_attribute(name, value)
            .map_err(|_| DomError::InvalidAttributeName(name.to_string()))
    }

    fn attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn remove_attribute(&self, element: &HtmlElement, name: &str) {
        if let Err(e) = element.remove_attribute(name) {
            tracing::warn!("Failed to remove attribute {}: {:?}", name, e);
        }
    }

    fn client_width(&self, element: &HtmlElement) -> f32 {
        element.client_width() as f32
    }

    fn page_left(&self, element: &HtmlElement) -> f32 {
        let scroll_x = web_sys::window()
            .and_then(|w| w.scroll_x().ok())
            .unwrap_or(0.0);
        (element.get_bounding_client_rect().left() + scroll_x) as f32
    }

    fn add_listener(
        &self,
        scope: ListenerScope<HtmlElement>,
        kind: PointerKind,
        mut listener: PointerListener,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);

        let target: EventTarget = match scope {
            ListenerScope::Element(el) => el.unchecked_into(),
            ListenerScope::Document => self.document.clone().unchecked_into(),
        };

        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let mut pointer = WebDocument::to_pointer_event(kind, &event);
            listener(&mut pointer);
            if pointer.default_prevented() {
                event.prevent_default();
            }
        });

        if let Err(e) = target
            .add_event_listener_with_callback(kind.event_name(), closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to add {} listener: {:?}", kind.event_name(), e);
        }

        self.listeners.borrow_mut().insert(
            id,
            WebListener {
                target,
                kind,
                closure,
            },
        );
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let Some(entry) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        if let Err(e) = entry.target.remove_event_listener_with_callback(
            entry.kind.event_name(),
            entry.closure.as_ref().unchecked_ref(),
        ) {
            tracing::warn!("Failed to remove {} listener: {:?}", entry.kind.event_name(), e);
        }
    }
}
