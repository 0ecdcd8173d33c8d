//! Shared layouts for widget tests.

use rz_dom::{Document, LayoutRect};

use crate::memory::{MemoryDocument, NodeId};

/// A `div.container` holding two `div.item` children.
#[derive(Debug, Clone, Copy)]
pub struct ContainerFixture {
    pub container: NodeId,
    pub items: [NodeId; 2],
}

/// Append a container of the given width to `body`.
///
/// The container sits at the page origin; only its width matters to the
/// resizer.
pub fn create_container(doc: &MemoryDocument, width: f32) -> ContainerFixture {
    let build = || -> rz_dom::DomResult<ContainerFixture> {
        let container = doc.create_element("div")?;
        doc.set_class_name(&container, "container");

        let mut items = [NodeId(0); 2];
        for item in &mut items {
            *item = doc.create_element("div")?;
            doc.set_class_name(item, "item");
            doc.append_child(&container, item)?;
        }

        doc.append_child(&doc.body(), &container)?;
        doc.set_layout(container, LayoutRect::new(0.0, 0.0, width, 100.0));
        Ok(ContainerFixture { container, items })
    };
    build().expect("fixture elements are always valid")
}

/// Detach every `.container` from `body`.
pub fn remove_containers(doc: &MemoryDocument) {
    for child in doc.children(&doc.body()) {
        if doc
            .attribute(&child, "class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == "container"))
        {
            doc.remove_node(&child);
        }
    }
}
