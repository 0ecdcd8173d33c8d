/// Errors reported by a [`Document`](crate::Document) backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The selector could not be parsed.
    InvalidSelector(String),
    /// The tag name is not a valid element name.
    InvalidTagName(String),
    /// The attribute name is not a valid attribute name.
    InvalidAttributeName(String),
    /// The element is not part of this document.
    UnknownElement,
    /// Inserting the node would make it its own ancestor.
    HierarchyRequest,
    /// The reference node for an insert is not a child of the parent.
    NotAChild,
    /// A JavaScript exception raised by the browser.
    Js(String),
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::InvalidSelector(sel) => write!(f, "Invalid selector: {:?}", sel),
            DomError::InvalidTagName(tag) => write!(f, "Invalid tag name: {:?}", tag),
            DomError::InvalidAttributeName(name) => {
                write!(f, "Invalid attribute name: {:?}", name)
            }
            DomError::UnknownElement => write!(f, "Element does not belong to this document"),
            DomError::HierarchyRequest => {
                write!(f, "Node cannot be inserted into its own subtree")
            }
            DomError::NotAChild => write!(f, "Reference node is not a child of the parent"),
            DomError::Js(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

/// Result type for document operations.
pub type DomResult<T> = Result<T, DomError>;
