use rz_dom::DomError;

/// Why a [`Resizer`](crate::Resizer) could not be constructed.
///
/// Construction checks everything before touching the document, so on
/// error no element or listener has been added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No container was given, or the selector was blank.
    MissingContainer,
    /// The selector matched no element.
    ContainerNotFound(String),
    /// The container has no second child to resize.
    NoTarget,
    /// The document backend rejected an operation.
    Dom(DomError),
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::MissingContainer => write!(f, "No container given"),
            ConstructionError::ContainerNotFound(sel) => {
                write!(f, "No element matches selector {:?}", sel)
            }
            ConstructionError::NoTarget => {
                write!(f, "Container needs at least two children to resize")
            }
            ConstructionError::Dom(e) => write!(f, "Document error: {}", e),
        }
    }
}

impl std::error::Error for ConstructionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConstructionError::Dom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomError> for ConstructionError {
    fn from(err: DomError) -> Self {
        ConstructionError::Dom(err)
    }
}

/// Result type for resizer construction.
pub type ConstructionResult<T> = Result<T, ConstructionError>;
