/// Errors that can occur while parsing or encoding documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying tokenizer rejected the input.
    #[error("XML parser error: {0}")]
    Parser(#[from] xmlparser::Error),
    /// The input could not be decoded in its detected character encoding.
    #[error("cannot decode document as {0}")]
    Decoding(&'static str),
    #[error("unclosed entity: {0}")]
    UnclosedEntity(String),
    #[error("invalid entity: {0}")]
    InvalidEntity(String),
    /// A prefix was used that was not declared.
    #[error("unknown prefix: {0}")]
    UnknownPrefix(String),
    /// A closing tag does not match the open element.
    #[error("closing tag {found} does not match open element {expected}")]
    UnbalancedTag { expected: String, found: String },
    #[error("element {0} is never closed")]
    UnclosedElement(String),
    #[error("document has no document element")]
    NoDocumentElement,
    #[error("document has more than one document element")]
    MultipleDocumentElements,
    /// A namespace is used in a synthesized tree but no prefix is in scope
    /// for it.
    #[error("no prefix declared for namespace {0}")]
    NoPrefixForNamespace(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document element is not the expected one.
    #[error("unexpected root element {{{found_namespace}}}{found}, expected {{{namespace}}}{local_name}")]
    UnexpectedRoot {
        namespace: &'static str,
        local_name: &'static str,
        found_namespace: String,
        found: String,
    },
    /// A required element is missing, or has no text.
    #[error("missing required element: {element}")]
    MissingElement { element: &'static str },
    /// A required attribute is missing.
    #[error("missing required attribute {attribute} on {element}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A value that should be an integer is not.
    #[error("invalid integer for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },
    /// A value that should be an instant is not.
    #[error("invalid instant: {0:?}")]
    InvalidInstant(String),
    /// A temporal value with more than one `/` separator.
    #[error("invalid interval: {0:?}")]
    InvalidInterval(String),
    /// A geometry element that cannot be understood.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A value that is not one of the allowed literals.
    #[error("invalid value for {field}: {value:?}")]
    InvalidEnum { field: &'static str, value: String },
}

/// Classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not well-formed XML, or cannot be read or written.
    MalformedXml,
    /// Unexpected root element, or a required element or attribute is absent.
    Structural,
    /// A value is present but does not have the expected shape.
    Format,
    /// A value is present but is not one of the allowed literals.
    Enum,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            Parser(_)
            | Decoding(_)
            | UnclosedEntity(_)
            | InvalidEntity(_)
            | UnknownPrefix(_)
            | UnbalancedTag { .. }
            | UnclosedElement(_)
            | NoDocumentElement
            | MultipleDocumentElements
            | NoPrefixForNamespace(_)
            | Io(_) => ErrorKind::MalformedXml,
            UnexpectedRoot { .. } | MissingElement { .. } | MissingAttribute { .. } => {
                ErrorKind::Structural
            }
            InvalidInteger { .. } | InvalidInstant(_) | InvalidInterval(_) | InvalidGeometry(_) => {
                ErrorKind::Format
            }
            InvalidEnum { .. } => ErrorKind::Enum,
        }
    }
}
