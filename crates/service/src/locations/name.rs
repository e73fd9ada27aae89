use crate::errors::ServiceError;

/// Outcome of turning a location reference into a display name.
#[derive(Debug)]
pub enum NameResolution {
    /// The referenced location was loaded; holds its name in the requested
    /// language, `None` when it has none.
    Resolved(Option<String>),
    /// Best-effort value taken from the reference itself (its name, else its
    /// id). `cause` holds the lookup error when the location could not be
    /// loaded.
    Fallback {
        value: Option<String>,
        cause: Option<ServiceError>,
    },
}

impl NameResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, NameResolution::Resolved(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            NameResolution::Resolved(name) => name.as_deref(),
            NameResolution::Fallback { value, .. } => value.as_deref(),
        }
    }

    pub fn cause(&self) -> Option<&ServiceError> {
        match self {
            NameResolution::Resolved(_) => None,
            NameResolution::Fallback { cause, .. } => cause.as_ref(),
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            NameResolution::Resolved(name) => name,
            NameResolution::Fallback { value, .. } => value,
        }
    }
}
