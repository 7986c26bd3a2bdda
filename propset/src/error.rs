use crate::descriptor::Visibility;
use std::error::Error;
use thiserror::Error;

/// Failure produced by the setter body itself.
pub type SetterError = Box<dyn Error + Send + Sync + 'static>;

/// Standard error type of property assignment.
#[derive(Error, Debug)]
pub enum PropertyError {
    /// Neither a setter method nor a field matches the requested property.
    #[error("No such property: {property} in: {target}. Searched for: {{method:{method}, method:{property}, field:{property}}}")]
    UnknownProperty {
        property: String,
        target:   String,
        method:   String,
    },
    /// The value cannot be written into the member because its type differs.
    #[error("Can not set {declared_in}.{member} of type {expected} to a value of another type")]
    IllegalArgument {
        member:      String,
        declared_in: String,
        expected:    &'static str,
    },
    /// The object passed as the target is not an instance of the target type.
    #[error("Object is not an instance of {expected}")]
    NotAnInstance { expected: String },
    /// Member access could not be granted.
    #[error("Can not access {visibility} member {declared_in}.{member}")]
    IllegalAccess {
        member:      String,
        declared_in: String,
        visibility:  Visibility,
    },
    /// The setter ran and failed. Displays exactly as the original error does.
    #[error(transparent)]
    Setter(SetterError),
}

impl PropertyError {
    pub(crate) fn unknown_property(property: &str, target: &str, method: String) -> Self {
        PropertyError::UnknownProperty {
            property: property.to_string(),
            target: target.to_string(),
            method,
        }
    }

    pub(crate) fn not_an_instance(expected: &str) -> Self {
        PropertyError::NotAnInstance {
            expected: expected.to_string(),
        }
    }

    /// `true` when resolution failed, as opposed to a failed assignment.
    pub fn is_unknown_property(&self) -> bool {
        matches!(self, PropertyError::UnknownProperty { .. })
    }

    /// The original failure of the setter, if that is what this error carries.
    pub fn setter_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            PropertyError::Setter(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Try to view the setter failure as a concrete error type.
    pub fn downcast_setter<E: Error + 'static>(&self) -> Option<&E> {
        self.setter_error().and_then(|err| err.downcast_ref::<E>())
    }

    /// Unwrap the original setter failure. Any other variant is given back unchanged.
    pub fn into_setter_error(self) -> Result<SetterError, Self> {
        match self {
            PropertyError::Setter(err) => Ok(err),
            other => Err(other),
        }
    }
}
