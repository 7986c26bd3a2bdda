pub use crate::error::{PropertyError, SetterError};
use crate::descriptor::TypeDescriptor;

/// Types that can describe their settable members.
///
/// Normally implemented with `#[derive(Reflect)]`, which builds the descriptor inside the module declaring the
/// struct and thus has access to its private fields.
pub trait Reflect: Sized + 'static {
    fn type_descriptor() -> TypeDescriptor<Self>;
}

/// Return values a registered setter method may have.
pub trait SetterOutput {
    fn into_setter_result(self) -> Result<(), SetterError>;
}

impl SetterOutput for () {
    #[inline]
    fn into_setter_result(self) -> Result<(), SetterError> {
        Ok(())
    }
}

impl<E> SetterOutput for Result<(), E>
where
    E: Into<SetterError>,
{
    #[inline]
    fn into_setter_result(self) -> Result<(), SetterError> {
        self.map_err(Into::into)
    }
}
