//! Set named properties on objects the way test harnesses do it.
//!
//! A [`PropertySetter`] is bound to one target type, described by a [`TypeDescriptor`]. Setting property `name`
//! writes through a registered `setName` method when there is one, or straight into the field `name` otherwise.
//! Members of embedded ancestor types are found too, and non-public members are made accessible for the duration of
//! the write.
//!
//! ```
//! use propset::{PropertyError, PropertySetter, Reflect};
//!
//! #[derive(Reflect, Default)]
//! #[propset(method(call = "set_title", vis = "private"))]
//! struct Widget {
//!     name:  String,
//!     title: String,
//! }
//!
//! impl Widget {
//!     fn set_title(&mut self, title: String) {
//!         self.title = title.to_uppercase();
//!     }
//! }
//!
//! let mut widget = Widget::default();
//! let mut setter = PropertySetter::<Widget>::for_type();
//!
//! setter.set_property("name", "foo".to_string(), &mut widget)?;
//! setter.set_property("title", "bar".to_string(), &mut widget)?;
//! assert_eq!(widget.name, "foo");
//! assert_eq!(widget.title, "BAR");
//!
//! let err = setter.set_property("color", "red".to_string(), &mut widget).unwrap_err();
//! assert!(err.is_unknown_property());
//! # Ok::<(), PropertyError>(())
//! ```

extern crate self as propset;

#[cfg(feature = "tracing")]
macro_rules! pstrace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pstrace {
    ($($arg:tt)*) => {};
}

pub mod descriptor;
pub mod error;
pub mod mutator;
pub mod setter;
#[cfg(feature = "sync")]
pub mod sync;
pub mod text;
pub mod traits;

pub use descriptor::{FieldHandle, MemberInfo, MethodHandle, TypeDescriptor, TypeDescriptorBuilder, Value, Visibility};
pub use error::{PropertyError, SetterError};
pub use mutator::{FieldMutator, MethodMutator, Mutator};
#[cfg(feature = "derive")]
pub use propset_derive::Reflect;
pub use setter::PropertySetter;
#[cfg(feature = "sync")]
pub use sync::SyncPropertySetter;
pub use traits::{Reflect, SetterOutput};
