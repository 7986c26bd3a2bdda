//! Registration tables describing which members of a type can be written and how.
//!
//! A [`TypeDescriptor`] stands in for runtime reflection: every settable member is registered explicitly, either by
//! hand through [`TypeDescriptorBuilder`] or by `#[derive(Reflect)]`. Members declared on an ancestor are lifted into
//! the descriptor of a type that embeds it with [`TypeDescriptorBuilder::extends`].

use crate::{
    error::{PropertyError, SetterError},
    traits::{Reflect, SetterOutput},
};
use std::{
    any::{self, Any},
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

/// A value to be written into a property.
pub type Value = Box<dyn Any + Send>;

type Writer<T> = Arc<dyn Fn(&mut T, Value) -> Result<(), WriteFailure> + Send + Sync>;
type Projection<S, T> = Arc<dyn Fn(&mut S) -> &mut T + Send + Sync>;

enum WriteFailure {
    TypeMismatch,
    Setter(SetterError),
}

/// Declared visibility of a member. Only public members are accessible without an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    #[inline]
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Package => "package-private",
            Visibility::Private => "private",
        })
    }
}

#[derive(Debug)]
struct AccessState {
    accessible:      AtomicBool,
    override_denied: bool,
}

/// Everything known about a registered member apart from how to write it.
///
/// Clones share the accessibility flag: the same member lifted into several descriptors is still one member.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    name:        String,
    declared_in: Arc<str>,
    visibility:  Visibility,
    value_type:  &'static str,
    access:      Arc<AccessState>,
}

impl MemberInfo {
    fn new(
        name: String,
        declared_in: Arc<str>,
        visibility: Visibility,
        value_type: &'static str,
        override_denied: bool,
    ) -> Self {
        Self {
            name,
            declared_in,
            visibility,
            value_type,
            access: Arc::new(AccessState {
                accessible: AtomicBool::new(visibility.is_public()),
                override_denied,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the type the member was registered on.
    pub fn declared_in(&self) -> &str {
        &self.declared_in
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Name of the value type the member accepts.
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    pub fn is_accessible(&self) -> bool {
        self.access.accessible.load(Ordering::Acquire)
    }

    /// Change the accessibility flag of the member.
    ///
    /// Making a non-public member accessible fails with [`PropertyError::IllegalAccess`] when its declaring type
    /// denies access overrides.
    pub fn set_accessible(&self, flag: bool) -> Result<(), PropertyError> {
        if flag && !self.visibility.is_public() && self.access.override_denied {
            return Err(self.illegal_access());
        }
        self.store_accessible(flag);
        Ok(())
    }

    pub(crate) fn store_accessible(&self, flag: bool) {
        self.access.accessible.store(flag, Ordering::Release);
    }

    fn check_access(&self) -> Result<(), PropertyError> {
        if self.visibility.is_public() || self.is_accessible() {
            Ok(())
        }
        else {
            Err(self.illegal_access())
        }
    }

    fn illegal_access(&self) -> PropertyError {
        PropertyError::IllegalAccess {
            member:      self.name.clone(),
            declared_in: self.declared_in.to_string(),
            visibility:  self.visibility,
        }
    }

    fn write_error(&self, failure: WriteFailure) -> PropertyError {
        match failure {
            WriteFailure::TypeMismatch => PropertyError::IllegalArgument {
                member:      self.name.clone(),
                declared_in: self.declared_in.to_string(),
                expected:    self.value_type,
            },
            WriteFailure::Setter(err) => PropertyError::Setter(err),
        }
    }
}

struct Slot<T> {
    info:   MemberInfo,
    writer: Writer<T>,
}

impl<T: 'static> Slot<T> {
    fn write(&self, target: &mut T, value: Value) -> Result<(), PropertyError> {
        self.info.check_access()?;
        (self.writer)(target, value).map_err(|failure| self.info.write_error(failure))
    }

    fn lift<S: 'static>(&self, project: Projection<S, T>) -> Slot<S> {
        let writer = Arc::clone(&self.writer);
        Slot {
            info:   self.info.clone(),
            writer: Arc::new(move |target: &mut S, value: Value| (writer)((project)(target), value)),
        }
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            info:   self.info.clone(),
            writer: Arc::clone(&self.writer),
        }
    }
}

/// A registered single-argument setter method.
pub struct MethodHandle<T>(Slot<T>);

/// A registered field.
pub struct FieldHandle<T>(Slot<T>);

macro_rules! member_handle {
    ($($handle:ident => $op:ident, $what:literal);+ $(;)?) => {
        $(
            impl<T: 'static> $handle<T> {
                pub fn info(&self) -> &MemberInfo {
                    &self.0.info
                }

                pub fn name(&self) -> &str {
                    self.0.info.name()
                }

                #[doc = concat!("Write `value` into `target` through this ", $what, ".")]
                ///
                /// Access checks apply: a non-public member must be made accessible first.
                pub fn $op(&self, target: &mut T, value: Value) -> Result<(), PropertyError> {
                    self.0.write(target, value)
                }

                fn lift<S: 'static>(&self, project: Projection<S, T>) -> $handle<S> {
                    $handle(self.0.lift(project))
                }
            }

            impl<T> Clone for $handle<T> {
                fn clone(&self) -> Self {
                    Self(self.0.clone())
                }
            }

            impl<T> fmt::Debug for $handle<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($handle)).field(&self.0.info).finish()
                }
            }
        )+
    };
}

member_handle! {
    MethodHandle => invoke, "setter method";
    FieldHandle => set, "field";
}

/// The settable members of a type and of the ancestors it embeds.
pub struct TypeDescriptor<T> {
    name:      Arc<str>,
    ancestors: Vec<String>,
    methods:   Vec<MethodHandle<T>>,
    fields:    Vec<FieldHandle<T>>,
}

impl<T: 'static> TypeDescriptor<T> {
    pub fn builder<S: Into<String>>(name: S) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new(name.into())
    }

    /// Descriptor of a type implementing [`Reflect`].
    pub fn of() -> Self
    where
        T: Reflect,
    {
        T::type_descriptor()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of embedded ancestor types, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// All setter methods, own ones first.
    pub fn methods(&self) -> &[MethodHandle<T>] {
        &self.methods
    }

    /// All fields, own ones first.
    pub fn fields(&self) -> &[FieldHandle<T>] {
        &self.fields
    }

    /// Find a single-argument setter method by its name, looking into ancestors too.
    pub fn find_setter_method(&self, name: &str) -> Option<&MethodHandle<T>> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Find a field by exact name. Fields of the type itself shadow those of its ancestors.
    pub fn find_field_including_ancestors(&self, name: &str) -> Option<&FieldHandle<T>> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name:      Arc::clone(&self.name),
            ancestors: self.ancestors.clone(),
            methods:   self.methods.clone(),
            fields:    self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("ancestors", &self.ancestors)
            .field("methods", &self.methods.iter().map(|m| m.0.info.name()).collect::<Vec<_>>())
            .field("fields", &self.fields.iter().map(|m| m.0.info.name()).collect::<Vec<_>>())
            .finish()
    }
}

struct Registration<T> {
    name:       String,
    visibility: Visibility,
    value_type: &'static str,
    writer:     Writer<T>,
}

impl<T> Registration<T> {
    fn into_slot(self, declared_in: &Arc<str>, override_denied: bool) -> Slot<T> {
        Slot {
            info:   MemberInfo::new(
                self.name,
                Arc::clone(declared_in),
                self.visibility,
                self.value_type,
                override_denied,
            ),
            writer: self.writer,
        }
    }
}

/// Collects member registrations for a [`TypeDescriptor`].
pub struct TypeDescriptorBuilder<T> {
    name:              String,
    override_denied:   bool,
    methods:           Vec<Registration<T>>,
    fields:            Vec<Registration<T>>,
    ancestors:         Vec<String>,
    inherited_methods: Vec<MethodHandle<T>>,
    inherited_fields:  Vec<FieldHandle<T>>,
}

impl<T: 'static> TypeDescriptorBuilder<T> {
    fn new(name: String) -> Self {
        Self {
            name,
            override_denied: false,
            methods: vec![],
            fields: vec![],
            ancestors: vec![],
            inherited_methods: vec![],
            inherited_fields: vec![],
        }
    }

    /// Register a single-argument setter method. `setter` may return `()` or `Result<(), E>`; an `Err` is what the
    /// property setter hands back as [`PropertyError::Setter`].
    pub fn method<S, V, R, F>(mut self, name: S, visibility: Visibility, setter: F) -> Self
    where
        S: Into<String>,
        V: Any + Send,
        R: SetterOutput,
        F: Fn(&mut T, V) -> R + Send + Sync + 'static,
    {
        let writer: Writer<T> = Arc::new(move |target: &mut T, value: Value| {
            let value = value.downcast::<V>().map_err(|_| WriteFailure::TypeMismatch)?;
            setter(target, *value).into_setter_result().map_err(WriteFailure::Setter)
        });
        self.methods.push(Registration {
            name: name.into(),
            visibility,
            value_type: any::type_name::<V>(),
            writer,
        });
        self
    }

    /// Register a field, given a projection from the object to the field's place.
    pub fn field<S, V, P>(mut self, name: S, visibility: Visibility, project: P) -> Self
    where
        S: Into<String>,
        V: Any + Send,
        P: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let writer: Writer<T> = Arc::new(move |target: &mut T, value: Value| {
            let value = value.downcast::<V>().map_err(|_| WriteFailure::TypeMismatch)?;
            *project(target) = *value;
            Ok(())
        });
        self.fields.push(Registration {
            name: name.into(),
            visibility,
            value_type: any::type_name::<V>(),
            writer,
        });
        self
    }

    /// Inherit every member of `base`, reachable through `project`. Members registered on the type itself always
    /// take precedence over inherited ones; several ancestors are searched in the order they were added.
    pub fn extends<B, P>(mut self, base: TypeDescriptor<B>, project: P) -> Self
    where
        B: 'static,
        P: Fn(&mut T) -> &mut B + Send + Sync + 'static,
    {
        let project: Projection<T, B> = Arc::new(project);
        self.ancestors.push(base.name.to_string());
        self.ancestors.extend(base.ancestors.iter().cloned());
        self.inherited_methods
            .extend(base.methods.iter().map(|m| m.lift(Arc::clone(&project))));
        self.inherited_fields
            .extend(base.fields.iter().map(|f| f.lift(Arc::clone(&project))));
        self
    }

    /// Refuse to make non-public members of this type accessible.
    pub fn deny_access_override(mut self) -> Self {
        self.override_denied = true;
        self
    }

    pub fn build(self) -> TypeDescriptor<T> {
        let name: Arc<str> = Arc::from(self.name);
        let override_denied = self.override_denied;
        let methods = self
            .methods
            .into_iter()
            .map(|r| MethodHandle(r.into_slot(&name, override_denied)))
            .chain(self.inherited_methods)
            .collect();
        let fields = self
            .fields
            .into_iter()
            .map(|r| FieldHandle(r.into_slot(&name, override_denied)))
            .chain(self.inherited_fields)
            .collect();
        TypeDescriptor {
            name,
            ancestors: self.ancestors,
            methods,
            fields,
        }
    }
}
