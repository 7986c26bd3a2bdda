use crate::{
    descriptor::{FieldHandle, MemberInfo, MethodHandle, TypeDescriptor, Value},
    error::PropertyError,
    text,
};
use std::fmt;

/// A setter method resolved for a property.
pub struct MethodMutator<T> {
    property: String,
    method:   MethodHandle<T>,
}

/// A field resolved for a property.
pub struct FieldMutator<T> {
    property: String,
    field:    FieldHandle<T>,
}

/// The way a property gets written: through a setter method or straight into a field.
pub enum Mutator<T> {
    Method(MethodMutator<T>),
    Field(FieldMutator<T>),
}

impl<T: 'static> MethodMutator<T> {
    pub fn method(&self) -> &MethodHandle<T> {
        &self.method
    }
}

impl<T: 'static> FieldMutator<T> {
    pub fn field(&self) -> &FieldHandle<T> {
        &self.field
    }
}

impl<T: 'static> Mutator<T> {
    /// Resolve `property` against `target_type`: a `set<Property>` method first, then a field of the same name.
    pub fn resolve(target_type: &TypeDescriptor<T>, property: &str) -> Result<Self, PropertyError> {
        let method_name = text::setter_name(property);

        if let Some(method) = target_type.find_setter_method(&method_name) {
            pstrace!(target_type = target_type.name(), property, method = %method_name, "resolved setter method");
            return Ok(Mutator::Method(MethodMutator {
                property: property.to_string(),
                method:   method.clone(),
            }));
        }

        match target_type.find_field_including_ancestors(property) {
            Some(field) => {
                pstrace!(
                    target_type = target_type.name(),
                    property,
                    declared_in = field.info().declared_in(),
                    "resolved field"
                );
                Ok(Mutator::Field(FieldMutator {
                    property: property.to_string(),
                    field:    field.clone(),
                }))
            }
            None => Err(PropertyError::unknown_property(property, target_type.name(), method_name)),
        }
    }

    /// The property name this mutator was resolved for.
    pub fn property(&self) -> &str {
        match self {
            Mutator::Method(m) => &m.property,
            Mutator::Field(f) => &f.property,
        }
    }

    pub fn member(&self) -> &MemberInfo {
        match self {
            Mutator::Method(m) => m.method.info(),
            Mutator::Field(f) => f.field.info(),
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Mutator::Method(_))
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Mutator::Field(_))
    }

    /// Write `value` into `target`, overriding member visibility for the duration of the write.
    pub fn set(&self, target: &mut T, value: Value) -> Result<(), PropertyError> {
        let _guard = AccessGuard::force(self.member())?;
        match self {
            Mutator::Method(m) => m.method.invoke(target, value),
            Mutator::Field(f) => f.field.set(target, value),
        }
    }
}

impl<T> Clone for Mutator<T> {
    fn clone(&self) -> Self {
        match self {
            Mutator::Method(m) => Mutator::Method(MethodMutator {
                property: m.property.clone(),
                method:   m.method.clone(),
            }),
            Mutator::Field(f) => Mutator::Field(FieldMutator {
                property: f.property.clone(),
                field:    f.field.clone(),
            }),
        }
    }
}

impl<T> fmt::Debug for Mutator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutator::Method(m) => f
                .debug_struct("MethodMutator")
                .field("property", &m.property)
                .field("method", &m.method)
                .finish(),
            Mutator::Field(fm) => f
                .debug_struct("FieldMutator")
                .field("property", &fm.property)
                .field("field", &fm.field)
                .finish(),
        }
    }
}

// Keeps a member accessible while alive and puts the previous flag back on drop, whatever the outcome of the write.
// The load and the stores are separate atomic operations, not a critical section. See `SyncPropertySetter` for what
// concurrent writes through the same member can run into.
struct AccessGuard<'a> {
    member:         &'a MemberInfo,
    was_accessible: bool,
}

impl<'a> AccessGuard<'a> {
    fn force(member: &'a MemberInfo) -> Result<Self, PropertyError> {
        let was_accessible = member.is_accessible();
        if !was_accessible {
            pstrace!(member = member.name(), visibility = %member.visibility(), "overriding member access");
            member.set_accessible(true)?;
        }
        Ok(Self { member, was_accessible })
    }
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        self.member.store_accessible(self.was_accessible);
    }
}
