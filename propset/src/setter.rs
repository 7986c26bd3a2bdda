use crate::{
    descriptor::{TypeDescriptor, Value},
    error::PropertyError,
    mutator::Mutator,
    traits::Reflect,
};
use std::{
    any::Any,
    collections::{hash_map::Entry, HashMap},
    fmt,
};

/// Sets named properties on instances of one target type.
///
/// For a property `name` the setter looks for a registered `setName` method, then for a field `name`, both including
/// members inherited from ancestors. Each resolved mutator is remembered under the requested property name; the
/// record is there for inspection only, every call resolves again.
///
/// The cache is mutated on every call, hence `&mut self`. See [`SyncPropertySetter`](crate::sync::SyncPropertySetter)
/// for a version usable through a shared reference.
pub struct PropertySetter<T: 'static> {
    target_type:     TypeDescriptor<T>,
    cached_mutators: HashMap<String, Mutator<T>>,
}

impl<T: 'static> PropertySetter<T> {
    pub fn new(target_type: TypeDescriptor<T>) -> Self {
        Self {
            target_type,
            cached_mutators: HashMap::new(),
        }
    }

    pub fn for_type() -> Self
    where
        T: Reflect,
    {
        Self::new(T::type_descriptor())
    }

    pub fn target_type(&self) -> &TypeDescriptor<T> {
        &self.target_type
    }

    /// Resolve a property without writing anything and without touching the cache.
    pub fn resolve(&self, property: &str) -> Result<Mutator<T>, PropertyError> {
        Mutator::resolve(&self.target_type, property)
    }

    /// Set `property` of `target` to `value`.
    ///
    /// If the setter method fails, its own error is returned as [`PropertyError::Setter`].
    pub fn set_property<V: Any + Send>(&mut self, property: &str, value: V, target: &mut T) -> Result<(), PropertyError> {
        self.set_property_boxed(property, Box::new(value), target)
    }

    /// Same as [`set_property`](Self::set_property) for an already boxed value.
    pub fn set_property_boxed(&mut self, property: &str, value: Value, target: &mut T) -> Result<(), PropertyError> {
        let mutator = self.remember(self.resolve(property)?);
        mutator.set(target, value)
    }

    /// Same as [`set_property`](Self::set_property) for a type-erased target. A target which is not a `T` is
    /// reported with [`PropertyError::NotAnInstance`] once the property is resolved.
    pub fn set_property_dyn<V: Any + Send>(
        &mut self,
        property: &str,
        value: V,
        target: &mut dyn Any,
    ) -> Result<(), PropertyError> {
        let mutator = self.remember(self.resolve(property)?).clone();
        let target = target
            .downcast_mut::<T>()
            .ok_or_else(|| PropertyError::not_an_instance(self.target_type.name()))?;
        mutator.set(target, Box::new(value))
    }

    /// The mutator last resolved for `property`, if any.
    pub fn cached_mutator(&self, property: &str) -> Option<&Mutator<T>> {
        self.cached_mutators.get(property)
    }

    pub fn cached_mutators(&self) -> impl Iterator<Item = &Mutator<T>> {
        self.cached_mutators.values()
    }

    fn remember(&mut self, mutator: Mutator<T>) -> &Mutator<T> {
        match self.cached_mutators.entry(mutator.property().to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(mutator);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(mutator),
        }
    }
}

impl<T: 'static> From<TypeDescriptor<T>> for PropertySetter<T> {
    fn from(target_type: TypeDescriptor<T>) -> Self {
        Self::new(target_type)
    }
}

impl<T: 'static> fmt::Debug for PropertySetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySetter")
            .field("target_type", &self.target_type.name())
            .field("cached_mutators", &self.cached_mutators)
            .finish()
    }
}
