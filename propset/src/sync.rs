use crate::{
    descriptor::{TypeDescriptor, Value},
    error::PropertyError,
    mutator::Mutator,
    traits::Reflect,
};
use parking_lot::Mutex;
use std::{any::Any, collections::HashMap, fmt};

/// A [`PropertySetter`](crate::PropertySetter) which can be shared between threads.
///
/// Only the cache is protected. Forcing member accessibility is still not atomic when two threads write through the
/// same non-public member:
///
/// - the last restore wins, so one thread may run its write while the flag it forced has already been put back by
///   the other;
/// - when thread A restores `false` after thread B found the member accessible (because of A's override) but before
///   B's access check, B fails with a spurious [`PropertyError::IllegalAccess`]. B then restores the `true` it saw,
///   leaving the member accessible for good.
///
/// Serialize writes through non-public members externally if either outcome matters.
pub struct SyncPropertySetter<T: 'static> {
    target_type:     TypeDescriptor<T>,
    cached_mutators: Mutex<HashMap<String, Mutator<T>>>,
}

impl<T: 'static> SyncPropertySetter<T> {
    pub fn new(target_type: TypeDescriptor<T>) -> Self {
        Self {
            target_type,
            cached_mutators: Mutex::new(HashMap::new()),
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

    pub fn set_property<V: Any + Send>(&self, property: &str, value: V, target: &mut T) -> Result<(), PropertyError> {
        self.set_property_boxed(property, Box::new(value), target)
    }

    pub fn set_property_boxed(&self, property: &str, value: Value, target: &mut T) -> Result<(), PropertyError> {
        let mutator = Mutator::resolve(&self.target_type, property)?;
        self.cached_mutators
            .lock()
            .insert(mutator.property().to_string(), mutator.clone());
        mutator.set(target, value)
    }

    pub fn cached_mutator(&self, property: &str) -> Option<Mutator<T>> {
        self.cached_mutators.lock().get(property).cloned()
    }

    pub fn cached_properties(&self) -> Vec<String> {
        self.cached_mutators.lock().keys().cloned().collect()
    }
}

impl<T: 'static> fmt::Debug for SyncPropertySetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncPropertySetter")
            .field("target_type", &self.target_type.name())
            .field("cached_mutators", &*self.cached_mutators.lock())
            .finish()
    }
}
