//! Thing lookup port.

use std::sync::Arc;

use thinghub_domain::thing::Thing;

/// Read access to the live things of the hub.
pub trait ThingRepository: Send + Sync {
    /// Every thing, in a stable order.
    fn load_all(&self) -> Vec<Arc<dyn Thing>>;

    /// The thing with `id`, if any.
    fn load(&self, id: &str) -> Option<Arc<dyn Thing>>;
}

impl<T: ThingRepository + ?Sized> ThingRepository for Arc<T> {
    fn load_all(&self) -> Vec<Arc<dyn Thing>> {
        (**self).load_all()
    }

    fn load(&self, id: &str) -> Option<Arc<dyn Thing>> {
        (**self).load(id)
    }
}
