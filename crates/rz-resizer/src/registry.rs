//! Per-thread registry of live resizers.
//!
//! A live resizer stamps its container with
//! [`INSTANCE_ATTRIBUTE`](crate::INSTANCE_ATTRIBUTE) and registers here.
//! The registry holds a strong reference, so a resizer stays active until
//! [`Resizer::remove`](crate::Resizer::remove) even if every handle to it is
//! dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rz_core::alloc::HashMap;

/// Identifies one resizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse the value stored in the container attribute.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Self)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-erased teardown for a registered instance.
pub(crate) trait Detach {
    fn detach(&self);
}

thread_local! {
    static ACTIVE: RefCell<HashMap<InstanceId, Rc<dyn Detach>>> = RefCell::new(HashMap::new());
}

pub(crate) fn register(id: InstanceId, instance: Rc<dyn Detach>) {
    ACTIVE.with(|active| {
        active.borrow_mut().insert(id, instance);
    });
}

/// Drop the registry's reference. Returns it so the caller decides when it
/// is released.
pub(crate) fn unregister(id: InstanceId) -> Option<Rc<dyn Detach>> {
    ACTIVE.with(|active| active.borrow_mut().remove(&id))
}

/// Tear down a registered instance. The registry borrow is released before
/// the instance runs its teardown.
pub(crate) fn detach(id: InstanceId) -> bool {
    match unregister(id) {
        Some(instance) => {
            instance.detach();
            true
        }
        None => false,
    }
}

pub fn is_active(id: InstanceId) -> bool {
    ACTIVE.with(|active| active.borrow().contains_key(&id))
}

/// Number of live resizers on this thread.
pub fn active_count() -> usize {
    ACTIVE.with(|active| active.borrow().len())
}
