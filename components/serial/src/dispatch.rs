//! Interrupt dispatch - routes peripheral vectors to their channel
//!
//! Each vector entry point looks up the source registered for its vector and
//! lets it service the interrupt. Registration must happen before the
//! matching channel is configured, because `configure` arms the interrupt.

use core::cell::RefCell;

use critical_section::Mutex;
use lightboard_platform::{board::PERIPHERAL_VECTORS, Vector};

use crate::{Result, SerialError};

/// Something an interrupt vector can be routed to
pub trait InterruptSource: Sync {
    /// Vector this source is wired to
    fn vector(&self) -> Vector;

    /// Handle one interrupt
    ///
    /// Runs in interrupt context: must not block and must stay O(1).
    fn service(&self);
}

type Slot = Option<&'static dyn InterruptSource>;

/// Vector -> source table, one slot per peripheral vector
pub struct DispatchTable {
    slots: Mutex<RefCell<[Slot; PERIPHERAL_VECTORS]>>,
}

impl DispatchTable {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new([None; PERIPHERAL_VECTORS])),
        }
    }

    /// Bind `source` to its vector
    ///
    /// # Errors
    /// - `VectorOutOfRange` if the vector is not a peripheral vector
    /// - `VectorAlreadyRegistered` if another source holds the slot
    pub fn register(&self, source: &'static dyn InterruptSource) -> Result<()> {
        let vector = source.vector();
        let index = Self::index(vector)?;

        critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            if slots[index].is_some() {
                return Err(SerialError::VectorAlreadyRegistered { vector });
            }
            slots[index] = Some(source);
            Ok(())
        })?;

        log::debug!("dispatch: vector {} registered", vector);
        Ok(())
    }

    pub fn is_registered(&self, vector: Vector) -> bool {
        self.lookup(vector).is_some()
    }

    /// Whether `source` itself (not just something) holds its vector
    pub fn is_bound(&self, source: &dyn InterruptSource) -> bool {
        match self.lookup(source.vector()) {
            Some(bound) => core::ptr::addr_eq(bound, source),
            None => false,
        }
    }

    /// Service `vector`, returning false if nothing is registered for it
    pub fn dispatch(&self, vector: Vector) -> bool {
        match self.lookup(vector) {
            Some(source) => {
                source.service();
                true
            }
            None => false,
        }
    }

    fn lookup(&self, vector: Vector) -> Slot {
        let index = Self::index(vector).ok()?;
        critical_section::with(|cs| self.slots.borrow_ref(cs)[index])
    }

    fn index(vector: Vector) -> Result<usize> {
        let index = vector as usize;
        if index < PERIPHERAL_VECTORS {
            Ok(index)
        } else {
            Err(SerialError::VectorOutOfRange { vector })
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::boxed::Box;

    struct CountingSource {
        vector: Vector,
        serviced: AtomicU32,
    }

    fn leaked_source(vector: Vector) -> &'static CountingSource {
        Box::leak(Box::new(CountingSource {
            vector,
            serviced: AtomicU32::new(0),
        }))
    }

    impl InterruptSource for CountingSource {
        fn vector(&self) -> Vector {
            self.vector
        }

        fn service(&self) {
            self.serviced.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let table = DispatchTable::new();
        let source = leaked_source(17);

        assert!(!table.dispatch(17));
        table.register(source).unwrap();
        assert!(table.is_registered(17));
        assert!(table.is_bound(source));

        assert!(table.dispatch(17));
        assert!(table.dispatch(17));
        assert_eq!(source.serviced.load(Ordering::Relaxed), 2);
        assert!(!table.dispatch(18));
    }

    #[test]
    fn test_double_registration() {
        let table = DispatchTable::new();
        table.register(leaked_source(8)).unwrap();

        let other = leaked_source(8);
        assert_eq!(
            table.register(other),
            Err(SerialError::VectorAlreadyRegistered { vector: 8 })
        );
        assert!(table.is_registered(8));
        assert!(!table.is_bound(other));
    }

    #[test]
    fn test_vector_out_of_range() {
        let table = DispatchTable::new();
        let source = leaked_source(PERIPHERAL_VECTORS as Vector);
        assert_eq!(
            table.register(source),
            Err(SerialError::VectorOutOfRange { vector: PERIPHERAL_VECTORS as Vector })
        );
        assert!(!table.dispatch(200));
    }
}
