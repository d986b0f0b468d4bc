//! Recording doubles for controller collaborators.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use inertia_foundation::{HapticError, HapticFeedback, ItemId, ScrollState};

/// Haptics that remember every pulse, optionally failing each one.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: RefCell<Vec<u32>>,
    failing: Cell<bool>,
}

impl RecordingHaptics {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A motor that reports a platform error for every pulse.
    pub fn failing() -> Rc<Self> {
        let haptics = Self::default();
        haptics.failing.set(true);
        Rc::new(haptics)
    }

    /// Durations of every requested pulse, failed ones included.
    pub fn pulses(&self) -> Vec<u32> {
        self.pulses.borrow().clone()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn vibrate(&self, duration_ms: u32) -> Result<(), HapticError> {
        self.pulses.borrow_mut().push(duration_ms);
        if self.failing.get() {
            Err(HapticError::Platform("motor unavailable".into()))
        } else {
            Ok(())
        }
    }
}

/// Collects item ids handed to a selection or long-press callback.
#[derive(Clone, Debug, Default)]
pub struct RecordingSelection {
    items: Rc<RefCell<Vec<ItemId>>>,
}

impl RecordingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> impl Fn(ItemId) + 'static {
        let items = Rc::clone(&self.items);
        move |item| items.borrow_mut().push(item)
    }

    pub fn items(&self) -> Vec<ItemId> {
        self.items.borrow().clone()
    }

    pub fn last(&self) -> Option<ItemId> {
        self.items.borrow().last().copied()
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }
}

/// Every offset a [`ScrollState`] reported, in order.
#[derive(Debug)]
pub struct OffsetTrace {
    scroll: ScrollState,
    listener: u64,
    offsets: Rc<RefCell<Vec<f32>>>,
}

impl OffsetTrace {
    pub fn attach(scroll: &ScrollState) -> Self {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&offsets);
        let listener = scroll.add_offset_listener(move |offset| sink.borrow_mut().push(offset));
        Self {
            scroll: scroll.clone(),
            listener,
            offsets,
        }
    }

    pub fn offsets(&self) -> Vec<f32> {
        self.offsets.borrow().clone()
    }

    pub fn clear(&self) {
        self.offsets.borrow_mut().clear();
    }

    /// Per-change deltas between consecutive recorded offsets.
    pub fn deltas(&self) -> Vec<f32> {
        self.offsets
            .borrow()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }
}

impl Drop for OffsetTrace {
    fn drop(&mut self) {
        self.scroll.remove_offset_listener(self.listener);
    }
}
