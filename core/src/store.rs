use core::fmt;
use ndarray::Array2;

use crate::*;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(Coord2)>;

/// Synchronous observer list, invoked on the mutating call's own stack.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self, subscriber: impl FnMut(Coord2) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn notify(&mut self, coords: Coord2) {
        log::trace!(
            "cell {:?} changed, notifying {} subscriber(s)",
            coords,
            self.subscribers.len()
        );
        for (_, subscriber) in &mut self.subscribers {
            subscriber(coords);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Fixed-size cell contents plus the observers of their changes.
///
/// Knows nothing about bounds beyond its own shape, callers check coordinates through
/// [`GridGeometry::is_valid`] first.
#[derive(Debug)]
pub struct CellStore<T> {
    cells: Array2<T>,
    notifier: ChangeNotifier,
}

impl<T> CellStore<T> {
    pub fn from_fn(size: Coord2, mut init: impl FnMut(Coord2) -> T) -> Self {
        let shape = (size.0.max(0) as usize, size.1.max(0) as usize);
        let cells = Array2::from_shape_fn(shape, |(col, row)| init((col as Coord, row as Coord)));
        Self {
            cells,
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn cells(&self) -> &Array2<T> {
        &self.cells
    }

    pub(crate) fn get(&self, coords: Coord2) -> &T {
        &self.cells[coords.to_nd_index()]
    }

    /// Stores `value` and notifies subscribers.
    pub(crate) fn set(&mut self, coords: Coord2, value: T) {
        self.cells[coords.to_nd_index()] = value;
        self.notifier.notify(coords);
    }

    pub fn notifier(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }
}
