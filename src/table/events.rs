//! Change notifications emitted by [`TabularModel`](super::TabularModel).

use crate::data::RowIndex;

/// What changed in the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelEvent {
    /// Everything may have changed; discard row and column indices.
    Reset,

    /// Only the display attributes (emphasis and hover text) of one row
    /// changed. Cell values and row order are untouched.
    RowDisplayChanged { row: RowIndex },
}

impl ModelEvent {
    /// True for events after which a projection must be rebuilt.
    pub fn is_structural(&self) -> bool {
        matches!(self, ModelEvent::Reset)
    }
}

/// Handle returned by [`subscribe`](super::TabularModel::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ModelEvent) + Send + Sync>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&self, event: ModelEvent) {
        for (_, listener) in &self.entries {
            listener(&event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
