use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::types::RecordId;

/// events emitted by the ledger on every mutation or rejected mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    TransactionAdded {
        record_id: RecordId,
        date: NaiveDate,
        principal: Money,
        timestamp: DateTime<Utc>,
    },
    TransactionRejected {
        reason: String,
        timestamp: DateTime<Utc>,
    },
    CustomRateChanged {
        old_rate: Option<Rate>,
        new_rate: Option<Rate>,
        timestamp: DateTime<Utc>,
    },
    LedgerReset {
        records_discarded: usize,
        timestamp: DateTime<Utc>,
    },
}

/// handle returned by [`EventStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

type Observer = Box<dyn FnMut(&LedgerEvent)>;

/// event store for collecting events and notifying observers
#[derive(Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// record the event and hand it to every observer, in subscription order
    pub fn emit(&mut self, event: LedgerEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
        self.events.push(event);
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&LedgerEvent) + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("events", &self.events)
            .field("observers", &self.observers.len())
            .finish()
    }
}
