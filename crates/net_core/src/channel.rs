//! Single-producer queue handing decoded net events to the simulation thread.
//!
//! Wraps `std::sync::mpsc` and exposes non-blocking drain helpers; the
//! simulation consumes the queue once per tick, so no entity state is ever
//! mutated from two threads.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::location::LocationUpdate;

/// One decoded message from the transport, keyed by entity id.
#[derive(Debug, Clone, PartialEq)]
pub enum NetEvent {
    Spawn {
        id: u8,
        name: String,
        skin: String,
        update: LocationUpdate,
    },
    Despawn {
        id: u8,
    },
    Location {
        id: u8,
        update: LocationUpdate,
        interpolate: bool,
    },
    TabSet {
        id: u8,
        player: String,
        list: String,
        group: String,
        rank: u8,
    },
    TabRemove {
        id: u8,
    },
}

#[derive(Clone)]
pub struct Tx(Sender<NetEvent>);
pub struct Rx(Receiver<NetEvent>);

/// Create a sender/receiver pair. The underlying channel is unbounded.
#[must_use]
pub fn channel() -> (Tx, Rx) {
    let (s, r) = mpsc::channel::<NetEvent>();
    (Tx(s), Rx(r))
}

impl Tx {
    /// Try to send; returns false if the receiver is dropped.
    #[must_use]
    pub fn try_send(&self, ev: NetEvent) -> bool {
        self.0.send(ev).is_ok()
    }
}

impl Rx {
    /// Non-blocking receive of a single event.
    #[must_use]
    pub fn try_recv(&self) -> Option<NetEvent> {
        self.0.try_recv().ok()
    }

    /// Drain all currently queued events.
    #[must_use]
    pub fn drain(&self) -> Vec<NetEvent> {
        let mut out = Vec::new();
        while let Some(ev) = self.try_recv() {
            out.push(ev);
        }
        out
    }
}
