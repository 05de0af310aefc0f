use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::pointer::PointerSample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerSample),
    PointerMove(PointerSample),
    /// Released anywhere in the window, not only over the surface.
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of one subscription to an [`InputPort`].
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    events: Receiver<InputEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Events published since the last drain, in order.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.try_iter()
    }
}

/// Fans host input events out to every subscriber.
///
/// The host publishes; the engine subscribes. Neither side needs the other
/// to exist, which keeps the engine testable without a windowing system.
#[derive(Debug, Default)]
pub struct InputPort {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Sender<InputEvent>)>,
}

impl InputPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let (tx, rx) = unbounded();
        self.subscribers.push((id, tx));
        Subscription { id, events: rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    pub fn publish(&mut self, event: InputEvent) {
        // Drop subscribers whose receiving end is gone.
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
