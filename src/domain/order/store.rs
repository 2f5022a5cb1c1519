use std::sync::Arc;
use tokio::sync::watch;

use super::aggregate::Order;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;

// ============================================================================
// Order Store
// ============================================================================
//
// Orchestrates: Command → Order → Events → Observers / Snapshot subscribers
//
// Presentation layers either register an observer to receive each event, or
// hold a watch receiver that always yields the latest order.
//
// ============================================================================

/// Receives every event applied to the order, after it has been applied.
pub trait OrderObserver: Send + Sync {
    fn order_changed(&self, order: &Order, event: &OrderEvent);
}

pub struct OrderStore {
    order: Order,
    observers: Vec<Arc<dyn OrderObserver>>,
    snapshots: watch::Sender<Order>,
}

impl OrderStore {
    pub fn new(order: Order) -> Self {
        let (snapshots, _) = watch::channel(order.clone());
        Self {
            order,
            observers: Vec::new(),
            snapshots,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn snapshot(&self) -> Order {
        self.order.clone()
    }

    pub fn add_observer(&mut self, observer: Arc<dyn OrderObserver>) {
        self.observers.push(observer);
    }

    pub fn subscribe(&self) -> watch::Receiver<Order> {
        self.snapshots.subscribe()
    }

    /// Handle a command, apply the resulting events and notify listeners.
    /// A rejected command leaves the order untouched.
    pub fn execute(&mut self, command: OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        let events = match self.order.handle_command(&command) {
            Ok(events) => events,
            Err(e) => {
                tracing::debug!(command = ?command, error = %e, "Order command rejected");
                return Err(e);
            }
        };

        for event in &events {
            self.order.apply_event(event);
            tracing::trace!(event_type = event.event_type(), "Order event applied");

            for observer in &self.observers {
                observer.order_changed(&self.order, event);
            }
        }

        if !events.is_empty() {
            self.snapshots.send_replace(self.order.clone());
        }

        Ok(events)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new(Order::default())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
