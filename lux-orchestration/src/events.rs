//! # Event Bus
//!
//! Fan-out MPMC de [`LuxEvent`] sobre canais crossbeam. `emit` nunca bloqueia:
//! um assinante com canal cheio perde o evento, o loop não espera observadores.
//!
//! ## Uso
//!
//! ```ignore
//! use lux_orchestration::events::{EventBus, EventFilter};
//!
//! let bus = EventBus::new();
//! let failures = bus.subscribe_filtered(EventFilter::Failures);
//!
//! // Consumer thread
//! for event in failures.iter() {
//!     // ...
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use crossbeam_utils::sync::ShardedLock;
use lux_core::events::{EventKind, LuxEvent};

/// Filtro de eventos
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Todos os eventos
    All,
    /// Eventos de uma categoria
    Kind(EventKind),
    /// Falhas de aquisição, computação e transmissão
    Failures,
    /// Eventos de um ciclo específico
    Cycle(u64),
}

impl EventFilter {
    /// Verifica se um evento passa pelo filtro
    pub fn matches(&self, event: &LuxEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kind(kind) => event.kind() == *kind,
            EventFilter::Failures => event.is_failure(),
            EventFilter::Cycle(cycle) => event.cycle() == Some(*cycle),
        }
    }
}

/// Sender com filtro associado
#[derive(Debug)]
struct FilteredSender {
    id: u64,
    filter: EventFilter,
    sender: Sender<LuxEvent>,
}

/// Bus de eventos
#[derive(Debug, Clone)]
pub struct EventBus {
    senders: Arc<ShardedLock<Vec<FilteredSender>>>,
    event_count: Arc<AtomicU64>,
    next_id: Arc<AtomicU64>,
    /// Capacidade por assinante (0 = ilimitado)
    capacity: usize,
}

/// Assinatura (lado receptor)
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<LuxEvent>,
    filter: EventFilter,
}

impl EventBus {
    /// Bus com canais ilimitados
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Bus com canais limitados (eventos excedentes são descartados)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            senders: Arc::new(ShardedLock::new(Vec::new())),
            event_count: Arc::new(AtomicU64::new(0)),
            next_id: Arc::new(AtomicU64::new(0)),
            capacity,
        }
    }

    /// Assina todos os eventos
    pub fn subscribe(&self) -> Subscription {
        self.subscribe_filtered(EventFilter::All)
    }

    /// Assina com filtro
    pub fn subscribe_filtered(&self, filter: EventFilter) -> Subscription {
        let (sender, receiver) = if self.capacity > 0 {
            bounded(self.capacity)
        } else {
            unbounded()
        };

        self.senders
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(FilteredSender {
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                filter: filter.clone(),
                sender,
            });

        Subscription { receiver, filter }
    }

    /// Emite evento para os assinantes compatíveis (não bloqueante)
    ///
    /// Assinantes cujas `Subscription` foram descartadas são removidos aqui.
    pub fn emit(&self, event: LuxEvent) {
        self.event_count.fetch_add(1, Ordering::Relaxed);

        let mut disconnected = Vec::new();
        {
            let senders = self.senders.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            for fs in senders.iter() {
                if !fs.filter.matches(&event) {
                    continue;
                }
                match fs.sender.try_send(event.clone()) {
                    // Canal cheio: evento perdido para este assinante
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => disconnected.push(fs.id),
                }
            }
        }

        if !disconnected.is_empty() {
            self.senders
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .retain(|fs| !disconnected.contains(&fs.id));
        }
    }

    /// Número de eventos emitidos
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }

    /// Número de assinantes registrados
    pub fn subscriber_count(&self) -> usize {
        self.senders
            .read()
            .map(|s| s.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// Próximo evento, se já disponível
    pub fn try_recv(&self) -> Option<LuxEvent> {
        self.receiver.try_recv().ok()
    }

    /// Aguarda um evento por até `timeout`
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LuxEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Itera bloqueando até o bus ser descartado
    pub fn iter(&self) -> impl Iterator<Item = LuxEvent> + '_ {
        self.receiver.iter()
    }

    /// Esvazia os eventos pendentes
    pub fn drain(&self) -> Vec<LuxEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::types::{LuminosityPercentage, RawSample};
    use lux_core::events::ConversionKind;

    fn sampled(cycle: u64) -> LuxEvent {
        LuxEvent::Sampled {
            cycle,
            raw: RawSample(100),
            percentage: LuminosityPercentage::new(71).unwrap(),
            conversion: ConversionKind::Interpolated,
        }
    }

    fn failed(cycle: u64) -> LuxEvent {
        LuxEvent::TransmissionFailed {
            cycle,
            message: "unreachable".into(),
        }
    }

    #[test]
    fn test_event_bus_new() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.event_count(), 0);
    }

    #[test]
    fn test_emit_to_all() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.emit(sampled(1));

        assert_eq!(a.try_recv(), Some(sampled(1)));
        assert_eq!(b.try_recv(), Some(sampled(1)));
        assert_eq!(bus.event_count(), 1);
    }

    #[test]
    fn test_filters() {
        let bus = EventBus::new();
        let failures = bus.subscribe_filtered(EventFilter::Failures);
        let sampled_only = bus.subscribe_filtered(EventFilter::Kind(EventKind::Sampled));
        let cycle_two = bus.subscribe_filtered(EventFilter::Cycle(2));

        bus.emit(sampled(1));
        bus.emit(failed(2));

        assert_eq!(failures.drain(), vec![failed(2)]);
        assert_eq!(sampled_only.drain(), vec![sampled(1)]);
        assert_eq!(cycle_two.drain(), vec![failed(2)]);
        assert_eq!(cycle_two.filter(), &EventFilter::Cycle(2));
    }

    #[test]
    fn test_bounded_drops_when_full() {
        let bus = EventBus::with_capacity(1);
        let sub = bus.subscribe();

        bus.emit(sampled(1));
        bus.emit(sampled(2));

        assert_eq!(sub.drain(), vec![sampled(1)]);
        assert_eq!(bus.event_count(), 2);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new();
        bus.emit(sampled(1));
        assert_eq!(bus.event_count(), 1);
    }

    #[test]
    fn test_dropped_subscriptions_are_pruned() {
        let bus = EventBus::new();
        let keep = bus.subscribe();
        let dropped = bus.subscribe();
        drop(dropped);
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(sampled(1));
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.drain().len(), 1);
    }

    #[test]
    fn test_clone_shares_subscribers() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        let clone = bus.clone();

        clone.emit(sampled(7));
        assert_eq!(sub.recv_timeout(Duration::from_millis(10)), Some(sampled(7)));
        assert_eq!(bus.event_count(), 1);
    }
}
