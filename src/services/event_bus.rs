// src/services/event_bus.rs

use tokio::sync::broadcast;

use crate::models::events::DomainEvent;

/// Barramento interno de eventos de domínio. Os agregados publicam aqui
/// em vez de empurrar callbacks do SDK: quem quiser "tempo real" assina
/// o barramento e re-busca o agregado afetado.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publicar sem assinantes não é erro.
    pub fn publish(&self, event: DomainEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Evento de domínio publicado sem assinantes");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::{CartEvent, DomainEvent};
    use uuid::Uuid;

    #[tokio::test]
    async fn assinante_recebe_evento_publicado() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let user_id = Uuid::new_v4();

        bus.publish(DomainEvent::Cart(CartEvent::Changed { user_id }));

        match rx.recv().await.unwrap() {
            DomainEvent::Cart(CartEvent::Changed { user_id: got }) => assert_eq!(got, user_id),
            other => panic!("evento inesperado: {:?}", other),
        }
    }

    #[test]
    fn publicar_sem_assinantes_nao_falha() {
        let bus = EventBus::new(8);
        bus.publish(DomainEvent::Cart(CartEvent::FavoritesChanged {
            user_id: Uuid::new_v4(),
        }));
    }
}
