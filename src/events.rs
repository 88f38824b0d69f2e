//! Hub de eventos de mudança de coleção
//!
//! Canal `tokio::sync::broadcast` compartilhado via `AppState`. Toda escrita
//! bem-sucedida publica um [`CollectionChange`]; os endpoints de subscription
//! (SSE) reagem reconsultando o snapshot completo da coleção, reproduzindo a
//! semântica de um live-query: snapshot inteiro a cada mudança do conjunto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Nomes fixos das coleções persistidas
pub mod collections {
    pub const VEHICLES: &str = "vehicles";
    pub const CHECKLISTS: &str = "checklists";
    pub const MAINTENANCE_REQUESTS: &str = "maintenanceRequests";
    pub const USERS: &str = "users";
}

/// Notificação de que o conjunto de documentos de uma coleção mudou
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionChange {
    pub collection: String,
    pub timestamp: DateTime<Utc>,
}

impl CollectionChange {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Capacidade padrão do canal de broadcast
const DEFAULT_CAPACITY: usize = 256;

/// Hub de fan-out em processo
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<CollectionChange>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publicar uma mudança de coleção. Sem assinantes não é erro.
    pub fn publish(&self, change: CollectionChange) {
        let _ = self.sender.send(change);
    }

    /// Atalho para publicar mudança em várias coleções de uma vez
    /// (uma submissão de checklist toca três coleções).
    pub fn publish_all(&self, collections: &[&str]) {
        for c in collections {
            self.publish(CollectionChange::new(c));
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChange> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assinante_recebe_mudancas_publicadas() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(CollectionChange::new(collections::VEHICLES));

        let change = rx.recv().await.unwrap();
        assert_eq!(change.collection, "vehicles");
    }

    #[tokio::test]
    async fn publish_all_emite_um_evento_por_colecao() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish_all(&[
            collections::CHECKLISTS,
            collections::VEHICLES,
            collections::MAINTENANCE_REQUESTS,
        ]);

        assert_eq!(rx.recv().await.unwrap().collection, "checklists");
        assert_eq!(rx.recv().await.unwrap().collection, "vehicles");
        assert_eq!(rx.recv().await.unwrap().collection, "maintenanceRequests");
    }

    #[test]
    fn publicar_sem_assinantes_nao_falha() {
        let bus = EventBus::default();
        bus.publish(CollectionChange::new(collections::USERS));
    }
}
