//! Definição das rotas da API

pub mod auth_routes;
pub mod checklist_routes;
pub mod maintenance_routes;
pub mod report_routes;
pub mod vehicle_routes;

use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::Event;
use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::events::CollectionChange;
use crate::utils::errors::AppResult;

/// Stream de snapshots para os endpoints de subscription (SSE).
///
/// Emite o snapshot inicial imediatamente e, a cada mudança publicada na
/// coleção observada, reconsulta e emite o conjunto completo de novo —
/// mesma semântica de um live-query. Se o canal laggar, re-sincroniza com
/// um snapshot fresco; se o canal fechar ou a reconsulta falhar, o stream
/// termina e o cliente reconecta.
pub(crate) fn snapshot_stream<T, F, Fut>(
    initial: T,
    receiver: broadcast::Receiver<CollectionChange>,
    collection: &'static str,
    fetch: F,
) -> impl Stream<Item = Result<Event, Infallible>>
where
    T: Serialize + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = AppResult<T>> + Send,
{
    stream::unfold(
        (Some(initial), receiver, fetch),
        move |(mut pending, mut receiver, fetch)| async move {
            let snapshot = match pending.take() {
                Some(snapshot) => snapshot,
                None => {
                    loop {
                        match receiver.recv().await {
                            Ok(change) if change.collection == collection => break,
                            Ok(_) => continue,
                            Err(broadcast::error::RecvError::Lagged(_)) => break,
                            Err(broadcast::error::RecvError::Closed) => return None,
                        }
                    }
                    match fetch().await {
                        Ok(snapshot) => snapshot,
                        Err(e) => {
                            tracing::warn!("Encerrando stream de subscription: {}", e);
                            return None;
                        }
                    }
                }
            };

            match Event::default().event(collection).json_data(&snapshot) {
                Ok(event) => Some((Ok(event), (pending, receiver, fetch))),
                Err(e) => {
                    tracing::error!("Erro serializando snapshot de {}: {}", collection, e);
                    None
                }
            }
        },
    )
}
