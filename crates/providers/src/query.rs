use crate::client::SuggestionClient;
use helpai_core::{PendingFetch, QueryResolution};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Runs suggestion fetches in the background.
///
/// Each [`SuggestionQuery::refetch`] spawns one task; its outcome arrives on
/// the receiver returned by [`SuggestionQuery::new`], tagged with the request
/// id. In-flight fetches are never cancelled.
#[derive(Clone)]
pub struct SuggestionQuery {
    client: Arc<dyn SuggestionClient>,
    tx: mpsc::UnboundedSender<QueryResolution>,
}

impl SuggestionQuery {
    pub fn new(client: Arc<dyn SuggestionClient>) -> (Self, mpsc::UnboundedReceiver<QueryResolution>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Dispatch a fetch; the resolution is delivered on the channel
    pub fn refetch(&self, fetch: PendingFetch) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch(&fetch.request).await;
            if tx.send(QueryResolution { id: fetch.id, result }).is_err() {
                tracing::debug!(request = %fetch.id, "resolution receiver dropped");
            }
        })
    }

    /// Fetch and wait for the outcome directly
    pub async fn fetch_now(&self, fetch: &PendingFetch) -> QueryResolution {
        let result = self.client.fetch(&fetch.request).await;
        QueryResolution { id: fetch.id, result }
    }
}
