//! One-shot continuations returned by the id operations

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::types::IdentityRecord;

type RecordFuture = Pin<Box<dyn Future<Output = IdentityRecord> + Send + 'static>>;

/// Deferred id acquisition.
///
/// Resolves to exactly one record and can only be consumed once. The
/// underlying work never fails: every error has already been turned into a
/// usable (possibly fallback) record.
pub struct IdCallback {
    future: RecordFuture,
}

impl IdCallback {
    /// Wrap a future resolving to a record
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = IdentityRecord> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// Drive the acquisition to completion on the current task
    pub async fn run(self) -> IdentityRecord {
        self.future.await
    }

    /// Run the acquisition on the tokio runtime and hand the record to `done`.
    ///
    /// `done` is called exactly once. Dropping the returned handle does not
    /// cancel the request: it still completes and `done` still fires.
    pub fn invoke<D>(self, done: D) -> tokio::task::JoinHandle<()>
    where
        D: FnOnce(IdentityRecord) + Send + 'static,
    {
        tokio::spawn(async move {
            let record = self.future.await;
            done(record);
        })
    }
}

impl fmt::Debug for IdCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdCallback").finish_non_exhaustive()
    }
}

/// What an id operation hands back to the host
#[derive(Debug, Default)]
pub struct IdResponse {
    /// Record to keep as-is, when no further work is needed
    pub id: Option<IdentityRecord>,
    /// Work to run to obtain the record
    pub callback: Option<IdCallback>,
}

impl IdResponse {
    /// Response carrying deferred work
    pub fn with_callback(callback: IdCallback) -> Self {
        Self {
            id: None,
            callback: Some(callback),
        }
    }

    /// Response keeping a record unchanged, no work to run
    pub fn unchanged(record: IdentityRecord) -> Self {
        Self {
            id: Some(record),
            callback: None,
        }
    }

    /// Run the callback if there is one, otherwise return the kept record
    pub async fn resolve(self) -> Option<IdentityRecord> {
        match self.callback {
            Some(callback) => Some(callback.run().await),
            None => self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_run_yields_record() {
        let callback = IdCallback::new(async { IdentityRecord::confirmed("abc").unwrap() });
        assert_eq!(callback.run().await.id(), "abc");
    }

    #[tokio::test]
    async fn test_invoke_fires_even_if_handle_dropped() {
        let (tx, rx) = oneshot::channel();
        let callback = IdCallback::new(async {
            tokio::task::yield_now().await;
            IdentityRecord::local("late").unwrap()
        });

        drop(callback.invoke(move |record| {
            let _ = tx.send(record);
        }));

        let record = rx.await.unwrap();
        assert_eq!(record.id(), "late");
        assert!(record.needs_sync());
    }

    #[tokio::test]
    async fn test_resolve_prefers_callback() {
        let unchanged = IdResponse::unchanged(IdentityRecord::confirmed("kept").unwrap());
        assert_eq!(unchanged.resolve().await.unwrap().id(), "kept");

        let deferred = IdResponse::with_callback(IdCallback::new(async {
            IdentityRecord::confirmed("fresh").unwrap()
        }));
        assert_eq!(deferred.resolve().await.unwrap().id(), "fresh");

        assert!(IdResponse::default().resolve().await.is_none());
    }
}
