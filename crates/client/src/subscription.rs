//! Latest-wins stream collection.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, OptionFuture};
use futures::stream::{Stream, StreamExt};
use tokio::sync::Notify;

/// Drive `upstream`, handing each element to `handler`.
///
/// At most one handler runs at a time. When a new element arrives while the
/// previous handler is still pending, that handler is dropped (cancelled) and
/// the new one takes its place. After the upstream ends the last handler runs
/// to completion. A notification on `shutdown` stops everything, dropping the
/// upstream and any in-flight handler.
pub async fn collect_latest<S, F, Fut>(upstream: S, shutdown: Arc<Notify>, mut handler: F)
where
    S: Stream,
    F: FnMut(S::Item) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::pin!(upstream);
    let mut inflight: Option<BoxFuture<'static, ()>> = None;

    loop {
        tokio::select! {
            biased;

            _ = shutdown.notified() => {
                tracing::debug!(cancelled = inflight.is_some(), "collector shut down");
                return;
            }

            Some(()) = OptionFuture::from(inflight.as_mut()), if inflight.is_some() => {
                inflight = None;
            }

            next = upstream.next() => match next {
                Some(item) => {
                    if inflight.replace(handler(item).boxed()).is_some() {
                        tracing::debug!("superseded in-flight handler");
                    }
                }
                None => break,
            },
        }
    }

    if let Some(last) = inflight {
        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                tracing::debug!(cancelled = true, "collector shut down");
            }
            _ = last => {}
        }
    }
}
