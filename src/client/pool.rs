//! Bounded pool that runs client operations as independent tasks.
//!
//! Every operation is spawned on the tokio runtime and handed back as a
//! [`TaskHandle`]. At most `max_concurrency` operations run at once; the rest
//! wait for a permit. Tasks are unordered relative to each other.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use anyhow::{Context, Result, anyhow};
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Spawns operations on a runtime while capping how many run concurrently.
#[derive(Debug, Clone)]
pub struct TaskPool {
  runtime: Handle,
  permits: Arc<Semaphore>,
  max_concurrency: usize,
}

impl TaskPool {
  /// Create a pool spawning on `runtime`.
  ///
  /// # Errors
  /// Returns an error if `max_concurrency` is zero.
  pub fn new(runtime: Handle, max_concurrency: usize) -> Result<Self> {
    if max_concurrency == 0 {
      return Err(anyhow!("Task pool size must be at least 1"));
    }

    Ok(Self {
      runtime,
      permits: Arc::new(Semaphore::new(max_concurrency)),
      max_concurrency,
    })
  }

  /// Create a pool spawning on the runtime of the calling context.
  ///
  /// # Errors
  /// Returns an error when called outside a tokio runtime or if
  /// `max_concurrency` is zero.
  pub fn current(max_concurrency: usize) -> Result<Self> {
    let runtime = Handle::try_current().context("Task pool requires a running tokio runtime")?;
    Self::new(runtime, max_concurrency)
  }

  pub fn max_concurrency(&self) -> usize {
    self.max_concurrency
  }

  /// Submit an operation and return a handle to its eventual result.
  pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
  where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
  {
    let permits = Arc::clone(&self.permits);
    let join = self.runtime.spawn(async move {
      let _permit = permits.acquire_owned().await.context("Task pool was closed")?;
      task.await
    });

    TaskHandle { join }
  }
}

/// Future resolving to the result of a submitted operation.
///
/// Dropping the handle does not stop the operation; call
/// [`TaskHandle::cancel`] for that.
#[derive(Debug)]
#[must_use = "a task handle does nothing unless awaited or cancelled"]
pub struct TaskHandle<T> {
  join: JoinHandle<Result<T>>,
}

impl<T> TaskHandle<T> {
  /// Request cancellation. Best effort: an in-flight HTTP request may still
  /// reach the server. Awaiting a cancelled handle yields an error.
  pub fn cancel(&self) {
    self.join.abort();
  }

  pub fn is_finished(&self) -> bool {
    self.join.is_finished()
  }
}

impl<T> Future for TaskHandle<T> {
  type Output = Result<T>;

  fn poll(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
    let this = self.get_mut();
    match Pin::new(&mut this.join).poll(cx) {
      Poll::Pending => Poll::Pending,
      Poll::Ready(Ok(result)) => Poll::Ready(result),
      Poll::Ready(Err(error)) if error.is_cancelled() => Poll::Ready(Err(anyhow!("Operation was cancelled"))),
      Poll::Ready(Err(error)) => Poll::Ready(Err(anyhow!(error).context("Operation panicked"))),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::time::Duration;

  use super::*;

  #[test]
  fn test_pool_rejects_zero_size() {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    assert!(TaskPool::new(runtime.handle().clone(), 0).is_err());
  }

  #[test]
  fn test_current_requires_runtime() {
    assert!(TaskPool::current(2).is_err());
  }

  #[tokio::test]
  async fn test_submit_returns_result() {
    let pool = TaskPool::current(2).unwrap();
    let value = pool.submit(async { Ok(21 * 2) }).await.unwrap();
    assert_eq!(value, 42);
  }

  #[tokio::test]
  async fn test_submit_propagates_errors() {
    let pool = TaskPool::current(1).unwrap();
    let error = pool
      .submit(async { Err::<(), _>(anyhow!("boom")) })
      .await
      .unwrap_err();
    assert_eq!(error.to_string(), "boom");
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn test_pool_caps_concurrency() {
    let pool = TaskPool::current(2).unwrap();
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..6)
      .map(|_| {
        let running = Arc::clone(&running);
        let peak = Arc::clone(&peak);
        pool.submit(async move {
          let now = running.fetch_add(1, Ordering::SeqCst) + 1;
          peak.fetch_max(now, Ordering::SeqCst);
          tokio::time::sleep(Duration::from_millis(20)).await;
          running.fetch_sub(1, Ordering::SeqCst);
          Ok(())
        })
      })
      .collect();

    for handle in handles {
      handle.await.unwrap();
    }

    assert!(peak.load(Ordering::SeqCst) <= 2);
  }

  #[tokio::test]
  async fn test_cancelled_task_yields_error() {
    let pool = TaskPool::current(1).unwrap();
    let handle = pool.submit(async {
      tokio::time::sleep(Duration::from_secs(30)).await;
      Ok(())
    });
    handle.cancel();

    let error = handle.await.unwrap_err();
    assert!(error.to_string().contains("cancelled"));
  }
}
