//! Background work for the UI thread.
//!
//! Network calls run off the UI thread; their results come back through a
//! `flume` channel that the owning page drains once per frame.

use std::future::Future;

/// Spawns futures and wakes egui when they finish.
#[derive(Clone)]
pub struct TaskRunner {
    #[cfg(not(target_arch = "wasm32"))]
    handle: tokio::runtime::Handle,
    // Kept alive for as long as any runner clone exists.
    #[cfg(not(target_arch = "wasm32"))]
    _runtime: Option<std::sync::Arc<tokio::runtime::Runtime>>,
}

impl TaskRunner {
    /// Reuse the ambient tokio runtime when there is one, otherwise start our own.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> std::io::Result<Self> {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            return Ok(Self {
                handle,
                _runtime: None,
            });
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("erpdesk-io")
            .enable_all()
            .build()?;
        Ok(Self {
            handle: runtime.handle().clone(),
            _runtime: Some(std::sync::Arc::new(runtime)),
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Run `future` in the background and send its output to `tx`.
    pub fn spawn<T, F>(&self, ctx: &egui::Context, tx: flume::Sender<T>, future: F)
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let ctx = ctx.clone();
        let task = async move {
            let output = future.await;
            if tx.send(output).is_err() {
                log::debug!("task finished after its receiver was dropped");
            }
            ctx.request_repaint();
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(self.handle.spawn(task));
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }
    }
}
