//! Discovery timer backed by the browser event loop.

use widget_host::{DiscoveryTimer, WidgetFuture};

#[derive(Debug, Clone, Copy, Default)]
/// `setTimeout`-backed discovery timer. Resolves immediately outside `wasm32`.
pub struct BrowserDiscoveryTimer;

impl DiscoveryTimer for BrowserDiscoveryTimer {
    fn wait(&self, interval_ms: u32) -> WidgetFuture<'_, ()> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                gloo_timers::future::TimeoutFuture::new(interval_ms).await;
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = interval_ms;
            }
        })
    }
}
