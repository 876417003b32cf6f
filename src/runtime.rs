//! Runtime abstraction layer for async operations
//!
//! The switcher only needs two things from a runtime: a way to wait for a
//! while without blocking the page, and a way to start a task on the current
//! thread. Both are provided for Tokio (native tools and tests) and for the
//! browser (WASM).

use crate::prelude::{Duration, Future};

#[cfg(not(any(feature = "tokio-runtime", feature = "wasm")))]
compile_error!("either the `tokio-runtime` or the `wasm` feature must be enabled");

/// Starts `future` on the current thread without waiting for it
#[cfg(feature = "wasm")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    log::trace!("runtime::spawn_local() - spawning browser task");
    wasm_bindgen_futures::spawn_local(future);
}

/// Starts `future` on the current thread without waiting for it.
///
/// Must be called from within a `tokio::task::LocalSet`.
#[cfg(all(feature = "tokio-runtime", not(feature = "wasm")))]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    log::trace!("runtime::spawn_local() - spawning local tokio task");
    tokio::task::spawn_local(future);
}

/// Unified async delay function that works across runtimes
pub async fn async_delay(duration: Duration) {
    #[cfg(feature = "wasm")]
    {
        wasm_delay(duration).await;
    }

    #[cfg(all(feature = "tokio-runtime", not(feature = "wasm")))]
    {
        tokio::time::sleep(duration).await;
    }
}

/// Resolves after `duration` through `window.setTimeout`
#[cfg(feature = "wasm")]
async fn wasm_delay(duration: Duration) {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            // No timer available, resolve right away rather than hang
            let _ = resolve.call0(&wasm_bindgen::JsValue::UNDEFINED);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(feature = "tokio-runtime", not(feature = "wasm")))]
    #[::tokio::test]
    async fn test_async_delay_waits() {
        let start = std::time::Instant::now();
        async_delay(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[cfg(all(feature = "tokio-runtime", not(feature = "wasm")))]
    #[::tokio::test]
    async fn test_spawn_local_runs_task() {
        let local = tokio::task::LocalSet::new();
        let flag = std::rc::Rc::new(std::cell::Cell::new(false));
        let seen = flag.clone();

        local
            .run_until(async move {
                spawn_local(async move { seen.set(true) });
                async_delay(Duration::from_millis(5)).await;
            })
            .await;

        assert!(flag.get());
    }
}
