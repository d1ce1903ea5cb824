use super::cache::SharedWeak;

use crossbeam_channel::{unbounded, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

/// Spawn the reclamation sweep for one cache instance and return the queue
/// end handed out to site tokens.
///
/// One dedicated thread blocks on the queue and removes one stale entry at a
/// time. A panic during a single removal is caught and logged; the loop
/// continues. The thread exits when every sender is gone (the cache instance
/// and all attached tokens have dropped) or the cache itself is dropped.
pub(super) fn spawn(shared: SharedWeak) -> Sender<u64> {
    let (tx, rx) = unbounded::<u64>();

    thread::Builder::new()
        .name("sluice-reclaim".to_string())
        .spawn(move || {
            for site in rx {
                let Some(shared) = shared.upgrade() else {
                    break;
                };

                match catch_unwind(AssertUnwindSafe(|| shared.remove_site(site))) {
                    Ok(true) => {
                        tracing::trace!(site, "reclaimed stale cache entry");
                    }
                    Ok(false) => {}
                    Err(panic) => {
                        tracing::warn!(
                            site,
                            panic = panic_message(&panic),
                            "cache reclamation failed, continuing"
                        );
                    }
                }
            }
        })
        .expect("failed to spawn sluice-reclaim thread");

    tx
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
