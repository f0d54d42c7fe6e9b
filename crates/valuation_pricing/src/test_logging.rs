//! Counts emitted tracing events by level inside a scoped subscriber.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
pub(crate) struct LevelCounts {
    warn: Arc<AtomicUsize>,
    debug: Arc<AtomicUsize>,
}

impl LevelCounts {
    pub(crate) fn warnings(&self) -> usize {
        self.warn.load(Ordering::SeqCst)
    }

    pub(crate) fn debugs(&self) -> usize {
        self.debug.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for LevelCounts {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level == Level::WARN {
            self.warn.fetch_add(1, Ordering::SeqCst);
        } else if level == Level::DEBUG {
            self.debug.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` on the current thread with a counting subscriber installed.
pub(crate) fn count_events<T>(f: impl FnOnce() -> T) -> (T, LevelCounts) {
    let counts = LevelCounts::default();
    let subscriber = tracing_subscriber::registry().with(counts.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counts)
}
