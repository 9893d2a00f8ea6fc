use futures::task::{waker, ArcWake};
use std::sync::Arc;
use std::task::Waker;

struct Notify<F>(F);

impl<F> ArcWake for Notify<F>
where
    F: Fn() + Send + Sync + 'static,
{
    fn wake_by_ref(arc_self: &Arc<Self>) {
        (arc_self.0)()
    }
}

/// Waker that runs `notify` on every wake, from whichever thread wakes it
///
/// The binary uses this to turn a finished model load into an event-loop
/// user event, so pending futures are polled again on the main thread.
pub fn notify_waker<F>(notify: F) -> Waker
where
    F: Fn() + Send + Sync + 'static,
{
    waker(Arc::new(Notify(notify)))
}
