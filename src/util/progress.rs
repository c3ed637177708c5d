//! Network activity indication.
//!
//! Signals are fire-and-forget: implementations must not fail or block, so a
//! broken indicator can never hold up a request.

use leptos::prelude::*;

pub trait Progress {
    fn start(&self);
    fn done(&self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self) {}
    fn done(&self) {}
}

/// In-flight request counter; the view shows a bar while it is non-zero.
impl Progress for RwSignal<usize> {
    fn start(&self) {
        self.update(|n| *n += 1);
    }

    fn done(&self) {
        self.update(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_overlapping_requests() {
        let in_flight = RwSignal::new(0_usize);
        in_flight.start();
        in_flight.start();
        in_flight.done();
        assert_eq!(in_flight.get_untracked(), 1);
        in_flight.done();
        in_flight.done();
        assert_eq!(in_flight.get_untracked(), 0);
    }
}
