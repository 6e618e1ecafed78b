//! One-shot signal consumption.
//!
//! The store tags every navigation target, success message and error with a
//! sequence number. `SignalLatch` remembers the last sequence consumed per
//! kind, so re-rendering the same snapshot (or a newer snapshot that still
//! carries the same signal because the acknowledgement is in flight) never
//! fires the effect twice.

use brew_proto::protocol::{Command, Signal, UiStatus};

#[derive(Debug, Default)]
pub struct SignalLatch {
    last_seq: Option<u64>,
}

impl SignalLatch {
    /// Returns the signal only the first time its sequence is seen.
    pub fn take<'a, T>(&mut self, signal: Option<&'a Signal<T>>) -> Option<&'a Signal<T>> {
        let s = signal?;
        if self.last_seq == Some(s.seq) {
            return None;
        }
        self.last_seq = Some(s.seq);
        Some(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignalEvent {
    Navigate { seq: u64, recipe_id: String },
    Success { seq: u64, message: String },
    Error { seq: u64, message: String },
}

impl SignalEvent {
    /// The acknowledgement that clears this emission in the store.
    pub fn ack(&self) -> Command {
        match self {
            SignalEvent::Navigate { seq, .. } => Command::ClearNavigationTarget { seq: *seq },
            SignalEvent::Success { seq, .. } => Command::ClearSuccessMessage { seq: *seq },
            SignalEvent::Error { seq, .. } => Command::ClearError { seq: *seq },
        }
    }
}

#[derive(Debug, Default)]
pub struct OneShotSignals {
    navigation: SignalLatch,
    success: SignalLatch,
    error: SignalLatch,
}

impl OneShotSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the signals in `status` that have not been consumed yet.
    pub fn drain(&mut self, status: &UiStatus) -> Vec<SignalEvent> {
        let mut out = Vec::new();
        if let Some(s) = self.navigation.take(status.navigation_target.as_ref()) {
            out.push(SignalEvent::Navigate {
                seq: s.seq,
                recipe_id: s.value.clone(),
            });
        }
        if let Some(s) = self.success.take(status.success_message.as_ref()) {
            out.push(SignalEvent::Success {
                seq: s.seq,
                message: s.value.clone(),
            });
        }
        if let Some(s) = self.error.take(status.error.as_ref()) {
            out.push(SignalEvent::Error {
                seq: s.seq,
                message: s.value.clone(),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(seq: u64, value: &str) -> Option<Signal<String>> {
        Some(Signal {
            seq,
            value: value.to_string(),
        })
    }

    #[test]
    fn same_status_fires_once() {
        let status = UiStatus {
            error: sig(4, "boom"),
            success_message: sig(5, "saved"),
            navigation_target: sig(6, "cyser"),
            ..UiStatus::default()
        };
        let mut signals = OneShotSignals::new();

        let events = signals.drain(&status);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            SignalEvent::Navigate {
                seq: 6,
                recipe_id: "cyser".into()
            }
        );
        assert_eq!(events[2].ack(), Command::ClearError { seq: 4 });

        for _ in 0..3 {
            assert!(signals.drain(&status).is_empty());
        }
    }

    #[test]
    fn new_emission_with_same_text_fires_again() {
        let mut signals = OneShotSignals::new();
        let first = UiStatus {
            error: sig(1, "offline"),
            ..UiStatus::default()
        };
        assert_eq!(signals.drain(&first).len(), 1);

        let cleared = UiStatus::default();
        assert!(signals.drain(&cleared).is_empty());

        let again = UiStatus {
            error: sig(2, "offline"),
            ..UiStatus::default()
        };
        assert_eq!(
            signals.drain(&again),
            vec![SignalEvent::Error {
                seq: 2,
                message: "offline".into()
            }]
        );
    }
}
