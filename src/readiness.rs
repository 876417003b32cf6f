//! Readiness gate
//!
//! The viewer builds its top bar, navigation state and layers some time
//! after the page script runs. The gate is probed on a fixed interval until
//! all three exist, then fires once and stays latched.

use crate::prelude::Duration;
use crate::runtime::async_delay;

/// One probe of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadinessCheck {
    pub top_bar: bool,
    pub zoom_source: bool,
    pub layer: bool,
}

impl ReadinessCheck {
    pub fn all(&self) -> bool {
        self.top_bar && self.zoom_source && self.layer
    }
}

/// Latching one-shot gate
#[derive(Debug, Default)]
pub struct ReadinessGate {
    fired: bool,
    polls: u64,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Number of probes taken so far
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Feeds one probe. Returns `true` exactly once, on the first probe
    /// where everything is ready; later probes return `false` whatever they
    /// report.
    pub fn poll(&mut self, check: ReadinessCheck) -> bool {
        if self.fired {
            return false;
        }

        self.polls += 1;
        if !check.all() {
            log::trace!("Host not ready after {} polls: {:?}", self.polls, check);
            return false;
        }

        self.fired = true;
        log::info!("Host ready after {} polls", self.polls);
        true
    }

    /// Probes every `interval` until the gate fires. Never times out.
    ///
    /// Returns immediately if the gate already fired.
    pub async fn wait_until_ready<P>(&mut self, interval: Duration, mut probe: P)
    where
        P: FnMut() -> ReadinessCheck,
    {
        if self.fired {
            return;
        }

        loop {
            if self.poll(probe()) {
                return;
            }
            async_delay(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY: ReadinessCheck = ReadinessCheck {
        top_bar: true,
        zoom_source: true,
        layer: true,
    };

    #[test]
    fn test_requires_all_conditions() {
        let mut gate = ReadinessGate::new();
        for check in [
            ReadinessCheck { top_bar: false, ..READY },
            ReadinessCheck { zoom_source: false, ..READY },
            ReadinessCheck { layer: false, ..READY },
            ReadinessCheck::default(),
        ] {
            assert!(!gate.poll(check));
        }
        assert!(!gate.has_fired());
        assert_eq!(gate.polls(), 4);
    }

    #[test]
    fn test_fires_exactly_once_under_flicker() {
        let mut gate = ReadinessGate::new();
        assert!(gate.poll(READY));
        assert!(!gate.poll(ReadinessCheck::default()));
        assert!(!gate.poll(READY));
        assert!(gate.has_fired());
        assert_eq!(gate.polls(), 1);
    }

    #[tokio::test]
    async fn test_wait_until_ready_polls_until_true() {
        let mut gate = ReadinessGate::new();
        let mut calls = 0;

        gate.wait_until_ready(Duration::from_millis(1), || {
            calls += 1;
            ReadinessCheck {
                layer: calls >= 3,
                ..READY
            }
        })
        .await;

        assert!(gate.has_fired());
        assert_eq!(calls, 3);
        assert_eq!(gate.polls(), 3);
    }

    #[tokio::test]
    async fn test_wait_after_fire_returns_immediately() {
        let mut gate = ReadinessGate::new();
        gate.poll(READY);

        let mut probed = false;
        gate.wait_until_ready(Duration::from_millis(1), || {
            probed = true;
            ReadinessCheck::default()
        })
        .await;
        assert!(!probed);
    }
}
