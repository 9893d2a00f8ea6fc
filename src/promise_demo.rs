// promise_demo.rs - Two timers race to settle one completion, the winner is chained once
use futures::channel::oneshot;
use futures::FutureExt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::config::DemoConfig;
use crate::core::{Clock, Countdown};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Write side of a single-assignment completion; clones share the slot
#[derive(Debug)]
pub struct Resolver<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Resolver<T> {
    /// Settle the completion; returns false if it was already settled
    pub fn resolve(&self, value: T) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        match self.slot.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

/// Create a completion; the future yields `None` if every resolver is dropped unresolved
pub fn completion<T>() -> (Resolver<T>, impl Future<Output = Option<T>>) {
    let (sender, receiver) = oneshot::channel();
    let resolver = Resolver {
        slot: Arc::new(Mutex::new(Some(sender))),
    };
    (resolver, receiver.map(Result::ok))
}

/// Transformation applied to the winning value
pub fn chain_step(value: &str) -> String {
    format!("{} And chaining!", value)
}

/// Countdowns competing to resolve one completion
#[derive(Debug)]
pub struct Race<T> {
    entries: Vec<(Countdown, Option<T>)>,
    resolver: Resolver<T>,
}

impl<T> Race<T> {
    pub fn new(resolver: Resolver<T>) -> Self {
        Self {
            entries: Vec::new(),
            resolver,
        }
    }

    /// Resolve with `value` once `delay` seconds have passed
    pub fn after(mut self, delay: f32, value: T) -> Self {
        self.entries.push((Countdown::new(delay), Some(value)));
        self
    }

    /// Advance every countdown by `delta` seconds
    ///
    /// Countdowns expiring in the same step fire in deadline order, ties in
    /// registration order. Returns how many fired.
    pub fn step(&mut self, delta: f32) -> usize {
        let mut fired: Vec<(f32, usize)> = Vec::new();
        for (index, (countdown, _)) in self.entries.iter_mut().enumerate() {
            let remaining = countdown.remaining();
            if countdown.tick(delta) {
                fired.push((remaining, index));
            }
        }
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, index) in &fired {
            if let Some(value) = self.entries[*index].1.take() {
                // Losing resolutions are no-ops
                self.resolver.resolve(value);
            }
        }
        fired.len()
    }

    pub fn is_finished(&self) -> bool {
        self.entries.iter().all(|(countdown, _)| !countdown.is_pending())
    }
}

/// Race the two demo values with fixed clock steps; returns the chained result
pub fn simulate(first_delay: f32, second_delay: f32, step: f32) -> Option<String> {
    let (resolver, settled) = completion::<String>();
    let mut race = Race::new(resolver)
        .after(first_delay, "Data A Loaded".to_string())
        .after(second_delay, "Data B Loaded".to_string());

    while !race.is_finished() {
        race.step(step);
    }
    drop(race);

    pollster::block_on(settled.map(|value| value.map(|v| chain_step(&v))))
}

/// Run the demo on its own thread, logging the chained value
pub fn spawn(config: &DemoConfig) -> std::io::Result<thread::JoinHandle<()>> {
    let (first_delay, second_delay) = (config.first_delay, config.second_delay);

    thread::Builder::new()
        .name("promise-demo".to_string())
        .spawn(move || {
            let (resolver, settled) = completion::<String>();
            let mut race = Race::new(resolver)
                .after(first_delay, "Data A Loaded".to_string())
                .after(second_delay, "Data B Loaded".to_string());

            let chained = settled
                .map(|value| value.map(|v| chain_step(&v)))
                .map(|message| match message {
                    Some(message) => log::info!("{}", message),
                    None => log::warn!("Completion dropped before it was resolved"),
                });

            let mut clock = Clock::started();
            while !race.is_finished() {
                thread::sleep(POLL_INTERVAL);
                race.step(clock.delta());
            }
            drop(race);

            pollster::block_on(chained);
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_resolution_wins() {
        let (resolver, settled) = completion();
        let other = resolver.clone();

        assert!(resolver.resolve(1));
        assert!(!other.resolve(2));
        assert!(other.is_settled());
        assert_eq!(pollster::block_on(settled), Some(1));
    }

    #[test]
    fn test_dropped_resolver_yields_none() {
        let (resolver, settled) = completion::<u32>();
        drop(resolver);
        assert_eq!(pollster::block_on(settled), None);
    }

    #[test]
    fn test_same_step_expiry_uses_deadline_order() {
        let (resolver, settled) = completion();
        let mut race = Race::new(resolver).after(0.3, "late").after(0.2, "early");

        assert_eq!(race.step(1.0), 2);
        assert!(race.is_finished());
        assert_eq!(pollster::block_on(settled), Some("early"));
    }

    #[test]
    fn test_ties_resolve_in_registration_order() {
        let (resolver, settled) = completion();
        let mut race = Race::new(resolver).after(0.5, "first").after(0.5, "second");

        race.step(0.5);
        assert_eq!(pollster::block_on(settled), Some("first"));
    }

    #[test]
    fn test_default_demo_chains_data_a() {
        assert_eq!(
            simulate(1.0, 2.0, 1.0 / 60.0).as_deref(),
            Some("Data A Loaded And chaining!")
        );
    }
}
