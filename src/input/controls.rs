//! Steering and speed shared between the input listener and the game loop.
//!
//! The listener writes, the loop reads once per tick. Writes between two
//! reads coalesce; the last one wins.

use futures::{Stream, StreamExt};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

use crate::game::{Direction, InputEvent};

#[derive(Debug)]
pub struct Controls {
    direction: AtomicU8,
    base_interval_ms: AtomicU64,
    adjusted_interval_ms: AtomicU64,
}

impl Controls {
    pub fn new(direction: Direction, base_interval: Duration) -> Self {
        let ms = base_interval.as_millis() as u64;
        Self {
            direction: AtomicU8::new(direction.to_u8()),
            base_interval_ms: AtomicU64::new(ms),
            adjusted_interval_ms: AtomicU64::new(ms),
        }
    }

    pub fn apply(&self, event: InputEvent) {
        match event {
            InputEvent::DirectionChange(dir) => self.request_direction(dir),
            InputEvent::BoostPressed => self.press_boost(),
            InputEvent::BoostReleased => self.release_boost(),
            InputEvent::BoostToggled => self.toggle_boost(),
        }
    }

    /// Steer, unless it would reverse the current direction
    pub fn request_direction(&self, requested: Direction) {
        let _ = self
            .direction
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |raw| {
                let current = Direction::from_u8(raw);
                (!current.is_opposite(requested)).then_some(requested.to_u8())
            });
    }

    /// Halve the interval, once until the boost key is released
    pub fn press_boost(&self) {
        let base = self.base_interval_ms.load(Ordering::Relaxed);
        let _ = self.adjusted_interval_ms.compare_exchange(
            base,
            base / 2,
            Ordering::Relaxed,
            Ordering::Relaxed,
        );
    }

    pub fn release_boost(&self) {
        let base = self.base_interval_ms.load(Ordering::Relaxed);
        self.adjusted_interval_ms.store(base, Ordering::Relaxed);
    }

    /// Boost if not boosted, otherwise go back to the base interval
    pub fn toggle_boost(&self) {
        let base = self.base_interval_ms.load(Ordering::Relaxed);
        let _ = self
            .adjusted_interval_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(if current == base { base / 2 } else { base })
            });
    }

    pub fn direction(&self) -> Direction {
        Direction::from_u8(self.direction.load(Ordering::Relaxed))
    }

    /// Sleep before the next tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.adjusted_interval_ms.load(Ordering::Relaxed))
    }

    /// New life or new level: forget any boost and steering
    pub fn reset(&self, direction: Direction, base_interval: Duration) {
        let ms = base_interval.as_millis() as u64;
        self.direction.store(direction.to_u8(), Ordering::Relaxed);
        self.base_interval_ms.store(ms, Ordering::Relaxed);
        self.adjusted_interval_ms.store(ms, Ordering::Relaxed);
    }
}

/// Feed every event of `events` into `controls` until the stream ends
pub async fn pump<S>(events: S, controls: &Controls)
where
    S: Stream<Item = InputEvent>,
{
    futures::pin_mut!(events);
    while let Some(event) = events.next().await {
        controls.apply(event);
    }
}
