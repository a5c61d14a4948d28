//! Time passing “in game”.

use core::fmt;

use manyfmt::Refmt as _;

use crate::util::ConciseDebug;

#[doc(no_inline)]
pub use core::time::Duration;

// -------------------------------------------------------------------------------------------------

/// Specifies an amount of time passing in a simulation step.
///
/// [`Tick`]s are produced by the caller's frame loop and consumed by stepping a
/// world; the engine imposes no fixed schedule of its own.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Tick {
    delta_t: Duration,
}

impl Tick {
    /// A tick of arbitrary length, for testing purposes.
    pub const fn arbitrary() -> Self {
        Self {
            delta_t: Duration::from_secs(1),
        }
    }

    /// Construct a [`Tick`] from a duration expressed in fractional seconds.
    #[inline]
    pub fn from_seconds(dt: f64) -> Self {
        Self {
            delta_t: Duration::from_micros((dt * 1e6) as u64),
        }
    }

    /// Construct a [`Tick`] from a [`Duration`].
    #[inline]
    pub const fn from_duration(delta_t: Duration) -> Self {
        Self { delta_t }
    }

    /// Returns the amount of time passed, as a [`Duration`].
    #[inline]
    pub const fn delta_t(self) -> Duration {
        self.delta_t
    }

    /// Returns the amount of time passed, as a floating-point number of seconds.
    #[inline]
    pub fn delta_t_f64(self) -> f64 {
        self.delta_t.as_secs_f64()
    }
}

impl fmt::Debug for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { delta_t } = self;
        f.debug_tuple("Tick")
            .field(&delta_t.refmt(&ConciseDebug))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_from_seconds() {
        let tick = Tick::from_seconds(0.25);
        assert_eq!(tick.delta_t(), Duration::from_millis(250));
        assert_eq!(tick.delta_t_f64(), 0.25);
    }

    #[test]
    fn tick_debug() {
        assert_eq!(
            format!("{:?}", Tick::from_seconds(0.05)),
            "Tick(50.00 ms)"
        );
    }
}
