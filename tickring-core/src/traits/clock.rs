//! Time source and one-shot alarm

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch; never decreases
    fn now_ms(&self) -> u64;
}

/// One-shot alarm
///
/// Scheduling while an alarm is pending replaces it, so at most one
/// expiry is ever outstanding. The platform reports the expiry back to
/// whoever owns the alarm (for the animation engine, by calling `tick`).
pub trait Alarm {
    /// Fire once, `after_ms` milliseconds from now
    fn schedule(&mut self, after_ms: u32);

    /// Drop the pending expiry, if any
    fn cancel(&mut self);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
