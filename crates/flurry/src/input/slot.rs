/// Single-slot mailbox for host callbacks.
/// The host overwrites the value as often as it likes; the driver reads the
/// latest one at the start of each tick. No queueing, last writer wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestSlot<T: Copy> {
    value: T,
    fresh: bool,
}

impl<T: Copy> LatestSlot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            fresh: false,
        }
    }

    /// Overwrite the stored value (called from host callbacks).
    pub fn post(&mut self, value: T) {
        self.value = value;
        self.fresh = true;
    }

    /// Most recent value, whether or not it was already seen.
    pub fn latest(&self) -> T {
        self.value
    }

    /// Latest value if it was posted since the last call, clearing the flag.
    pub fn take_fresh(&mut self) -> Option<T> {
        std::mem::take(&mut self.fresh).then_some(self.value)
    }
}
