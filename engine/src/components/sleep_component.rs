/// Bodies outside the region of interest are asleep and skipped by the physics step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SleepComponent {
    pub is_sleeping: bool,
}

impl SleepComponent {
    /// Updates the flag; returns `true` when the state actually changed.
    pub fn set_awake(&mut self, awake: bool) -> bool {
        let changed = self.is_sleeping == awake;
        self.is_sleeping = !awake;
        changed
    }
}
