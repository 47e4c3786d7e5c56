// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// The external scheduler for the recurring study reminder. Both operations
/// are idempotent from the caller's point of view: arming an armed reminder
/// or clearing a cleared one is a no-op on the scheduler side.
pub trait ReminderScheduler {
    fn schedule_reminder(&mut self);
    fn clear_reminder(&mut self);
}

/// The user's reminder preference, driving the scheduler edge-triggered:
/// a `false -> true` write calls `schedule_reminder` exactly once, a
/// `true -> false` write calls `clear_reminder` exactly once, and a write
/// that does not change the flag touches the scheduler not at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReminderPreference {
    enabled: bool,
}

impl ReminderPreference {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Writes the flag and arms or disarms the scheduler on a transition.
    /// Returns whether the flag changed.
    pub fn set(&mut self, enabled: bool, scheduler: &mut dyn ReminderScheduler) -> bool {
        if enabled == self.enabled {
            return false;
        }
        self.enabled = enabled;
        if enabled {
            scheduler.schedule_reminder();
        } else {
            scheduler.clear_reminder();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        scheduled: usize,
        cleared: usize,
    }

    impl ReminderScheduler for CountingScheduler {
        fn schedule_reminder(&mut self) {
            self.scheduled += 1;
        }

        fn clear_reminder(&mut self) {
            self.cleared += 1;
        }
    }

    #[test]
    fn test_flip_on_schedules_exactly_once() {
        let mut scheduler = CountingScheduler::default();
        let mut pref = ReminderPreference::new(false);
        assert!(pref.set(true, &mut scheduler));
        assert_eq!(scheduler.scheduled, 1);
        assert_eq!(scheduler.cleared, 0);
    }

    #[test]
    fn test_flip_off_clears_exactly_once() {
        let mut scheduler = CountingScheduler::default();
        let mut pref = ReminderPreference::new(true);
        assert!(pref.set(false, &mut scheduler));
        assert_eq!(scheduler.scheduled, 0);
        assert_eq!(scheduler.cleared, 1);
    }

    #[test]
    fn test_no_change_touches_nothing() {
        let mut scheduler = CountingScheduler::default();
        let mut pref = ReminderPreference::new(false);
        assert!(!pref.set(false, &mut scheduler));
        pref.set(true, &mut scheduler);
        assert!(!pref.set(true, &mut scheduler));
        assert_eq!(scheduler.scheduled, 1);
        assert_eq!(scheduler.cleared, 0);
    }

    #[test]
    fn test_each_flip_calls_exactly_once() {
        let mut scheduler = CountingScheduler::default();
        let mut pref = ReminderPreference::new(false);
        pref.set(true, &mut scheduler);
        pref.set(false, &mut scheduler);
        pref.set(true, &mut scheduler);
        assert_eq!(scheduler.scheduled, 2);
        assert_eq!(scheduler.cleared, 1);
    }
}
