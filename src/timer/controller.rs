//! Timer controller for the Pomodoro Timer.
//!
//! This module owns the current [`Mode`] and drives it:
//! - Manual transitions (start / skip to break / stop)
//! - Polling-based expiry detection via [`TimerController::tick`]
//! - Duration edits with or without preserving the running state
//! - Profile switches
//! - Transition notifications and the completed-session counter

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ControllerSettings, DurationRange};
use crate::notification::NotificationSink;
use crate::types::{Modality, Profile, Snapshot, TransitionEvent};

use super::clock::{Clock, SystemClock};
use super::mode::Mode;

// ============================================================================
// TimerController
// ============================================================================

/// Owns the active mode and turns user intents and clock polls into
/// modality transitions.
///
/// All state is plain owned data mutated through `&mut self`; the
/// presentation layer polls [`TimerController::tick`] and
/// [`TimerController::snapshot`] at its own cadence.
pub struct TimerController {
    /// Current mode
    mode: Mode,
    /// Profile the current mode was built from
    profile: Profile,
    /// Clamping range for work durations
    work_range: DurationRange,
    /// Clamping range for break durations
    break_range: DurationRange,
    /// Sessions per round, at least 1
    session_goal: u32,
    /// Completed sessions in the current round, `0..session_goal`
    completed_sessions: u32,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Receiver of natural transitions
    sink: Arc<dyn NotificationSink>,
}

impl TimerController {
    /// Creates a controller with an inactive mode built from `settings`.
    pub fn new(
        settings: ControllerSettings,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let work_seconds = settings.work_range.clamp(settings.work_seconds);
        let break_seconds = settings.break_range.clamp(settings.break_seconds);
        let profile = settings.profile;

        Self {
            mode: Mode::new(profile.name(), profile.id(), work_seconds, break_seconds),
            profile,
            work_range: settings.work_range,
            break_range: settings.break_range,
            session_goal: settings.session_goal.max(1),
            completed_sessions: 0,
            clock,
            sink,
        }
    }

    /// Creates a controller driven by the system clock.
    pub fn with_system_clock(settings: ControllerSettings, sink: Arc<dyn NotificationSink>) -> Self {
        Self::new(settings, Arc::new(SystemClock), sink)
    }

    // ------------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------------

    /// Starts working, or skips ahead to the break while working.
    ///
    /// Has no effect while breaking; use [`TimerController::stop`] there.
    pub fn start(&mut self) {
        match self.mode.modality() {
            Modality::Inactive => self.switching(Modality::Working),
            Modality::Working => self.switching(Modality::Breaking),
            Modality::Breaking => {
                tracing::debug!("start ignored while breaking");
            }
        }
    }

    /// Stops whichever timer is running.
    pub fn stop(&mut self) {
        self.switching(Modality::Inactive);
    }

    /// Checks the active timer for expiry and performs the natural transition.
    ///
    /// Returns the event handed to the notification sink, if any. Calling
    /// this again without the clock moving never transitions twice, because
    /// the freshly started timer has its full duration left.
    pub fn tick(&mut self) -> Option<TransitionEvent> {
        let now = self.clock.now();

        let (from, to) = match self.mode.modality() {
            Modality::Working if self.mode.work_timer().has_expired(now) => {
                (Modality::Working, Modality::Breaking)
            }
            Modality::Breaking if self.mode.break_timer().has_expired(now) => {
                (Modality::Breaking, Modality::Working)
            }
            _ => return None,
        };

        if from == Modality::Working {
            self.completed_sessions = (self.completed_sessions + 1) % self.session_goal;
        }

        let event = TransitionEvent::new(from, to, self.mode.name());
        self.sink.notify(&event);
        self.transition_at(to, now);

        Some(event)
    }

    /// Applies new durations, clamped into the configured ranges.
    ///
    /// With `preserve_running_state` the current mode keeps its modality and
    /// timer origins, so a running countdown is recomputed against the new
    /// duration and may expire immediately (the next tick handles that).
    /// Otherwise the mode is rebuilt and becomes inactive.
    pub fn set_durations(&mut self, work_seconds: f64, break_seconds: f64, preserve_running_state: bool) {
        let work_seconds = self.work_range.clamp(work_seconds);
        let break_seconds = self.break_range.clamp(break_seconds);

        tracing::debug!(
            work_seconds,
            break_seconds,
            preserve_running_state,
            "updating durations"
        );

        if preserve_running_state {
            self.mode.set_durations(work_seconds, break_seconds);
        } else {
            self.mode = Mode::new(self.mode.name(), self.mode.id(), work_seconds, break_seconds);
        }
    }

    /// Replaces the mode with an inactive one built for `profile`.
    pub fn switch_profile(&mut self, profile: Profile, work_seconds: f64, break_seconds: f64) {
        let work_seconds = self.work_range.clamp(work_seconds);
        let break_seconds = self.break_range.clamp(break_seconds);

        tracing::info!(profile = profile.name(), "switching profile");

        self.profile = profile;
        self.mode = Mode::new(profile.name(), profile.id(), work_seconds, break_seconds);
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn modality(&self) -> Modality {
        self.mode.modality()
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn session_goal(&self) -> u32 {
        self.session_goal
    }

    /// True while the active timer is counting down.
    pub fn is_running(&self) -> bool {
        self.mode.is_running(self.clock.now())
    }

    /// Seconds left on the active timer (work duration while inactive).
    pub fn remaining(&self) -> f64 {
        self.mode.remaining(self.clock.now())
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now();

        Snapshot {
            modality: self.mode.modality(),
            clock_label: self.mode.clock_label(now),
            description: self.mode.description(),
            remaining_fraction: self.mode.remaining_fraction(now),
            is_running: self.mode.is_running(now),
            mode_name: self.mode.name().to_string(),
            mode_id: self.mode.id(),
            completed_sessions: self.completed_sessions,
            session_goal: self.session_goal,
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn switching(&mut self, to: Modality) {
        let now = self.clock.now();
        self.transition_at(to, now);
    }

    fn transition_at(&mut self, to: Modality, now: Instant) {
        tracing::info!(
            from = %self.mode.modality(),
            to = %to,
            mode = self.mode.name(),
            "switching modality"
        );
        self.mode.transition(to, now);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::MockNotificationSink;
    use crate::timer::clock::ManualClock;

    fn fast_settings() -> ControllerSettings {
        ControllerSettings {
            work_seconds: 2.0,
            break_seconds: 1.0,
            work_range: DurationRange::new(1.0, 7200.0),
            break_range: DurationRange::new(1.0, 3600.0),
            session_goal: 4,
            profile: Profile::Pomodoro,
        }
    }

    fn create_controller(
        settings: ControllerSettings,
    ) -> (TimerController, Arc<ManualClock>, Arc<MockNotificationSink>) {
        let clock = Arc::new(ManualClock::new());
        let sink = Arc::new(MockNotificationSink::new());
        let controller = TimerController::new(settings, clock.clone(), sink.clone());
        (controller, clock, sink)
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_is_inactive() {
            let (controller, _clock, _sink) = create_controller(ControllerSettings::default());
            assert_eq!(controller.modality(), Modality::Inactive);
            assert_eq!(controller.mode().name(), "Pomodoro");
            assert_eq!(controller.mode().id(), 1);
            assert_eq!(controller.mode().work_duration_seconds(), 1500.0);
            assert_eq!(controller.mode().break_duration_seconds(), 300.0);
            assert_eq!(controller.completed_sessions(), 0);
            assert!(!controller.is_running());
        }

        #[test]
        fn test_new_clamps_initial_durations() {
            let settings = ControllerSettings {
                work_seconds: 1.0,
                break_seconds: 99_999.0,
                ..ControllerSettings::default()
            };
            let (controller, _clock, _sink) = create_controller(settings);
            assert_eq!(controller.mode().work_duration_seconds(), 600.0);
            assert_eq!(controller.mode().break_duration_seconds(), 3600.0);
        }

        #[test]
        fn test_new_floors_session_goal() {
            let settings = ControllerSettings {
                session_goal: 0,
                ..fast_settings()
            };
            let (controller, _clock, _sink) = create_controller(settings);
            assert_eq!(controller.session_goal(), 1);
        }

        #[test]
        fn test_new_with_double_profile() {
            let settings = ControllerSettings {
                profile: Profile::DoublePomodoro,
                ..fast_settings()
            };
            let (controller, _clock, _sink) = create_controller(settings);
            assert_eq!(controller.mode().name(), "Double Pomodoro");
            assert_eq!(controller.mode().id(), 2);
            assert_eq!(controller.profile(), Profile::DoublePomodoro);
        }
    }

    // ------------------------------------------------------------------------
    // Intent Tests
    // ------------------------------------------------------------------------

    mod intent_tests {
        use super::*;

        #[test]
        fn test_start_from_inactive_works() {
            let (mut controller, _clock, sink) = create_controller(fast_settings());
            controller.start();
            assert_eq!(controller.modality(), Modality::Working);
            assert!(controller.is_running());
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_start_while_working_skips_to_break() {
            let (mut controller, _clock, sink) = create_controller(fast_settings());
            controller.start();
            controller.start();
            assert_eq!(controller.modality(), Modality::Breaking);
            assert_eq!(controller.completed_sessions(), 0);
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_start_while_breaking_does_nothing() {
            let (mut controller, clock, _sink) = create_controller(fast_settings());
            controller.start();
            controller.start();
            let started = controller.mode().break_timer().started_at();

            clock.advance_secs(0.5);
            controller.start();

            assert_eq!(controller.modality(), Modality::Breaking);
            assert_eq!(controller.mode().break_timer().started_at(), started);
        }

        #[test]
        fn test_stop_from_every_modality() {
            for steps in 0..3 {
                let (mut controller, _clock, sink) = create_controller(fast_settings());
                for _ in 0..steps {
                    controller.start();
                }
                controller.stop();

                assert_eq!(controller.modality(), Modality::Inactive);
                assert!(controller.mode().work_timer().started_at().is_none());
                assert!(controller.mode().break_timer().started_at().is_none());
                assert_eq!(sink.notification_count(), 0);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_inactive_is_noop() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            clock.advance_secs(10.0);
            assert!(controller.tick().is_none());
            assert_eq!(controller.modality(), Modality::Inactive);
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_tick_before_expiry_is_noop() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            controller.start();
            clock.advance_secs(1.5);
            assert!(controller.tick().is_none());
            assert_eq!(controller.modality(), Modality::Working);
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_work_expiry_moves_to_break() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            controller.start();
            clock.advance_secs(2.0);

            let event = controller.tick();

            let expected = TransitionEvent::new(Modality::Working, Modality::Breaking, "Pomodoro");
            assert_eq!(event, Some(expected.clone()));
            assert_eq!(controller.modality(), Modality::Breaking);
            assert_eq!(controller.completed_sessions(), 1);
            assert_eq!(sink.get_events(), vec![expected]);
        }

        #[test]
        fn test_break_expiry_moves_to_work() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            controller.start();
            clock.advance_secs(2.0);
            controller.tick();
            clock.advance_secs(1.0);

            let event = controller.tick();

            assert_eq!(
                event,
                Some(TransitionEvent::new(
                    Modality::Breaking,
                    Modality::Working,
                    "Pomodoro"
                ))
            );
            assert_eq!(controller.modality(), Modality::Working);
            assert_eq!(controller.completed_sessions(), 1);
            assert_eq!(sink.notification_count(), 2);
            assert_eq!(controller.remaining(), 2.0);
        }

        #[test]
        fn test_repeated_ticks_transition_once() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            controller.start();
            clock.advance_secs(5.0);

            assert!(controller.tick().is_some());
            for _ in 0..10 {
                assert!(controller.tick().is_none());
            }
            assert_eq!(controller.modality(), Modality::Breaking);
            assert_eq!(sink.notification_count(), 1);
        }

        #[test]
        fn test_session_counter_wraps_at_goal() {
            let settings = ControllerSettings {
                session_goal: 3,
                ..fast_settings()
            };
            let (mut controller, clock, _sink) = create_controller(settings);
            controller.start();

            let mut seen = Vec::new();
            for _ in 0..3 {
                clock.advance_secs(2.0);
                controller.tick();
                seen.push(controller.completed_sessions());
                clock.advance_secs(1.0);
                controller.tick();
            }
            assert_eq!(seen, vec![1, 2, 0]);
        }

        #[test]
        fn test_manual_skip_does_not_count_session() {
            let (mut controller, clock, _sink) = create_controller(fast_settings());
            controller.start();
            controller.start();
            clock.advance_secs(1.0);
            controller.tick();
            assert_eq!(controller.modality(), Modality::Working);
            assert_eq!(controller.completed_sessions(), 0);
        }
    }

    // ------------------------------------------------------------------------
    // Duration and Profile Tests
    // ------------------------------------------------------------------------

    mod duration_tests {
        use super::*;

        #[test]
        fn test_preserving_edit_recomputes_remaining() {
            let settings = ControllerSettings {
                work_seconds: 600.0,
                ..fast_settings()
            };
            let (mut controller, clock, sink) = create_controller(settings);
            controller.start();
            clock.advance_secs(10.0);

            controller.set_durations(1500.0, 300.0, true);

            assert_eq!(controller.modality(), Modality::Working);
            assert_eq!(controller.mode().work_duration_seconds(), 1500.0);
            assert_eq!(controller.remaining(), 1490.0);
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_preserving_edit_below_elapsed_expires_on_next_tick() {
            let settings = ControllerSettings {
                work_seconds: 600.0,
                ..fast_settings()
            };
            let (mut controller, clock, sink) = create_controller(settings);
            controller.start();
            clock.advance_secs(30.0);

            controller.set_durations(10.0, 5.0, true);
            assert_eq!(controller.remaining(), 0.0);
            assert_eq!(controller.modality(), Modality::Working);
            assert_eq!(sink.notification_count(), 0);

            assert!(controller.tick().is_some());
            assert_eq!(controller.modality(), Modality::Breaking);
        }

        #[test]
        fn test_non_preserving_edit_resets_to_inactive() {
            let (mut controller, _clock, _sink) = create_controller(fast_settings());
            controller.start();

            controller.set_durations(1200.0, 240.0, false);

            assert_eq!(controller.modality(), Modality::Inactive);
            assert_eq!(controller.mode().name(), "Pomodoro");
            assert_eq!(controller.mode().work_duration_seconds(), 1200.0);
            assert_eq!(controller.mode().break_duration_seconds(), 240.0);
        }

        #[test]
        fn test_edit_clamps_into_range() {
            let (mut controller, _clock, _sink) = create_controller(ControllerSettings::default());

            controller.set_durations(0.0, -5.0, false);
            assert_eq!(controller.mode().work_duration_seconds(), 600.0);
            assert_eq!(controller.mode().break_duration_seconds(), 180.0);

            controller.set_durations(f64::NAN, f64::INFINITY, false);
            assert_eq!(controller.mode().work_duration_seconds(), 600.0);
            assert_eq!(controller.mode().break_duration_seconds(), 3600.0);
        }

        #[test]
        fn test_switch_profile_changes_identity() {
            let (mut controller, _clock, sink) = create_controller(ControllerSettings::default());
            controller.start();

            controller.switch_profile(Profile::DoublePomodoro, 3000.0, 600.0);

            assert_eq!(controller.profile(), Profile::DoublePomodoro);
            assert_eq!(controller.mode().name(), "Double Pomodoro");
            assert_eq!(controller.mode().id(), 2);
            assert_eq!(controller.modality(), Modality::Inactive);
            assert_eq!(controller.mode().work_duration_seconds(), 3000.0);
            assert_eq!(sink.notification_count(), 0);
        }

        #[test]
        fn test_notifications_use_new_mode_name() {
            let (mut controller, clock, sink) = create_controller(fast_settings());
            controller.switch_profile(Profile::DoublePomodoro, 4.0, 2.0);
            controller.start();
            clock.advance_secs(4.0);
            controller.tick();

            assert_eq!(sink.get_events()[0].mode_name, "Double Pomodoro");
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot Tests
    // ------------------------------------------------------------------------

    mod snapshot_tests {
        use super::*;

        #[test]
        fn test_inactive_snapshot() {
            let (controller, _clock, _sink) = create_controller(ControllerSettings::default());
            let snapshot = controller.snapshot();

            assert_eq!(snapshot.modality, Modality::Inactive);
            assert_eq!(snapshot.clock_label, "25:00");
            assert_eq!(snapshot.description, "25 Min");
            assert_eq!(snapshot.remaining_fraction, 0.0);
            assert!(!snapshot.is_running);
            assert_eq!(snapshot.mode_name, "Pomodoro");
            assert_eq!(snapshot.session_goal, 4);
        }

        #[test]
        fn test_running_snapshot() {
            let (mut controller, clock, _sink) = create_controller(ControllerSettings::default());
            controller.start();
            clock.advance_secs(750.0);

            let snapshot = controller.snapshot();
            assert_eq!(snapshot.modality, Modality::Working);
            assert_eq!(snapshot.clock_label, "12:30");
            assert_eq!(snapshot.remaining_fraction, 0.5);
            assert!(snapshot.is_running);
        }

        #[test]
        fn test_expired_but_unticked_snapshot() {
            let (mut controller, clock, _sink) = create_controller(fast_settings());
            controller.start();
            clock.advance_secs(3.0);

            let snapshot = controller.snapshot();
            assert_eq!(snapshot.modality, Modality::Working);
            assert_eq!(snapshot.clock_label, "00:00");
            assert!(!snapshot.is_running);
        }
    }
}
