//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Virtual clock replaying tick cadences without real timers."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::time::Duration;

use ipcmon_common::config::SimulationConfig;

use crate::simulator::{TelemetrySimulator, TickKind};

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Cadence {
    kind: TickKind,
    period: Duration,
    next_due: Duration,
}

/// Tracks when each tick kind is next due on a virtual timeline starting at zero.
///
/// Like an interval timer, the first tick of each kind fires one full period after
/// the start.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    cadences: [Cadence; 3],
    elapsed: Duration,
}

impl TickSchedule {
    pub fn new(connection: Duration, activity: Duration, report: Duration) -> Self {
        let cadence = |kind, period: Duration| {
            let period = period.max(MIN_PERIOD);
            Cadence {
                kind,
                period,
                next_due: period,
            }
        };
        Self {
            cadences: [
                cadence(TickKind::Connection, connection),
                cadence(TickKind::Activity, activity),
                cadence(TickKind::Report, report),
            ],
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.connection_interval,
            config.activity_interval,
            config.report_interval,
        )
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn period(&self, kind: TickKind) -> Duration {
        self.cadences
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.period)
            .unwrap_or(MIN_PERIOD)
    }

    /// Move the clock forward and return every tick that came due, in due-time order.
    /// Ticks due at the same instant are ordered connection, activity, report.
    pub fn advance(&mut self, by: Duration) -> Vec<TickKind> {
        let target = self.elapsed.saturating_add(by);
        let mut due = Vec::new();
        while let Some(kind) = self.pop_due(target) {
            due.push(kind);
        }
        self.elapsed = target;
        due
    }

    /// Advance and apply the due ticks to `simulator` one at a time, returning how many ran.
    pub fn drive(&mut self, simulator: &mut TelemetrySimulator, by: Duration) -> u64 {
        let target = self.elapsed.saturating_add(by);
        let mut ran = 0;
        while let Some(kind) = self.pop_due(target) {
            simulator.tick(kind);
            ran += 1;
        }
        self.elapsed = target;
        ran
    }

    /// Earliest tick due at or before `target`, rescheduling its cadence.
    fn pop_due(&mut self, target: Duration) -> Option<TickKind> {
        let cadence = self
            .cadences
            .iter_mut()
            .filter(|c| c.next_due <= target)
            .min_by_key(|c| (c.next_due, c.kind))?;
        cadence.next_due = cadence.next_due.saturating_add(cadence.period);
        Some(cadence.kind)
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadences_over_six_seconds() {
        let mut schedule = TickSchedule::default();
        let due = schedule.advance(Duration::from_secs(6));
        // report@2, connection@3, report@4, activity@5, connection@6, report@6
        assert_eq!(
            due,
            vec![
                TickKind::Report,
                TickKind::Connection,
                TickKind::Report,
                TickKind::Activity,
                TickKind::Connection,
                TickKind::Report,
            ]
        );
        assert_eq!(schedule.elapsed(), Duration::from_secs(6));
    }

    #[test]
    fn uneven_steps_match_one_big_step() {
        let mut stepped = TickSchedule::default();
        let mut collected = Vec::new();
        for millis in [700, 1_300, 2_999, 1, 5_000, 10_000] {
            collected.extend(stepped.advance(Duration::from_millis(millis)));
        }
        let mut single = TickSchedule::default();
        assert_eq!(collected, single.advance(Duration::from_millis(20_000)));

        let count = |kind| collected.iter().filter(|k| **k == kind).count();
        assert_eq!(count(TickKind::Connection), 6);
        assert_eq!(count(TickKind::Activity), 4);
        assert_eq!(count(TickKind::Report), 10);
    }

    #[test]
    fn nothing_due_before_first_period() {
        let mut schedule = TickSchedule::default();
        assert!(schedule.advance(Duration::from_millis(1_999)).is_empty());
        assert_eq!(schedule.advance(Duration::from_millis(1)), vec![TickKind::Report]);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut schedule = TickSchedule::new(Duration::ZERO, Duration::from_secs(1), Duration::from_secs(1));
        assert_eq!(schedule.period(TickKind::Connection), MIN_PERIOD);
        assert_eq!(schedule.advance(Duration::from_millis(3)).len(), 3);
    }

    #[test]
    fn drive_matches_advance_counts() {
        let mut sim = TelemetrySimulator::new(3);
        let mut driven = TickSchedule::default();
        let mut listed = TickSchedule::default();
        for millis in [1_000, 2_500, 7_333, 600_000] {
            let by = Duration::from_millis(millis);
            assert_eq!(driven.drive(&mut sim, by), listed.advance(by).len() as u64);
        }
        assert_eq!(driven.elapsed(), listed.elapsed());
        assert_eq!(sim.ticks().total(), 203 + 122 + 305);
    }

    #[test]
    fn drive_applies_ticks() {
        let mut sim = TelemetrySimulator::new(11);
        let mut schedule = TickSchedule::default();
        let ran = schedule.drive(&mut sim, Duration::from_secs(30));
        assert_eq!(ran, 10 + 6 + 15);
        let ticks = sim.ticks();
        assert_eq!(ticks.connection, 10);
        assert_eq!(ticks.activity, 6);
        assert_eq!(ticks.report, 15);
        assert_eq!(sim.activity().len(), 9);
    }
}
