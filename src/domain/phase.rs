use serde::{Deserialize, Serialize};

/// Lifecycle of one transition. Only ever moves forward because
/// `elapsed_ms` only grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Dissolving,
    Funneling,
    Settling,
    Done,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Dissolving => "dissolving",
            Phase::Funneling => "funneling",
            Phase::Settling => "settling",
            Phase::Done => "done",
        }
    }

    /// Stable numeric code for the JS side (0..=3).
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Millisecond thresholds of the transition.
///
/// Expected to satisfy `dissolve_end_ms <= funnel_end_ms <= settle_end_ms <=
/// complete_ms`. The ordering is the caller's responsibility: it is never
/// re-sorted here, and out-of-order values just make some phases unreachable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSchedule {
    pub dissolve_end_ms: f64,
    pub funnel_end_ms: f64,
    pub settle_end_ms: f64,
    pub complete_ms: f64,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            dissolve_end_ms: 800.0,
            funnel_end_ms: 2200.0,
            settle_end_ms: 3500.0,
            complete_ms: 4000.0,
        }
    }
}

impl PhaseSchedule {
    pub fn is_monotonic(&self) -> bool {
        self.dissolve_end_ms <= self.funnel_end_ms
            && self.funnel_end_ms <= self.settle_end_ms
            && self.settle_end_ms <= self.complete_ms
    }

    /// 0..1 progress through the funneling window.
    pub fn funnel_progress(&self, elapsed_ms: f64) -> f32 {
        window_progress(elapsed_ms, self.dissolve_end_ms, self.funnel_end_ms)
    }

    /// 0..1 progress through the settling window.
    pub fn settle_progress(&self, elapsed_ms: f64) -> f32 {
        window_progress(elapsed_ms, self.funnel_end_ms, self.settle_end_ms)
    }
}

#[inline]
fn window_progress(elapsed_ms: f64, start_ms: f64, end_ms: f64) -> f32 {
    let span = (end_ms - start_ms).max(1.0);
    ((elapsed_ms - start_ms) / span).clamp(0.0, 1.0) as f32
}

/// Total over any `elapsed_ms`; thresholds are tested latest-first so
/// `elapsed_ms >= complete_ms` always wins.
pub fn resolve_phase(elapsed_ms: f64, schedule: &PhaseSchedule) -> Phase {
    if elapsed_ms >= schedule.complete_ms {
        Phase::Done
    } else if elapsed_ms >= schedule.funnel_end_ms {
        Phase::Settling
    } else if elapsed_ms >= schedule.dissolve_end_ms {
        Phase::Funneling
    } else {
        Phase::Dissolving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PhaseSchedule {
        PhaseSchedule {
            dissolve_end_ms: 100.0,
            funnel_end_ms: 200.0,
            settle_end_ms: 300.0,
            complete_ms: 400.0,
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        let s = schedule();
        assert_eq!(resolve_phase(0.0, &s), Phase::Dissolving);
        assert_eq!(resolve_phase(99.9, &s), Phase::Dissolving);
        assert_eq!(resolve_phase(100.0, &s), Phase::Funneling);
        assert_eq!(resolve_phase(200.0, &s), Phase::Settling);
        assert_eq!(resolve_phase(399.0, &s), Phase::Settling);
        assert_eq!(resolve_phase(400.0, &s), Phase::Done);
    }

    #[test]
    fn complete_wins_over_out_of_order_thresholds() {
        let s = PhaseSchedule {
            dissolve_end_ms: 500.0,
            funnel_end_ms: 50.0,
            settle_end_ms: 60.0,
            complete_ms: 40.0,
        };
        assert!(!s.is_monotonic());
        assert_eq!(resolve_phase(45.0, &s), Phase::Done);
        assert_eq!(resolve_phase(10.0, &s), Phase::Dissolving);
    }

    #[test]
    fn progress_is_clamped() {
        let s = schedule();
        assert_eq!(s.funnel_progress(50.0), 0.0);
        assert_eq!(s.funnel_progress(150.0), 0.5);
        assert_eq!(s.settle_progress(1_000.0), 1.0);
    }

    #[test]
    fn phase_names_match_js() {
        assert_eq!(Phase::Funneling.as_str(), "funneling");
        assert_eq!(serde_json::to_string(&Phase::Done).unwrap(), "\"done\"");
        assert_eq!(Phase::Settling.code(), 2);
    }
}
