/// Running tally for one session. Accuracy and mean reaction are derived on
/// demand rather than stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    pub score: u32,
    pub shots: u32,
    pub hits: u32,
    pub reaction_times_ms: Vec<f64>,
    /// Session clock reading when the current objective was acquired.
    pub last_acquisition_ms: f64,
    /// Tracking mode: time the crosshair spent over the moving target.
    pub hover_ms: f64,
    /// Tracking mode: total time simulated, the denominator for hover share.
    pub tracked_ms: f64,
}

pub const POINTS_PER_HIT: u32 = 100;

impl Stats {
    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    /// Count a hit at session time `now_ms` and return its reaction time.
    pub fn record_hit(&mut self, now_ms: f64) -> f64 {
        let reaction = now_ms - self.last_acquisition_ms;
        self.hits += 1;
        self.score += POINTS_PER_HIT;
        self.reaction_times_ms.push(reaction);
        self.last_acquisition_ms = now_ms;
        reaction
    }

    /// A replacement target became the objective at `now_ms`; reaction time
    /// for the next hit is measured from here.
    pub fn reacquire(&mut self, now_ms: f64) {
        self.last_acquisition_ms = now_ms;
    }

    /// A target that timed out counts as a missed shot.
    pub fn record_expiry(&mut self) {
        self.shots += 1;
    }

    /// One tracking frame: always a shot and a hit, plus hover time when
    /// the crosshair is on the target.
    pub fn record_tracking_frame(&mut self, hovering: bool, dt_ms: f64) {
        self.shots += 1;
        self.hits += 1;
        self.tracked_ms += dt_ms;
        if hovering {
            self.hover_ms += dt_ms;
        }
    }

    /// Whole-percent accuracy, 100 before the first shot.
    pub fn accuracy(&self) -> u32 {
        if self.shots == 0 {
            return 100;
        }
        ((self.hits as f64 / self.shots as f64) * 100.0).round() as u32
    }

    pub fn mean_reaction_ms(&self) -> Option<f64> {
        if self.reaction_times_ms.is_empty() {
            return None;
        }
        Some(self.reaction_times_ms.iter().sum::<f64>() / self.reaction_times_ms.len() as f64)
    }

    /// Share of tracking time spent on target, in whole percent.
    pub fn hover_share(&self) -> Option<u32> {
        (self.tracked_ms > 0.0).then(|| ((self.hover_ms / self.tracked_ms) * 100.0).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_defaults_to_100() {
        assert_eq!(Stats::default().accuracy(), 100);
    }

    #[test]
    fn test_accuracy_rounds() {
        let s = Stats { shots: 3, hits: 2, ..Stats::default() };
        assert_eq!(s.accuracy(), 67);
        let s = Stats { shots: 8, hits: 0, ..Stats::default() };
        assert_eq!(s.accuracy(), 0);
    }

    #[test]
    fn test_record_hit_tracks_reaction_and_acquisition() {
        let mut s = Stats::default();
        assert_eq!(s.record_hit(400.0), 400.0);
        assert_eq!(s.record_hit(650.0), 250.0);
        assert_eq!(s.score, 200);
        assert_eq!(s.hits, 2);
        assert_eq!(s.last_acquisition_ms, 650.0);
        assert_eq!(s.mean_reaction_ms(), Some(325.0));
    }

    #[test]
    fn test_reacquire_moves_reaction_clock() {
        let mut s = Stats::default();
        s.record_hit(300.0);
        s.reacquire(2300.0);
        assert_eq!(s.record_hit(2450.0), 150.0);
        assert_eq!(s.reaction_times_ms, vec![300.0, 150.0]);
    }

    #[test]
    fn test_mean_reaction_empty() {
        assert_eq!(Stats::default().mean_reaction_ms(), None);
    }

    #[test]
    fn test_tracking_frames() {
        let mut s = Stats::default();
        s.record_tracking_frame(true, 16.0);
        s.record_tracking_frame(false, 16.0);
        s.record_tracking_frame(false, 16.0);
        s.record_tracking_frame(true, 16.0);
        assert_eq!((s.shots, s.hits), (4, 4));
        assert_eq!(s.hover_ms, 32.0);
        assert_eq!(s.hover_share(), Some(50));
        assert_eq!(Stats::default().hover_share(), None);
    }
}
