//! Timing-accuracy evaluation and session statistics.

use crate::types::Element;

/// One measured element against its ideal duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingRecord {
    pub element: Element,
    pub expected_ms: f64,
    pub actual_ms: f64,
}

/// Accuracy of a single element, as a percentage clamped to >= 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingEvaluation {
    pub record: TimingRecord,
    pub accuracy: f64,
}

/// Spacing categories tracked independently of element accuracy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpacingKind {
    Character,
    Word,
}

/// One measured inter-element silence against its ideal duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpacingRecord {
    pub kind: SpacingKind,
    pub expected_ms: f64,
    pub actual_ms: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpacingEvaluation {
    pub record: SpacingRecord,
    pub accuracy: f64,
}

/// `100 - 100 * |actual - expected| / expected`, clamped to >= 0.
fn accuracy_percent(expected_ms: f64, actual_ms: f64) -> f64 {
    (100.0 - 100.0 * (actual_ms - expected_ms).abs() / expected_ms).max(0.0)
}

/// Evaluate a keyed element against the ideal duration for its class.
pub fn evaluate_element(element: Element, expected_ms: f64, actual_ms: f64) -> TimingEvaluation {
    TimingEvaluation {
        record: TimingRecord {
            element,
            expected_ms,
            actual_ms,
        },
        accuracy: accuracy_percent(expected_ms, actual_ms),
    }
}

/// Evaluate an operator-timed gap against the ideal silence duration.
pub fn evaluate_spacing(kind: SpacingKind, expected_ms: f64, actual_ms: f64) -> SpacingEvaluation {
    SpacingEvaluation {
        record: SpacingRecord {
            kind,
            expected_ms,
            actual_ms,
        },
        accuracy: accuracy_percent(expected_ms, actual_ms),
    }
}

/// Aggregate statistics over a session's evaluations.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimingStatistics {
    pub count: usize,
    pub average_accuracy: f64,
    pub standard_deviation: f64,
    pub average_absolute_error: f64,
    pub max_accuracy: f64,
    pub min_accuracy: f64,
}

/// Incremental accumulator behind [`TimingStatistics`].
#[derive(Clone, Debug, Default)]
pub struct StatsAccumulator {
    accuracies: Vec<f64>,
    absolute_errors: Vec<f64>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, accuracy: f64, expected_ms: f64, actual_ms: f64) {
        self.accuracies.push(accuracy);
        self.absolute_errors.push((actual_ms - expected_ms).abs());
    }

    pub fn count(&self) -> usize {
        self.accuracies.len()
    }

    pub fn clear(&mut self) {
        self.accuracies.clear();
        self.absolute_errors.clear();
    }

    pub fn statistics(&self) -> TimingStatistics {
        let count = self.accuracies.len();
        if count == 0 {
            return TimingStatistics::default();
        }

        let n = count as f64;
        let mean = self.accuracies.iter().sum::<f64>() / n;
        let variance = self
            .accuracies
            .iter()
            .map(|a| (a - mean).powi(2))
            .sum::<f64>()
            / n;
        let mut max = f64::MIN;
        let mut min = f64::MAX;
        for &a in &self.accuracies {
            max = max.max(a);
            min = min.min(a);
        }

        TimingStatistics {
            count,
            average_accuracy: mean,
            standard_deviation: variance.sqrt(),
            average_absolute_error: self.absolute_errors.iter().sum::<f64>() / n,
            max_accuracy: max,
            min_accuracy: min,
        }
    }
}

/// Per-element accumulators kept alongside the overall session stats.
#[derive(Clone, Debug, Default)]
pub struct ElementStats {
    all: StatsAccumulator,
    dit: StatsAccumulator,
    dah: StatsAccumulator,
}

/// Overall plus per-element statistics snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ElementStatistics {
    pub dit: TimingStatistics,
    pub dah: TimingStatistics,
}

impl ElementStats {
    pub fn record(&mut self, evaluation: &TimingEvaluation) {
        let r = &evaluation.record;
        self.all.record(evaluation.accuracy, r.expected_ms, r.actual_ms);
        match r.element {
            Element::Dit => self.dit.record(evaluation.accuracy, r.expected_ms, r.actual_ms),
            Element::Dah => self.dah.record(evaluation.accuracy, r.expected_ms, r.actual_ms),
        }
    }

    pub fn overall(&self) -> TimingStatistics {
        self.all.statistics()
    }

    pub fn by_element(&self) -> ElementStatistics {
        ElementStatistics {
            dit: self.dit.statistics(),
            dah: self.dah.statistics(),
        }
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.dit.clear();
        self.dah.clear();
    }
}

/// Per-spacing-kind accumulators (character gaps vs word gaps).
#[derive(Clone, Debug, Default)]
pub struct SpacingStats {
    character: StatsAccumulator,
    word: StatsAccumulator,
}

/// Spacing statistics snapshot, one entry per category.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpacingStatistics {
    pub character: TimingStatistics,
    pub word: TimingStatistics,
}

impl SpacingStats {
    pub fn record(&mut self, evaluation: &SpacingEvaluation) {
        let r = &evaluation.record;
        let acc = match r.kind {
            SpacingKind::Character => &mut self.character,
            SpacingKind::Word => &mut self.word,
        };
        acc.record(evaluation.accuracy, r.expected_ms, r.actual_ms);
    }

    pub fn by_kind(&self) -> SpacingStatistics {
        SpacingStatistics {
            character: self.character.statistics(),
            word: self.word.statistics(),
        }
    }

    pub fn clear(&mut self) {
        self.character.clear();
        self.word.clear();
    }
}
