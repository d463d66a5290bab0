//! Qualitative signal detection.

use kessan_core::{Metric, Signal};

use crate::{comparator::Comparison, resolver::CanonicalSequence};

/// Absolute year-over-year change (%) that counts as a large move.
pub const LARGE_MOVE_THRESHOLD: f64 = 30.0;

/// Derives signals for the statement of a year-over-year comparison.
///
/// Emitted in a fixed order:
/// 1. large increase or decrease per metric, in [`Metric::ALL`] order;
/// 2. a net-profit turnaround against the year-over-year baseline;
/// 3. a record operating profit against every other canonical statement of
///    the same period type.
#[must_use]
pub fn detect_signals(yoy: &Comparison, sequence: &CanonicalSequence) -> Vec<Signal> {
    let mut signals = Vec::new();

    for metric in Metric::ALL {
        match yoy.change(metric) {
            Some(change) if change >= LARGE_MOVE_THRESHOLD => {
                signals.push(Signal::LargeIncrease { metric, change });
            }
            Some(change) if change <= -LARGE_MOVE_THRESHOLD => {
                signals.push(Signal::LargeDecrease { metric, change });
            }
            _ => {}
        }
    }

    if let Some(previous) = &yoy.previous {
        if let (Some(current), Some(prior)) = (yoy.current.net_profit, previous.net_profit) {
            if prior < 0.0 && current >= 0.0 {
                signals.push(Signal::TurnedProfitable);
            } else if prior >= 0.0 && current < 0.0 {
                signals.push(Signal::TurnedUnprofitable);
            }
        }
    }

    if let Some(signal) = record_operating_profit(yoy, sequence) {
        signals.push(signal);
    }

    signals
}

fn record_operating_profit(yoy: &Comparison, sequence: &CanonicalSequence) -> Option<Signal> {
    let current = &yoy.current;
    let operating_profit = current.operating_profit?;
    let period_type = current.period_type?;

    let best = sequence
        .iter()
        .filter(|s| s.period_type == Some(period_type) && !s.is_same_filing(current))
        .filter_map(|s| s.operating_profit)
        .reduce(f64::max)?;

    (operating_profit > best).then_some(Signal::RecordOperatingProfit { period_type })
}
