//! Revenue and order-count series per day.
//!
//! [`RevenueAggregator::synthesize`] produces the display series for the
//! revenue/orders chart. It derives a per-day baseline from the observed data
//! and then adds random variation, so all randomness is drawn from the caller's
//! `rng`. A seeded generator reproduces a series exactly.
//!
//! [`RevenueAggregator::daily_totals`] gives the observed per-day sums with no
//! variation.

use super::{dated, round2, trailing_days};
use crate::types::{Bucketed, DailyRevenuePoint, DailyTotals, Transaction};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

const WEEKEND_FACTOR: f64 = 0.7;
const SPIKE_PROBABILITY: f64 = 0.08;

/// Builds the revenue/orders chart series.
#[derive(Debug, Clone, Copy)]
pub struct RevenueAggregator {
    window_days: u32,
}

/// Aggregate figures the synthesized series scales from
#[derive(Debug, Clone, Copy, PartialEq)]
struct Baseline {
    revenue_per_active_day: f64,
    avg_amount: f64,
}

impl RevenueAggregator {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// One point per day of the window ending at `today`, oldest first.
    ///
    /// Returns an empty series when no transaction has a usable timestamp.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        rng: &mut R,
    ) -> Bucketed<DailyRevenuePoint> {
        let (dated, skipped) = dated(transactions);

        let Some(baseline) = Self::baseline(&dated) else {
            return Bucketed::new(Vec::new(), skipped);
        };
        debug!(
            revenue_per_active_day = baseline.revenue_per_active_day,
            avg_amount = baseline.avg_amount,
            "Revenue baseline computed"
        );

        let points = trailing_days(today, self.window_days)
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let (revenue, orders) = Self::draw_day(&baseline, date, rng);
                let (revenue, orders) = wave(i, revenue, orders);
                DailyRevenuePoint {
                    date,
                    label: short_label(date),
                    revenue,
                    orders,
                }
            })
            .collect();

        Bucketed::new(points, skipped)
    }

    /// Observed revenue and order count for every day that has transactions, by date
    pub fn daily_totals(&self, transactions: &[Transaction]) -> Bucketed<DailyTotals> {
        let (dated, skipped) = dated(transactions);

        let mut by_day: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
        for (day, tx) in dated {
            let entry = by_day.entry(day).or_insert((0.0, 0));
            entry.0 += tx.safe_amount();
            entry.1 += 1;
        }

        let items = by_day
            .into_iter()
            .map(|(date, (revenue, orders))| DailyTotals {
                date,
                label: short_label(date),
                revenue: round2(revenue),
                orders,
            })
            .collect();

        Bucketed::new(items, skipped)
    }

    /// Apply the display wave to an observed series
    pub fn apply_wave(totals: &[DailyTotals]) -> Vec<DailyTotals> {
        totals
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let (revenue, orders) = wave(i, day.revenue, day.orders);
                DailyTotals {
                    revenue,
                    orders,
                    ..day.clone()
                }
            })
            .collect()
    }

    fn baseline(dated: &[(NaiveDate, &Transaction)]) -> Option<Baseline> {
        if dated.is_empty() {
            return None;
        }

        let total: f64 = dated.iter().map(|(_, tx)| tx.safe_amount()).sum();
        let active_days: BTreeSet<NaiveDate> = dated.iter().map(|(day, _)| *day).collect();

        Some(Baseline {
            revenue_per_active_day: total / active_days.len() as f64,
            avg_amount: total / dated.len() as f64,
        })
    }

    /// Randomized revenue and orders for one day, before the wave pass
    fn draw_day<R: Rng + ?Sized>(baseline: &Baseline, date: NaiveDate, rng: &mut R) -> (f64, u32) {
        let weekday_factor = match date.weekday() {
            Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
            _ => 1.0,
        };

        let scale: f64 = rng.gen_range(0.7..1.7);
        let mut revenue = baseline.revenue_per_active_day * weekday_factor * scale;
        if rng.gen_bool(SPIKE_PROBABILITY) {
            let spike: f64 = rng.gen_range(1.5..2.5);
            revenue *= spike;
        }
        let noise: f64 = rng.gen_range(-0.1..0.1);
        revenue *= 1.0 + noise;
        let revenue = round2(revenue.max(0.0));

        let order_factor: f64 = rng.gen_range(0.7..1.5);
        let orders = if baseline.avg_amount > 0.0 {
            (revenue / baseline.avg_amount * order_factor).round().max(1.0) as u32
        } else {
            1
        };

        (revenue, orders)
    }
}

impl Default for RevenueAggregator {
    fn default() -> Self {
        Self::new(30)
    }
}

/// Index-based sinusoidal smoothing: about ±12% on revenue, ±1 on orders
fn wave(i: usize, revenue: f64, orders: u32) -> (f64, u32) {
    let i = i as f64;
    let revenue = round2((revenue * (1.0 + 0.12 * (1.3 * i).sin())).max(0.0));
    let shift = (1.2 * (0.9 * i).sin()).round() as i64;
    let orders = (i64::from(orders) + shift).max(0) as u32;
    (revenue, orders)
}

fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tx(id: &str, timestamp: &str, amount: f64) -> Transaction {
        Transaction::new(id, timestamp, amount, 30, "Approved")
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("a", "2024-01-03T09:00:00Z", 100.0),
            tx("b", "2024-01-03T17:00:00Z", 300.0),
            tx("c", "bad timestamp", 1_000.0),
        ]
    }

    /// Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    #[test]
    fn test_window_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = RevenueAggregator::new(7).synthesize(&sample(), monday(), &mut rng);

        assert_eq!(series.len(), 7);
        assert_eq!(series.items[6].date, monday());
        assert!(series
            .items
            .windows(2)
            .all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
        assert_eq!(series.items[6].label, "Jan 8");
        assert_eq!(series.skipped.len(), 1);
    }

    #[test]
    fn test_lowest_draws_give_exact_values() {
        // Every draw at the bottom of its range: factor 0.7, spike 1.5, noise -10%.
        // Baseline: 400 over one active day, average amount 200.
        let mut rng = StepRng::new(0, 0);
        let series = RevenueAggregator::new(1).synthesize(&sample(), monday(), &mut rng);

        let point = &series.items[0];
        assert!((point.revenue - 378.0).abs() < 1e-9);
        // round(378 / 200 * 0.7) = 1
        assert_eq!(point.orders, 1);
    }

    #[test]
    fn test_weekend_factor_and_wave() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let mut rng = StepRng::new(0, 0);
        let series = RevenueAggregator::new(2).synthesize(&sample(), sunday, &mut rng);

        // Saturday, wave index 0: unchanged by the wave
        assert!((series.items[0].revenue - 264.6).abs() < 1e-9);
        assert_eq!(series.items[0].orders, 1);

        // Sunday, wave index 1
        let expected = round2(264.6 * (1.0 + 0.12 * 1.3f64.sin()));
        assert!((series.items[1].revenue - expected).abs() < 1e-9);
        assert_eq!(series.items[1].orders, 2);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let aggregator = RevenueAggregator::default();
        let a = aggregator.synthesize(&sample(), monday(), &mut StdRng::seed_from_u64(42));
        let b = aggregator.synthesize(&sample(), monday(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = RevenueAggregator::default().synthesize(&[], monday(), &mut rng);
        assert!(series.is_empty());
        assert!(series.skipped.is_empty());
    }

    #[test]
    fn test_zero_amounts_keep_orders_at_one() {
        let txs = vec![tx("a", "2024-01-03T09:00:00Z", -5.0)];
        let mut rng = StdRng::seed_from_u64(3);
        let series = RevenueAggregator::new(1).synthesize(&txs, monday(), &mut rng);

        assert_eq!(series.items[0].revenue, 0.0);
        assert_eq!(series.items[0].orders, 1);
    }

    #[test]
    fn test_daily_totals() {
        let txs = vec![
            tx("a", "2024-01-05T09:00:00Z", 10.0),
            tx("b", "2024-01-03T09:00:00Z", 100.0),
            tx("c", "2024-01-03T21:00:00Z", 50.5),
        ];

        let totals = RevenueAggregator::default().daily_totals(&txs);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.items[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(totals.items[0].revenue, 150.5);
        assert_eq!(totals.items[0].orders, 2);
        assert_eq!(totals.items[1].label, "Jan 5");
    }

    #[test]
    fn test_apply_wave_keeps_first_day() {
        let txs = vec![
            tx("a", "2024-01-03T09:00:00Z", 100.0),
            tx("b", "2024-01-04T09:00:00Z", 100.0),
        ];
        let totals = RevenueAggregator::default().daily_totals(&txs);
        let waved = RevenueAggregator::apply_wave(&totals.items);

        assert_eq!(waved[0], totals.items[0]);
        assert_eq!(waved[1].revenue, round2(100.0 * (1.0 + 0.12 * 1.3f64.sin())));
        // 1 + round(1.2 * sin(0.9)) = 2
        assert_eq!(waved[1].orders, 2);
    }
}
