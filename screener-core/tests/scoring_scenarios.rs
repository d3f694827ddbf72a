//! End-to-end scoring scenarios: bar series in, scored result out.

use chrono::NaiveDate;
use screener_core::domain::Bar;
use screener_core::indicators::{calculate_indicators, MIN_HISTORY};
use screener_core::ranking::{rank, DEFAULT_TOP_N};
use screener_core::signals::{Action, MacdCross, ObvTrend, RsiZone, SignalKind, Trend};
use screener_core::{score_bars, ScoringError};

fn bars_from_closes(closes: &[f64], volume: u64) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect()
}

// ── Flat series ──────────────────────────────────────────────────────

#[test]
fn flat_series_scores_trend_down_and_obv_down() {
    let bars = bars_from_closes(&[100.0; 250], 1000);
    let rows = calculate_indicators(&bars).unwrap().unwrap();
    let last = rows.last().unwrap();

    assert_eq!(last.ma200, 100.0);
    assert_eq!(last.rsi, 0.0);
    assert_eq!(last.macd, 0.0);
    assert_eq!(last.stoch_k, 0.0);
    assert_eq!(last.obv, 0);

    let result = score_bars("FLAT.JK", &bars).unwrap().unwrap();
    assert_eq!(result.trend, Trend::Down);
    assert_eq!(result.obv_trend, ObvTrend::Down);
    assert_eq!(result.macd_cross, MacdCross::None);
    assert_eq!(result.rsi_zone, RsiZone::Oversold);
    assert!(result.signals.is_empty());
    assert_eq!(result.score, -1.5);
    // -1.5 sits on the SELL boundary
    assert_eq!(result.action, Action::Sell);
}

// ── Short-term golden cross ──────────────────────────────────────────

/// A long advance, a pullback, then a sharp rebound.
fn rebound_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..200).map(|i| 100.0 + i as f64 * 0.5).collect();
    let mut price = *closes.last().unwrap();
    for _ in 0..30 {
        price -= 2.0;
        closes.push(price);
    }
    for _ in 0..20 {
        price += 2.9;
        closes.push(price);
    }
    closes
}

#[test]
fn ma9_cross_above_ma20_fires_once() {
    let closes = rebound_closes();
    let bars = bars_from_closes(&closes, 1000);
    let rows = calculate_indicators(&bars).unwrap().unwrap();

    let t = (MIN_HISTORY + 30..rows.len())
        .find(|&t| rows[t - 1].ma9 < rows[t - 1].ma20 && rows[t].ma9 > rows[t].ma20)
        .expect("rebound produces a MA9/MA20 cross");
    assert!(rows[t].ma20 < rows[t].ma50);

    let result = score_bars("REB.JK", &bars[..=t]).unwrap().unwrap();
    assert_eq!(result.signals, vec![SignalKind::Ma9CrossMa20Bull]);
    assert_eq!(result.macd_cross, MacdCross::None);
    assert_eq!(result.trend, Trend::Up);
    assert_eq!(result.obv_trend, ObvTrend::Up);
    // trend +1.0, MA9 cross +1.5, OBV +0.5
    assert_eq!(result.score, 3.0);
    assert_eq!(result.action, Action::Buy);
}

#[test]
fn golden_cross_bar_not_visible_one_bar_earlier() {
    let closes = rebound_closes();
    let bars = bars_from_closes(&closes, 1000);
    let rows = calculate_indicators(&bars).unwrap().unwrap();
    let t = (MIN_HISTORY + 30..rows.len())
        .find(|&t| rows[t - 1].ma9 < rows[t - 1].ma20 && rows[t].ma9 > rows[t].ma20)
        .unwrap();

    let before = score_bars("REB.JK", &bars[..t]).unwrap().unwrap();
    assert!(!before.signals.contains(&SignalKind::Ma9CrossMa20Bull));
}

// ── Insufficient history ─────────────────────────────────────────────

#[test]
fn short_series_is_excluded_without_error() {
    let closes: Vec<f64> = (0..150).map(|i| 100.0 + i as f64).collect();
    let short = bars_from_closes(&closes, 1000);
    assert!(score_bars("SHORT.JK", &short).unwrap().is_none());

    let long = bars_from_closes(&[100.0; 250], 1000);
    let scored: Vec<_> = [("SHORT.JK", &short), ("FLAT.JK", &long)]
        .into_iter()
        .filter_map(|(s, b)| score_bars(s, b).unwrap())
        .collect();
    let ranked = rank(scored, DEFAULT_TOP_N);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].symbol, "FLAT.JK");
}

#[test]
fn exactly_min_history_is_scored() {
    let bars = bars_from_closes(&[100.0; MIN_HISTORY], 1000);
    assert!(score_bars("EDGE.JK", &bars).unwrap().is_some());
    assert!(score_bars("EDGE.JK", &bars[..MIN_HISTORY - 1])
        .unwrap()
        .is_none());
}

// ── Malformed input ──────────────────────────────────────────────────

#[test]
fn out_of_order_series_is_an_error() {
    let mut bars = bars_from_closes(&[100.0; 250], 1000);
    bars.swap(10, 11);
    let err = score_bars("BAD.JK", &bars).unwrap_err();
    assert!(matches!(err, ScoringError::Series(_)));
}

#[test]
fn nan_close_is_an_error() {
    let mut bars = bars_from_closes(&[100.0; 250], 1000);
    bars[42].close = f64::NAN;
    assert!(score_bars("BAD.JK", &bars).is_err());
}

// ── Display ──────────────────────────────────────────────────────────

#[test]
fn display_record_for_flat_series() {
    let bars = bars_from_closes(&[12_500.0; 250], 2_500_000);
    let result = score_bars("BBCA.JK", &bars).unwrap().unwrap();
    let record = result.to_display(".JK");

    assert_eq!(record.stock, "BBCA");
    assert_eq!(record.price, "12,500");
    assert_eq!(record.volume, "2.5M");
    assert_eq!(record.trend, "DOWN < MA200");
    assert_eq!(record.obv, "DOWN");
    assert_eq!(record.macd, "-");
    assert_eq!(record.rsi, "0 (OS)");
    assert_eq!(record.stoch, "-");
    assert_eq!(record.action, Action::Sell);
    assert_eq!(record.signal, "-");
}
