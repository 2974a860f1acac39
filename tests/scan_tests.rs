//! End-to-end scan cycles against a scripted catalogue source.

use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};
use flipscan::app::{Config, RefreshOutcome, Scanner};
use flipscan::domain::{BookImbalance, ProductId, QuickStats};
use flipscan::error::SourceError;
use flipscan::port::ProductSnapshot;
use flipscan::testkit::domain::{level, product_snapshot, snapshot};
use flipscan::testkit::source::ScriptedSource;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).expect("valid timestamp")
}

fn config() -> Config {
    let mut config = Config::default();
    config.market.capital = 1_000_000.0;
    config
}

#[tokio::test]
async fn profit_per_hour_scenario() {
    let wheat = ProductSnapshot {
        buy_levels: vec![level(10.0, 5_000, 40)],
        sell_levels: vec![level(12.5, 2_000, 25)],
        stats: QuickStats::new(9.5, 12.0, 1680.0, 1680.0),
    };
    let source = ScriptedSource::new().with_results(vec![Ok(snapshot([("WHEAT", wheat)]))]);
    let mut scanner = Scanner::new(&config(), Box::new(source));

    let report = scanner.scan_at(at(0)).await;

    assert_eq!(report.flips.len(), 1);
    let flip = &report.flips[0];
    assert_eq!(flip.product_id(), &ProductId::new("WHEAT"));
    assert!((flip.profit_per_hour() - 18.8).abs() < 1e-9);
    // sell top 2000 vs buy top 5000 => -0.4286
    assert_eq!(flip.imbalance(), Some(BookImbalance::HeavySell));
}

#[tokio::test]
async fn unavailable_source_reports_no_flips() {
    let source = ScriptedSource::new()
        .with_results(vec![Err(SourceError::Unavailable("connection reset".into()))]);
    let mut scanner = Scanner::new(&config(), Box::new(source));

    let report = scanner.scan_at(at(0)).await;

    assert!(matches!(
        report.outcome,
        RefreshOutcome::Failed(SourceError::Unavailable(_))
    ));
    assert!(report.flips.is_empty());
    assert!(scanner.catalogue().is_empty());

    let mut out = Vec::new();
    report.render(&mut out, None).expect("render");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("No flips could be found!"));
}

#[tokio::test]
async fn failed_refresh_keeps_previous_catalogue() {
    let source = ScriptedSource::new().with_results(vec![
        Ok(snapshot([("WHEAT", product_snapshot(10.0, 12.0))])),
        Err(SourceError::Malformed("response reported failure".into())),
    ]);
    let mut scanner = Scanner::new(&config(), Box::new(source));

    scanner.scan_at(at(0)).await;
    let report = scanner.scan_at(at(60)).await;

    assert!(matches!(report.outcome, RefreshOutcome::Failed(_)));
    assert_eq!(scanner.catalogue().len(), 1);
    assert_eq!(report.flips.len(), 1);
}

#[tokio::test]
async fn fresh_catalogue_is_reused_between_scans() {
    let source = ScriptedSource::new().with_results(vec![
        Ok(snapshot([("WHEAT", product_snapshot(10.0, 12.0))])),
        Ok(snapshot([("WHEAT", product_snapshot(10.0, 20.0))])),
    ]);
    let counter = source.counter();
    let mut scanner = Scanner::new(&config(), Box::new(source));

    scanner.scan_at(at(0)).await;
    let second = scanner.scan_at(at(5)).await;

    assert_eq!(second.outcome, RefreshOutcome::Fresh);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!((second.flips[0].profit_per_hour() - 18.8).abs() < 1e-9);
}

#[tokio::test]
async fn top_k_limits_report() {
    let products: Vec<(String, ProductSnapshot)> = (0..25_u32)
        .map(|i| (format!("P{i:02}"), product_snapshot(10.0, 11.0 + f64::from(i) * 0.1)))
        .collect();
    let source = ScriptedSource::new().with_results(vec![Ok(snapshot(
        products.iter().map(|(id, snap)| (id.as_str(), snap.clone())),
    ))]);
    let mut config = config();
    config.market.max_flips_shown = 5;
    let mut scanner = Scanner::new(&config, Box::new(source));

    let report = scanner.scan_at(at(0)).await;

    let ids: Vec<_> = report.flips.iter().map(|f| f.product_id().as_str()).collect();
    assert_eq!(ids, vec!["P24", "P23", "P22", "P21", "P20"]);
    assert_eq!(report.tradeable, 25);
}

#[tokio::test]
async fn run_loop_reports_each_refresh() {
    let source = ScriptedSource::new().with_results(vec![
        Ok(snapshot([("WHEAT", product_snapshot(10.0, 12.0))])),
        Ok(snapshot([("WHEAT", product_snapshot(10.0, 12.0))])),
    ]);
    let counter = source.counter();
    let mut config = config();
    config.market.ttl_secs = 0;
    config.scan.min_interval_ms = 10;
    let mut scanner = Scanner::new(&config, Box::new(source));

    let mut reports = 0;
    let _ = tokio::time::timeout(
        Duration::from_millis(200),
        scanner.run(|_| reports += 1),
    )
    .await;

    assert!(reports >= 2, "expected repeated scans, got {reports}");
    assert_eq!(counter.load(Ordering::SeqCst) as usize, reports);
}
