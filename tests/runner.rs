//! End-to-end trial protocol checks.

use std::time::Duration;

use lock_overhead::{
    BenchConfig, BenchmarkRunner, CounterStrategy, ResultReporter, StrategyKind,
    bench::reporter::format_line,
};

#[test]
fn one_second_atomic_cas_trial() {
    let runner = BenchmarkRunner::new(BenchConfig::default()).unwrap();
    let strategy = CounterStrategy::new(StrategyKind::AtomicCAS);

    let result = runner.run_for(&strategy, Duration::from_secs(1)).unwrap();

    assert!(result.elapsed_seconds >= 1.0);
    assert!(result.ops_completed > 0);
    assert_eq!(result.ops_completed % 10_000, 0);
    assert!(result.throughput() > 0.0);
    assert_eq!(strategy.counter().read() as u64, result.ops_completed);
}

#[test]
fn short_sweep_reports_in_trial_order() {
    let cfg = BenchConfig::default().with_duration(Duration::from_millis(10));
    let runner = BenchmarkRunner::new(cfg).unwrap();
    let strategies = CounterStrategy::all(cfg.cas_max_attempts);

    let mut reporter = ResultReporter::new(Vec::new());
    for result in runner.run_all(&strategies).unwrap() {
        assert!(result.elapsed_seconds >= 0.010);
        assert_eq!(result.ops_completed % cfg.batch_size, 0);
        reporter.report(&result).unwrap();
    }

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    for (line, kind) in lines.iter().zip(StrategyKind::ALL) {
        let prefix = format!("{}: ", kind.name());
        assert!(line.starts_with(&prefix), "{line}");
        assert!(line.ends_with(" stmt/sec"), "{line}");
    }
}

#[test]
fn reset_after_trial_reads_zero() {
    let cfg = BenchConfig::default().with_duration(Duration::ZERO);
    let runner = BenchmarkRunner::new(cfg).unwrap();
    let strategy = CounterStrategy::new(StrategyKind::NoLock);

    runner.run(&strategy).unwrap();
    assert_eq!(strategy.counter().read(), 10_000);

    strategy.counter().reset();
    assert_eq!(strategy.counter().read(), 0);
}

#[test]
fn line_format_matches_stdout_shape() {
    let cfg = BenchConfig::default().with_duration(Duration::ZERO);
    let runner = BenchmarkRunner::new(cfg).unwrap();
    let strategy = CounterStrategy::new(StrategyKind::SpinLock);
    let result = runner.run(&strategy).unwrap();

    let line = format_line(&result);
    let rate = line
        .strip_prefix("SpinLock: ")
        .and_then(|rest| rest.strip_suffix(" stmt/sec"))
        .unwrap();
    assert!(rate.chars().all(|c| c.is_ascii_digit() || c == ','));
}
