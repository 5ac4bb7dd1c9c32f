
//! Throughput lines: `<StrategyName>: <rate> stmt/sec`.
//!
//! The rate is rounded to a whole number and grouped with `,` every three
//! digits. The reporter writes to any `io::Write`; the binary hands it stdout.

use std::io::Write;

use crate::bench::runner::TrialResult;
use crate::utils::error::BenchResult;

pub struct ResultReporter<W: Write> {
    sink: W,
}

impl<W: Write> ResultReporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes one line for `result` and flushes it.
    pub fn report(&mut self, result: &TrialResult) -> BenchResult<()> {
        writeln!(self.sink, "{}", format_line(result))?;
        self.sink.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

pub fn format_line(result: &TrialResult) -> String {
    format!(
        "{}: {} stmt/sec",
        result.strategy_name,
        format_rate(result.throughput())
    )
}

/// Rounds a rate to the nearest integer and adds thousands separators.
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() || rate <= 0.0 {
        return "0".to_string();
    }
    format_count(rate.round() as u64)
}

/// 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
