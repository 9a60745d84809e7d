//! # Utility Functions and Helper Module
//!
//! Small helpers shared across the benchmark client: run identifiers and
//! seeds, human-readable formatting, worker-count hints, and console table
//! output.
//!
//! ## Usage Examples
//!
//! ```rust
//! use vrp_service_bench::utils::*;
//! use std::time::Duration;
//!
//! assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
//! assert_eq!(format_seconds(2.5), "2.50s");
//! assert!(get_recommended_concurrency() >= 1);
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Generate a unique identifier for a benchmark run
///
/// Creates a UUID v4 string stamped into every report so results from
/// repeated runs against the same endpoint can be told apart.
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get current timestamp as nanoseconds since Unix epoch
///
/// If the system time is before the Unix epoch (very rare), returns 0
/// rather than panicking.
pub fn current_timestamp_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Seed derived from the current time, for runs that do not ask for
/// reproducibility.
pub fn time_seed() -> u64 {
    current_timestamp_ns()
}

/// Derive the seed for one iteration of one scenario from a base seed.
///
/// The result depends only on its inputs, so the payload a given iteration
/// sees is the same whether scenarios run sequentially or on a worker pool.
/// The mixing step is SplitMix64's finalizer, which spreads nearby inputs
/// across the whole seed space.
pub fn derive_seed(base: u64, scenario_index: usize, iteration: usize) -> u64 {
    let mut z = base
        ^ (scenario_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (iteration as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Format a Duration into a human-readable string
///
/// The function automatically selects the most appropriate unit:
/// - **< 1μs**: Displays as nanoseconds (e.g., "500ns")
/// - **< 1ms**: Displays as microseconds (e.g., "1.50μs")
/// - **< 1s**: Displays as milliseconds (e.g., "1.50ms")
/// - **≥ 1s**: Displays as seconds (e.g., "1.50s")
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format a response time given in seconds, the unit the report uses.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// Get the number of CPU cores available on the system
pub fn get_cpu_cores() -> usize {
    num_cpus::get()
}

/// Get recommended worker count for concurrent scenario execution
///
/// Half the available cores, capped at 8. Requests are I/O bound on this
/// side, but the payload generation and JSON encoding of large instances is
/// not free.
pub fn get_recommended_concurrency() -> usize {
    (get_cpu_cores() / 2).clamp(1, 8)
}

/// Print a formatted table row with consistent column widths
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, (column, &width)) in columns.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            row.push_str(" | ");
        }
        row.push_str(&format!("{:<width$}", column, width = width));
    }
    println!("{}", row);
}

/// Print a table separator line
pub fn print_table_separator(widths: &[usize]) {
    let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
    println!("{}", "-".repeat(total));
}

/// Create a text-based progress indicator
///
/// ```rust
/// # use vrp_service_bench::utils::create_progress_indicator;
/// assert_eq!(create_progress_indicator(0, 100, 10), "░░░░░░░░░░");
/// assert_eq!(create_progress_indicator(50, 100, 10), "█████░░░░░");
/// assert_eq!(create_progress_indicator(100, 100, 10), "██████████");
/// ```
pub fn create_progress_indicator(current: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return "█".repeat(width);
    }

    let progress = (current as f64 / total as f64).min(1.0);
    let filled = ((progress * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test duration formatting with various time scales
    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50μs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.00s");
        assert_eq!(format_seconds(12.346), "12.35s");
    }

    /// Seeds must be stable and must differ across scenarios and iterations
    #[test]
    fn test_derive_seed() {
        assert_eq!(derive_seed(42, 0, 1), derive_seed(42, 0, 1));
        assert_ne!(derive_seed(42, 0, 1), derive_seed(42, 0, 2));
        assert_ne!(derive_seed(42, 0, 1), derive_seed(42, 1, 1));
        assert_ne!(derive_seed(42, 0, 1), derive_seed(43, 0, 1));
    }

    #[test]
    fn test_generate_run_id_is_unique() {
        assert_ne!(generate_run_id(), generate_run_id());
    }

    #[test]
    fn test_get_recommended_concurrency() {
        let concurrency = get_recommended_concurrency();
        assert!(concurrency > 0);
        assert!(concurrency <= 8);
    }

    /// Test progress indicator visualization
    #[test]
    fn test_create_progress_indicator() {
        assert_eq!(create_progress_indicator(0, 100, 10), "░░░░░░░░░░");
        assert_eq!(create_progress_indicator(50, 100, 10), "█████░░░░░");
        assert_eq!(create_progress_indicator(100, 100, 10), "██████████");
        assert_eq!(create_progress_indicator(3, 0, 4), "████");
    }
}
