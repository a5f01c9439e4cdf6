pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so that shell output on stdout stays scriptable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("churn_client=info"));

        // Another subscriber may already be installed by an embedding binary.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Formats a number for display: whole values without a fractional part,
/// everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    // Normalizes negative zero.
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Formats a value with exactly two decimals.
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_drop_the_fraction() {
        assert_eq!(format_number(55000.0), "55000");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.73), "0.73");
        assert_eq!(format_number(1200.5), "1200.5");
    }

    #[test]
    fn fixed_two_decimals() {
        assert_eq!(format_fixed2(10152.0), "10152.00");
        assert_eq!(format_fixed2(12.3456), "12.35");
    }
}
