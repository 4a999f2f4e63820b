//! Check command implementation
//!
//! Prints the effective configuration after file, environment and flag
//! overrides, and which estimators can run at the configured step count.

use std::io::Write;

use lattice_pricing::{LatticeMethod, MAX_STEPS};

use crate::config::AppConfig;
use crate::Result;

/// Run the check command
pub fn run<W: Write>(config: &AppConfig, mut out: W) -> Result<()> {
    writeln!(out, "Effective configuration")?;
    writeln!(out, "{}", toml::to_string_pretty(config)?)?;
    writeln!(out, "Step limit: {}", MAX_STEPS)?;

    writeln!(out, "\nMinimum steps (price / with Greeks):")?;
    for method in LatticeMethod::ALL {
        let status = match config.steps {
            n if n >= method.min_steps(true) => "ok",
            n if n >= method.min_steps(false) => "price only",
            _ => "too few steps",
        };
        writeln!(
            out,
            "  {:<11} {:>2} / {:<2} {}",
            method,
            method.min_steps(false),
            method.min_steps(true),
            status
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_method_limits() {
        let config = AppConfig {
            steps: 4,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        run(&config, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("steps = 4"));
        assert!(text.contains("method = \"plain\""));
        assert!(text.lines().any(|l| l.contains("plain") && l.ends_with("ok")));
        assert!(text
            .lines()
            .any(|l| l.contains("richardson") && l.ends_with("price only")));
    }
}
