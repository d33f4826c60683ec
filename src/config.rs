//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::progress::DEFAULT_RADIUS;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer with a circular progress ring, driven over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Radius of the progress ring, sets its circumference
    #[arg(long, default_value_t = DEFAULT_RADIUS, value_parser = parse_radius)]
    pub radius: f64,

    /// Start with the alarm sound turned off
    #[arg(long)]
    pub muted: bool,

    /// Don't mirror the countdown into the terminal title
    #[arg(long)]
    pub no_title: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Accept only finite radii above zero
fn parse_radius(value: &str) -> Result<f64, String> {
    let radius: f64 = value
        .parse()
        .map_err(|e| format!("invalid radius {:?}: {}", value, e))?;
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(format!("radius must be a positive number, got {}", value))
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn sound_enabled(&self) -> bool {
        !self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();

        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.radius, DEFAULT_RADIUS);
        assert!(config.sound_enabled());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags() {
        let config =
            Config::try_parse_from(["countdown-timer", "--muted", "-v", "--radius", "50", "-p", "8080"]).unwrap();

        assert!(!config.sound_enabled());
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.radius, 50.0);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn radius_must_be_positive() {
        for bad in ["0", "-5", "NaN", "inf", "abc"] {
            assert!(
                Config::try_parse_from(["countdown-timer", "--radius", bad]).is_err(),
                "{bad} accepted"
            );
        }
        assert_eq!(parse_radius("12.5"), Ok(12.5));
    }
}
