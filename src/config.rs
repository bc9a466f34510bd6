//! # Bridge Configuration
//!
//! Environment-driven configuration, loaded once at startup. A `.env`
//! file in the working directory is honored for development setups;
//! real deployments set the variables in the unit file.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `RECIBO_DEVICE` | `/dev/usb/lp0` | Printer device node |
//! | `RECIBO_PRINTER_ID` | generated v4 UUID | Fleet identity |
//! | `RECIBO_LISTEN` | `127.0.0.1:9100` | Ingestion listen address |
//! | `RECIBO_PAPER_WIDTH` | `48` | Text columns per line |
//! | `RECIBO_QUEUE_CAPACITY` | `64` | Pending job limit |
//! | `RECIBO_RESTORE_ALIGNMENT` | `true` | Restore alignment after QR/bitmap blocks |
//! | `RECIBO_STRICT_QR_SIZE` | `false` | Reject out-of-range QR sizes |
//! | `RECIBO_NATIVE_QR` | `true` | Use the printer's QR engine |

use std::env;

use uuid::Uuid;

use crate::error::BridgeError;
use crate::interp::InterpOptions;

/// Text columns on 80mm paper, Font A.
pub const DEFAULT_PAPER_WIDTH: u8 = 48;

/// Dot columns on 80mm paper at 203 DPI.
pub const PAPER_WIDTH_DOTS: u16 = 576;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub device_path: String,
    pub printer_id: String,
    pub listen_addr: String,
    pub paper_width: u8,
    pub queue_capacity: usize,
    pub restore_alignment: bool,
    pub strict_qr_size: bool,
    pub native_qr: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            device_path: "/dev/usb/lp0".to_string(),
            printer_id: Uuid::new_v4().to_string(),
            listen_addr: "127.0.0.1:9100".to_string(),
            paper_width: DEFAULT_PAPER_WIDTH,
            queue_capacity: 64,
            restore_alignment: true,
            strict_qr_size: false,
            native_qr: true,
        }
    }
}

impl BridgeConfig {
    /// Load from the process environment, after sourcing `.env` if
    /// present.
    pub fn from_env() -> Result<Self, BridgeError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            device_path: env_or("RECIBO_DEVICE", defaults.device_path),
            printer_id: env_or("RECIBO_PRINTER_ID", defaults.printer_id),
            listen_addr: env_or("RECIBO_LISTEN", defaults.listen_addr),
            paper_width: parse_env("RECIBO_PAPER_WIDTH", defaults.paper_width)?,
            queue_capacity: parse_env("RECIBO_QUEUE_CAPACITY", defaults.queue_capacity)?,
            restore_alignment: parse_env_bool("RECIBO_RESTORE_ALIGNMENT", true)?,
            strict_qr_size: parse_env_bool("RECIBO_STRICT_QR_SIZE", false)?,
            native_qr: parse_env_bool("RECIBO_NATIVE_QR", true)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), BridgeError> {
        if self.paper_width < 16 {
            return Err(BridgeError::Config(format!(
                "paper width {} too narrow, minimum is 16 columns",
                self.paper_width
            )));
        }
        if self.queue_capacity == 0 {
            return Err(BridgeError::Config(
                "queue capacity must be at least 1".into(),
            ));
        }
        if self.device_path.is_empty() {
            return Err(BridgeError::Config("device path must not be empty".into()));
        }
        Ok(())
    }

    /// Interpreter policy derived from this configuration.
    pub fn interp_options(&self) -> InterpOptions {
        InterpOptions {
            paper_width: self.paper_width,
            restore_alignment: self.restore_alignment,
            strict_qr_size: self.strict_qr_size,
            native_qr: self.native_qr,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, BridgeError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| BridgeError::Config(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}

fn parse_env_bool(key: &str, default: bool) -> Result<bool, BridgeError> {
    match env::var(key) {
        Ok(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(BridgeError::Config(format!("{key}={raw}: not a boolean"))),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paper_width, 48);
        assert!(config.restore_alignment);
        assert!(!config.strict_qr_size);
    }

    #[test]
    fn test_validate_rejects_narrow_paper() {
        let config = BridgeConfig {
            paper_width: 8,
            ..BridgeConfig::default()
        };
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_queue() {
        let config = BridgeConfig {
            queue_capacity: 0,
            ..BridgeConfig::default()
        };
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_interp_options_mirror_config() {
        let config = BridgeConfig {
            paper_width: 32,
            restore_alignment: false,
            strict_qr_size: true,
            native_qr: false,
            ..BridgeConfig::default()
        };
        let opts = config.interp_options();
        assert_eq!(opts.paper_width, 32);
        assert!(!opts.restore_alignment);
        assert!(opts.strict_qr_size);
        assert!(!opts.native_qr);
    }
}
