//! Armor configuration.

/// Literal first line of every license key.
pub const HEADER: &str = "-----BEGIN LICENSE KEY-----";

/// Literal last line of every license key.
pub const FOOTER: &str = "-----END LICENSE KEY-----";

/// Column at which the base64 body is wrapped.
pub const LINE_WIDTH: usize = 64;

/// Text framing settings for license keys.
///
/// The defaults are the stable format constants. A fresh deployment may pick
/// its own header/footer pair, but issuer and verifier must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorConfig {
    /// Line placed before the base64 body.
    pub header: &'static str,

    /// Line placed after the base64 body.
    pub footer: &'static str,

    /// Maximum number of base64 characters per body line.
    pub line_width: usize,
}

impl Default for ArmorConfig {
    fn default() -> Self {
        Self {
            header: HEADER,
            footer: FOOTER,
            line_width: LINE_WIDTH,
        }
    }
}

impl ArmorConfig {
    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::LicenseError> {
        for (name, line) in [("header", self.header), ("footer", self.footer)] {
            if line.trim().is_empty() {
                return Err(crate::LicenseError::ConfigError(format!(
                    "{} cannot be empty",
                    name
                )));
            }
            if line.contains('\n') || line.contains('\r') {
                return Err(crate::LicenseError::ConfigError(format!(
                    "{} must be a single line",
                    name
                )));
            }
            if line != line.trim() {
                return Err(crate::LicenseError::ConfigError(format!(
                    "{} cannot start or end with whitespace",
                    name
                )));
            }
        }
        if self.header == self.footer {
            return Err(crate::LicenseError::ConfigError(
                "header and footer must differ".to_string(),
            ));
        }
        if self.line_width == 0 {
            return Err(crate::LicenseError::ConfigError(
                "line_width must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
