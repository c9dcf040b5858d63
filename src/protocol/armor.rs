//! Text armor for serialized bundles.
//!
//! ```text
//! -----BEGIN LICENSE KEY-----
//! <base64, wrapped at 64 columns>
//! -----END LICENSE KEY-----
//! ```
//!
//! Dearmoring is purely textual; no signature work happens here.

use crate::config::ArmorConfig;
use crate::LicenseError;
use base64::{engine::general_purpose::STANDARD, Engine};

impl ArmorConfig {
    /// Wrap bytes in header, wrapped base64 body, and footer.
    ///
    /// Every body line is followed by a newline; the footer is not.
    pub fn armor(&self, bytes: &[u8]) -> String {
        let body = STANDARD.encode(bytes);
        let width = self.line_width.max(1);
        let lines = body.len() / width + 1;

        let mut out = String::with_capacity(
            self.header.len() + self.footer.len() + body.len() + lines + 1,
        );
        out.push_str(self.header);
        out.push('\n');
        for (i, c) in body.chars().enumerate() {
            if i > 0 && i % width == 0 {
                out.push('\n');
            }
            out.push(c);
        }
        if !body.is_empty() {
            out.push('\n');
        }
        out.push_str(self.footer);
        out
    }

    /// Strip the armor and decode the base64 body.
    ///
    /// Surrounding whitespace is ignored, and `\n`/`\r` inside the body are
    /// removed, so keys survive editors and mail clients. Any other stray
    /// character is a format error.
    ///
    /// # Errors
    /// * `InvalidFormat` - header or footer missing, or body is not padded
    ///   standard base64
    pub fn dearmor(&self, text: &str) -> Result<Vec<u8>, LicenseError> {
        let text = text.trim();

        let inner = text
            .strip_prefix(self.header)
            .ok_or_else(|| LicenseError::InvalidFormat("missing license header".to_string()))?
            .strip_suffix(self.footer)
            .ok_or_else(|| LicenseError::InvalidFormat("missing license footer".to_string()))?;

        let body: String = inner.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();

        STANDARD
            .decode(body.as_bytes())
            .map_err(|e| LicenseError::InvalidFormat(format!("invalid base64 body: {}", e)))
    }
}

/// Armor bytes with the default header, footer, and line width.
pub fn armor(bytes: &[u8]) -> String {
    ArmorConfig::default().armor(bytes)
}

/// Dearmor text with the default header and footer.
pub fn dearmor(text: &str) -> Result<Vec<u8>, LicenseError> {
    ArmorConfig::default().dearmor(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FOOTER, HEADER, LINE_WIDTH};

    #[test]
    fn test_armor_short() {
        let text = armor(b"hello");
        assert_eq!(
            text,
            "-----BEGIN LICENSE KEY-----\naGVsbG8=\n-----END LICENSE KEY-----"
        );
    }

    #[test]
    fn test_armor_wraps_at_64() {
        let bytes = vec![0x5Au8; 200];
        let text = armor(&bytes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&HEADER));
        assert_eq!(lines.last(), Some(&FOOTER));
        let body = &lines[1..lines.len() - 1];
        for line in &body[..body.len() - 1] {
            assert_eq!(line.len(), LINE_WIDTH);
        }
        assert!(body[body.len() - 1].len() <= LINE_WIDTH);
        assert_eq!(body.concat(), STANDARD.encode(&bytes));
    }

    #[test]
    fn test_armor_exact_multiple_has_no_blank_line() {
        // 48 bytes encode to exactly 64 base64 characters.
        let text = armor(&[7u8; 48]);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_armor_empty() {
        let text = armor(b"");
        assert_eq!(text, format!("{}\n{}", HEADER, FOOTER));
        assert_eq!(dearmor(&text).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_dearmor_roundtrip() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(dearmor(&armor(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_dearmor_tolerates_surrounding_whitespace() {
        let text = format!("\n\n  {}  \n\t", armor(b"license"));
        assert_eq!(dearmor(&text).unwrap(), b"license");
    }

    #[test]
    fn test_dearmor_tolerates_crlf() {
        let text = armor(&[1u8; 100]).replace('\n', "\r\n");
        assert_eq!(dearmor(&text).unwrap(), vec![1u8; 100]);
    }

    #[test]
    fn test_dearmor_missing_header() {
        let text = armor(b"license").replacen(HEADER, "", 1);
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dearmor_missing_footer() {
        let text = armor(b"license").replace(FOOTER, "");
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dearmor_header_case_matters() {
        let text = armor(b"license").replace("BEGIN LICENSE", "begin license");
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dearmor_non_base64_body() {
        let text = format!("{}\nnot*base64!\n{}", HEADER, FOOTER);
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dearmor_bad_padding() {
        let text = format!("{}\naGVsbG8\n{}", HEADER, FOOTER);
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dearmor_interior_spaces_rejected() {
        let text = format!("{}\naGVs bG8=\n{}", HEADER, FOOTER);
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_custom_armor() {
        let config = ArmorConfig {
            header: "== ACME LICENSE ==",
            footer: "== END ACME LICENSE ==",
            line_width: 16,
        };
        let text = config.armor(&[9u8; 40]);
        assert!(text.starts_with("== ACME LICENSE ==\n"));
        assert!(text.lines().skip(1).take(3).all(|l| l.len() <= 16));
        assert_eq!(config.dearmor(&text).unwrap(), vec![9u8; 40]);
        assert!(matches!(
            dearmor(&text),
            Err(LicenseError::InvalidFormat(_))
        ));
    }
}
