//! Secret redaction for safe logging and status display.

/// Mask a secret, keeping a short prefix as a length/identity hint.
///
/// The result is safe to log or print in `scamlens status` output.
pub fn redact_secret(secret: &str) -> String {
    if secret.len() > 4 {
        format!("{}***", &secret[..4])
    } else {
        "***".to_string()
    }
}
