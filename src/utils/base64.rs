use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a padded Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - A boolean indicating whether to accept URL-safe Base64 encoding.
///
/// # Returns
/// The decoded string, or `None` if the input is not valid Base64 or does not decode to UTF-8.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> Option<String> {
    let engine = if accept_urlsafe {
        general_purpose::URL_SAFE
    } else {
        general_purpose::STANDARD
    };

    let decoded = engine.decode(input).ok()?;
    String::from_utf8(decoded).ok()
}

/// Appends the `=` characters needed to reach a multiple of four.
///
/// Existing trailing padding is dropped first so over-padded input is repaired too.
pub fn base64_pad(input: &str) -> String {
    let trimmed = input.trim_end_matches('=');
    let mut padded = trimmed.to_string();
    let rem = trimmed.len() % 4;
    if rem != 0 {
        padded.push_str(&"=".repeat(4 - rem));
    }
    padded
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Decodes a URL-safe Base64 string to its original form.
///
/// Both alphabets are accepted and missing padding is restored.
pub fn url_safe_base64_decode(input: &str) -> Option<String> {
    base64_decode(&base64_pad(&url_safe_base64_reverse(input)), false)
}
