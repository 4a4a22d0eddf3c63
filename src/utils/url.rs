//! URL encoding/decoding utilities

use std::collections::HashMap;

use url::Url;

/// Decodes a URL-encoded string
///
/// # Arguments
/// * `input` - The URL-encoded string to decode
///
/// # Returns
/// * String containing the decoded input
/// * Returns the original string if decoding fails
///
/// # Examples
/// ```
/// use subclash::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Collects the query parameters of a link.
///
/// Parameters with an empty value are dropped and the first occurrence of a
/// repeated key wins.
pub fn query_params(url: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Host of a link without the brackets around IPv6 literals.
pub fn host_without_brackets(url: &Url) -> String {
    url.host_str()
        .unwrap_or("")
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string()
}

/// Percent-decoded fragment of a link, empty when absent.
pub fn fragment_decoded(url: &Url) -> String {
    url.fragment().map(url_decode).unwrap_or_default()
}
