use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Deterministic Gravatar-style URL for a contact identifier. The identifier
/// is trimmed and lowercased before hashing, so formatting differences in
/// the content file resolve to the same image. `d=mp` asks the service for
/// its generic silhouette when the contact has no avatar.
pub fn avatar_url(contact: &str, size: u32) -> String {
    let digest = Sha256::digest(contact.trim().to_lowercase().as_bytes());
    let hash: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("https://www.gravatar.com/avatar/{hash}?s={size}&d=mp")
}

pub fn make_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("failed to build http client")
}

/// Best-effort avatar download. Callers fall back to an initials disc on any
/// error, so this never has to succeed.
pub fn fetch_avatar(client: &reqwest::blocking::Client, contact: &str, size: u32) -> Result<Vec<u8>> {
    let url = avatar_url(contact, size);
    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("avatar request to {url} failed"))?
        .error_for_status()?;
    let bytes = response.bytes().context("failed to read avatar body")?;
    Ok(bytes.to_vec())
}

/// Up to two uppercase initials from an author name, for the drawn fallback
/// disc. Leading punctuation-only words are skipped ("A. Martínez" -> "AM").
pub fn initials(author: &str) -> String {
    author
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphabetic()))
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_deterministic() {
        let a = avatar_url("amartinez.test@example.com", 96);
        let b = avatar_url("amartinez.test@example.com", 96);
        assert_eq!(a, b);
    }

    #[test]
    fn url_normalizes_case_and_whitespace() {
        let canonical = avatar_url("amartinez.test@example.com", 96);
        assert_eq!(avatar_url("  AMartinez.Test@Example.COM ", 96), canonical);
    }

    #[test]
    fn url_shape() {
        let url = avatar_url("lgomez.test@example.com", 128);
        let hash = url
            .strip_prefix("https://www.gravatar.com/avatar/")
            .and_then(|rest| rest.strip_suffix("?s=128&d=mp"))
            .unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_contacts_differ() {
        assert_ne!(
            avatar_url("amartinez.test@example.com", 96),
            avatar_url("lgomez.test@example.com", 96)
        );
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("A. Martínez"), "AM");
        assert_eq!(initials("L. Gómez"), "LG");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }
}
