//! Gravatar avatar URLs

use sha2::{Digest, Sha256};

const BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Avatar URL for an email: 200px, PG rated, "mystery man" fallback
pub fn url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("{}/{}?s=200&r=pg&d=mm", BASE_URL, hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_case_and_whitespace_insensitive() {
        assert_eq!(url("Ana@X.com "), url("ana@x.com"));
    }

    #[test]
    fn test_url_shape() {
        let avatar = url("ana@x.com");
        assert!(avatar.starts_with("https://www.gravatar.com/avatar/"));
        assert!(avatar.ends_with("?s=200&r=pg&d=mm"));

        let hash = avatar
            .trim_start_matches("https://www.gravatar.com/avatar/")
            .trim_end_matches("?s=200&r=pg&d=mm");
        assert_eq!(hash.len(), 64);
    }
}
