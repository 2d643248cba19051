use validator::ValidationError;

/// Slugs identify categories and genres in URLs and write payloads.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("invalid_slug");
        err.message = Some(
            "slug may only contain lowercase letters, digits, hyphens and underscores".into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs_pass() {
        assert!(validate_slug("sci-fi").is_ok());
        assert!(validate_slug("film_noir2").is_ok());
    }

    #[test]
    fn invalid_slugs_rejected() {
        assert!(validate_slug("Sci-Fi").is_err());
        assert!(validate_slug("sci fi").is_err());
        assert!(validate_slug("sci/fi").is_err());
    }
}
