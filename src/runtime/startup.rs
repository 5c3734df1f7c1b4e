use crate::config::Settings;

/// Refuse to start without an API key; every search would fail with an
/// opaque HTTP 403 otherwise. Checked before the terminal enters raw mode
/// so the message lands on a usable stderr.
pub fn check_credentials(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if settings.search.api_key.trim().is_empty() {
        return Err(
            "missing YouTube API key: set search.api_key in the config file \
             or the TUNEGRAB__SEARCH__API_KEY environment variable"
                .into(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_credentials;
    use crate::config::Settings;

    #[test]
    fn empty_api_key_is_rejected() {
        let settings = Settings::default();
        let err = check_credentials(&settings).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn whitespace_api_key_is_rejected() {
        let mut settings = Settings::default();
        settings.search.api_key = "   ".to_string();
        assert!(check_credentials(&settings).is_err());
    }

    #[test]
    fn present_api_key_passes() {
        let mut settings = Settings::default();
        settings.search.api_key = "AIzaSyTest".to_string();
        assert!(check_credentials(&settings).is_ok());
    }
}
