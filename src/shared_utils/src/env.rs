use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Blank values (only whitespace) count as missing.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    get_optional_env_var(name).ok_or_else(|| MissingEnvVarError(name.to_string()))
}

/// Reads an environment variable that is allowed to be absent.
///
/// Returns the trimmed value, or `None` when the variable is unset, blank,
/// or not valid unicode.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so they can run in parallel.

    #[test]
    fn missing_var_reports_its_name() {
        let err = get_env_var("SHARED_UTILS_TEST_NEVER_SET").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_TEST_NEVER_SET");
        assert!(err.to_string().contains("SHARED_UTILS_TEST_NEVER_SET"));
    }

    #[test]
    fn blank_var_is_treated_as_missing() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", "   ") };
        assert!(get_optional_env_var("SHARED_UTILS_TEST_BLANK").is_none());
        assert!(get_env_var("SHARED_UTILS_TEST_BLANK").is_err());
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_BLANK") };
    }

    #[test]
    fn present_var_is_trimmed() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_PRESENT", "  Asia/Taipei ") };
        assert_eq!(get_env_var("SHARED_UTILS_TEST_PRESENT").unwrap(), "Asia/Taipei");
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_PRESENT") };
    }
}
