use regex::Regex;
use std::sync::OnceLock;

fn env_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern is valid"))
}

/// Expand `${VAR_NAME}` references using `lookup`. Unknown variables are left as-is.
pub fn expand_env_var_in_string<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = value.to_string();

    for cap in env_ref_regex().captures_iter(value) {
        let var_name = &cap[1];
        if let Some(replacement) = lookup(var_name) {
            result = result.replace(&cap[0], &replacement);
        }
    }

    result
}

/// Parse the usual truthy spellings.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
