/// Splits a comma-separated list, trimming whitespace and discarding empty entries.
pub fn split_comma_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}
