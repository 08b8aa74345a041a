use anyhow::Context as _;

use crate::submission::Rejection;

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

/// Validation rejection buried in an error chain, if any
pub fn find_rejection(error: &anyhow::Error) -> Option<&Rejection> {
    error.chain().find_map(|cause| cause.downcast_ref::<Rejection>())
}
