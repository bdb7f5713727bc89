/// Custom error type for scan operations
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Network or HTTP-level failure while fetching the booking page
    #[error("failed to fetch booking page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The page was fetched but its contents could not be interpreted
    #[error("failed to parse booking page: {0}")]
    Parse(String),
}
