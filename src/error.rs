use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("metrics fetch failed: {0}")]
    Fetch(String),

    #[error("metrics payload could not be parsed: {0}")]
    Parse(String),

    #[error("dashboard capture failed: {0}")]
    Capture(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart lifecycle already torn down")]
    LifecycleClosed,
}
