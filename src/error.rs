use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Surface memory could not be allocated. The widget cannot render
    /// without its buffer set, so this is a hard failure for the host
    /// instead of a local clamp.
    #[error("failed to allocate {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
