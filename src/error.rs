//! 错误处理

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // 标准库错误处理
    #[error("io error, {0}")]
    Io(std::io::Error),
    #[error("json error, {0}")]
    Json(#[from] serde_json::Error),
    // std::sync::poison
    #[error("lock error, {0}")]
    Lock(String),

    // 预设存储
    #[error("preset not found, {0}")]
    PresetNotFound(String),
    #[error("category not found, {0}")]
    CategoryNotFound(String),
    #[error("corrupt store, {0}")]
    CorruptStore(String),

    #[error("py error, {0}")]
    PyErr(#[from] pyo3::PyErr),

    #[error("tensor error, {0}")]
    TensorErr(#[from] candle_core::Error),

    #[error("image error, {0}")]
    ImageError(#[from] image::ImageError),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
