use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreloaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("font error: {0}")]
    Font(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[cfg(feature = "window")]
    #[error("window error: {0}")]
    Window(#[from] tao::error::OsError),

    #[cfg(feature = "window")]
    #[error("softbuffer error: {0}")]
    Softbuffer(#[from] softbuffer::SoftBufferError),
}
