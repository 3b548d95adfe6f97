use std::path::PathBuf;
use vesta_model::error::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// 注册表中没有该名称的模型
    #[error("model '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown primitive '{0}', expected 'box' or 'quad'")]
    UnknownPrimitive(String),
}
