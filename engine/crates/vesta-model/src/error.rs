use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// corner 数量不是 3 的倍数、索引越界等
    #[error("malformed geometry: {reason}")]
    MalformedGeometry { reason: String },

    /// 模型文件无法读取或解析
    #[error("failed to load mesh file {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
}
impl ModelError {
    #[inline]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGeometry { reason: reason.into() }
    }
}
