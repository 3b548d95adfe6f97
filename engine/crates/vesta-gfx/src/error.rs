#[derive(Debug, thiserror::Error)]
pub enum GfxError {
    /// 图形上下文拒绝了 buffer 或 layout 的分配
    #[error("failed to allocate {what}: {reason}")]
    Allocation { what: String, reason: String },

    /// 在错误的生命周期状态下调用
    #[error("invalid state: {0}")]
    InvalidState(String),
}
impl GfxError {
    #[inline]
    pub fn allocation(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::Allocation {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}
