use std::path::{Path, PathBuf};

/// 统一资源路径管理
///
/// 所有路径基于工作区根目录（通过 `CARGO_MANIFEST_DIR` 推导）。
///
/// # 使用示例
/// ```ignore
/// let obj_dir = VestaPath::assets_path("obj");            // assets/obj
/// let config = VestaPath::resources_path("models.toml");  // resources/models.toml
/// ```
pub struct VestaPath {}
// 核心路径
impl VestaPath {
    /// 获取工作区根目录
    pub fn workspace_path() -> PathBuf {
        // engine/crates/vesta-crate-tools -> workspace root
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .ancestors()
            .nth(3)
            .expect("vesta-crate-tools should live in <workspace>/engine/crates")
            .to_path_buf()
    }
}
// 根目录下
impl VestaPath {
    /// 获取 `assets/` 目录下的文件路径
    pub fn assets_path(filename: &str) -> PathBuf {
        Self::workspace_path().join("assets").join(filename)
    }

    /// 获取 `resources/` 目录下的文件路径
    pub fn resources_path(filename: &str) -> PathBuf {
        Self::workspace_path().join("resources").join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_path_contains_engine() {
        let workspace = VestaPath::workspace_path();
        assert!(workspace.join("engine").join("crates").join("vesta-crate-tools").is_dir());
    }

    #[test]
    fn test_assets_path() {
        let path = VestaPath::assets_path("obj");
        assert!(path.ends_with("assets/obj"));
        assert!(path.starts_with(VestaPath::workspace_path()));
    }
}
