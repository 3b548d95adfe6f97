use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 模型注册表的 TOML 配置
///
/// ```toml
/// model_dir = "assets/obj"
/// normalize = true
/// primitives = ["box", "quad"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelLibraryConfig {
    /// 需要加载的 OBJ 目录；相对路径以配置文件所在目录为基准
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// 是否把所有模型归一化到规范空间，默认 true
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// 需要注册的内置几何体：`box`、`quad`
    #[serde(default)]
    pub primitives: Vec<String>,
}
impl Default for ModelLibraryConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            normalize: default_normalize(),
            primitives: Vec::new(),
        }
    }
}

fn default_normalize() -> bool {
    true
}

impl ModelLibraryConfig {
    /// 从 TOML 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or(Path::new(""));
        Self::from_toml_str(&content, base_dir).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 解析 TOML 内容，`model_dir` 的相对路径以 `base_dir` 为基准
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, toml::de::Error> {
        let mut config: ModelLibraryConfig = toml::from_str(content)?;
        if let Some(model_dir) = &mut config.model_dir {
            if model_dir.is_relative() {
                *model_dir = base_dir.join(&*model_dir);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModelLibraryConfig::from_toml_str("", Path::new("/tmp")).unwrap();

        assert_eq!(config, ModelLibraryConfig::default());
        assert!(config.normalize);
        assert!(config.model_dir.is_none());
        assert!(config.primitives.is_empty());
    }

    #[test]
    fn test_relative_model_dir() {
        let content = r#"
            model_dir = "assets/obj"
            normalize = false
            primitives = ["box", "quad"]
        "#;
        let config = ModelLibraryConfig::from_toml_str(content, Path::new("/data/project")).unwrap();

        assert_eq!(config.model_dir, Some(PathBuf::from("/data/project/assets/obj")));
        assert!(!config.normalize);
        assert_eq!(config.primitives, vec!["box".to_string(), "quad".to_string()]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.toml");
        fs::write(&path, "model_dir = \"obj\"\n").unwrap();

        let config = ModelLibraryConfig::from_file(&path).unwrap();
        assert_eq!(config.model_dir, Some(dir.path().join("obj")));

        assert!(matches!(
            ModelLibraryConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));

        fs::write(&path, "normalize = \"yes\"\n").unwrap();
        assert!(matches!(ModelLibraryConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }
}
