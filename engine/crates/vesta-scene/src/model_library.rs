use crate::config::ModelLibraryConfig;
use crate::error::{ConfigError, SceneError};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vesta_model::model::{Model, NormalizeOutcome};
use vesta_model::obj_loader::load_obj;
use vesta_model::shapes::cube::BoxShape;
use vesta_model::shapes::quad::QuadShape;

/// 名称到模型的注册表
///
/// 名称保持首次注册时的顺序；重复注册同一名称会覆盖旧模型。
#[derive(Default)]
pub struct ModelLibrary {
    models: IndexMap<String, Arc<Model>>,
}
// new & init
impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }
}
// getter
impl ModelLibrary {
    /// 找不到时返回 [`SceneError::NotFound`]，不会回退到其他模型
    pub fn get(&self, name: &str) -> Result<Arc<Model>, SceneError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| SceneError::NotFound(name.to_string()))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Model>)> {
        self.models.iter().map(|(name, model)| (name.as_str(), model))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
// tools
impl ModelLibrary {
    pub fn add(&mut self, name: impl Into<String>, model: Arc<Model>) {
        let name = name.into();
        if self.models.insert(name.clone(), model).is_some() {
            log::warn!("model '{}' already registered, overwrite", name);
        }
    }

    /// 导入目录下所有的 `*.obj` 文件（按文件名排序），以文件名（不含扩展名）注册
    ///
    /// 导入失败的文件会输出警告并跳过，返回成功注册的模型数量
    pub fn load_models(&mut self, dir: impl AsRef<Path>, normalize: bool) -> Result<usize, SceneError> {
        let dir = dir.as_ref();
        let io_err = |source| SceneError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut obj_files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("obj")))
            .collect();
        obj_files.sort();

        let mut loaded_cnt = 0;
        for obj_file in &obj_files {
            let model = match load_obj(obj_file) {
                Ok(model) => model,
                Err(e) => {
                    log::warn!("skip {:?}: {}", obj_file, e);
                    continue;
                }
            };

            self.register(model, normalize);
            loaded_cnt += 1;
        }

        log::info!("loaded {}/{} models from {:?}", loaded_cnt, obj_files.len(), dir);
        Ok(loaded_cnt)
    }

    /// 按配置加载目录中的模型和内置几何体，返回注册的模型数量
    pub fn load_from_config(&mut self, config: &ModelLibraryConfig) -> Result<usize, SceneError> {
        let mut loaded_cnt = 0;
        if let Some(model_dir) = &config.model_dir {
            loaded_cnt += self.load_models(model_dir, config.normalize)?;
        }

        for primitive in &config.primitives {
            let model = match primitive.as_str() {
                "box" => BoxShape::default_model()?,
                "quad" => QuadShape::default_model()?,
                _ => return Err(ConfigError::UnknownPrimitive(primitive.clone()).into()),
            };
            self.register(model, config.normalize);
            loaded_cnt += 1;
        }

        Ok(loaded_cnt)
    }

    fn register(&mut self, mut model: Model, normalize: bool) {
        if normalize {
            match model.normalize() {
                NormalizeOutcome::Normalized { offset, scale } => {
                    log::info!("normalize '{}': offset {}, scale {}", model.name(), offset, scale);
                }
                NormalizeOutcome::Degenerate => {}
            }
        }

        let name = model.name().to_string();
        self.add(name, Arc::new(model));
    }
}
