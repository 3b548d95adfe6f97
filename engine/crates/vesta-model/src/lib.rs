//! 模型和顶点数据管理
//!
//! 所有模型都用同一个 [`Model`](model::Model) 记录表示，由不同的构造函数产生：
//! - [`importer::import`]: 从无索引的三角形 corner 流构建，合并完全相同的顶点
//! - [`obj_loader::load_obj`]: 读取 OBJ 文件，展开为 corner 流后交给 importer
//! - [`shapes`]: 内置几何体（box、quad）
//!
//! # 使用示例
//! ```ignore
//! use vesta_model::obj_loader::load_obj;
//!
//! let mut model = load_obj("assets/obj/spot.obj")?;
//! let _ = model.normalize();
//! let model = std::sync::Arc::new(model);
//! ```

pub mod aabb;
pub mod error;
pub mod importer;
pub mod model;
pub mod obj_loader;
pub mod shapes;
pub mod vertex;
