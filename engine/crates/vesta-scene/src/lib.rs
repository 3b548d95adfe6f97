//! 模型与 GPU 之间的桥梁
//!
//! - [`ModelManager`](model_manager::ModelManager): 持有一个模型在 GPU 上的 buffer 和布局
//! - [`ModelManagerList`](model_manager_list::ModelManagerList): 按顺序绘制的实例列表
//! - [`ModelLibrary`](model_library::ModelLibrary): 名称到模型的注册表

pub mod config;
pub mod error;
pub mod material;
pub mod model_library;
pub mod model_manager;
pub mod model_manager_list;
