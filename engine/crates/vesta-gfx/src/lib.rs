//! 图形上下文抽象
//!
//! [`GfxContext`](context::GfxContext) 是模型绑定层和具体图形 API 之间的边界：
//! 分配/释放 buffer、分配/释放顶点属性布局、提交 indexed draw。
//!
//! - [`VkGfxContext`](vulkan::VkGfxContext): 基于 ash + vk-mem 的实现
//! - [`HeadlessGfxContext`](headless::HeadlessGfxContext): 数据保存在内存中，用于测试和离线工具
//!
//! 图形上下文是线程亲和的，所有实现都只在创建它的线程上使用。

pub mod context;
pub mod error;
pub mod handles;
pub mod headless;
pub mod vertex_layout;
pub mod vulkan;
