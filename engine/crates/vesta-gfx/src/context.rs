use crate::error::GfxError;
use crate::handles::{GfxBufferHandle, GfxLayoutHandle};
use crate::vertex_layout::VertexAttributeLayout;
use std::cell::RefCell;
use std::rc::Rc;

/// buffer 的用途
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GfxBufferUsage {
    Vertex,
    /// u32 索引
    Index,
}

/// 随 draw call 一起提交的材质参数，作为 push constant 使用
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialPushData {
    pub albedo: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
    pub _padding: [f32; 3],
}

/// 一次 indexed draw 所需的全部状态
#[derive(Clone, Debug, PartialEq)]
pub struct DrawIndexed {
    pub layout: GfxLayoutHandle,
    pub vertex_buffer: GfxBufferHandle,
    pub index_buffer: GfxBufferHandle,
    pub index_cnt: u32,
    pub material: MaterialPushData,
}

/// 图形上下文的边界
///
/// 分配出来的 handle 由调用者独占，调用者负责恰好释放一次。
/// 释放一个未知的 handle 不会 panic，由实现记录警告。
pub trait GfxContext {
    /// 创建 buffer，并把 `data` 原样上传；函数返回时上传已经完成
    fn allocate_buffer(
        &mut self,
        usage: GfxBufferUsage,
        data: &[u8],
        name: &str,
    ) -> Result<GfxBufferHandle, GfxError>;

    fn release_buffer(&mut self, handle: GfxBufferHandle);

    fn allocate_attribute_layout(
        &mut self,
        layout: &VertexAttributeLayout,
        name: &str,
    ) -> Result<GfxLayoutHandle, GfxError>;

    fn release_attribute_layout(&mut self, handle: GfxLayoutHandle);

    fn draw_indexed(&mut self, draw: &DrawIndexed);
}

/// 在同一线程内共享的图形上下文
///
/// `Rc` 使得持有它的类型都不是 `Send`，图形资源因此只会在上下文所在的线程上创建和释放。
pub type SharedGfxContext = Rc<RefCell<dyn GfxContext>>;
