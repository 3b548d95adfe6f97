use crate::context::{DrawIndexed, GfxBufferUsage, GfxContext};
use crate::error::GfxError;
use crate::handles::{GfxBufferHandle, GfxLayoutHandle};
use crate::vertex_layout::VertexAttributeLayout;
use slotmap::SlotMap;

struct HeadlessBuffer {
    usage: GfxBufferUsage,
    data: Vec<u8>,
    name: String,
}

/// 分配与释放的计数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GfxAllocationStats {
    pub allocations: usize,
    pub releases: usize,
    /// 释放了一个不存在（或已经释放过）的 handle
    pub invalid_releases: usize,
    /// 被拒绝的分配请求
    pub failed_allocations: usize,
}
impl GfxAllocationStats {
    #[inline]
    pub fn live(&self) -> usize {
        self.allocations - self.releases
    }
}

/// 不依赖 GPU 的图形上下文
///
/// buffer 数据保存在内存中，draw call 只做记录。可以注入分配失败，用于测试错误路径。
#[derive(Default)]
pub struct HeadlessGfxContext {
    buffers: SlotMap<GfxBufferHandle, HeadlessBuffer>,
    layouts: SlotMap<GfxLayoutHandle, VertexAttributeLayout>,
    draw_calls: Vec<DrawIndexed>,

    stats: GfxAllocationStats,

    /// 还允许成功的分配次数，`None` 表示不限制
    allocation_budget: Option<usize>,
}
// new & init
impl HeadlessGfxContext {
    pub fn new() -> Self {
        Self::default()
    }
}
// getter
impl HeadlessGfxContext {
    #[inline]
    pub fn stats(&self) -> GfxAllocationStats {
        self.stats
    }

    #[inline]
    pub fn live_buffer_cnt(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn live_layout_cnt(&self) -> usize {
        self.layouts.len()
    }

    pub fn buffer_data(&self, handle: GfxBufferHandle) -> Option<&[u8]> {
        self.buffers.get(handle).map(|buffer| buffer.data.as_slice())
    }

    pub fn buffer_usage(&self, handle: GfxBufferHandle) -> Option<GfxBufferUsage> {
        self.buffers.get(handle).map(|buffer| buffer.usage)
    }

    pub fn layout(&self, handle: GfxLayoutHandle) -> Option<&VertexAttributeLayout> {
        self.layouts.get(handle)
    }

    #[inline]
    pub fn draw_calls(&self) -> &[DrawIndexed] {
        &self.draw_calls
    }
}
// tools
impl HeadlessGfxContext {
    /// 再成功 `cnt` 次分配之后，后续所有分配都会失败，直到调用 [`Self::clear_allocation_failure`]
    pub fn fail_allocation_after(&mut self, cnt: usize) {
        self.allocation_budget = Some(cnt);
    }

    pub fn clear_allocation_failure(&mut self) {
        self.allocation_budget = None;
    }

    pub fn clear_draw_calls(&mut self) {
        self.draw_calls.clear();
    }

    fn try_consume_budget(&mut self, what: &str) -> Result<(), GfxError> {
        match &mut self.allocation_budget {
            Some(0) => {
                self.stats.failed_allocations += 1;
                Err(GfxError::allocation(what, "allocation budget exhausted"))
            }
            Some(budget) => {
                *budget -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}
impl GfxContext for HeadlessGfxContext {
    fn allocate_buffer(
        &mut self,
        usage: GfxBufferUsage,
        data: &[u8],
        name: &str,
    ) -> Result<GfxBufferHandle, GfxError> {
        self.try_consume_budget(name)?;

        self.stats.allocations += 1;
        Ok(self.buffers.insert(HeadlessBuffer {
            usage,
            data: data.to_vec(),
            name: name.to_string(),
        }))
    }

    fn release_buffer(&mut self, handle: GfxBufferHandle) {
        match self.buffers.remove(handle) {
            Some(buffer) => {
                log::debug!("release buffer '{}' ({} bytes)", buffer.name, buffer.data.len());
                self.stats.releases += 1;
            }
            None => {
                log::warn!("release unknown buffer {:?}", handle);
                self.stats.invalid_releases += 1;
            }
        }
    }

    fn allocate_attribute_layout(
        &mut self,
        layout: &VertexAttributeLayout,
        name: &str,
    ) -> Result<GfxLayoutHandle, GfxError> {
        if !layout.is_valid() {
            self.stats.failed_allocations += 1;
            return Err(GfxError::allocation(name, "invalid vertex attribute layout"));
        }
        self.try_consume_budget(name)?;

        self.stats.allocations += 1;
        Ok(self.layouts.insert(layout.clone()))
    }

    fn release_attribute_layout(&mut self, handle: GfxLayoutHandle) {
        if self.layouts.remove(handle).is_some() {
            self.stats.releases += 1;
        } else {
            log::warn!("release unknown attribute layout {:?}", handle);
            self.stats.invalid_releases += 1;
        }
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed) {
        let index_buffer = self.buffers.get(draw.index_buffer);
        let valid = self.layouts.contains_key(draw.layout)
            && self.buffers.contains_key(draw.vertex_buffer)
            && index_buffer.is_some_and(|buffer| buffer.data.len() >= draw.index_cnt as usize * size_of::<u32>());
        if !valid {
            log::warn!("skip draw call with invalid resources: {:?}", draw);
            return;
        }

        self.draw_calls.push(draw.clone());
    }
}
