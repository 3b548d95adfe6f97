use crate::context::{DrawIndexed, GfxBufferUsage, GfxContext, MaterialPushData};
use crate::error::GfxError;
use crate::handles::{GfxBufferHandle, GfxLayoutHandle};
use crate::vertex_layout::{VertexAttributeFormat, VertexAttributeLayout};
use ash::vk;
use slotmap::SlotMap;
use std::ptr;
use std::sync::Arc;
use vk_mem::Alloc;

struct VkBuffer {
    handle: vk::Buffer,
    allocation: vk_mem::Allocation,
    name: String,
}

/// 创建 graphics pipeline 时需要的顶点输入描述
pub struct VkVertexInput {
    pub bindings: Vec<vk::VertexInputBindingDescription>,
    pub attributes: Vec<vk::VertexInputAttributeDescription>,
}
impl VkVertexInput {
    /// 单个 binding（binding = 0，逐顶点）的交错布局
    pub fn from_layout(layout: &VertexAttributeLayout) -> Self {
        let bindings = vec![vk::VertexInputBindingDescription {
            binding: 0,
            stride: layout.stride,
            input_rate: vk::VertexInputRate::VERTEX,
        }];
        let attributes = layout
            .attributes
            .iter()
            .map(|attr| vk::VertexInputAttributeDescription {
                binding: 0,
                location: attr.location,
                format: vk_format(attr.format),
                offset: attr.offset,
            })
            .collect();

        Self { bindings, attributes }
    }
}

pub fn vk_format(format: VertexAttributeFormat) -> vk::Format {
    match format {
        VertexAttributeFormat::Float32x2 => vk::Format::R32G32_SFLOAT,
        VertexAttributeFormat::Float32x3 => vk::Format::R32G32B32_SFLOAT,
    }
}

/// 基于 ash + vk-mem 的图形上下文
///
/// - device 和 allocator 由外部创建，生命周期需要长于本对象
/// - buffer 使用 host 可见的内存，通过 mem map 上传，创建函数返回时数据已经 flush
/// - draw call 录制到 [`Self::begin_recording`] 指定的 command buffer 中，
///   材质参数以 push constant 的形式提供给 fragment shader
pub struct VkGfxContext {
    device: ash::Device,
    allocator: Arc<vk_mem::Allocator>,
    pipeline_layout: vk::PipelineLayout,

    buffers: SlotMap<GfxBufferHandle, VkBuffer>,
    layouts: SlotMap<GfxLayoutHandle, VkVertexInput>,

    recording_cmd: Option<vk::CommandBuffer>,
}
// new & init
impl VkGfxContext {
    /// `pipeline_layout` 需要包含一个 FRAGMENT stage、offset 为 0、大小为
    /// `size_of::<MaterialPushData>()` 的 push constant range
    pub fn new(device: ash::Device, allocator: Arc<vk_mem::Allocator>, pipeline_layout: vk::PipelineLayout) -> Self {
        Self {
            device,
            allocator,
            pipeline_layout,
            buffers: SlotMap::with_key(),
            layouts: SlotMap::with_key(),
            recording_cmd: None,
        }
    }
}
// getter
impl VkGfxContext {
    #[inline]
    pub fn vk_buffer(&self, handle: GfxBufferHandle) -> Option<vk::Buffer> {
        self.buffers.get(handle).map(|buffer| buffer.handle)
    }

    #[inline]
    pub fn vertex_input(&self, handle: GfxLayoutHandle) -> Option<&VkVertexInput> {
        self.layouts.get(handle)
    }

    #[inline]
    pub fn push_constant_range() -> vk::PushConstantRange {
        vk::PushConstantRange {
            stage_flags: vk::ShaderStageFlags::FRAGMENT,
            offset: 0,
            size: size_of::<MaterialPushData>() as u32,
        }
    }
}
// tools
impl VkGfxContext {
    /// 之后的 draw call 都录制到 `cmd` 中，调用者需要已经绑定好 pipeline
    pub fn begin_recording(&mut self, cmd: vk::CommandBuffer) {
        self.recording_cmd = Some(cmd);
    }

    pub fn end_recording(&mut self) {
        self.recording_cmd = None;
    }

    /// 通过 mem map 的方式将 data 传入到 buffer 中
    fn upload(&self, allocation: &mut vk_mem::Allocation, data: &[u8]) -> Result<(), vk::Result> {
        if data.is_empty() {
            return Ok(());
        }

        unsafe {
            let mapped_ptr = self.allocator.map_memory(allocation)?;
            ptr::copy_nonoverlapping(data.as_ptr(), mapped_ptr, data.len());
            self.allocator.unmap_memory(allocation);
        }
        self.allocator.flush_allocation(allocation, 0, data.len() as vk::DeviceSize)
    }

    fn destroy_buffer(&self, mut buffer: VkBuffer) {
        unsafe {
            self.allocator.destroy_buffer(buffer.handle, &mut buffer.allocation);
        }
    }
}
impl GfxContext for VkGfxContext {
    fn allocate_buffer(
        &mut self,
        usage: GfxBufferUsage,
        data: &[u8],
        name: &str,
    ) -> Result<GfxBufferHandle, GfxError> {
        let buffer_usage = match usage {
            GfxBufferUsage::Vertex => vk::BufferUsageFlags::VERTEX_BUFFER,
            GfxBufferUsage::Index => vk::BufferUsageFlags::INDEX_BUFFER,
        };
        // vulkan 不允许大小为 0 的 buffer
        let buffer_size = data.len().max(size_of::<u32>()) as vk::DeviceSize;

        let buffer_ci = vk::BufferCreateInfo::default()
            .size(buffer_size)
            .usage(buffer_usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);
        let alloc_ci = vk_mem::AllocationCreateInfo {
            usage: vk_mem::MemoryUsage::AutoPreferDevice,
            flags: vk_mem::AllocationCreateFlags::HOST_ACCESS_RANDOM,
            ..Default::default()
        };

        let (handle, mut allocation) = unsafe { self.allocator.create_buffer(&buffer_ci, &alloc_ci) }
            .map_err(|e| GfxError::allocation(name, e))?;

        if let Err(e) = self.upload(&mut allocation, data) {
            self.destroy_buffer(VkBuffer {
                handle,
                allocation,
                name: name.to_string(),
            });
            return Err(GfxError::allocation(name, e));
        }

        log::debug!("create vk buffer '{}' ({} bytes)", name, data.len());
        Ok(self.buffers.insert(VkBuffer {
            handle,
            allocation,
            name: name.to_string(),
        }))
    }

    fn release_buffer(&mut self, handle: GfxBufferHandle) {
        match self.buffers.remove(handle) {
            Some(buffer) => self.destroy_buffer(buffer),
            None => log::warn!("release unknown buffer {:?}", handle),
        }
    }

    fn allocate_attribute_layout(
        &mut self,
        layout: &VertexAttributeLayout,
        name: &str,
    ) -> Result<GfxLayoutHandle, GfxError> {
        if !layout.is_valid() {
            return Err(GfxError::allocation(name, "invalid vertex attribute layout"));
        }

        log::debug!("create vertex input '{}' ({} attributes)", name, layout.attributes.len());
        Ok(self.layouts.insert(VkVertexInput::from_layout(layout)))
    }

    fn release_attribute_layout(&mut self, handle: GfxLayoutHandle) {
        if self.layouts.remove(handle).is_none() {
            log::warn!("release unknown attribute layout {:?}", handle);
        }
    }

    fn draw_indexed(&mut self, draw: &DrawIndexed) {
        let Some(cmd) = self.recording_cmd else {
            log::warn!("draw_indexed called outside of begin_recording/end_recording, skip");
            return;
        };
        let (Some(vertex_buffer), Some(index_buffer)) =
            (self.buffers.get(draw.vertex_buffer), self.buffers.get(draw.index_buffer))
        else {
            log::warn!("skip draw call with unknown buffers: {:?}", draw);
            return;
        };
        if !self.layouts.contains_key(draw.layout) {
            log::warn!("skip draw call with unknown layout: {:?}", draw);
            return;
        }

        unsafe {
            self.device.cmd_push_constants(
                cmd,
                self.pipeline_layout,
                vk::ShaderStageFlags::FRAGMENT,
                0,
                bytemuck::bytes_of(&draw.material),
            );
            self.device.cmd_bind_vertex_buffers(cmd, 0, &[vertex_buffer.handle], &[0]);
            self.device.cmd_bind_index_buffer(cmd, index_buffer.handle, 0, vk::IndexType::UINT32);
            self.device.cmd_draw_indexed(cmd, draw.index_cnt, 1, 0, 0, 0);
        }
    }
}
impl Drop for VkGfxContext {
    fn drop(&mut self) {
        if !self.buffers.is_empty() {
            log::warn!("VkGfxContext dropped with {} live buffers", self.buffers.len());
        }
        let buffers: Vec<VkBuffer> = self.buffers.drain().map(|(_, buffer)| buffer).collect();
        for buffer in buffers {
            log::debug!("destroy leaked vk buffer '{}'", buffer.name);
            self.destroy_buffer(buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex_layout::GfxVertexLayout;
    use vesta_model::vertex::Vertex;

    #[test]
    fn test_push_constant_range() {
        let range = VkGfxContext::push_constant_range();

        assert_eq!(range.stage_flags, vk::ShaderStageFlags::FRAGMENT);
        assert_eq!(range.offset, 0);
        assert_eq!(range.size, 32);
    }

    #[test]
    fn test_vk_format() {
        assert_eq!(vk_format(VertexAttributeFormat::Float32x2), vk::Format::R32G32_SFLOAT);
        assert_eq!(vk_format(VertexAttributeFormat::Float32x3), vk::Format::R32G32B32_SFLOAT);
    }

    #[test]
    fn test_vertex_input_from_layout() {
        let input = VkVertexInput::from_layout(&Vertex::attribute_layout());

        assert_eq!(input.bindings.len(), 1);
        assert_eq!(input.bindings[0].binding, 0);
        assert_eq!(input.bindings[0].stride, 32);
        assert_eq!(input.bindings[0].input_rate, vk::VertexInputRate::VERTEX);

        let attributes: Vec<_> = input
            .attributes
            .iter()
            .map(|attr| (attr.binding, attr.location, attr.format, attr.offset))
            .collect();
        assert_eq!(
            attributes,
            vec![
                (0, 0, vk::Format::R32G32B32_SFLOAT, 0),
                (0, 1, vk::Format::R32G32B32_SFLOAT, 12),
                (0, 2, vk::Format::R32G32_SFLOAT, 24),
            ]
        );
    }
}
