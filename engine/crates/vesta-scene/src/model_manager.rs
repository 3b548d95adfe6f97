use crate::material::Material;
use std::sync::Arc;
use vesta_gfx::context::{DrawIndexed, GfxBufferUsage, GfxContext, SharedGfxContext};
use vesta_gfx::error::GfxError;
use vesta_gfx::handles::{GfxBufferHandle, GfxLayoutHandle};
use vesta_gfx::vertex_layout::GfxVertexLayout;
use vesta_model::model::Model;
use vesta_model::vertex::Vertex;

/// [`ModelManager`] 的生命周期状态
///
/// ```text
/// Unbound --bind--> Bound --reload_model--> Bound
///    ^                |                        |
///    +---- 失败 ------+------------------------+
/// 任意状态 --destroy--> Destroyed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
    Destroyed,
}

/// 一次绑定分配出来的全部 GPU 资源
struct GpuBinding {
    vertex_buffer: GfxBufferHandle,
    index_buffer: GfxBufferHandle,
    layout: GfxLayoutHandle,
    index_cnt: u32,
}
impl GpuBinding {
    /// 按 vertex buffer、index buffer、layout 的顺序分配；任意一步失败时释放本次已分配的资源
    fn allocate(ctx: &mut dyn GfxContext, model: &Model) -> Result<Self, GfxError> {
        let name = model.name();
        let index_cnt = u32::try_from(model.indices().len())
            .map_err(|_| GfxError::allocation(name, "index count exceeds u32::MAX"))?;

        let vertex_buffer = ctx.allocate_buffer(
            GfxBufferUsage::Vertex,
            bytemuck::cast_slice(model.vertices()),
            &format!("{name}-vertex-buffer"),
        )?;

        let index_buffer = match ctx.allocate_buffer(
            GfxBufferUsage::Index,
            bytemuck::cast_slice(model.indices()),
            &format!("{name}-index-buffer"),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                ctx.release_buffer(vertex_buffer);
                return Err(e);
            }
        };

        let layout = match ctx.allocate_attribute_layout(&Vertex::attribute_layout(), &format!("{name}-layout")) {
            Ok(handle) => handle,
            Err(e) => {
                ctx.release_buffer(index_buffer);
                ctx.release_buffer(vertex_buffer);
                return Err(e);
            }
        };

        Ok(Self {
            vertex_buffer,
            index_buffer,
            layout,
            index_cnt,
        })
    }

    fn release(self, ctx: &mut dyn GfxContext) {
        ctx.release_attribute_layout(self.layout);
        ctx.release_buffer(self.index_buffer);
        ctx.release_buffer(self.vertex_buffer);
    }
}

/// 将一个 [`Model`] 绑定到 GPU 上
///
/// 持有 vertex buffer、index buffer、顶点属性布局各一个，以及模型的共享引用和材质。
/// 所有资源只会被释放一次：`reload_model` 时先释放旧的再分配新的，`destroy` 或 drop 时释放全部。
///
/// 由于持有 [`SharedGfxContext`]，该类型不是 `Send`，只能在图形上下文所在的线程上使用。
pub struct ModelManager {
    ctx: SharedGfxContext,

    state: BindingState,
    /// 仅在 `Bound` 状态下为 `Some`
    binding: Option<GpuBinding>,
    model: Option<Arc<Model>>,

    material: Material,
}
// new & init
impl ModelManager {
    pub fn new(ctx: SharedGfxContext) -> Self {
        Self {
            ctx,
            state: BindingState::Unbound,
            binding: None,
            model: None,
            material: Material::default(),
        }
    }

    /// 创建并立即绑定模型
    pub fn with_model(ctx: SharedGfxContext, model: Arc<Model>) -> Result<Self, GfxError> {
        let mut manager = Self::new(ctx);
        manager.bind(model)?;
        Ok(manager)
    }
}
// getter
impl ModelManager {
    #[inline]
    pub fn state(&self) -> BindingState {
        self.state
    }

    #[inline]
    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// 未绑定时为 0
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.binding.as_ref().map_or(0, |binding| binding.index_cnt)
    }
}
// tools
impl ModelManager {
    /// 为模型分配 GPU 资源并上传数据，只能在 `Unbound` 状态下调用
    ///
    /// 分配失败时，本次分配的资源全部释放，状态保持 `Unbound`
    pub fn bind(&mut self, model: Arc<Model>) -> Result<(), GfxError> {
        match self.state {
            BindingState::Unbound => {}
            BindingState::Bound => {
                return Err(GfxError::InvalidState(format!(
                    "model manager is already bound to '{}', use reload_model instead",
                    self.model.as_ref().map_or("", |m| m.name())
                )));
            }
            BindingState::Destroyed => {
                return Err(GfxError::InvalidState("model manager is destroyed".to_string()));
            }
        }

        let binding = GpuBinding::allocate(&mut *self.ctx.borrow_mut(), &model)?;
        log::debug!(
            "bind model '{}': {} vertices, {} indices",
            model.name(),
            model.vertices().len(),
            binding.index_cnt
        );

        self.binding = Some(binding);
        self.model = Some(model);
        self.state = BindingState::Bound;
        Ok(())
    }

    /// 释放当前的 GPU 资源，然后绑定新模型，只能在 `Bound` 状态下调用
    ///
    /// 新模型绑定失败时，状态为 `Unbound`，旧资源已经释放
    pub fn reload_model(&mut self, model: Arc<Model>) -> Result<(), GfxError> {
        if self.state != BindingState::Bound {
            return Err(GfxError::InvalidState(format!(
                "reload_model requires a bound model manager, current state: {:?}",
                self.state
            )));
        }

        log::debug!(
            "reload model '{}' -> '{}'",
            self.model.as_ref().map_or("", |m| m.name()),
            model.name()
        );
        self.release();
        self.bind(model)
    }

    /// 提交一次 indexed draw；未绑定时只输出警告
    pub fn draw(&self) {
        let Some(binding) = self.binding.as_ref() else {
            log::warn!("draw called on a model manager in state {:?}, skip", self.state);
            return;
        };

        self.ctx.borrow_mut().draw_indexed(&DrawIndexed {
            layout: binding.layout,
            vertex_buffer: binding.vertex_buffer,
            index_buffer: binding.index_buffer,
            index_cnt: binding.index_cnt,
            material: self.material.push_data(),
        });
    }

    fn release(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.release(&mut *self.ctx.borrow_mut());
        }
        self.model = None;
        self.state = BindingState::Unbound;
    }
}
// destroy
impl ModelManager {
    /// 释放所有 GPU 资源，可以重复调用
    pub fn destroy(&mut self) {
        if self.state == BindingState::Destroyed {
            return;
        }

        if let Some(model) = &self.model {
            log::debug!("destroy model manager of '{}'", model.name());
        }
        self.release();
        self.state = BindingState::Destroyed;
    }
}
impl Drop for ModelManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vesta_gfx::headless::{GfxAllocationStats, HeadlessGfxContext};
    use vesta_model::shapes::cube::BoxShape;
    use vesta_model::shapes::quad::QuadShape;

    fn headless() -> (Rc<RefCell<HeadlessGfxContext>>, SharedGfxContext) {
        let headless = Rc::new(RefCell::new(HeadlessGfxContext::new()));
        let ctx: SharedGfxContext = headless.clone();
        (headless, ctx)
    }

    fn box_model() -> Arc<Model> {
        Arc::new(BoxShape::default_model().unwrap())
    }

    fn quad_model() -> Arc<Model> {
        Arc::new(QuadShape::default_model().unwrap())
    }

    #[test]
    fn test_bind_uploads_model() {
        let (headless, ctx) = headless();
        let model = box_model();
        let manager = ModelManager::with_model(ctx, model.clone()).unwrap();

        assert_eq!(manager.state(), BindingState::Bound);
        assert_eq!(manager.index_count(), 36);
        assert!(Arc::ptr_eq(manager.model().unwrap(), &model));

        let headless = headless.borrow();
        assert_eq!(headless.live_buffer_cnt(), 2);
        assert_eq!(headless.live_layout_cnt(), 1);

        let binding = manager.binding.as_ref().unwrap();
        assert_eq!(
            headless.buffer_data(binding.vertex_buffer),
            Some(bytemuck::cast_slice::<Vertex, u8>(model.vertices()))
        );
        assert_eq!(
            headless.buffer_data(binding.index_buffer),
            Some(bytemuck::cast_slice::<u32, u8>(model.indices()))
        );
        assert_eq!(headless.layout(binding.layout), Some(&Vertex::attribute_layout()));
    }

    #[test]
    fn test_bind_twice_is_invalid() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::with_model(ctx, box_model()).unwrap();

        assert!(matches!(manager.bind(quad_model()), Err(GfxError::InvalidState(_))));
        assert_eq!(manager.index_count(), 36);
        assert_eq!(headless.borrow().stats().allocations, 3);
    }

    #[test]
    fn test_bind_failure_rolls_back() {
        let (headless, ctx) = headless();
        // vertex buffer 和 index buffer 成功，layout 失败
        headless.borrow_mut().fail_allocation_after(2);

        let mut manager = ModelManager::new(ctx);
        let result = manager.bind(box_model());

        assert!(matches!(result, Err(GfxError::Allocation { .. })));
        assert_eq!(manager.state(), BindingState::Unbound);
        assert!(manager.model().is_none());
        assert_eq!(manager.index_count(), 0);

        let stats = headless.borrow().stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.releases, 2);
        assert_eq!(headless.borrow().live_buffer_cnt(), 0);

        // 失败后可以重新绑定
        headless.borrow_mut().clear_allocation_failure();
        manager.bind(box_model()).unwrap();
        assert_eq!(manager.state(), BindingState::Bound);
    }

    #[test]
    fn test_reload_replaces_resources() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::with_model(ctx, box_model()).unwrap();
        let old_vertex_buffer = manager.binding.as_ref().unwrap().vertex_buffer;

        manager.reload_model(quad_model()).unwrap();

        assert_eq!(manager.state(), BindingState::Bound);
        assert_eq!(manager.index_count(), 6);
        assert_eq!(manager.model().unwrap().name(), "quad");

        let headless = headless.borrow();
        assert!(headless.buffer_data(old_vertex_buffer).is_none());
        assert_eq!(headless.live_buffer_cnt(), 2);
        assert_eq!(headless.live_layout_cnt(), 1);
        assert_eq!(headless.stats().releases, 3);
    }

    #[test]
    fn test_reload_failure_leaves_unbound() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::with_model(ctx, box_model()).unwrap();

        headless.borrow_mut().fail_allocation_after(1);
        let result = manager.reload_model(quad_model());

        assert!(matches!(result, Err(GfxError::Allocation { .. })));
        assert_eq!(manager.state(), BindingState::Unbound);
        assert!(manager.model().is_none());

        let headless = headless.borrow();
        assert_eq!(headless.live_buffer_cnt(), 0);
        assert_eq!(headless.live_layout_cnt(), 0);
        assert_eq!(headless.stats().live(), 0);
        assert_eq!(headless.stats().invalid_releases, 0);
    }

    #[test]
    fn test_reload_requires_bound() {
        let (_headless, ctx) = headless();
        let mut manager = ModelManager::new(ctx);

        assert!(matches!(manager.reload_model(box_model()), Err(GfxError::InvalidState(_))));
        assert_eq!(manager.state(), BindingState::Unbound);
    }

    #[test]
    fn test_draw() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::new(ctx);

        // 未绑定时不提交
        manager.draw();
        assert!(headless.borrow().draw_calls().is_empty());

        manager.bind(quad_model()).unwrap();
        manager.material_mut().albedo = glam::Vec3::new(0.5, 0.25, 1.0);
        manager.draw();

        let headless = headless.borrow();
        let draw_calls = headless.draw_calls();
        assert_eq!(draw_calls.len(), 1);
        assert_eq!(draw_calls[0].index_cnt, 6);
        assert_eq!(draw_calls[0].material.albedo, [0.5, 0.25, 1.0]);
        assert_eq!(draw_calls[0].material.metallic, 0.7);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::with_model(ctx, box_model()).unwrap();

        manager.destroy();
        manager.destroy();

        assert_eq!(manager.state(), BindingState::Destroyed);
        manager.draw();
        assert!(matches!(manager.bind(box_model()), Err(GfxError::InvalidState(_))));
        assert!(matches!(manager.reload_model(box_model()), Err(GfxError::InvalidState(_))));

        let stats = headless.borrow().stats();
        assert_eq!(stats.allocations, stats.releases);
        assert_eq!(stats.invalid_releases, 0);
        assert!(headless.borrow().draw_calls().is_empty());
    }

    #[test]
    fn test_drop_releases_resources() {
        let (headless, ctx) = headless();
        {
            let mut manager = ModelManager::with_model(ctx, box_model()).unwrap();
            manager.reload_model(quad_model()).unwrap();
        }

        let stats = headless.borrow().stats();
        assert_eq!(stats.allocations, 6);
        assert_eq!(stats.releases, 6);
        assert_eq!(stats.invalid_releases, 0);
    }

    #[test]
    fn test_destroy_unbound() {
        let (headless, ctx) = headless();
        let mut manager = ModelManager::new(ctx);

        manager.destroy();

        assert_eq!(manager.state(), BindingState::Destroyed);
        assert_eq!(headless.borrow().stats(), GfxAllocationStats::default());
    }
}
