use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use vesta_gfx::context::SharedGfxContext;
use vesta_gfx::error::GfxError;
use vesta_gfx::headless::{GfxAllocationStats, HeadlessGfxContext};
use vesta_model::aabb::Aabb;
use vesta_scene::model_library::ModelLibrary;
use vesta_scene::model_manager::ModelManager;
use vesta_scene::model_manager_list::ModelManagerList;

/// 单个模型的统计信息
#[derive(Clone, Debug, PartialEq)]
pub struct ModelReport {
    pub name: String,
    pub vertex_cnt: usize,
    pub index_cnt: u32,
    pub triangle_cnt: usize,
    pub aabb: Aabb,
    /// 上传到 GPU 的字节数（vertex buffer + index buffer）
    pub upload_bytes: usize,
}
impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} vertices: {:>8}  indices: {:>8}  triangles: {:>8}  upload: {:>10} B  aabb: [{} .. {}]",
            self.name, self.vertex_cnt, self.index_cnt, self.triangle_cnt, self.upload_bytes, self.aabb.min, self.aabb.max
        )
    }
}

/// 把注册表中的每个模型都绑定到 headless 上下文上，绘制一帧后全部销毁
pub struct LibraryReport {
    pub models: Vec<ModelReport>,
    pub draw_cnt: usize,
    /// 所有 manager 销毁之后的分配统计
    pub stats: GfxAllocationStats,
}
impl LibraryReport {
    pub fn build(library: &ModelLibrary) -> Result<Self, GfxError> {
        let headless = Rc::new(RefCell::new(HeadlessGfxContext::new()));
        let ctx: SharedGfxContext = headless.clone();

        let mut managers = ModelManagerList::new();
        let mut models = Vec::with_capacity(library.len());
        for (name, model) in library.iter() {
            let manager = ModelManager::with_model(ctx.clone(), model.clone())?;
            let upload_bytes = size_of_val(model.vertices()) + size_of_val(model.indices());
            models.push(ModelReport {
                name: name.to_string(),
                vertex_cnt: model.vertices().len(),
                index_cnt: manager.index_count(),
                triangle_cnt: model.triangle_count(),
                aabb: *model.aabb(),
                upload_bytes,
            });
            managers.add(Rc::new(RefCell::new(manager)));
        }

        managers.draw_all();
        let draw_cnt = headless.borrow().draw_calls().len();

        for manager in managers.iter() {
            manager.borrow_mut().destroy();
        }
        let stats = headless.borrow().stats();

        Ok(Self {
            models,
            draw_cnt,
            stats,
        })
    }
}
