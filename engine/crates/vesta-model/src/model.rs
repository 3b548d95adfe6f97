use crate::aabb::Aabb;
use crate::error::ModelError;
use crate::vertex::Vertex;
use glam::{DVec3, Mat4, Quat, Vec3};

/// 最大半长轴小于等于该值时，认为模型是退化的，跳过缩放
pub const DEGENERATE_EXTENT_EPSILON: f32 = 1e-6;

/// [`Model::normalize`] 的结果
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NormalizeOutcome {
    /// 顶点已经平移了 `-offset`，然后统一缩放了 `scale`
    Normalized { offset: Vec3, scale: f32 },
    /// 所有顶点位置（几乎）重合，顶点数据保持不变
    Degenerate,
}

/// CPU 侧的模型数据
///
/// 几何数据（顶点、索引、包围盒）只能通过构造函数产生，之后只读；
/// `position` 和 `scale` 是渲染时的变换，不会写回顶点数据。
#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    aabb: Aabb,

    pub position: Vec3,
    pub scale: Vec3,
}
// new & init
impl Model {
    /// 校验索引和顶点位置后构建模型，并计算包围盒
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, ModelError> {
        validate_indices(&indices, vertices.len())?;
        validate_positions(&vertices)?;

        let aabb = Aabb::from_points(vertices.iter().map(Vertex::pos));
        Ok(Self {
            name: name.into(),
            vertices,
            indices,
            aabb,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        })
    }
}
// getter
impl Model {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 渲染时使用的模型矩阵：先缩放，再平移
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}
// tools
impl Model {
    /// 检查索引数量是 3 的倍数、所有索引都指向有效顶点、所有顶点位置都是有限值
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_indices(&self.indices, self.vertices.len())?;
        validate_positions(&self.vertices)
    }

    /// 将模型移动到原点，并缩放到最大半长轴为 1 的规范空间
    ///
    /// 1. 用包围盒中心平移所有顶点，重新计算包围盒
    /// 2. 用 `1 / max(half_extent)` 统一缩放所有顶点，重新计算包围盒
    ///
    /// 法线和 UV 不变，`position`、`scale` 不变。重复调用的结果与调用一次相同（浮点误差内）。
    ///
    /// 如果模型是退化的（最大半长轴不超过 [`DEGENERATE_EXTENT_EPSILON`]），
    /// 不修改任何顶点，输出警告并返回 [`NormalizeOutcome::Degenerate`]。
    pub fn normalize(&mut self) -> NormalizeOutcome {
        let max_half_extent = self.aabb.max_half_extent();
        if max_half_extent <= DEGENERATE_EXTENT_EPSILON {
            log::warn!(
                "model '{}' is degenerate (max half extent {}), skip normalize",
                self.name,
                max_half_extent
            );
            return NormalizeOutcome::Degenerate;
        }

        // 平移到原点
        let offset = (self.aabb.min.as_dvec3() + self.aabb.max.as_dvec3()) * 0.5;
        self.transform_positions(|p| p - offset);

        let half_extent = (self.aabb.max.as_dvec3() - self.aabb.min.as_dvec3()) * 0.5;
        let scale = 1.0 / half_extent.max_element();
        self.transform_positions(|p| p * scale);

        let (offset, scale) = (offset.as_vec3(), scale as f32);
        log::debug!("normalize model '{}': offset {}, scale {}", self.name, offset, scale);
        NormalizeOutcome::Normalized { offset, scale }
    }

    /// 在 f64 下变换所有顶点位置，然后重新计算包围盒
    fn transform_positions(&mut self, f: impl Fn(DVec3) -> DVec3) {
        for vertex in &mut self.vertices {
            vertex.position = f(vertex.pos().as_dvec3()).as_vec3().to_array();
        }
        self.aabb = Aabb::from_points(self.vertices.iter().map(Vertex::pos));
    }
}

fn validate_positions(vertices: &[Vertex]) -> Result<(), ModelError> {
    if let Some((i, vertex)) = vertices.iter().enumerate().find(|(_, v)| !v.pos().is_finite()) {
        return Err(ModelError::malformed(format!(
            "vertex {i} has a non-finite position {:?}",
            vertex.position
        )));
    }

    Ok(())
}

fn validate_indices(indices: &[u32], vertex_cnt: usize) -> Result<(), ModelError> {
    if indices.len() % 3 != 0 {
        return Err(ModelError::malformed(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some((pos, index)) = indices.iter().enumerate().find(|&(_, &index)| index as usize >= vertex_cnt) {
        return Err(ModelError::malformed(format!(
            "index {index} at position {pos} is out of range, vertex count is {vertex_cnt}"
        )));
    }

    Ok(())
}
