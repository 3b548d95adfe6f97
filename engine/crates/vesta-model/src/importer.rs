//! 顶点去重导入
//!
//! 输入是无索引的三角形 corner 流：每 3 个连续的 corner 构成一个三角形。
//! 输出是去重后的顶点数组和索引数组，三角形的绕序和拓扑保持不变。

use crate::error::ModelError;
use crate::model::Model;
use crate::vertex::Vertex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// 由 mesh 文件解析器填充的 corner 流
#[derive(Clone, Debug, Default)]
pub struct CornerStream {
    corners: Vec<Vertex>,
}
// new & init
impl CornerStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(corner_cnt: usize) -> Self {
        Self {
            corners: Vec::with_capacity(corner_cnt),
        }
    }
}
// getter
impl CornerStream {
    #[inline]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vertex] {
        &self.corners
    }
}
// tools
impl CornerStream {
    #[inline]
    pub fn push(&mut self, corner: Vertex) {
        self.corners.push(corner);
    }

    #[inline]
    pub fn push_triangle(&mut self, triangle: [Vertex; 3]) {
        self.corners.extend_from_slice(&triangle);
    }

    pub fn import(&self, name: impl Into<String>) -> Result<Model, ModelError> {
        import(name, &self.corners)
    }
}

/// 合并完全相同的 corner，构建带索引的模型
///
/// - 顶点顺序为第一次出现的顺序
/// - `indices.len() == corners.len()`，`vertices.len() <= corners.len()`
/// - corner 数量不是 3 的倍数时返回 [`ModelError::MalformedGeometry`]，不会截断
/// - 顶点位置包含 NaN 或无穷大时返回 [`ModelError::MalformedGeometry`]
pub fn import(name: impl Into<String>, corners: &[Vertex]) -> Result<Model, ModelError> {
    let name = name.into();
    if corners.len() % 3 != 0 {
        return Err(ModelError::malformed(format!(
            "corner count {} of '{}' is not a multiple of 3",
            corners.len(),
            name
        )));
    }

    let mut unique_vertices: HashMap<Vertex, u32> = HashMap::with_capacity(corners.len());
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::with_capacity(corners.len());

    for corner in corners {
        let index = match unique_vertices.entry(*corner) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = u32::try_from(vertices.len())
                    .map_err(|_| ModelError::malformed(format!("'{name}' has more than u32::MAX unique vertices")))?;
                vertices.push(*corner);
                *entry.insert(index)
            }
        };
        indices.push(index);
    }

    log::info!(
        "import model '{}': {} corners -> {} vertices, {} triangles",
        name,
        corners.len(),
        vertices.len(),
        indices.len() / 3
    );

    Model::new(name, vertices, indices)
}
