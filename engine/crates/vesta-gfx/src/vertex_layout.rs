use std::mem::offset_of;
use vesta_model::vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    Float32x2,
    Float32x3,
}
impl VertexAttributeFormat {
    #[inline]
    pub fn byte_size(self) -> u32 {
        match self {
            Self::Float32x2 => 2 * size_of::<f32>() as u32,
            Self::Float32x3 => 3 * size_of::<f32>() as u32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub location: u32,
    pub format: VertexAttributeFormat,
    /// 在单个顶点内的字节偏移
    pub offset: u32,
}

/// 单个 binding 的交错（AoS）顶点布局
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexAttributeLayout {
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}
impl VertexAttributeLayout {
    /// 所有属性都必须落在 stride 之内，location 不能重复
    pub fn is_valid(&self) -> bool {
        let in_stride = self
            .attributes
            .iter()
            .all(|attr| attr.offset + attr.format.byte_size() <= self.stride);
        let unique_location = self
            .attributes
            .iter()
            .enumerate()
            .all(|(i, attr)| self.attributes[..i].iter().all(|other| other.location != attr.location));

        self.stride > 0 && in_stride && unique_location
    }
}

/// Vertex Buffer 中顶点布局的 trait 定义
pub trait GfxVertexLayout {
    fn attribute_layout() -> VertexAttributeLayout;
}

impl GfxVertexLayout for Vertex {
    fn attribute_layout() -> VertexAttributeLayout {
        VertexAttributeLayout {
            stride: size_of::<Vertex>() as u32,
            attributes: vec![
                // positions
                VertexAttribute {
                    location: 0,
                    format: VertexAttributeFormat::Float32x3,
                    offset: offset_of!(Vertex, position) as u32,
                },
                // normals
                VertexAttribute {
                    location: 1,
                    format: VertexAttributeFormat::Float32x3,
                    offset: offset_of!(Vertex, normal) as u32,
                },
                // uvs
                VertexAttribute {
                    location: 2,
                    format: VertexAttributeFormat::Float32x2,
                    offset: offset_of!(Vertex, uv) as u32,
                },
            ],
        }
    }
}
