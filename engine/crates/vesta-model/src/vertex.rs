use std::hash::{Hash, Hasher};

/// AoS 顶点：Position + Normal + UV
///
/// 相等性与哈希按照每个分量的 IEEE-754 位模式比较，不带任何 epsilon。
/// 因此 `0.0` 与 `-0.0` 是两个不同的顶点；只有完全相同的 corner 才会在导入时被合并。
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}
impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    #[inline]
    pub fn pos(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.position)
    }

    /// 所有分量的位模式
    #[inline]
    fn bits(&self) -> [u32; 8] {
        bytemuck::cast(*self)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}
impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
