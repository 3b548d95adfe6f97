use glam::Vec3;
use vesta_gfx::context::MaterialPushData;

/// CPU 侧的材质数据，原样传给 shader
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub albedo: Vec3,
    pub metallic: f32,
    pub roughness: f32,
}
impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::ONE,
            metallic: 0.7,
            roughness: 0.3,
        }
    }
}
impl Material {
    #[inline]
    pub fn push_data(&self) -> MaterialPushData {
        MaterialPushData {
            albedo: self.albedo.to_array(),
            metallic: self.metallic,
            roughness: self.roughness,
            ..Default::default()
        }
    }
}
