use crate::error::ModelError;
use crate::model::Model;
use crate::vertex::Vertex;

/// 坐标系：RightHand, X-Right, Y-Up
///
/// 面片位于 XY 平面上，朝向 +Z，长宽都是 2
///
/// 三角形绕序 CCW: ABC, ACD
///
/// 左下角 A 视为 UV 起点
///
/// ```text
///             y^
///              |
///       D-------------C
///        |     |     |
///  ------|-----|-----|------>x
///        |     |     |
///       A-------------B
///              |
/// ```
pub struct QuadShape {}
impl QuadShape {
    const VERTICES: [Vertex; 4] = [
        Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]), // A
        Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),  // B
        Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),   // C
        Vertex::new([-1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),  // D
    ];
    const INDICES: [u32; 6] = [
        0, 1, 2, // ABC
        0, 2, 3, // ACD
    ];

    pub fn create_model(name: impl Into<String>) -> Result<Model, ModelError> {
        Model::new(name, Self::VERTICES.to_vec(), Self::INDICES.to_vec())
    }

    /// 名称为 `quad` 的面片
    pub fn default_model() -> Result<Model, ModelError> {
        Self::create_model("quad")
    }
}
