use crate::error::ModelError;
use crate::model::Model;
use crate::vertex::Vertex;

/// 坐标系：Right-Hand, X-Right, Y-Up
///
/// 三角形绕序: CCW
///
/// 中心位于原点，每个面 4 个顶点（法线和 UV 按面区分），共 24 个顶点、36 个索引
pub struct BoxShape {}
impl BoxShape {
    // 边长为 1 的立方体，创建时按照 width/height/depth 缩放
    const POSITIONS: [[f32; 3]; 24] = [
        // Top face (Y+)
        [0.5, 0.5, -0.5],  // 0: TOP_A
        [-0.5, 0.5, -0.5], // 1: TOP_B
        [-0.5, 0.5, 0.5],  // 2: TOP_C
        [0.5, 0.5, 0.5],   // 3: TOP_D
        // Bottom face (Y-)
        [0.5, -0.5, -0.5],  // 4: BOTTOM_A
        [-0.5, -0.5, -0.5], // 5: BOTTOM_B
        [-0.5, -0.5, 0.5],  // 6: BOTTOM_C
        [0.5, -0.5, 0.5],   // 7: BOTTOM_D
        // Near face (Z+)
        [0.5, 0.5, 0.5],   // 8: NEAR_A
        [-0.5, 0.5, 0.5],  // 9: NEAR_B
        [-0.5, -0.5, 0.5], // 10: NEAR_C
        [0.5, -0.5, 0.5],  // 11: NEAR_D
        // Far face (Z-)
        [0.5, 0.5, -0.5],   // 12: FAR_A
        [-0.5, 0.5, -0.5],  // 13: FAR_B
        [-0.5, -0.5, -0.5], // 14: FAR_C
        [0.5, -0.5, -0.5],  // 15: FAR_D
        // Left face (X-)
        [-0.5, 0.5, 0.5],   // 16: LEFT_A
        [-0.5, 0.5, -0.5],  // 17: LEFT_B
        [-0.5, -0.5, -0.5], // 18: LEFT_C
        [-0.5, -0.5, 0.5],  // 19: LEFT_D
        // Right face (X+)
        [0.5, 0.5, 0.5],   // 20: RIGHT_A
        [0.5, 0.5, -0.5],  // 21: RIGHT_B
        [0.5, -0.5, -0.5], // 22: RIGHT_C
        [0.5, -0.5, 0.5],  // 23: RIGHT_D
    ];

    // 每个面 4 个顶点共用一条法线
    const FACE_NORMALS: [[f32; 3]; 6] = [
        [0.0, 1.0, 0.0],  // top
        [0.0, -1.0, 0.0], // bottom
        [0.0, 0.0, 1.0],  // near
        [0.0, 0.0, -1.0], // far
        [-1.0, 0.0, 0.0], // left
        [1.0, 0.0, 0.0],  // right
    ];

    // 每个面的 A, B, C, D
    const FACE_UVS: [[f32; 2]; 4] = [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

    const INDICES: [u32; 36] = [
        0, 1, 2, 0, 2, 3, // top
        4, 6, 5, 4, 7, 6, // bottom
        8, 9, 10, 8, 10, 11, // near
        12, 14, 13, 12, 15, 14, // far
        16, 17, 18, 16, 18, 19, // left
        20, 22, 21, 20, 23, 22, // right
    ];

    /// 尺寸为 `width x height x depth`（对应 X, Y, Z）的 box
    pub fn create_model(name: impl Into<String>, width: f32, height: f32, depth: f32) -> Result<Model, ModelError> {
        let size = [width, height, depth];
        let vertices = Self::POSITIONS
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                Vertex::new(
                    [pos[0] * size[0], pos[1] * size[1], pos[2] * size[2]],
                    Self::FACE_NORMALS[i / 4],
                    Self::FACE_UVS[i % 4],
                )
            })
            .collect();

        Model::new(name, vertices, Self::INDICES.to_vec())
    }

    /// 边长为 1 的 box，名称为 `box`
    pub fn default_model() -> Result<Model, ModelError> {
        Self::create_model("box", 1.0, 1.0, 1.0)
    }
}
