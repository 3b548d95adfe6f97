//! 内置几何体
//!
//! 坐标系：Right-Hand, X-Right, Y-Up；三角形绕序 CCW，朝外。

pub mod cube;
pub mod quad;
