use glam::Vec3;

/// 轴对齐包围盒
///
/// 不变式：`min <= max`（逐分量）。单点模型的 `half_extent` 为零；空模型得到原点处的零包围盒。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
    /// (min + max) / 2
    pub center: Vec3,
    /// 半长轴：(max - min) / 2
    pub half_extent: Vec3,
}
// new & init
impl Aabb {
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "aabb min should not exceed max");
        Self {
            min,
            max,
            center: (min + max) * 0.5,
            half_extent: (max - min) * 0.5,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };

        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self::from_min_max(min, max)
    }
}
// getter
impl Aabb {
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn max_half_extent(&self) -> f32 {
        self.half_extent.max_element()
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, -2.0, 4.0),
            Vec3::new(1.0, 6.0, 3.0),
        ]);

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 6.0, 4.0));
        assert_eq!(aabb.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.half_extent, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(aabb.max_half_extent(), 4.0);
        assert_eq!(aabb.size(), Vec3::new(4.0, 8.0, 2.0));
    }

    #[test]
    fn test_single_point_has_zero_extent() {
        let aabb = Aabb::from_points([Vec3::new(5.0, 5.0, 5.0)]);

        assert_eq!(aabb.center, Vec3::splat(5.0));
        assert_eq!(aabb.half_extent, Vec3::ZERO);
        assert!(aabb.contains(Vec3::splat(5.0)));
    }

    #[test]
    fn test_empty_is_zero_box() {
        let aabb = Aabb::from_points(std::iter::empty());

        assert_eq!(aabb, Aabb::default());
    }
}
