pub type Mat4 = nalgebra::Matrix4<f32>;

pub mod projections {
    use super::Mat4;

    /// Build an orthographic projection matrix which transforms the given
    /// coordinate bounds to the OpenGL view volume.
    /// e.g. Input Values will be bounded by:
    ///  - x in [left, right]
    ///  - y in [bottom, top]
    ///  - z in [-near, -far] (the camera looks down the negative z axis)
    ///
    /// Output coordinates will be transformed to:
    ///  - left -> -1.0, right -> 1.0
    ///  - bottom -> -1.0, top -> 1.0
    ///  - near -> -1.0, far -> 1.0
    ///
    pub fn ortho(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        let mh = 2.0 / (right - left);
        let bh = (right + left) / (left - right);
        let mv = 2.0 / (top - bottom);
        let bv = (top + bottom) / (bottom - top);
        let mz = -2.0 / (far - near);
        let bz = (far + near) / (near - far);
        Mat4::new(
            mh, 0.0, 0.0, bh, //
            0.0, mv, 0.0, bv, //
            0.0, 0.0, mz, bz, //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

pub mod view {
    use super::Mat4;
    use nalgebra::{Point3, Vector3};

    /// A right-handed view matrix for a camera at `eye` looking at `target`.
    pub fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(eye),
            &Point3::from(target),
            &Vector3::from(up),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector4;

    fn assert_close(actual: Vector4<f32>, expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-5, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn ortho_maps_the_corners_to_ndc() {
        let projection = projections::ortho(-50.0, 50.0, -50.0, 50.0, 0.1, 1000.0);
        assert_close(
            projection * Vector4::new(-50.0, -50.0, -0.1, 1.0),
            [-1.0, -1.0, -1.0, 1.0],
        );
        assert_close(
            projection * Vector4::new(50.0, 50.0, -1000.0, 1.0),
            [1.0, 1.0, 1.0, 1.0],
        );
    }

    #[test]
    fn ortho_matches_nalgebra() {
        let ours = projections::ortho(-2.0, 6.0, -1.0, 3.0, 0.5, 20.0);
        let theirs = Mat4::new_orthographic(-2.0, 6.0, -1.0, 3.0, 0.5, 20.0);
        assert!((ours - theirs).abs().max() < 1e-6);
    }

    #[test]
    fn camera_moves_the_world_toward_negative_z() {
        let camera =
            view::look_at([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_close(
            camera * Vector4::new(3.0, 4.0, -10.0, 1.0),
            [3.0, 4.0, -11.0, 1.0],
        );
    }
}
