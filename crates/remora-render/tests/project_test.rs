use remora_core::geom::{CanvasToScreen, canvas_point, layout_point, screen_point};
use remora_render::{ClusterProjection, Error, ScreenTransform};

#[test]
fn projection_applies_offsets() {
    let projection = ClusterProjection {
        cluster_width: 300.0,
        offset_width: 40.0,
        offset_height: 10.0,
        invert_axis: false,
    };
    assert_eq!(
        projection.to_canvas(layout_point(25.0, 120.0)),
        canvas_point(160.0, 35.0)
    );
}

#[test]
fn inverted_projection_mirrors_the_depth_axis() {
    let projection = ClusterProjection {
        cluster_width: 300.0,
        offset_width: 500.0,
        offset_height: 0.0,
        invert_axis: true,
    };
    assert_eq!(
        projection.to_canvas(layout_point(25.0, 120.0)),
        canvas_point(680.0, 25.0)
    );
}

#[test]
fn mirror_symmetry_sums_to_cluster_width() {
    for y in [0.0, 37.5, 150.0, 300.0] {
        let mirrored = ClusterProjection {
            cluster_width: 300.0,
            offset_width: 0.0,
            offset_height: 0.0,
            invert_axis: true,
        };
        let plain = ClusterProjection {
            invert_axis: false,
            ..mirrored
        };
        let p = layout_point(10.0, y);
        assert_eq!(plain.to_canvas(p).x + mirrored.to_canvas(p).x, 300.0);
    }
}

#[test]
fn screen_transform_inverts_scale_and_translation() {
    // Canvas scaled 2x and shifted by (10, 5) inside the screen.
    let transform = ScreenTransform::new(
        CanvasToScreen::scale(2.0, 2.0).then_translate(euclid::vec2(10.0, 5.0)),
    );

    let canvas = transform.to_canvas(screen_point(110.0, 65.0)).unwrap();
    assert_eq!(canvas, canvas_point(50.0, 30.0));
}

#[test]
fn identity_transform_passes_points_through() {
    let transform = ScreenTransform::identity();
    assert_eq!(
        transform.to_canvas(screen_point(12.0, 34.0)).unwrap(),
        canvas_point(12.0, 34.0)
    );
}

#[test]
fn singular_transform_is_an_error() {
    let transform = ScreenTransform::new(CanvasToScreen::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
    assert!(matches!(
        transform.to_canvas(screen_point(1.0, 1.0)),
        Err(Error::SingularTransform)
    ));
}
