use remora_core::convert;
use remora_layout::{ClusterTree, layout};
use remora_render::scene::MARKER_RADIUS;
use remora_render::{ClusterProjection, Scene, SvgRenderOptions, render_scene};
use remora_core::geom::canvas_point;
use serde_json::json;

fn projection(offset_width: f64, invert_axis: bool) -> ClusterProjection {
    ClusterProjection {
        cluster_width: 100.0,
        offset_width,
        offset_height: 0.0,
        invert_axis,
    }
}

fn input_tree() -> ClusterTree {
    let mut tree = ClusterTree::build(&convert("input", &json!({"a": 1, "b": {"c": 2}}), None));
    layout(&mut tree, 100.0, 100.0);
    tree
}

#[test]
fn sync_creates_one_marker_link_and_label_per_visible_node() {
    let tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(0.0, false));

    let side = scene.side("input").unwrap();
    assert_eq!(side.markers.len(), 4);
    assert_eq!(side.labels.len(), 4);
    // one link per non-root visible node
    assert_eq!(side.links.len(), 3);
    assert_eq!(side.labels["/"].text, "input: object");
    assert_eq!(side.labels["/a"].text, "a: number");
    assert_eq!(side.labels["/b"].text, "b: object");
}

#[test]
fn labels_flip_anchor_with_the_axis() {
    let tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(0.0, false));
    let plain = scene.side("input").unwrap().labels["/a"].clone();
    assert!(plain.anchor_end);
    assert_eq!((plain.dx, plain.dy), (-10.0, 4.0));

    scene.sync_side(&tree, projection(0.0, true));
    let mirrored = scene.side("input").unwrap().labels["/a"].clone();
    assert!(!mirrored.anchor_end);
    assert_eq!((mirrored.dx, mirrored.dy), (10.0, 4.0));
}

#[test]
fn sync_is_idempotent() {
    let tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(0.0, false));
    let first = render_scene(&scene, &SvgRenderOptions::default());

    scene.sync_side(&tree, projection(0.0, false));
    let second = render_scene(&scene, &SvgRenderOptions::default());

    assert_eq!(first, second);
    assert_eq!(scene.side("input").unwrap().markers.len(), 4);
}

#[test]
fn sync_after_collapse_drops_hidden_entries_in_place() {
    let mut tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(0.0, false));

    let b = tree.find("/b").unwrap();
    tree.toggle(b);
    layout(&mut tree, 100.0, 100.0);
    scene.sync_side(&tree, projection(0.0, false));

    let side = scene.side("input").unwrap();
    let keys: Vec<&String> = side.markers.keys().collect();
    assert_eq!(keys, ["/", "/a", "/b"]);
    assert!(!side.links.contains_key("/b/c"));
}

#[test]
fn marker_hit_testing_is_radius_bounded_and_topmost_wins() {
    let input = input_tree();
    let mut output = ClusterTree::build(&convert("output", &json!({"x": null}), None));
    layout(&mut output, 100.0, 100.0);

    let mut scene = Scene::new();
    scene.sync_side(&input, projection(0.0, false));
    // Mirrored with no extra offset: the output leaf lands on the input root.
    scene.sync_side(&output, projection(0.0, true));

    let root_center = scene.marker_center("input", "/").unwrap();
    let hit = scene.marker_at(root_center).unwrap();
    assert_eq!((hit.side.as_str(), hit.path.as_str()), ("output", "/x"));

    let miss = root_center + remora_core::geom::canvas_vector(MARKER_RADIUS + 1.0, 0.0);
    assert!(scene.marker_at(miss).is_none());
}

#[test]
fn rendered_svg_contains_the_canvas_group_contract() {
    let tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(40.0, false));

    let svg = render_scene(&scene, &SvgRenderOptions::default());
    assert!(svg.contains(r#"<g class="connections">"#));
    assert!(svg.contains(r#"<g class="input-node" offsetWidth="40" offsetHeight="0">"#));
    assert!(svg.contains(r#"<g class="links">"#));
    assert!(svg.contains(r#"<g class="nodes">"#));
    assert!(svg.contains(r#"<g class="overlay">"#));
    assert!(svg.contains("input: object"));
}

#[test]
fn marker_centers_follow_the_projection() {
    let tree = input_tree();
    let mut scene = Scene::new();
    scene.sync_side(&tree, projection(40.0, false));

    let root = tree.root();
    let n = tree.node(root);
    assert_eq!(
        scene.marker_center("input", "/").unwrap(),
        canvas_point(n.y + 40.0, n.x)
    );
}
