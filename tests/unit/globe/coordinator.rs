use super::*;

use crate::foundation::core::Size;

fn initialized(options: GlobeOptions) -> (Globe, NodeId) {
    let mut globe = Globe::new();
    let root = globe.create_root().unwrap();
    globe.initialize(root, options).unwrap();
    (globe, root)
}

#[test]
fn slots_follow_fixed_order_under_scene() {
    let (globe, root) = initialized(GlobeOptions::default());
    let scene = globe.scene_node().unwrap();

    let tree = globe.scene().borrow();
    assert_eq!(tree.children(root), vec![scene]);

    let containers: Vec<NodeId> = LayerKind::ALL
        .iter()
        .map(|kind| globe.container(*kind).unwrap())
        .collect();
    assert_eq!(tree.children(scene), containers);

    for kind in LayerKind::ALL {
        assert_eq!(globe.layer(kind).unwrap().kind(), kind);
    }
}

#[test]
fn surface_lists_table_and_renderer_size() {
    let (globe, _) = initialized(GlobeOptions::default());
    let names = globe.property_names().unwrap();
    assert_eq!(names.len(), PROPERTY_TABLE.len() + 1);
    assert_eq!(names.last(), Some(&RENDERER_SIZE));
}

#[test]
fn initial_renderer_size_reaches_paths() {
    let options = GlobeOptions {
        renderer_size: Size::new(320.0, 200.0),
        ..GlobeOptions::default()
    };
    let (globe, _) = initialized(options);
    assert_eq!(
        globe.layer(LayerKind::Paths).unwrap().get(RENDERER_SIZE).unwrap(),
        PropValue::Size(Size::new(320.0, 200.0))
    );
}

#[test]
fn writes_request_redraw_except_renderer_size() {
    let (mut globe, _) = initialized(GlobeOptions::default());
    assert!(!globe.take_redraw_request());

    globe.set(RENDERER_SIZE, Size::new(10.0, 10.0)).unwrap();
    assert!(!globe.take_redraw_request());

    globe.set("pointAltitude", 0.3).unwrap();
    assert!(globe.take_redraw_request());
    assert!(!globe.take_redraw_request());
}

#[test]
fn configure_applies_in_order_and_stops_at_first_error() {
    let (mut globe, _) = initialized(GlobeOptions::default());
    let err = globe
        .configure(&serde_json::json!({
            "arcStroke": 2.0,
            "bogus": 1,
            "labelText": "name",
        }))
        .unwrap_err();
    assert!(matches!(err, GlobeError::Configuration(_)));
    assert_eq!(globe.get("arcStroke").unwrap(), PropValue::from(2.0));
    assert_ne!(globe.get("labelText").unwrap(), PropValue::from("name"));

    assert!(globe.configure(&serde_json::json!([1, 2])).is_err());
}

#[test]
fn renderer_size_accepts_json_object() {
    let (mut globe, _) = initialized(GlobeOptions::default());
    globe
        .configure(&serde_json::json!({ "rendererSize": { "width": 50, "height": 40 } }))
        .unwrap();
    assert_eq!(
        globe.layer(LayerKind::Paths).unwrap().get(RENDERER_SIZE).unwrap(),
        PropValue::Size(Size::new(50.0, 40.0))
    );

    assert!(globe.set(RENDERER_SIZE, "huge").is_err());
}

#[test]
fn uninitialized_globe_fails_loudly() {
    let mut globe = Globe::new();
    assert!(!globe.is_initialized());
    assert!(matches!(
        globe.set("pointsData", PropValue::NULL),
        Err(GlobeError::NotInitialized(_))
    ));
    assert!(matches!(
        globe.get("pointsData"),
        Err(GlobeError::NotInitialized(_))
    ));
    assert!(globe.property_names().is_err());
    assert!(globe.intro_phase().is_err());
}

#[test]
fn mismatched_factory_kind_is_rejected() {
    let mut globe = Globe::builder()
        .layers(|ctx: LayerContext| -> GlobeResult<Box<dyn Layer>> {
            Ok(Box::new(crate::layer::headless::PropertyLayer::new(
                LayerKind::Points,
                ctx.container,
            )))
        })
        .build();
    let root = globe.create_root().unwrap();

    let err = globe.initialize(root, GlobeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        GlobeError::LayerInitialization {
            layer: LayerKind::Globe,
            ..
        }
    ));
    assert!(!globe.is_initialized());
    assert!(globe.scene().borrow().children(root).is_empty());
}

#[test]
fn missing_root_is_a_scene_error() {
    let mut globe = Globe::new();
    let err = globe
        .initialize(NodeId(999), GlobeOptions::default())
        .unwrap_err();
    assert!(matches!(err, GlobeError::Scene(_)));
}

#[test]
fn coordinate_helpers_use_globe_radius() {
    let globe = Globe::new();
    let p = globe.get_coords(0.0, 0.0, 0.0);
    assert!((p.z - GLOBE_RADIUS).abs() < 1e-9);

    let back = globe.to_geo_coords(globe.get_coords(12.0, -34.0, 0.5));
    assert!((back.lat - 12.0).abs() < 1e-6);
    assert!((back.lng + 34.0).abs() < 1e-6);
    assert!((back.altitude - 0.5).abs() < 1e-6);
}
