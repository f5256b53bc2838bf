use super::*;

use crate::globe::slot::LayerSlot;
use crate::layer::headless::PropertyLayer;
use crate::scene::backend::NodeId;
use crate::surface::props::{PROPERTY_TABLE, RENDERER_SIZE};

fn slots() -> SlotSet {
    let mut set = SlotSet::default();
    for (i, kind) in LayerKind::ALL.into_iter().enumerate() {
        let container = NodeId(i as u64);
        set.push(LayerSlot {
            kind,
            container,
            layer: Box::new(PropertyLayer::new(kind, container)),
        });
    }
    set
}

fn forward_to_paths(value: &PropValue, ctx: &mut HookCtx<'_>) -> GlobeResult<()> {
    ctx.layer_mut(LayerKind::Paths)?.set(RENDERER_SIZE, value.clone())
}

fn failing_hook(_: &PropValue, _: &mut HookCtx<'_>) -> GlobeResult<()> {
    Err(GlobeError::configuration("hook rejected"))
}

#[test]
fn table_builds_without_collisions() {
    let surface = SurfaceBuilder::from_table(PROPERTY_TABLE).build().unwrap();
    assert_eq!(surface.len(), PROPERTY_TABLE.len());
    assert_eq!(surface.names().next(), Some("globeImageUrl"));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = SurfaceBuilder::from_table(PROPERTY_TABLE)
        .bind(Binding::owned("pointsData", PropValue::NULL))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("pointsData"));
}

#[test]
fn writes_forward_to_the_owning_slot() {
    let mut slots = slots();
    let mut surface = SurfaceBuilder::from_table(PROPERTY_TABLE).build().unwrap();

    let redraw = surface
        .write("arcDashGap", PropValue::from(0.5), &mut slots)
        .unwrap();
    assert!(redraw);

    assert_eq!(
        slots.get(LayerKind::Arcs).unwrap().get("arcDashGap").unwrap(),
        PropValue::from(0.5)
    );
    assert_eq!(
        surface.read("arcDashGap", &slots).unwrap(),
        PropValue::from(0.5)
    );
}

#[test]
fn reads_are_not_cached() {
    let mut slots = slots();
    let surface = SurfaceBuilder::from_table(PROPERTY_TABLE).build().unwrap();

    slots
        .get_mut(LayerKind::Labels)
        .unwrap()
        .set("labelSize", PropValue::from(2.0))
        .unwrap();
    assert_eq!(
        surface.read("labelSize", &slots).unwrap(),
        PropValue::from(2.0)
    );
}

#[test]
fn unknown_names_fail() {
    let mut slots = slots();
    let mut surface = SurfaceBuilder::from_table(PROPERTY_TABLE).build().unwrap();

    assert!(matches!(
        surface.write("nope", PropValue::NULL, &mut slots),
        Err(GlobeError::Configuration(_))
    ));
    assert!(matches!(
        surface.read("nope", &slots),
        Err(GlobeError::Configuration(_))
    ));
}

#[test]
fn missing_slot_reports_not_initialized() {
    let mut empty = SlotSet::default();
    let mut surface = SurfaceBuilder::from_table(PROPERTY_TABLE).build().unwrap();
    assert!(matches!(
        surface.write("pointsData", PropValue::NULL, &mut empty),
        Err(GlobeError::NotInitialized(_))
    ));
}

#[test]
fn owned_binding_runs_hook_without_redraw() {
    let mut slots = slots();
    let mut surface = SurfaceBuilder::default()
        .bind(
            Binding::owned(RENDERER_SIZE, PropValue::NULL)
                .on_change(forward_to_paths)
                .triggers_redraw(false),
        )
        .build()
        .unwrap();

    let size = PropValue::from(crate::foundation::core::Size::new(800.0, 600.0));
    let redraw = surface.write(RENDERER_SIZE, size.clone(), &mut slots).unwrap();

    assert!(!redraw);
    assert_eq!(surface.read(RENDERER_SIZE, &slots).unwrap(), size);
    assert_eq!(
        slots.get(LayerKind::Paths).unwrap().get(RENDERER_SIZE).unwrap(),
        size
    );
}

#[test]
fn hook_runs_after_forward_and_its_error_propagates() {
    let mut slots = slots();
    let mut surface = SurfaceBuilder::default()
        .bind(Binding::delegate(&PROPERTY_TABLE[0]).on_change(failing_hook))
        .build()
        .unwrap();

    let err = surface
        .write("globeImageUrl", PropValue::from("a.png"), &mut slots)
        .unwrap_err();
    assert!(err.to_string().contains("hook rejected"));
    assert_eq!(
        slots.get(LayerKind::Globe).unwrap().get("globeImageUrl").unwrap(),
        PropValue::from("a.png")
    );
}

#[test]
fn rejected_forward_skips_hook() {
    let mut slots = SlotSet::default();
    slots.push(LayerSlot {
        kind: LayerKind::Globe,
        container: NodeId(0),
        layer: Box::new(PropertyLayer::new(LayerKind::Points, NodeId(0))),
    });
    let mut surface = SurfaceBuilder::default()
        .bind(Binding::delegate(&PROPERTY_TABLE[0]).on_change(failing_hook))
        .build()
        .unwrap();

    let err = surface
        .write("globeImageUrl", PropValue::NULL, &mut slots)
        .unwrap_err();
    assert!(!err.to_string().contains("hook rejected"));
}

#[test]
fn owned_value_is_kept_when_hook_rejects() {
    let mut slots = slots();
    let mut surface = SurfaceBuilder::default()
        .bind(Binding::owned(RENDERER_SIZE, PropValue::from(1.0)).on_change(failing_hook))
        .build()
        .unwrap();

    assert!(surface.write(RENDERER_SIZE, PropValue::from(2.0), &mut slots).is_err());
    assert_eq!(surface.read(RENDERER_SIZE, &slots).unwrap(), PropValue::from(1.0));
}
