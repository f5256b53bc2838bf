//! Declared property table.
//!
//! Every configurable property of every layer is listed once, in slot order.
//! A `Null` default means the layer falls back to its built-in behavior
//! (e.g. auto-sized strokes, per-datum accessor functions).

use serde_json::Value;

use crate::foundation::core::Size;
use crate::layer::LayerKind;
use crate::layer::value::PropValue;

use self::DefaultValue::{Bool, EmptyList, Null, Number, Text};
use crate::layer::LayerKind::{
    Arcs, Custom, Globe, HexBin, HexedPolygons, Labels, Paths, Points, Polygons,
};

/// Name of the coordinator-owned output-resolution property.
pub const RENDERER_SIZE: &str = "rendererSize";

/// Default for one declared property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    /// JSON null.
    Null,
    /// Boolean constant.
    Bool(bool),
    /// Numeric constant.
    Number(f64),
    /// String constant; in accessor positions this names a datum field.
    Text(&'static str),
    /// Empty data array.
    EmptyList,
}

impl DefaultValue {
    /// Materialize a fresh value for one layer instance.
    pub fn to_value(self) -> PropValue {
        PropValue::Json(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => Value::from(n),
            Self::Text(s) => Value::String(s.to_string()),
            Self::EmptyList => Value::Array(Vec::new()),
        })
    }
}

/// One row of the property table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertySpec {
    /// Name on the composed configuration surface.
    pub name: &'static str,
    /// Slot the property is delegated to.
    pub layer: LayerKind,
    /// Property name on the layer instance.
    pub child: &'static str,
    /// Initial value of the layer instance.
    pub default: DefaultValue,
}

const fn prop(name: &'static str, layer: LayerKind, default: DefaultValue) -> PropertySpec {
    PropertySpec {
        name,
        layer,
        child: name,
        default,
    }
}

const DEFAULT_COLOR: DefaultValue = Text("#ffffaa");

/// Every delegated property, grouped by slot in draw order.
pub const PROPERTY_TABLE: &[PropertySpec] = &[
    prop("globeImageUrl", Globe, Null),
    prop("bumpImageUrl", Globe, Null),
    prop("showAtmosphere", Globe, Bool(true)),
    prop("showGraticules", Globe, Bool(false)),
    //
    prop("pointsData", Points, EmptyList),
    prop("pointLat", Points, Text("lat")),
    prop("pointLng", Points, Text("lng")),
    prop("pointColor", Points, DEFAULT_COLOR),
    prop("pointAltitude", Points, Number(0.1)),
    prop("pointRadius", Points, Number(0.25)),
    prop("pointResolution", Points, Number(12.0)),
    prop("pointsMerge", Points, Bool(false)),
    prop("pointsTransitionDuration", Points, Number(1000.0)),
    //
    prop("arcsData", Arcs, EmptyList),
    prop("arcStartLat", Arcs, Text("startLat")),
    prop("arcStartLng", Arcs, Text("startLng")),
    prop("arcEndLat", Arcs, Text("endLat")),
    prop("arcEndLng", Arcs, Text("endLng")),
    prop("arcColor", Arcs, DEFAULT_COLOR),
    prop("arcAltitude", Arcs, Null),
    prop("arcAltitudeAutoScale", Arcs, Number(0.5)),
    prop("arcStroke", Arcs, Null),
    prop("arcCurveResolution", Arcs, Number(64.0)),
    prop("arcCircularResolution", Arcs, Number(6.0)),
    prop("arcDashLength", Arcs, Number(1.0)),
    prop("arcDashGap", Arcs, Number(0.0)),
    prop("arcDashInitialGap", Arcs, Number(0.0)),
    prop("arcDashAnimateTime", Arcs, Number(0.0)),
    prop("arcsTransitionDuration", Arcs, Number(1000.0)),
    //
    prop("hexBinPointsData", HexBin, EmptyList),
    prop("hexBinPointLat", HexBin, Text("lat")),
    prop("hexBinPointLng", HexBin, Text("lng")),
    prop("hexBinPointWeight", HexBin, Number(1.0)),
    prop("hexBinResolution", HexBin, Number(4.0)),
    prop("hexMargin", HexBin, Number(0.2)),
    prop("hexTopColor", HexBin, DEFAULT_COLOR),
    prop("hexSideColor", HexBin, DEFAULT_COLOR),
    prop("hexAltitude", HexBin, Null),
    prop("hexBinMerge", HexBin, Bool(false)),
    prop("hexTransitionDuration", HexBin, Number(1000.0)),
    //
    prop("polygonsData", Polygons, EmptyList),
    prop("polygonGeoJsonGeometry", Polygons, Text("geometry")),
    prop("polygonCapColor", Polygons, DEFAULT_COLOR),
    prop("polygonSideColor", Polygons, DEFAULT_COLOR),
    prop("polygonStrokeColor", Polygons, Null),
    prop("polygonAltitude", Polygons, Number(0.01)),
    prop("polygonsTransitionDuration", Polygons, Number(1000.0)),
    //
    prop("hexPolygonsData", HexedPolygons, EmptyList),
    prop("hexPolygonGeoJsonGeometry", HexedPolygons, Text("geometry")),
    prop("hexPolygonColor", HexedPolygons, DEFAULT_COLOR),
    prop("hexPolygonAltitude", HexedPolygons, Number(0.001)),
    prop("hexPolygonResolution", HexedPolygons, Number(3.0)),
    prop("hexPolygonMargin", HexedPolygons, Number(0.2)),
    prop("hexPolygonsTransitionDuration", HexedPolygons, Number(0.0)),
    //
    prop("pathsData", Paths, EmptyList),
    prop("pathPoints", Paths, Null),
    prop("pathPointLat", Paths, Null),
    prop("pathPointLng", Paths, Null),
    prop("pathPointAlt", Paths, Number(0.001)),
    prop("pathResolution", Paths, Number(2.0)),
    prop("pathColor", Paths, DEFAULT_COLOR),
    prop("pathStroke", Paths, Null),
    prop("pathDashLength", Paths, Number(1.0)),
    prop("pathDashGap", Paths, Number(0.0)),
    prop("pathDashInitialGap", Paths, Number(0.0)),
    prop("pathDashAnimateTime", Paths, Number(0.0)),
    prop("pathTransitionDuration", Paths, Number(1000.0)),
    //
    prop("labelsData", Labels, EmptyList),
    prop("labelLat", Labels, Text("lat")),
    prop("labelLng", Labels, Text("lng")),
    prop("labelAltitude", Labels, Number(0.002)),
    prop("labelRotation", Labels, Number(0.0)),
    prop("labelText", Labels, Text("text")),
    prop("labelSize", Labels, Number(0.5)),
    prop("labelTypeFace", Labels, Null),
    prop("labelColor", Labels, Text("lightgrey")),
    prop("labelResolution", Labels, Number(3.0)),
    prop("labelIncludeDot", Labels, Bool(true)),
    prop("labelDotRadius", Labels, Number(0.1)),
    prop("labelDotOrientation", Labels, Text("bottom")),
    prop("labelsTransitionDuration", Labels, Number(1000.0)),
    //
    prop("customLayerData", Custom, EmptyList),
    prop("customThreeObject", Custom, Null),
    prop("customThreeObjectUpdate", Custom, Null),
];

/// Properties a layer instance starts with, each a fresh per-instance value.
///
/// The paths layer additionally tracks the output resolution it strokes
/// against.
pub fn layer_defaults(kind: LayerKind) -> Vec<(&'static str, PropValue)> {
    let mut out: Vec<(&'static str, PropValue)> = PROPERTY_TABLE
        .iter()
        .filter(|spec| spec.layer == kind)
        .map(|spec| (spec.child, spec.default.to_value()))
        .collect();
    if kind == LayerKind::Paths {
        out.push((RENDERER_SIZE, PropValue::Size(Size::ZERO)));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/props.rs"]
mod tests;
