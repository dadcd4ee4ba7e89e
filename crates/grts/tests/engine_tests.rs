//! Tests for coordinate and GRTS ID translation against the fixture tables.

use grts::{
    BoundingBox, CellGeometry, FrameName, FrameRegistry, GeometryKind, NabatError,
    TargetProjection,
};
use projection::{AlbersEqualArea, Ellipsoid, LambertConformal, Projection};
use test_utils::{
    assert_approx_eq, edge_cells, fixture_lookup_dir, init_test_tracing, points, require_test_file,
};

fn registry() -> FrameRegistry {
    init_test_tracing();
    FrameRegistry::with_lookup_dir(fixture_lookup_dir())
}

fn native_bounds(registry: &FrameRegistry, grts_id: u32, frame: &str) -> BoundingBox {
    *registry
        .grts_to_geometry(grts_id, frame, &TargetProjection::Native, GeometryKind::Bounds)
        .unwrap()
        .as_bounds()
        .unwrap()
}

// ============================================================================
// coordinate_to_grts
// ============================================================================

#[test]
fn test_utah_regression() {
    let registry = registry();
    let p = points::CONUS_UTAH;
    assert_eq!(registry.coordinate_to_grts(p.lat, p.lon, p.frame).unwrap(), 1005);
}

/// Runs against the full published tables when `TEST_DATA_DIR` holds them.
#[test]
fn test_utah_regression_published_table() {
    let path = require_test_file!("grts_lookup_published/Conus.csv");
    let registry = FrameRegistry::with_lookup_dir(path.parent().unwrap());
    let p = points::CONUS_UTAH;
    assert_eq!(registry.coordinate_to_grts(p.lat, p.lon, "conus").unwrap(), 1005);
}

#[test]
fn test_aliases_resolve_to_same_cell() {
    let registry = registry();
    let p = points::CONUS_UTAH;
    for alias in ["conus", "US", " usa ", "United States"] {
        assert_eq!(
            registry.coordinate_to_grts(p.lat, p.lon, alias).unwrap(),
            p.grts_id,
            "alias {}",
            alias
        );
    }
}

#[test]
fn test_repeated_calls_are_deterministic() {
    let registry = registry();
    let p = points::CONUS_UTAH;
    let first = registry.coordinate_to_grts(p.lat, p.lon, "conus").unwrap();
    for _ in 0..10 {
        assert_eq!(registry.coordinate_to_grts(p.lat, p.lon, "conus").unwrap(), first);
    }
}

#[test]
fn test_point_outside_frame_is_no_match() {
    let registry = registry();
    let (lat, lon) = points::MID_ATLANTIC;
    let err = registry.coordinate_to_grts(lat, lon, "conus").unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(
        err.to_string(),
        "the provided coordinates (35, -40) do not have a match in the Conus frame"
    );
}

#[test]
fn test_unsampled_cell_is_no_match() {
    let registry = registry();
    let (lat, lon) = points::GULF_OF_ALASKA;
    for frame in ["alaska", "canada"] {
        let err = registry.coordinate_to_grts(lat, lon, frame).unwrap_err();
        assert!(err.is_no_match(), "{}: {:?}", frame, err);
    }
}

#[test]
fn test_non_finite_coordinates_are_no_match() {
    let registry = registry();
    assert!(registry.coordinate_to_grts(f64::NAN, -100.0, "conus").unwrap_err().is_no_match());
    assert!(registry
        .coordinate_to_grts(40.0, f64::INFINITY, "conus")
        .unwrap_err()
        .is_no_match());
}

#[test]
fn test_unknown_frame() {
    let registry = registry();
    let err = registry.coordinate_to_grts(40.0, -100.0, "Mars").unwrap_err();
    assert!(matches!(err, NabatError::UnknownFrame(ref name) if name == "Mars"));
    assert!(!FrameName::ALL.iter().any(|f| registry.is_loaded(*f)));
}

// ============================================================================
// grts_to_geometry
// ============================================================================

#[test]
fn test_native_cells_are_square() {
    let registry = registry();
    for (grts_id, frame, size) in [(1005, "conus", 10000.0), (5, "pr", 5000.0)] {
        let bounds = native_bounds(&registry, grts_id, frame);
        assert_eq!(bounds.width(), size);
        assert_eq!(bounds.height(), size);
    }
}

#[test]
fn test_last_column_cells() {
    let registry = registry();
    let (_, grts_id) = edge_cells::CONUS_ROW0_LAST_COL;
    assert_eq!(
        native_bounds(&registry, grts_id, "conus").to_array(),
        [2257000.0, 276000.0, 2267000.0, 286000.0]
    );

    let (_, grts_id) = edge_cells::CONUS_ROW1_LAST_COL;
    assert_eq!(
        native_bounds(&registry, grts_id, "conus").to_array(),
        [2257000.0, 286000.0, 2267000.0, 296000.0]
    );

    let (_, grts_id) = edge_cells::CONUS_ROW0_FIRST_COL;
    assert_eq!(
        native_bounds(&registry, grts_id, "conus").to_array(),
        [-2363000.0, 276000.0, -2353000.0, 286000.0]
    );
}

#[test]
fn test_wgs84_bounds_contain_source_point() {
    let registry = registry();
    let p = points::CONUS_UTAH;
    let geometry = registry
        .grts_to_geometry(p.grts_id, "conus", &TargetProjection::Wgs84, GeometryKind::Bounds)
        .unwrap();
    let bounds = geometry.as_bounds().unwrap();
    assert!(bounds.contains_point(p.lon, p.lat), "{:?}", bounds);
    // 10 km is roughly a tenth of a degree at this latitude; the envelope of
    // the rotated cell is a little larger
    assert!(bounds.width() > 0.1 && bounds.width() < 0.2, "{}", bounds.width());
    assert!(bounds.height() > 0.08 && bounds.height() < 0.12, "{}", bounds.height());
}

#[test]
fn test_polygon_ring_order_and_closure() {
    let registry = registry();
    let geometry = registry
        .grts_to_geometry(1005, "conus", &TargetProjection::Native, GeometryKind::Polygon)
        .unwrap();
    let polygon = geometry.as_polygon().unwrap();
    let coords: Vec<(f64, f64)> = polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
    let b = native_bounds(&registry, 1005, "conus");
    assert_eq!(
        coords,
        vec![
            (b.min_x, b.min_y),
            (b.min_x, b.max_y),
            (b.max_x, b.max_y),
            (b.max_x, b.min_y),
            (b.min_x, b.min_y),
        ]
    );
    assert!(polygon.interiors().is_empty());
}

#[test]
fn test_polygon_envelope_matches_bounds() {
    let registry = registry();
    let target = TargetProjection::Wgs84;
    let polygon = registry
        .grts_to_geometry(1005, "conus", &target, GeometryKind::Polygon)
        .unwrap();
    let bounds = registry
        .grts_to_geometry(1005, "conus", &target, GeometryKind::Bounds)
        .unwrap();
    assert_eq!(polygon.envelope(), bounds.as_bounds().copied());
}

#[test]
fn test_custom_projection_matching_native() {
    let registry = registry();
    let native = native_bounds(&registry, 1005, "conus");
    let target: TargetProjection = "EPSG:5070".parse().unwrap();
    let geometry = registry
        .grts_to_geometry(1005, "conus", &target, GeometryKind::Bounds)
        .unwrap();
    let custom = geometry.as_bounds().unwrap();
    for (a, b) in custom.to_array().iter().zip(native.to_array()) {
        assert_approx_eq!(*a, b, 1e-3);
    }
}

#[test]
fn test_custom_projection_instance() {
    let registry = registry();
    let target = TargetProjection::custom(AlbersEqualArea::conus());
    let geometry = registry
        .grts_to_geometry(1005, "conus", &target, GeometryKind::Bounds)
        .unwrap();
    assert_approx_eq!(geometry.as_bounds().unwrap().width(), 10000.0, 1e-3);
}

#[test]
fn test_lambert_output_is_near_cell_size() {
    let registry = registry();
    let lcc = LambertConformal::new(33.0, 45.0, 39.0, -96.0, 0.0, 0.0, Ellipsoid::GRS80);
    let p = points::CONUS_UTAH;
    let (px, py) = lcc.forward(p.lon, p.lat);

    let geometry = registry
        .grts_to_geometry(1005, "conus", &TargetProjection::custom(lcc), GeometryKind::Bounds)
        .unwrap();
    let bounds = geometry.as_bounds().unwrap();
    assert!(bounds.contains_point(px, py));
    assert!((9800.0..10300.0).contains(&bounds.width()), "{}", bounds.width());
    assert!((9800.0..10300.0).contains(&bounds.height()), "{}", bounds.height());
}

#[test]
fn test_string_selectors() {
    let registry = registry();
    let target: TargetProjection = "native".parse().unwrap();
    let kind: GeometryKind = "bounds".parse().unwrap();
    let geometry = registry.grts_to_geometry(1005, "conus", &target, kind).unwrap();
    assert!(matches!(geometry, CellGeometry::Bounds(_)));

    assert!(matches!(
        "+proj=merc".parse::<TargetProjection>(),
        Err(NabatError::InvalidArgument { .. })
    ));
    assert!(matches!(
        "multipolygon".parse::<GeometryKind>(),
        Err(NabatError::InvalidArgument { .. })
    ));
}

#[test]
fn test_unknown_grts_id_is_no_match() {
    let registry = registry();
    let err = registry
        .grts_to_geometry(999_999, "conus", &TargetProjection::Wgs84, GeometryKind::Polygon)
        .unwrap_err();
    assert!(err.is_no_match());
    assert!(err.to_string().contains("GRTS ID (999999)"));
}

// ============================================================================
// Table access
// ============================================================================

#[test]
fn test_raw_table_access() {
    let registry = registry();
    assert_eq!(registry.grts_to_frame_id(1005, "conus").unwrap(), Some(84817));
    assert_eq!(registry.frame_id_to_grts(84817, "US").unwrap(), Some(1005));
    assert_eq!(registry.frame_id_to_grts(3, "conus").unwrap(), None);
    assert!(registry.grts_to_frame_id(1, "atlantis").is_err());
}

#[test]
fn test_puerto_rico_high_priority_cells() {
    let registry = registry();
    assert_eq!(
        registry.high_priority_cells("Puerto Rico").unwrap(),
        test_utils::frames::PUERTO_RICO_HIGH_PRIORITY.to_vec()
    );
}

#[test]
fn test_geojson_output() {
    let registry = registry();
    let geometry = registry
        .grts_to_geometry(1005, "conus", &TargetProjection::Wgs84, GeometryKind::Polygon)
        .unwrap();
    let value = geometry.to_geojson();
    assert_eq!(value["type"], "Polygon");
    let ring = value["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    assert!(value.get("bbox").is_none());
}
