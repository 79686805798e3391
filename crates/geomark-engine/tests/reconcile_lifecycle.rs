//! End-to-end lifecycle scenarios over a recording surface.
//!
//! These drive the coordinator the way a map page does — data arrives,
//! zoom changes the mode, the toolbar toggles layers and filters, the
//! page unmounts — and verify the lifecycle invariants: one overlay per
//! live record, guaranteed teardown, idempotent re-render.

use geomark_core::{Category, CategoryFilter, Geometry, RawItem, RecordId, RenderMode, SummaryRecord};
use geomark_engine::{HeadlessSurface, LayerId, OverlayCoordinator};

const BOUNDARIES: LayerId = LayerId::new(1);
const HOSPITALS: LayerId = LayerId::new(2);
const PHARMACIES: LayerId = LayerId::new(3);

fn region(id: &str, hospitals: u32, pharmacies: u32) -> SummaryRecord {
    RawItem::new(id)
        .with_name(id)
        .with_geometry(Geometry::Polygon(vec![
            (126.0, 37.0),
            (126.0, 38.0),
            (127.0, 38.0),
            (127.0, 37.0),
        ]))
        .with_count(Category::Hospital, hospitals)
        .with_count(Category::Pharmacy, pharmacies)
        .normalize()
}

fn facility(id: &str, category: Category, lat: f64, lng: f64) -> SummaryRecord {
    RawItem::new(id)
        .with_name(id)
        .with_coordinate(lat, lng)
        .with_category(category)
        .normalize()
}

#[test]
fn boundary_scenario_update_and_removal() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());
    let stats = coordinator.surface().unwrap().stats();

    // {A: 5, B: 3} under Boundary: two handles.
    let report = coordinator.set_layer_data(
        BOUNDARIES,
        vec![region("A", 5, 0), region("B", 3, 0)],
        RenderMode::Boundary,
    );
    assert_eq!(report.created, 2);

    // {A: 7}: B destroyed, A updated, one handle left.
    let report =
        coordinator.set_layer_data(BOUNDARIES, vec![region("A", 7, 0)], RenderMode::Boundary);
    assert_eq!(report.destroyed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(coordinator.layer(BOUNDARIES).map(|s| s.len()), Some(1));
    assert_eq!(stats.live(), 1);
}

#[test]
fn zoom_driven_mode_switch_never_duplicates() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());
    let stats = coordinator.surface().unwrap().stats();

    let records = vec![region("A", 5, 9), region("B", 3, 2)];
    coordinator.set_layer_data(BOUNDARIES, records.clone(), RenderMode::Cluster);
    assert_eq!(stats.live(), 2);

    // Zooming in flips the representation; old handles must go first.
    coordinator.set_layer_data(BOUNDARIES, records.clone(), RenderMode::NumericBadge);
    assert_eq!(stats.live(), 2);

    coordinator.set_layer_data(BOUNDARIES, records, RenderMode::Boundary);
    assert_eq!(stats.live(), 2);
    assert_eq!(
        coordinator
            .layer(BOUNDARIES)
            .and_then(|s| s.handle(&RecordId::from("A")))
            .map(|h| h.mode()),
        Some(RenderMode::Boundary)
    );
}

#[test]
fn hide_show_round_trip_reproduces_handles_by_content() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());

    coordinator.set_layer_data(
        HOSPITALS,
        vec![
            facility("h1", Category::Hospital, 37.5, 127.0),
            facility("h2", Category::Hospital, 35.1, 129.0),
        ],
        RenderMode::Point,
    );
    let before = coordinator.surface().unwrap().live_descriptors();

    coordinator.set_layer_visible(HOSPITALS, false);
    assert_eq!(coordinator.surface().unwrap().live_count(), 0);

    coordinator.set_layer_visible(HOSPITALS, true);
    let after = coordinator.surface().unwrap().live_descriptors();

    // Same content, not necessarily the same surface identities.
    let key = |d: &geomark_render::OverlayDescriptor| format!("{d:?}");
    let mut before: Vec<String> = before.iter().map(key).collect();
    let mut after: Vec<String> = after.iter().map(key).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn invalid_records_never_produce_handles() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());

    let report = coordinator.set_layer_data(
        BOUNDARIES,
        vec![
            RawItem::new("no-anchor").with_name("nowhere").normalize(),
            RawItem::new("empty-ring")
                .with_geometry(Geometry::Polygon(vec![]))
                .normalize(),
            region("ok", 1, 1),
        ],
        RenderMode::Cluster,
    );

    assert_eq!(report.created, 1);
    let set = coordinator.layer(BOUNDARIES).unwrap();
    assert!(set.record(&RecordId::from("no-anchor")).is_none());
    assert!(set.handle(&RecordId::from("empty-ring")).is_none());
    assert_eq!(set.len(), 1);
}

#[test]
fn per_category_layers_do_not_interfere() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());
    let stats = coordinator.surface().unwrap().stats();

    coordinator.set_layer_data(
        HOSPITALS,
        vec![facility("h1", Category::Hospital, 37.5, 127.0)],
        RenderMode::Point,
    );
    coordinator.set_layer_data(
        PHARMACIES,
        vec![facility("p1", Category::Pharmacy, 37.5, 127.0)],
        RenderMode::Point,
    );
    assert_eq!(stats.live(), 2);

    coordinator.set_layer_visible(HOSPITALS, false);
    assert_eq!(stats.live(), 1);
    assert_eq!(coordinator.layer(PHARMACIES).map(|s| s.len()), Some(1));
    assert_eq!(stats.unknown_destroys(), 0);
}

#[test]
fn teardown_on_drop_releases_everything() {
    let surface = HeadlessSurface::new();
    let stats = surface.stats();

    {
        let mut coordinator = OverlayCoordinator::new(surface);
        coordinator.set_layer_data(
            HOSPITALS,
            vec![
                facility("h1", Category::Hospital, 37.5, 127.0),
                facility("h2", Category::Hospital, 35.1, 129.0),
            ],
            RenderMode::Point,
        );
        coordinator
            .set_heatmap_data(vec![facility("x", Category::Pharmacy, 36.0, 127.5)])
            .unwrap();
        coordinator.set_heatmap_enabled(true).unwrap();
        assert_eq!(stats.live(), 3);
    }

    // Every create has a matching destroy once the coordinator is gone.
    assert_eq!(stats.created(), stats.destroyed());
    assert_eq!(stats.live(), 0);
}

#[test]
fn explicit_teardown_then_reuse() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());
    let stats = coordinator.surface().unwrap().stats();

    let records = vec![facility("h1", Category::Hospital, 37.5, 127.0)];
    coordinator.set_layer_data(HOSPITALS, records.clone(), RenderMode::Point);
    coordinator.teardown_all();
    assert_eq!(stats.live(), 0);

    // The coordinator stays usable after teardown.
    let report = coordinator.set_layer_data(HOSPITALS, records, RenderMode::Point);
    assert_eq!(report.created, 1);
    assert_eq!(stats.live(), 1);
}

#[test]
fn detach_destroys_through_the_departing_surface() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new());
    let stats = coordinator.surface().unwrap().stats();

    coordinator.set_layer_data(
        HOSPITALS,
        vec![facility("h1", Category::Hospital, 37.5, 127.0)],
        RenderMode::Point,
    );
    let surface = coordinator.detach_surface().unwrap();
    assert_eq!(surface.live_count(), 0);
    assert_eq!(stats.created(), stats.destroyed());

    // Detached: events are stored no-ops.
    let report = coordinator.set_layer_data(
        HOSPITALS,
        vec![
            facility("h1", Category::Hospital, 37.5, 127.0),
            facility("h2", Category::Hospital, 35.1, 129.0),
        ],
        RenderMode::Point,
    );
    assert!(report.is_noop());

    // Re-attaching renders the stored state in full.
    let report = coordinator.attach_surface(HeadlessSurface::new());
    assert_eq!(report.created, 2);
}

#[test]
fn creation_failures_report_without_aborting_the_pass() {
    let mut surface = HeadlessSurface::new();
    surface.fail_next_creates(1);
    let mut coordinator = OverlayCoordinator::new(surface);

    let records = vec![
        facility("h1", Category::Hospital, 37.5, 127.0),
        facility("h2", Category::Hospital, 35.1, 129.0),
        facility("h3", Category::Hospital, 36.3, 127.3),
    ];
    let report = coordinator.set_layer_data(HOSPITALS, records.clone(), RenderMode::Point);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.created, 2);
    assert_eq!(coordinator.layer(HOSPITALS).map(|s| s.len()), Some(2));

    // Retrying with the same data creates only the missing overlay.
    let report = coordinator.set_layer_data(HOSPITALS, records, RenderMode::Point);
    assert_eq!(report.created, 1);
    assert!(report.failed.is_empty());
    assert_eq!(coordinator.layer(HOSPITALS).map(|s| s.len()), Some(3));
}

#[test]
fn filtered_numeric_counts_follow_the_toolbar() {
    let mut coordinator = OverlayCoordinator::new(HeadlessSurface::new()).with_renderers(
        geomark_render::RendererSet::new()
            .with_numeric(geomark_render::NumericBadge::new().with_filter(CategoryFilter::PHARMACY)),
    );

    coordinator.set_layer_data(
        BOUNDARIES,
        vec![region("A", 5, 9)],
        RenderMode::NumericBadge,
    );

    let descriptors = coordinator.surface().unwrap().live_descriptors();
    assert_eq!(descriptors.len(), 1);
    let geomark_render::OverlayContent::Badge { text, .. } = &descriptors[0].content else {
        panic!("expected a badge");
    };
    assert_eq!(text, "9");
}
