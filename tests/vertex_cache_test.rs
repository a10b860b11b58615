//! Tests for the per-glyph build pipeline and its four views.

use approx::assert_relative_eq;
use glyph_bevel::error::MeshError;
use glyph_bevel::glyph::{NameRegistry, RawGlyph};
use glyph_bevel::math::{EqEps, Point2, Point3};
use glyph_bevel::outline::Outline;
use glyph_bevel::store::Backing;
use glyph_bevel::tessellate::{EarcutTessellator, Tessellation, Tessellator};
use glyph_bevel::types::{BuildSettings, PointPair, View};
use glyph_bevel::vertex_cache::VertexCache;

fn pts(coords: &[(f32, f32)]) -> Vec<Point2> {
    coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

/// 10×10 square with a 4×4 square hole.
fn framed_square() -> RawGlyph {
    let outline = Outline::new("frame")
        .with_contour(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]))
        .with_contour(&pts(&[(3.0, 3.0), (3.0, 7.0), (7.0, 7.0), (7.0, 3.0)]));
    RawGlyph::from_outline(&outline, &mut NameRegistry::new()).unwrap()
}

fn plain_square() -> RawGlyph {
    let outline = Outline::new("square")
        .with_contour(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
    RawGlyph::from_outline(&outline, &mut NameRegistry::new()).unwrap()
}

fn build(glyph: &RawGlyph, settings: &BuildSettings) -> VertexCache {
    VertexCache::build(glyph, &EarcutTessellator, settings).unwrap()
}

fn assert_point(actual: Point3, expected: Point3) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-4);
}

/// Fans the whole outline around its centroid, adding the centroid.
struct CentreFan;

impl Tessellator for CentreFan {
    fn tessellate(&self, points: &[Point2], _contour_ends: &[usize]) -> Result<Tessellation, MeshError> {
        let n = points.len();
        let centre = points.iter().fold(Point2::origin(), |acc, p| acc + p.coords / n as f32);
        let mut out = points.to_vec();
        out.push(centre);
        let indices = (0..n).flat_map(|i| [i, (i + 1) % n, n]).collect();
        Ok(Tessellation { points: out, indices })
    }
}

/// Returns triangles over points the glyph does not have.
struct Shifted;

impl Tessellator for Shifted {
    fn tessellate(&self, points: &[Point2], contour_ends: &[usize]) -> Result<Tessellation, MeshError> {
        let mut tess = EarcutTessellator.tessellate(points, contour_ends)?;
        for p in &mut tess.points {
            p.x += 100.0;
        }
        Ok(tess)
    }
}

struct OutOfRange;

impl Tessellator for OutOfRange {
    fn tessellate(&self, points: &[Point2], _contour_ends: &[usize]) -> Result<Tessellation, MeshError> {
        Ok(Tessellation {
            points: points.to_vec(),
            indices: vec![0, 1, points.len()],
        })
    }
}

#[test]
fn framed_square_view_sizes() {
    let cache = build(&framed_square(), &BuildSettings::default());

    assert_eq!(cache.vertex_count(View::Front), 8);
    assert_eq!(cache.triangle_count(View::Front), 8);
    assert_eq!(cache.vertex_count(View::Side), 16);
    assert_eq!(cache.triangle_count(View::Side), 16);
    // 8 mitered joints of 4 corners, 8 upright tubes of 8 corners.
    assert_eq!(cache.vertex_count(View::Outline), 96);
    assert_eq!(cache.triangle_count(View::Outline), 128);
    assert_eq!(cache.vertex_count(View::All), 112);
    assert_eq!(cache.triangle_count(View::All), 152);

    assert_eq!(cache.arms().len(), 8);
    assert_eq!(cache.side_outline().len(), 8);
}

#[test]
fn every_face_index_resolves_in_its_own_view() {
    let cache = build(&framed_square(), &BuildSettings::default());
    for view in View::EVERY {
        let raw = cache.raw_vertices(view);
        let faces = cache.faces(view).unwrap();
        assert_eq!(faces.len(), cache.triangle_count(view));
        for (face, tri) in faces.iter().zip(cache.triangles(view)) {
            for (&index, point) in face.iter().zip(tri.points()) {
                assert!(index >= 1 && index <= raw.len(), "{view}: index {index}");
                assert!(raw[index - 1].eq_eps(&point), "{view}: index {index}");
                assert_eq!(cache.index_of(&point, view), Ok(index));
                assert!(cache.contains(&point, view));
            }
        }
    }
}

#[test]
fn sub_views_are_mirrored_into_all() {
    let cache = build(&framed_square(), &BuildSettings::default());
    for view in [View::Front, View::Side, View::Outline] {
        for p in cache.raw_vertices(view) {
            assert!(cache.contains(p, View::All), "{view}: {p}");
        }
        for t in cache.triangles(view) {
            assert!(cache.triangles(View::All).contains(t));
        }
    }
}

#[test]
fn rebuild_is_identical() {
    let glyph = framed_square();
    let settings = BuildSettings::default();
    let a = build(&glyph, &settings);
    let b = build(&glyph, &settings);
    for view in View::EVERY {
        assert_eq!(a.to_obj(view).unwrap(), b.to_obj(view).unwrap(), "{view}");
    }
}

#[test]
fn backing_choice_does_not_change_output() {
    let glyph = framed_square();
    let scan = build(&glyph, &BuildSettings::default());
    let mut hashed = build(
        &glyph,
        &BuildSettings {
            backing: Backing::Hashed,
            ..BuildSettings::default()
        },
    );
    assert_eq!(hashed.backing(), Backing::Hashed);
    for view in View::EVERY {
        assert_eq!(scan.to_obj(view).unwrap(), hashed.to_obj(view).unwrap(), "{view}");
    }

    hashed.set_backing(Backing::Scan);
    assert_eq!(hashed.backing(), Backing::Scan);
    for view in View::EVERY {
        assert_eq!(scan.faces(view).unwrap(), hashed.faces(view).unwrap(), "{view}");
    }
}

#[test]
fn front_triangles_face_forward() {
    let cache = build(&framed_square(), &BuildSettings::default());
    for t in cache.triangles(View::Front) {
        assert!(t.signed_area_xy() > 0.0);
        assert!(t.points().iter().all(|p| p.z == 0.0));
    }
}

#[test]
fn side_wall_reaches_extrusion_depth() {
    let cache = build(&plain_square(), &BuildSettings::default());
    assert_eq!(cache.extruded().len(), 4);
    assert_point(cache.extruded()[2], Point3::new(10.0, 10.0, -15.0));
    let faces = cache.faces(View::Side).unwrap();
    // Front points are 1..=4, extruded points 5..=8.
    assert_eq!(faces[0], [1, 6, 5]);
    assert_eq!(faces[1], [1, 2, 6]);
    // Last edge wraps from the fourth point back to the first.
    assert_eq!(faces[6], [4, 5, 8]);
    assert_eq!(faces[7], [4, 1, 5]);
}

#[test]
fn zero_depth_skips_side_wall_and_tubes() {
    let settings = BuildSettings {
        depth: 0.0,
        ..BuildSettings::default()
    };
    let cache = build(&framed_square(), &settings);
    assert!(cache.extruded().is_empty());
    assert_eq!(cache.vertex_count(View::Side), 8);
    assert_eq!(cache.triangle_count(View::Side), 0);
    assert!(cache.side_outline().is_empty());
    assert_eq!(cache.vertex_count(View::Outline), 32);
    assert_eq!(cache.triangle_count(View::Outline), 64);
}

#[test]
fn wide_threshold_skips_no_joint_narrow_skips_all() {
    let glyph = framed_square();
    let none = build(
        &glyph,
        &BuildSettings {
            angle_threshold: 90.0,
            ..BuildSettings::default()
        },
    );
    assert!(none.side_outline().is_empty());

    let all = build(
        &glyph,
        &BuildSettings {
            angle_threshold: 91.0,
            ..BuildSettings::default()
        },
    );
    assert_eq!(all.side_outline().len(), 8);
}

#[test]
fn mitered_corners_lead_the_outline_view() {
    let cache = build(&plain_square(), &BuildSettings::default());
    let outline = cache.raw_vertices(View::Outline);
    // Joint (0, 0): miter points away from the square's inside.
    assert_point(outline[0], Point3::new(-1.25, -1.25, 1.25));
    assert_point(outline[1], Point3::new(-1.25, -1.25, -1.25));
    assert_point(outline[2], Point3::new(1.25, 1.25, -1.25));
    assert_point(outline[3], Point3::new(1.25, 1.25, 1.25));
    // Joint (10, 0).
    assert_point(outline[4], Point3::new(11.25, -1.25, 1.25));
    assert_point(outline[6], Point3::new(8.75, 1.25, -1.25));
}

#[test]
fn neighbouring_arms_share_joint_corners() {
    let cache = build(&plain_square(), &BuildSettings::default());
    let arms = cache.arms();
    for i in 0..arms.len() {
        let next = (i + 1) % arms.len();
        let [_, end] = arms[i].upper_prismoid().derived_squares().unwrap();
        let [start, _] = arms[next].upper_prismoid().derived_squares().unwrap();
        assert!(end.is_bound_to(&start, cache.corners()));
        let [joint_start, _] = arms[i].lower_prismoid().derived_squares().unwrap();
        assert!(end.is_bound_to(&joint_start, cache.corners()));
    }
}

#[test]
fn last_arm_closes_contour() {
    let cache = build(&framed_square(), &BuildSettings::default());
    let arms = cache.arms();
    let outer = cache.skeleton().as_slice();
    assert_eq!(arms[3].lower(), PointPair::new(outer[3], outer[0]));
    // The hole's arms start over at the hole's first point.
    assert_eq!(arms[4].upper(), PointPair::new(outer[7], outer[4]));
    assert_eq!(arms[7].lower(), PointPair::new(outer[7], outer[4]));
}

#[test]
fn offset_and_scale_apply_on_query_only() {
    let settings = BuildSettings {
        x_offset: 1.0,
        y_offset: 2.0,
        scale: 2.0,
        ..BuildSettings::default()
    };
    let cache = build(&plain_square(), &settings);
    let first = cache.vertices(View::Front).next().unwrap();
    assert_point(first, Point3::new(2.0, 4.0, 0.0));
    assert_point(cache.raw_vertices(View::Front)[0], Point3::origin());
    let back = cache.vertices(View::Side).nth(4).unwrap();
    assert_point(back, Point3::new(2.0, 4.0, -30.0));
}

#[test]
fn steiner_points_join_front_and_side() {
    let cache = VertexCache::build(&plain_square(), &CentreFan, &BuildSettings::default()).unwrap();
    assert_eq!(cache.vertex_count(View::Front), 5);
    assert_eq!(cache.triangle_count(View::Front), 4);
    assert_point(cache.raw_vertices(View::Front)[4], Point3::new(5.0, 5.0, 0.0));
    // Every Front point is extruded, the centre included.
    assert_eq!(cache.vertex_count(View::Side), 9);
    assert_eq!(cache.triangle_count(View::Side), 8);
    assert_eq!(cache.faces(View::Front).unwrap()[0], [1, 2, 5]);
}

#[test]
fn triangle_over_unknown_points_fails_the_build() {
    let err = VertexCache::build(&plain_square(), &Shifted, &BuildSettings::default()).unwrap_err();
    assert!(matches!(err, MeshError::VertexNotFound { .. }));
}

#[test]
fn out_of_range_tessellation_fails_the_build() {
    let err = VertexCache::build(&plain_square(), &OutOfRange, &BuildSettings::default()).unwrap_err();
    assert!(matches!(err, MeshError::Tessellation(_)));
}

#[test]
fn degenerate_contour_gets_no_arms() {
    let outline = Outline::new("dot")
        .with_contour(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]))
        .with_contour(&pts(&[(20.0, 20.0), (20.0, 20.0), (20.0005, 20.0)]));
    let glyph = RawGlyph::from_outline(&outline, &mut NameRegistry::new()).unwrap();
    let cache = build(&glyph, &BuildSettings::default());
    assert_eq!(cache.arms().len(), 4);
    assert_eq!(cache.vertex_count(View::Front), 7);
}

#[test]
fn empty_glyph_builds_empty_views() {
    let glyph = RawGlyph::new("space", vec![], vec![], &mut NameRegistry::new()).unwrap();
    let cache = build(&glyph, &BuildSettings::default());
    for view in View::EVERY {
        assert_eq!(cache.vertex_count(view), 0);
        assert_eq!(cache.triangle_count(view), 0);
    }
}
