//! Per-glyph mesh builder.
//!
//! A [`VertexCache`] turns one [`RawGlyph`] into four views of the same
//! solid, each with its own vertex store and triangle list:
//!
//! - **Front**: the tessellated glyph face at z = 0.
//! - **Side**: the wall joining the face to its extruded copy at z = -depth.
//! - **Outline**: the mitered bevel tubes along every contour, plus an
//!   upright tube at each sharp joint.
//! - **All**: everything above. Every vertex and triangle recorded into one
//!   of the other views is mirrored here.
//!
//! The build runs once, in a fixed order, inside [`VertexCache::build`]. A
//! triangle is only recorded after all three of its points are present in
//! every view it goes to; a miss aborts the build with
//! [`MeshError::VertexNotFound`].

use std::ops::Range;

use crate::bevel::{fold_contour, Arm, Corner, Prismoid, Square};
use crate::error::MeshError;
use crate::export::ObjMesh;
use crate::glyph::RawGlyph;
use crate::math::{with_z, Point3, Vector3};
use crate::store::{Backing, CornerArena, VertexStore};
use crate::tessellate::Tessellator;
use crate::types::{BuildSettings, PointPair, Triangle3, View};

#[derive(Clone, Debug, Default)]
struct ViewMesh {
    store: VertexStore,
    triangles: Vec<Triangle3>,
}

impl ViewMesh {
    fn new(backing: Backing) -> Self {
        Self {
            store: VertexStore::new(backing),
            triangles: Vec::new(),
        }
    }
}

/// The four mesh views of one glyph plus the bevel geometry that produced
/// them.
#[derive(Debug)]
pub struct VertexCache {
    name: String,
    settings: BuildSettings,
    contours: Vec<Range<usize>>,
    /// Outline points only, in outline order.
    skeleton: VertexStore,
    views: [ViewMesh; 4],
    extruded: Vec<Point3>,
    arena: CornerArena,
    arms: Vec<Arm>,
    side_outline: Vec<Prismoid>,
}

impl VertexCache {
    /// Build every view of `glyph`.
    pub fn build(
        glyph: &RawGlyph,
        tessellator: &dyn Tessellator,
        settings: &BuildSettings,
    ) -> Result<Self, MeshError> {
        let backing = settings.backing;
        let mut cache = Self {
            name: glyph.name().to_string(),
            settings: *settings,
            contours: glyph.contours(),
            skeleton: VertexStore::new(backing),
            views: [
                ViewMesh::new(backing),
                ViewMesh::new(backing),
                ViewMesh::new(backing),
                ViewMesh::new(backing),
            ],
            extruded: Vec::new(),
            arena: CornerArena::new(),
            arms: Vec::new(),
            side_outline: Vec::new(),
        };

        cache.gather_main_outline(glyph);
        cache.gather_front_tessellation(glyph, tessellator)?;
        if settings.depth != 0.0 {
            cache.gather_extruded_points();
            cache.gather_side_tessellation()?;
        }
        cache.init_arms();
        cache.gather_main_bevel()?;
        if settings.depth != 0.0 {
            cache.gather_side_outline()?;
        }

        log::debug!(
            "{}: {} vertices, {} triangles, {} arms, {} side-outline tubes",
            cache.name,
            cache.vertex_count(View::All),
            cache.triangle_count(View::All),
            cache.arms.len(),
            cache.side_outline.len(),
        );
        Ok(cache)
    }

    // ─── Recording ──────────────────────────────────────────────────────

    fn view(&self, view: View) -> &ViewMesh {
        &self.views[view.slot()]
    }

    fn view_mut(&mut self, view: View) -> &mut ViewMesh {
        &mut self.views[view.slot()]
    }

    /// Add `point` to each listed view and once to All.
    fn push_vertex(&mut self, views: &[View], point: Point3) {
        for &view in views.iter().filter(|&&v| v != View::All) {
            self.view_mut(view).store.add(point);
        }
        self.view_mut(View::All).store.add(point);
    }

    /// Record `triangle` into each listed view and into All, once every
    /// one of them holds all three points.
    fn push_triangle(&mut self, views: &[View], triangle: Triangle3) -> Result<(), MeshError> {
        let targets: Vec<View> = views
            .iter()
            .copied()
            .filter(|&v| v != View::All)
            .chain(std::iter::once(View::All))
            .collect();
        for &view in &targets {
            let store = &self.view(view).store;
            if let Some(point) = triangle.points().into_iter().find(|p| !store.contains(p)) {
                return Err(MeshError::VertexNotFound { point });
            }
        }
        for view in targets {
            self.view_mut(view).triangles.push(triangle);
        }
        Ok(())
    }

    // ─── Build stages ───────────────────────────────────────────────────

    fn gather_main_outline(&mut self, glyph: &RawGlyph) {
        for p in glyph.vertices() {
            let vertex = with_z(p, 0.0);
            self.skeleton.add(vertex);
            self.push_vertex(&[View::Front, View::Side], vertex);
        }
        log::debug!("{}: main outline, {} points", self.name, self.skeleton.len());
    }

    fn gather_front_tessellation(
        &mut self,
        glyph: &RawGlyph,
        tessellator: &dyn Tessellator,
    ) -> Result<(), MeshError> {
        if glyph.is_empty() {
            return Ok(());
        }
        let input = glyph.vertices();
        let tess = tessellator.tessellate(input, glyph.contour_ends())?;
        let triangles = tess.triangles()?;

        let steiner = tess.steiner_points(input.len());
        for p in steiner {
            self.push_vertex(&[View::Front], with_z(p, 0.0));
        }
        for t in &triangles {
            self.push_triangle(&[View::Front], t.lift(0.0).front())?;
        }
        log::debug!(
            "{}: front tessellation, {} triangles, {} added points",
            self.name,
            triangles.len(),
            steiner.len()
        );
        Ok(())
    }

    fn gather_extruded_points(&mut self) {
        let offset = Vector3::new(0.0, 0.0, -self.settings.depth);
        self.extruded = self
            .view(View::Front)
            .store
            .vertices()
            .map(|p| p + offset)
            .collect();
        for p in self.extruded.clone() {
            self.push_vertex(&[View::Side], p);
        }
        log::debug!("{}: extruded {} points", self.name, self.extruded.len());
    }

    fn gather_side_tessellation(&mut self) -> Result<(), MeshError> {
        let front = self.skeleton.as_slice().to_vec();
        let mut quads = 0;
        for range in self.contours.clone() {
            for i in range.clone() {
                let s = if i + 1 == range.end { range.start } else { i + 1 };
                let here = PointPair::new(front[i], self.extruded[i]);
                let next = PointPair::new(front[s], self.extruded[s]);
                if here.eq_eps(&next) {
                    continue;
                }
                self.push_triangle(&[View::Side], Triangle3::new(here.p1, next.p2, here.p2))?;
                self.push_triangle(&[View::Side], Triangle3::new(here.p1, next.p1, next.p2))?;
                quads += 1;
            }
        }
        log::debug!("{}: side wall, {} quads", self.name, quads);
        Ok(())
    }

    fn init_arms(&mut self) {
        let thickness = self.settings.thickness;
        for range in &self.contours {
            let arms = fold_contour(&self.skeleton.as_slice()[range.clone()], thickness);
            if arms.is_empty() && !range.is_empty() {
                log::warn!(
                    "{}: contour {range:?} has fewer than two distinct points, no bevel",
                    self.name
                );
            }
            self.arms.extend(arms);
        }
        bind_arms(&mut self.arms, &mut self.arena);
        log::debug!("{}: {} arms", self.name, self.arms.len());
    }

    fn gather_main_bevel(&mut self) -> Result<(), MeshError> {
        let h = self.settings.half_thickness();

        let mut corners = Vec::with_capacity(self.arms.len() * 4);
        for arm in &mut self.arms {
            let offset = arm.miter_offset(h)?;
            let joint = arm.joint();
            let top = Vector3::new(offset.x, offset.y, 0.0);
            let z = Vector3::new(0.0, 0.0, h);
            let square = arm.upper_prismoid_mut().square2(&mut self.arena);
            let placed = [joint + top + z, joint + top - z, joint - top - z, joint - top + z];
            set_square(&square, &mut self.arena, placed);
            corners.extend(placed);
        }
        for p in corners {
            self.push_vertex(&[View::Outline], p);
        }

        let mut triangles = Vec::with_capacity(self.arms.len() * 8);
        for arm in &mut self.arms {
            triangles.extend(arm.upper_prismoid_mut().side_triangles(&mut self.arena));
        }
        for t in triangles {
            self.push_triangle(&[View::Outline], t)?;
        }
        log::debug!("{}: main bevel, {} arms mitered", self.name, self.arms.len());
        Ok(())
    }

    fn gather_side_outline(&mut self) -> Result<(), MeshError> {
        let drop = Vector3::new(0.0, 0.0, -self.settings.depth);
        for i in 0..self.arms.len() {
            if !self.arms[i].needs_side_outline(self.settings.angle_threshold)? {
                continue;
            }
            let joint = self.arms[i].joint();
            let mut tube = Prismoid::new(PointPair::new(joint, joint + drop), self.settings.thickness);
            for p in tube.points_cw(&mut self.arena) {
                self.push_vertex(&[View::Outline], p);
            }
            for t in tube.side_triangles(&mut self.arena) {
                self.push_triangle(&[View::Outline], t)?;
            }
            self.side_outline.push(tube);
        }
        log::debug!("{}: {} side-outline tubes", self.name, self.side_outline.len());
        Ok(())
    }

    // ─── Queries ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Vertices of `view` in index order, offset then scaled.
    pub fn vertices(&self, view: View) -> impl Iterator<Item = Point3> + '_ {
        let offset = Vector3::new(self.settings.x_offset, self.settings.y_offset, 0.0);
        let scale = self.settings.scale;
        self.view(view).store.vertices().map(move |p| (p + offset) * scale)
    }

    /// Vertices of `view` as built, without offset or scale.
    pub fn raw_vertices(&self, view: View) -> &[Point3] {
        self.view(view).store.as_slice()
    }

    /// Triangles of `view` in build order, in untransformed coordinates.
    pub fn triangles(&self, view: View) -> &[Triangle3] {
        &self.view(view).triangles
    }

    /// 1-based index of an untransformed point within `view`.
    pub fn index_of(&self, point: &Point3, view: View) -> Result<usize, MeshError> {
        self.view(view).store.index_of(point)
    }

    pub fn contains(&self, point: &Point3, view: View) -> bool {
        self.view(view).store.contains(point)
    }

    /// Triangles of `view` as 1-based index triples into that view.
    pub fn faces(&self, view: View) -> Result<Vec<[usize; 3]>, MeshError> {
        let store = &self.view(view).store;
        self.triangles(view)
            .iter()
            .map(|t| {
                Ok([
                    store.index_of(&t.p1)?,
                    store.index_of(&t.p2)?,
                    store.index_of(&t.p3)?,
                ])
            })
            .collect()
    }

    pub fn vertex_count(&self, view: View) -> usize {
        self.view(view).store.len()
    }

    pub fn triangle_count(&self, view: View) -> usize {
        self.view(view).triangles.len()
    }

    pub fn backing(&self) -> Backing {
        self.skeleton.backing()
    }

    /// Switch the lookup strategy of every store at once. Indices and
    /// vertex order are unaffected.
    pub fn set_backing(&mut self, backing: Backing) {
        self.skeleton.set_backing(backing);
        for view in &mut self.views {
            view.store.set_backing(backing);
        }
        self.settings.backing = backing;
    }

    /// Outline points in outline order.
    pub fn skeleton(&self) -> &VertexStore {
        &self.skeleton
    }

    /// Extruded copies of the Front vertices; empty when depth is zero.
    pub fn extruded(&self) -> &[Point3] {
        &self.extruded
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    /// Upright tubes placed at joints sharper than the angle threshold.
    pub fn side_outline(&self) -> &[Prismoid] {
        &self.side_outline
    }

    pub fn corners(&self) -> &CornerArena {
        &self.arena
    }

    /// Snapshot `view` as an exportable mesh.
    pub fn to_obj(&self, view: View) -> Result<ObjMesh, MeshError> {
        Ok(ObjMesh {
            name: Some(self.name.clone()),
            vertices: self.vertices(view).collect(),
            faces: self.faces(view)?,
        })
    }
}

fn set_square(square: &Square, arena: &mut CornerArena, points: [Point3; 4]) {
    for (corner, p) in Corner::CW.into_iter().zip(points) {
        square.set(arena, corner, p);
    }
}

/// Weld every prismoid end that sits on the same outline point.
///
/// The first square seen at a point becomes that point's representative;
/// later squares at an ε-equal point bind to it.
fn bind_arms(arms: &mut [Arm], arena: &mut CornerArena) {
    let mut anchors = VertexStore::new(Backing::Hashed);
    let mut reps: Vec<Square> = Vec::new();
    for arm in arms.iter_mut() {
        let (upper, lower) = (arm.upper(), arm.lower());
        let [u1, u2] = arm.upper_prismoid_mut().squares(arena);
        let [l1, l2] = arm.lower_prismoid_mut().squares(arena);
        for (point, square) in [(upper.p1, u1), (upper.p2, u2), (lower.p1, l1), (lower.p2, l2)] {
            match anchors.position(&point) {
                Some(i) => square.bind_to(&reps[i - 1], arena),
                None => {
                    anchors.add(point);
                    reps.push(square);
                }
            }
        }
    }
}
