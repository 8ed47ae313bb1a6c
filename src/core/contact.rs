//! Kontakterkennung zwischen einem Raumvolumen und Bauteilen.
//!
//! Ablauf pro Kandidat:
//! 1. Grobauswahl über den um `bbox_margin` vergrößerten Hüllquader
//! 2. Volumenkollision: boolesche Schnittmenge mit Volumen > Toleranz
//! 3. Flächenkontakt: Stichprobenpunkte einer Fläche projizieren auf die andere
//!
//! Fehler einzelner Körper- oder Flächenpaare gelten als "kein Befund" und
//! brechen die Klassifikation nie ab.

use std::sync::Arc;

use glam::{DVec2, DVec3};
use indexmap::IndexMap;

use super::document::{DetailLevel, Document};
use super::entity::EntityId;
use super::geometry::{Aabb, Face, GeometryError, Solid};
use super::spatial::SpatialIndex;

/// Räumliche Beziehung zwischen Raum und Kandidat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContactType {
    /// Kein Kontakt
    #[default]
    None,
    /// Flächen berühren sich
    SurfaceContact,
    /// Volumina durchdringen sich (dominiert Flächenkontakt)
    VolumetricCollision,
}

/// Parameter der Kontakterkennung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSettings {
    /// Gemeinsame Toleranz für Volumen, Flächen und Abstände
    pub tolerance: f64,
    /// Vergrößerung des Raum-Hüllquaders pro Achse
    pub bbox_margin: f64,
    /// Stichproben pro Parameterrichtung (n × n + Mittelpunkt)
    pub face_samples: usize,
    /// Mindestanzahl naher Punkte für "Fläche berührt"
    pub min_touching_points: usize,
    /// Detailgrad der angeforderten Geometrie
    pub detail: DetailLevel,
}

impl ContactSettings {
    /// Standard-Toleranz (Volumen- und Längeneinheiten).
    pub const DEFAULT_TOLERANCE: f64 = 1e-3;
    /// Standard-Vergrößerung des Hüllquaders.
    pub const DEFAULT_BBOX_MARGIN: f64 = 0.5;
    /// Standard-Stichprobenraster (5 × 5).
    pub const DEFAULT_FACE_SAMPLES: usize = 5;
    /// Standard-Mindestanzahl naher Punkte.
    pub const DEFAULT_MIN_TOUCHING_POINTS: usize = 2;
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            bbox_margin: Self::DEFAULT_BBOX_MARGIN,
            face_samples: Self::DEFAULT_FACE_SAMPLES,
            min_touching_points: Self::DEFAULT_MIN_TOUCHING_POINTS,
            detail: DetailLevel::Fine,
        }
    }
}

/// Klassifiziert Kontakte zwischen Raumvolumen und Kandidaten.
#[derive(Debug, Clone, Default)]
pub struct ContactDetector {
    settings: ContactSettings,
}

impl ContactDetector {
    /// Erstellt einen Detektor mit den gegebenen Parametern.
    pub fn new(settings: ContactSettings) -> Self {
        Self { settings }
    }

    /// Aktive Parameter.
    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    /// Klassifiziert einen Kandidaten inklusive Grobauswahl über die Hüllquader.
    pub fn classify_bounded(
        &self,
        region_bounds: &Aabb,
        region: &[Arc<dyn Solid>],
        candidate_bounds: &Aabb,
        candidate: &[Arc<dyn Solid>],
    ) -> ContactType {
        if !region_bounds
            .expanded(self.settings.bbox_margin)
            .intersects(candidate_bounds)
        {
            return ContactType::None;
        }
        self.classify(region, candidate)
    }

    /// Klassifiziert die Körper eines Kandidaten gegen die Körper des Raums.
    pub fn classify(
        &self,
        region: &[Arc<dyn Solid>],
        candidate: &[Arc<dyn Solid>],
    ) -> ContactType {
        if self.has_volumetric_collision(region, candidate) {
            return ContactType::VolumetricCollision;
        }
        if self.has_surface_contact(region, candidate) {
            return ContactType::SurfaceContact;
        }
        ContactType::None
    }

    /// Sucht alle Entitäten mit Kontakt zum Raum `region_id`.
    ///
    /// Übersprungen werden der Raum selbst, andere Räume und Typen. Fehler
    /// beim Lesen der Raumgeometrie werden zurückgegeben, Fehler einzelner
    /// Kandidaten nur geloggt.
    pub fn contacts_with(
        &self,
        document: &dyn Document,
        region_id: EntityId,
        index: &SpatialIndex,
    ) -> Result<IndexMap<EntityId, ContactType>, GeometryError> {
        let mut contacts = IndexMap::new();
        let tolerance = self.settings.tolerance;

        let region: Vec<Arc<dyn Solid>> = document
            .geometry_of(region_id, self.settings.detail)?
            .into_iter()
            .filter(|solid| solid.volume() > tolerance)
            .collect();
        if region.is_empty() {
            log::debug!("Raum {} ohne Volumenkörper, keine Kontakte", region_id);
            return Ok(contacts);
        }

        let Some(region_bounds) = document
            .bounding_box(region_id)
            .or_else(|| Aabb::enclosing(region.iter().map(|s| s.bounding_box())))
        else {
            return Ok(contacts);
        };
        let query = region_bounds.expanded(self.settings.bbox_margin);

        for candidate_id in index.intersecting(&query) {
            if candidate_id == region_id {
                continue;
            }
            let Some(entity) = document.entity(candidate_id) else {
                continue;
            };
            if entity.is_type || entity.is_room() {
                continue;
            }

            let candidate = match document.geometry_of(candidate_id, self.settings.detail) {
                Ok(solids) => solids,
                Err(e) => {
                    log::debug!("Geometrie von Entität {} nicht lesbar: {}", candidate_id, e);
                    continue;
                }
            };
            if candidate.is_empty() {
                continue;
            }

            let contact = self.classify(&region, &candidate);
            if contact != ContactType::None {
                contacts.insert(candidate_id, contact);
            }
        }

        log::debug!("Raum {}: {} Kontakte gefunden", region_id, contacts.len());
        Ok(contacts)
    }

    fn has_volumetric_collision(
        &self,
        region: &[Arc<dyn Solid>],
        candidate: &[Arc<dyn Solid>],
    ) -> bool {
        let tolerance = self.settings.tolerance;

        for region_solid in region.iter().filter(|s| s.volume() > tolerance) {
            for candidate_solid in candidate.iter().filter(|s| s.volume() > tolerance) {
                match region_solid.intersect(candidate_solid.as_ref()) {
                    Ok(Some(cut)) if cut.volume() > tolerance => return true,
                    Ok(_) => {}
                    Err(e) => log::debug!("Verschneidung übersprungen: {}", e),
                }
            }
        }
        false
    }

    fn has_surface_contact(
        &self,
        region: &[Arc<dyn Solid>],
        candidate: &[Arc<dyn Solid>],
    ) -> bool {
        let region_faces = usable_faces(region, self.settings.tolerance);
        let candidate_faces = usable_faces(candidate, self.settings.tolerance);

        region_faces.iter().any(|region_face| {
            candidate_faces
                .iter()
                .any(|candidate_face| self.faces_touching(*region_face, *candidate_face))
        })
    }

    /// Zwei Flächen berühren sich, wenn genug Stichproben einer Fläche (in
    /// einer der beiden Richtungen) innerhalb der Toleranz auf die andere projizieren.
    fn faces_touching(&self, a: &dyn Face, b: &dyn Face) -> bool {
        let points_a = self.sample_points(a);
        let points_b = self.sample_points(b);
        if points_a.is_empty() || points_b.is_empty() {
            return false;
        }

        self.count_close(&points_a, b) >= self.settings.min_touching_points
            || self.count_close(&points_b, a) >= self.settings.min_touching_points
    }

    fn count_close(&self, points: &[DVec3], face: &dyn Face) -> usize {
        points
            .iter()
            .filter(|point| {
                face.project(**point)
                    .is_some_and(|distance| distance < self.settings.tolerance)
            })
            .count()
    }

    /// Raster aus n × n Punkten über den Parameterbereich plus Mittelpunkt.
    fn sample_points(&self, face: &dyn Face) -> Vec<DVec3> {
        let Ok(bounds) = face.bounds_uv() else {
            return Vec::new();
        };
        let n = self.settings.face_samples.max(2);
        let steps = (n - 1) as f64;
        let span = bounds.max - bounds.min;

        let mut points = Vec::with_capacity(n * n + 1);
        for i in 0..n {
            for j in 0..n {
                let uv = bounds.min + span * DVec2::new(i as f64 / steps, j as f64 / steps);
                if let Ok(point) = face.evaluate(uv) {
                    points.push(point);
                }
            }
        }

        if !points.is_empty() {
            if let Ok(center) = face.evaluate(bounds.center()) {
                points.push(center);
            }
        }
        points
    }
}

/// Flächen aller Körper mit Volumen und Fläche über der Toleranz.
fn usable_faces(solids: &[Arc<dyn Solid>], tolerance: f64) -> Vec<&dyn Face> {
    solids
        .iter()
        .filter(|solid| solid.volume() > tolerance)
        .flat_map(|solid| solid.faces())
        .filter(|face| face.area() > tolerance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{BoxSolid, UvRect};
    use crate::core::{Entity, MemoryDocument};
    use std::any::Any;

    fn boxed(min: [f64; 3], max: [f64; 3]) -> Arc<dyn Solid> {
        Arc::new(BoxSolid::new(DVec3::from_array(min), DVec3::from_array(max)))
    }

    /// Ebene Testfläche in z = 0, die nur vorgegebene Punkte als nah meldet.
    #[derive(Debug)]
    struct ScriptedFace {
        touch_points: Vec<DVec3>,
        broken: bool,
    }

    impl Face for ScriptedFace {
        fn area(&self) -> f64 {
            1.0
        }

        fn bounds_uv(&self) -> Result<UvRect, GeometryError> {
            Ok(UvRect {
                min: DVec2::ZERO,
                max: DVec2::ONE,
            })
        }

        fn evaluate(&self, uv: DVec2) -> Result<DVec3, GeometryError> {
            if self.broken {
                return Err(GeometryError::Evaluation { u: uv.x, v: uv.y });
            }
            Ok(DVec3::new(uv.x, uv.y, 0.0))
        }

        fn project(&self, point: DVec3) -> Option<f64> {
            let close = self
                .touch_points
                .iter()
                .any(|p| p.distance(point) < 1e-12);
            Some(if close { 0.0005 } else { 1.0 })
        }
    }

    #[derive(Debug)]
    struct ScriptedSolid {
        face: ScriptedFace,
    }

    impl ScriptedSolid {
        fn touching(points: Vec<DVec3>) -> Arc<dyn Solid> {
            Arc::new(Self {
                face: ScriptedFace {
                    touch_points: points,
                    broken: false,
                },
            })
        }

        fn broken() -> Arc<dyn Solid> {
            Arc::new(Self {
                face: ScriptedFace {
                    touch_points: Vec::new(),
                    broken: true,
                },
            })
        }
    }

    impl Solid for ScriptedSolid {
        fn volume(&self) -> f64 {
            1.0
        }

        fn faces(&self) -> Vec<&dyn Face> {
            vec![&self.face]
        }

        fn bounding_box(&self) -> Aabb {
            Aabb::new(DVec3::ZERO, DVec3::ONE)
        }

        fn intersect(&self, _other: &dyn Solid) -> Result<Option<Box<dyn Solid>>, GeometryError> {
            Err(GeometryError::BooleanOperation("nicht unterstützt".to_string()))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn volumetric_collision_dominates_surface_contact() {
        let detector = ContactDetector::default();
        let region = vec![boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        // Überlappung 0.01 × 1 × 1 = 0.01 > 0.001, zusätzlich koplanare Flächen
        let candidate = vec![boxed([0.99, 0.0, 0.0], [2.0, 1.0, 1.0])];

        assert_eq!(
            detector.classify(&region, &candidate),
            ContactType::VolumetricCollision
        );
    }

    #[test]
    fn adjacent_boxes_are_in_surface_contact() {
        let detector = ContactDetector::default();
        let region = vec![boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        let candidate = vec![boxed([1.0, 0.0, 0.0], [2.0, 1.0, 1.0])];

        assert_eq!(
            detector.classify(&region, &candidate),
            ContactType::SurfaceContact
        );
    }

    #[test]
    fn separated_boxes_have_no_contact() {
        let detector = ContactDetector::default();
        let region = vec![boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        let candidate = vec![boxed([1.2, 0.0, 0.0], [2.0, 1.0, 1.0])];

        assert_eq!(detector.classify(&region, &candidate), ContactType::None);
    }

    #[test]
    fn two_close_sample_points_make_surface_contact() {
        let detector = ContactDetector::default();
        let region = vec![ScriptedSolid::touching(Vec::new())];
        let candidate = vec![ScriptedSolid::touching(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.5, 0.5, 0.0),
        ])];

        assert_eq!(
            detector.classify(&region, &candidate),
            ContactType::SurfaceContact
        );
    }

    #[test]
    fn single_close_sample_point_is_not_contact() {
        let detector = ContactDetector::default();
        let region = vec![ScriptedSolid::touching(vec![DVec3::new(1.0, 1.0, 0.0)])];
        let candidate = vec![ScriptedSolid::touching(vec![DVec3::new(0.0, 0.0, 0.0)])];

        assert_eq!(detector.classify(&region, &candidate), ContactType::None);
    }

    #[test]
    fn failing_pairs_do_not_abort_classification() {
        let detector = ContactDetector::default();
        let region = vec![boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        let candidate = vec![
            ScriptedSolid::broken(),
            boxed([0.5, 0.5, 0.5], [1.5, 1.5, 1.5]),
        ];

        assert_eq!(
            detector.classify(&region, &candidate),
            ContactType::VolumetricCollision
        );
    }

    #[test]
    fn broken_faces_yield_no_evidence() {
        let detector = ContactDetector::default();
        let region = vec![ScriptedSolid::broken()];
        let candidate = vec![ScriptedSolid::touching(vec![DVec3::ZERO, DVec3::X])];

        assert_eq!(detector.classify(&region, &candidate), ContactType::None);
    }

    #[test]
    fn coarse_reject_skips_distant_candidates() {
        let detector = ContactDetector::default();
        let region_bounds = Aabb::new(DVec3::ZERO, DVec3::ONE);
        let region = vec![boxed([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        // Würde mit Scripted-Punkten Kontakt melden, liegt aber außerhalb der Marge
        let candidate = vec![ScriptedSolid::touching(vec![DVec3::ZERO, DVec3::X])];
        let far = Aabb::new(DVec3::splat(5.0), DVec3::splat(6.0));
        let near = Aabb::new(DVec3::splat(1.4), DVec3::splat(2.0));

        assert_eq!(
            detector.classify_bounded(&region_bounds, &region, &far, &candidate),
            ContactType::None
        );
        assert_eq!(
            detector.classify_bounded(&region_bounds, &region, &near, &candidate),
            ContactType::SurfaceContact
        );
    }

    #[test]
    fn contacts_with_skips_region_rooms_and_distant_entities() {
        let mut document = MemoryDocument::new();
        document.add_entity(Entity::new(1, "Raum 1", Some(crate::core::ROOM_CATEGORY)));
        document.add_entity(Entity::new(2, "Raum 2", Some(crate::core::ROOM_CATEGORY)));
        document.add_entity(Entity::new(10, "Wand", Some("OST_Walls")));
        document.add_entity(Entity::new(11, "Stütze", Some("OST_Columns")));
        document.add_entity(Entity::new(12, "Möbel", Some("OST_Furniture")));
        document.set_geometry(1, vec![boxed([0.0, 0.0, 0.0], [4.0, 4.0, 3.0])]);
        document.set_geometry(2, vec![boxed([4.0, 0.0, 0.0], [8.0, 4.0, 3.0])]);
        document.set_geometry(10, vec![boxed([-0.2, 0.0, 0.0], [0.0, 4.0, 3.0])]);
        document.set_geometry(11, vec![boxed([1.0, 1.0, 0.0], [1.5, 1.5, 3.0])]);
        document.set_geometry(12, vec![boxed([20.0, 20.0, 0.0], [21.0, 21.0, 1.0])]);

        let index = SpatialIndex::from_document(&document);
        let contacts = ContactDetector::default()
            .contacts_with(&document, 1, &index)
            .expect("Raumgeometrie lesbar");

        assert_eq!(contacts.get(&10), Some(&ContactType::SurfaceContact));
        assert_eq!(contacts.get(&11), Some(&ContactType::VolumetricCollision));
        assert!(!contacts.contains_key(&2));
        assert!(!contacts.contains_key(&12));
        assert_eq!(contacts.len(), 2);
    }
}
