//! Geometrie-Primitive: Hüllquader, Flächen und Volumenkörper.
//!
//! `Solid` und `Face` sind Host-Schnittstellen. `BoxSolid` ist die
//! achsenparallele Referenz-Implementierung des `MemoryDocument`.

use std::any::Any;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Fehler einer einzelnen Geometrie-Operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Körper ohne gültiges Volumen
    #[error("Degenerierter Körper: {0}")]
    Degenerate(String),
    /// Boolesche Verschneidung fehlgeschlagen
    #[error("Boolesche Operation fehlgeschlagen: {0}")]
    BooleanOperation(String),
    /// Flächenpunkt konnte nicht ausgewertet werden
    #[error("Auswertung bei (u={u}, v={v}) fehlgeschlagen")]
    Evaluation { u: f64, v: f64 },
    /// Geometrie nicht verfügbar
    #[error("Geometrie nicht verfügbar: {0}")]
    Unavailable(String),
}

/// Achsenparalleler Hüllquader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimale Ecke
    pub min: DVec3,
    /// Maximale Ecke
    pub max: DVec3,
}

impl Aabb {
    /// Erstellt einen Quader aus zwei beliebigen Ecken.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Vergrößert den Quader um `margin` pro Achse und Richtung.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Prüft auf Überschneidung (inkl. Berührung).
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Kleinster Quader, der beide umschließt.
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Mittelpunkt.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Halbe Raumdiagonale.
    pub fn half_diagonal(&self) -> f64 {
        (self.max - self.min).length() * 0.5
    }

    /// Umschließender Quader einer Menge von Quadern.
    pub fn enclosing(boxes: impl IntoIterator<Item = Aabb>) -> Option<Aabb> {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

/// Parameterbereich einer Fläche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Minimale (u, v)
    pub min: DVec2,
    /// Maximale (u, v)
    pub max: DVec2,
}

impl UvRect {
    /// Mittelpunkt des Parameterbereichs.
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

/// Berandete Fläche eines Volumenkörpers.
pub trait Face: std::fmt::Debug + Send + Sync {
    /// Flächeninhalt.
    fn area(&self) -> f64;

    /// Parametrischer Hüllbereich.
    fn bounds_uv(&self) -> Result<UvRect, GeometryError>;

    /// Wertet den Flächenpunkt bei (u, v) aus.
    fn evaluate(&self, uv: DVec2) -> Result<DVec3, GeometryError>;

    /// Projiziert einen Punkt auf die Fläche und liefert den Abstand.
    /// `None`, wenn der Fußpunkt außerhalb der Fläche liegt.
    fn project(&self, point: DVec3) -> Option<f64>;
}

/// Volumenkörper einer Entität.
pub trait Solid: std::fmt::Debug + Send + Sync {
    /// Volumen.
    fn volume(&self) -> f64;

    /// Alle Begrenzungsflächen.
    fn faces(&self) -> Vec<&dyn Face>;

    /// Achsenparalleler Hüllquader.
    fn bounding_box(&self) -> Aabb;

    /// Boolesche Schnittmenge; `None` bei leerem Schnitt.
    fn intersect(&self, other: &dyn Solid) -> Result<Option<Box<dyn Solid>>, GeometryError>;

    /// Zugriff für Downcasts im Geometriekern.
    fn as_any(&self) -> &dyn Any;
}

/// Rechteckige ebene Fläche mit orthonormalen Achsen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarFace {
    origin: DVec3,
    u_axis: DVec3,
    v_axis: DVec3,
    u_length: f64,
    v_length: f64,
}

impl PlanarFace {
    /// Kantentoleranz beim Test, ob ein Fußpunkt auf der Fläche liegt.
    const EDGE_TOLERANCE: f64 = 1e-9;

    /// Erstellt eine Fläche; `u_axis` und `v_axis` werden normalisiert.
    pub fn new(
        origin: DVec3,
        u_axis: DVec3,
        v_axis: DVec3,
        u_length: f64,
        v_length: f64,
    ) -> Self {
        Self {
            origin,
            u_axis: u_axis.normalize_or_zero(),
            v_axis: v_axis.normalize_or_zero(),
            u_length,
            v_length,
        }
    }

    fn normal(&self) -> DVec3 {
        self.u_axis.cross(self.v_axis).normalize_or_zero()
    }
}

impl Face for PlanarFace {
    fn area(&self) -> f64 {
        self.u_length * self.v_length
    }

    fn bounds_uv(&self) -> Result<UvRect, GeometryError> {
        Ok(UvRect {
            min: DVec2::ZERO,
            max: DVec2::new(self.u_length, self.v_length),
        })
    }

    fn evaluate(&self, uv: DVec2) -> Result<DVec3, GeometryError> {
        if !uv.is_finite() {
            return Err(GeometryError::Evaluation { u: uv.x, v: uv.y });
        }
        Ok(self.origin + self.u_axis * uv.x + self.v_axis * uv.y)
    }

    fn project(&self, point: DVec3) -> Option<f64> {
        let offset = point - self.origin;
        let u = offset.dot(self.u_axis);
        let v = offset.dot(self.v_axis);
        let tol = Self::EDGE_TOLERANCE;
        if u < -tol || v < -tol || u > self.u_length + tol || v > self.v_length + tol {
            return None;
        }
        Some(offset.dot(self.normal()).abs())
    }
}

/// Achsenparalleler Quader als Volumenkörper.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSolid {
    bounds: Aabb,
    faces: [PlanarFace; 6],
}

impl BoxSolid {
    /// Erstellt einen Quader aus zwei Ecken.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        let bounds = Aabb::new(a, b);
        let min = bounds.min;
        let size = bounds.max - bounds.min;

        let faces = [
            PlanarFace::new(min, DVec3::Y, DVec3::Z, size.y, size.z),
            PlanarFace::new(min + DVec3::X * size.x, DVec3::Y, DVec3::Z, size.y, size.z),
            PlanarFace::new(min, DVec3::X, DVec3::Z, size.x, size.z),
            PlanarFace::new(min + DVec3::Y * size.y, DVec3::X, DVec3::Z, size.x, size.z),
            PlanarFace::new(min, DVec3::X, DVec3::Y, size.x, size.y),
            PlanarFace::new(min + DVec3::Z * size.z, DVec3::X, DVec3::Y, size.x, size.y),
        ];

        Self { bounds, faces }
    }

    /// Hüllquader des Körpers.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl Solid for BoxSolid {
    fn volume(&self) -> f64 {
        let size = self.bounds.max - self.bounds.min;
        size.x * size.y * size.z
    }

    fn faces(&self) -> Vec<&dyn Face> {
        self.faces.iter().map(|face| face as &dyn Face).collect()
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn intersect(&self, other: &dyn Solid) -> Result<Option<Box<dyn Solid>>, GeometryError> {
        let Some(other) = other.as_any().downcast_ref::<BoxSolid>() else {
            return Err(GeometryError::BooleanOperation(
                "Verschneidung nur zwischen Quadern unterstützt".to_string(),
            ));
        };

        let lo = self.bounds.min.max(other.bounds.min);
        let hi = self.bounds.max.min(other.bounds.max);
        if hi.cmple(lo).any() {
            return Ok(None);
        }
        Ok(Some(Box::new(BoxSolid::new(lo, hi))))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> BoxSolid {
        BoxSolid::new(DVec3::ZERO, DVec3::ONE)
    }

    #[test]
    fn box_has_six_faces_covering_its_surface() {
        let solid = BoxSolid::new(DVec3::ZERO, DVec3::new(2.0, 3.0, 4.0));

        assert_relative_eq!(solid.volume(), 24.0);
        let area: f64 = solid.faces().iter().map(|f| f.area()).sum();
        assert_relative_eq!(area, 2.0 * (6.0 + 8.0 + 12.0));
    }

    #[test]
    fn overlapping_boxes_intersect_with_overlap_volume() {
        let a = unit_box();
        let b = BoxSolid::new(DVec3::new(0.5, 0.5, 0.5), DVec3::new(2.0, 2.0, 2.0));

        let cut = a
            .intersect(&b)
            .expect("Quader-Verschneidung")
            .expect("Schnitt erwartet");
        assert_relative_eq!(cut.volume(), 0.125);
    }

    #[test]
    fn touching_boxes_have_empty_intersection() {
        let a = unit_box();
        let b = BoxSolid::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0));

        assert!(a.intersect(&b).expect("Quader-Verschneidung").is_none());
        assert!(a.bounding_box().intersects(&b.bounding_box()));
    }

    #[test]
    fn projection_outside_face_returns_none() {
        let face = PlanarFace::new(DVec3::ZERO, DVec3::X, DVec3::Y, 1.0, 1.0);

        let inside = face
            .project(DVec3::new(0.5, 0.5, 0.25))
            .expect("Fußpunkt auf Fläche");
        assert_relative_eq!(inside, 0.25);
        assert!(face.project(DVec3::new(1.5, 0.5, 0.0)).is_none());
    }

    #[test]
    fn evaluate_maps_uv_to_world() {
        let face = PlanarFace::new(DVec3::new(1.0, 0.0, 0.0), DVec3::Y, DVec3::Z, 2.0, 3.0);
        let point = face.evaluate(DVec2::new(1.0, 2.0)).expect("Auswertung");

        assert_relative_eq!(point.x, 1.0);
        assert_relative_eq!(point.y, 1.0);
        assert_relative_eq!(point.z, 2.0);
        assert!(face.evaluate(DVec2::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn aabb_expansion_and_enclosing() {
        let a = Aabb::new(DVec3::ONE, DVec3::ZERO);
        assert_eq!(a.min, DVec3::ZERO);

        let far = Aabb::new(DVec3::splat(1.4), DVec3::splat(2.0));
        assert!(!a.intersects(&far));
        assert!(a.expanded(0.5).intersects(&far));

        let all = Aabb::enclosing([a, far]).expect("nicht leer");
        assert_eq!(all.max, DVec3::splat(2.0));
        assert!(Aabb::enclosing(Vec::new()).is_none());
    }
}
