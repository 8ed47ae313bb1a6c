//! Zentrale Konfiguration der Selektions-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{ContactSettings, DetailLevel};

// ── Kontakterkennung ────────────────────────────────────────────────

/// Toleranz für Volumen, Flächen und Projektionsabstände.
pub const CONTACT_TOLERANCE: f64 = ContactSettings::DEFAULT_TOLERANCE;
/// Vergrößerung des Raum-Hüllquaders pro Achse (Längeneinheiten).
pub const CONTACT_BBOX_MARGIN: f64 = ContactSettings::DEFAULT_BBOX_MARGIN;
/// Stichproben pro Parameterrichtung einer Fläche.
pub const CONTACT_FACE_SAMPLES: usize = ContactSettings::DEFAULT_FACE_SAMPLES;
/// Mindestanzahl naher Stichproben für Flächenkontakt.
pub const CONTACT_MIN_TOUCHING_POINTS: usize = ContactSettings::DEFAULT_MIN_TOUCHING_POINTS;

// ── Darstellung ─────────────────────────────────────────────────────

/// Maximale Länge gekürzter Parameterwerte in Filterlisten.
pub const SHORT_VALUE_MAX_CHARS: usize = 24;
/// Maximale Anzahl gepufferter Rückmeldungen.
pub const FEEDBACK_CAPACITY: usize = 50;

/// Verhalten, wenn die Geometrie eines gewählten Raums nicht lesbar ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomFailurePolicy {
    /// Gesamte Auflösung abbrechen
    #[default]
    Abort,
    /// Nur den Beitrag dieses Raums verwerfen
    Isolate,
}

/// Zustellung ausgelöster Handler auf dem privilegierten Thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Ein Platz pro Handler: weitere Auslösungen während der Wartezeit verfallen
    #[default]
    Coalesce,
    /// Jede Auslösung wird genau einmal ausgeführt
    Queued,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Wird als `select_more.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    // ── Kontakterkennung ────────────────────────────────────────
    /// Gemeinsame Toleranz (Volumen und Abstände)
    pub contact_tolerance: f64,
    /// Vergrößerung des Raum-Hüllquaders
    pub contact_bbox_margin: f64,
    /// Stichproben pro Parameterrichtung
    pub contact_face_samples: usize,
    /// Mindestanzahl naher Stichproben
    pub contact_min_touching_points: usize,
    /// Detailgrad der Geometrie
    #[serde(default)]
    pub contact_detail: DetailLevel,

    // ── Vorfilter ───────────────────────────────────────────────
    /// Verhalten bei nicht lesbarer Raumgeometrie
    #[serde(default)]
    pub room_failure_policy: RoomFailurePolicy,

    // ── Marshal ─────────────────────────────────────────────────
    /// Zustellmodus ausgelöster Handler
    #[serde(default)]
    pub delivery_mode: DeliveryMode,

    // ── Darstellung ─────────────────────────────────────────────
    /// Maximale Länge gekürzter Werte
    #[serde(default = "default_short_value_max_chars")]
    pub short_value_max_chars: usize,
    /// Maximale Anzahl gepufferter Rückmeldungen
    #[serde(default = "default_feedback_capacity")]
    pub feedback_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            contact_tolerance: CONTACT_TOLERANCE,
            contact_bbox_margin: CONTACT_BBOX_MARGIN,
            contact_face_samples: CONTACT_FACE_SAMPLES,
            contact_min_touching_points: CONTACT_MIN_TOUCHING_POINTS,
            contact_detail: DetailLevel::Fine,
            room_failure_policy: RoomFailurePolicy::Abort,
            delivery_mode: DeliveryMode::Coalesce,
            short_value_max_chars: SHORT_VALUE_MAX_CHARS,
            feedback_capacity: FEEDBACK_CAPACITY,
        }
    }
}

/// Serde-Default für `short_value_max_chars` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_short_value_max_chars() -> usize {
    SHORT_VALUE_MAX_CHARS
}

/// Serde-Default für `feedback_capacity`.
fn default_feedback_capacity() -> usize {
    FEEDBACK_CAPACITY
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("select-more"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("select_more.toml")
    }

    /// Parameter der Kontakterkennung.
    ///
    /// Weniger als zwei Stichproben pro Richtung ergeben kein Raster und
    /// werden auf zwei angehoben.
    pub fn contact_settings(&self) -> ContactSettings {
        ContactSettings {
            tolerance: self.contact_tolerance,
            bbox_margin: self.contact_bbox_margin,
            face_samples: self.contact_face_samples.max(2),
            min_touching_points: self.contact_min_touching_points,
            detail: self.contact_detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contact_settings() {
        let options = EngineOptions::default();

        assert_eq!(options.contact_settings(), ContactSettings::default());
        assert_eq!(options.room_failure_policy, RoomFailurePolicy::Abort);
        assert_eq!(options.delivery_mode, DeliveryMode::Coalesce);
    }

    #[test]
    fn toml_round_trip_keeps_all_values() {
        let options = EngineOptions {
            contact_tolerance: 0.01,
            room_failure_policy: RoomFailurePolicy::Isolate,
            delivery_mode: DeliveryMode::Queued,
            ..EngineOptions::default()
        };

        let text = toml::to_string_pretty(&options).expect("TOML-Serialisierung");
        let parsed: EngineOptions = toml::from_str(&text).expect("TOML-Deserialisierung");
        assert_eq!(parsed, options);
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let text = r#"
            contact_tolerance = 0.002
            contact_bbox_margin = 0.5
            contact_face_samples = 1
            contact_min_touching_points = 2
        "#;

        let parsed: EngineOptions = toml::from_str(text).expect("TOML-Deserialisierung");
        assert_eq!(parsed.short_value_max_chars, SHORT_VALUE_MAX_CHARS);
        assert_eq!(parsed.delivery_mode, DeliveryMode::Coalesce);
        assert_eq!(parsed.contact_settings().face_samples, 2);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("select_more_missing_options_test.toml");
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            EngineOptions::load_from_file(&path),
            EngineOptions::default()
        );
    }
}
