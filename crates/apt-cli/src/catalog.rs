//! Facility catalog loading.
//!
//! The engine assumes well-formed facilities; this is where malformed
//! records are rejected before they reach it.

use apt_core::geometry::normalize_heading;
use apt_core::{Airport, Position};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {entity} '{name}': {reason}")]
    Invalid {
        entity: &'static str,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    airports: Vec<Airport>,
}

/// Read, validate and prepare airports from a JSON catalog file.
pub fn load_catalog<P: AsRef<Path>>(
    path: P,
    glideslope_deg: Option<f64>,
) -> Result<Vec<Airport>, CatalogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Loading catalog");
    parse_catalog(&text, glideslope_deg)
}

/// Parse a JSON catalog, validate every airport and generate runway approaches.
pub fn parse_catalog(json: &str, glideslope_deg: Option<f64>) -> Result<Vec<Airport>, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    let mut airports = Vec::with_capacity(file.airports.len());

    for mut airport in file.airports {
        validate_airport(&airport)?;
        for parking in &mut airport.parkings {
            parking.heading_deg = normalize_heading(parking.heading_deg);
        }
        airport.runways = airport
            .runways
            .into_iter()
            .map(|mut runway| {
                runway.heading_deg = normalize_heading(runway.heading_deg);
                runway.with_approach(glideslope_deg)
            })
            .collect();
        airports.push(airport);
    }

    tracing::info!(count = airports.len(), "Loaded airport catalog");
    Ok(airports)
}

pub fn validate_airport(airport: &Airport) -> Result<(), CatalogError> {
    let invalid = |entity: &'static str, name: &str, reason: &str| CatalogError::Invalid {
        entity,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    require_name("airport", &airport.name)?;
    if airport.code.trim().is_empty() {
        return Err(invalid("airport", &airport.name, "empty code"));
    }
    check_position("airport", &airport.name, &airport.center)?;
    if !(airport.radius_m.is_finite() && airport.radius_m > 0.0) {
        return Err(invalid("airport", &airport.name, "radius must be positive"));
    }

    for runway in &airport.runways {
        require_name("runway", &runway.name)?;
        check_position("runway", &runway.name, &runway.threshold)?;
        if !runway.heading_deg.is_finite() {
            return Err(invalid("runway", &runway.name, "heading is not finite"));
        }
        if !(runway.length_m.is_finite() && runway.length_m > 0.0) {
            return Err(invalid("runway", &runway.name, "length must be positive"));
        }
        if !(runway.width_m.is_finite() && runway.width_m >= 0.0) {
            return Err(invalid("runway", &runway.name, "width must not be negative"));
        }
    }

    for parking in &airport.parkings {
        require_name("parking", &parking.name)?;
        check_position("parking", &parking.name, &parking.position)?;
        if !parking.heading_deg.is_finite() {
            return Err(invalid("parking", &parking.name, "heading is not finite"));
        }
    }

    for segment in &airport.taxiways {
        require_name("taxiway", &segment.name)?;
        check_position("taxiway", &segment.name, &segment.start)?;
        check_position("taxiway", &segment.name, &segment.end)?;
        if !segment.width_m.is_finite() {
            return Err(invalid("taxiway", &segment.name, "width is not finite"));
        }
    }

    Ok(())
}

fn require_name(entity: &'static str, name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Invalid {
            entity,
            name: name.to_string(),
            reason: "empty name".to_string(),
        });
    }
    Ok(())
}

fn check_position(entity: &'static str, name: &str, position: &Position) -> Result<(), CatalogError> {
    if position.x.is_finite() && position.y.is_finite() && position.z.is_finite() {
        return Ok(());
    }
    Err(CatalogError::Invalid {
        entity,
        name: name.to_string(),
        reason: format!("non-finite coordinate {position:?}"),
    })
}
