//! Parser de salidas de AutoDock Vina.
//!
//! Sólo se aceptan dos layouts y en este orden:
//! 1. Tabla de modos del log (`   1   -8.5   0.000   0.000`).
//! 2. Registros `REMARK VINA RESULT: <afinidad>` (PDBQT), sólo si (1) no
//!    produjo ninguna pose.
//!
//! El nombre del ligando sale siempre del nombre del archivo.
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::InputError;
use crate::pose::{ParsedLigand, Pose, PoseFormat};

/// Extensiones aceptadas (comparación sin distinguir mayúsculas).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdbqt", "log"];

static TABULAR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+(\d+)\s+([-\d.]+)\s+([-\d.]+)\s+([-\d.]+)").expect("tabular pattern"));

static VINA_RESULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"REMARK VINA RESULT:\s+([-\d.]+)").expect("remark pattern"));

#[derive(Debug, Clone, Default)]
pub struct DockingParser;

impl DockingParser {
    pub fn new() -> Self {
        Self
    }

    /// Chequeo de extensión. No toca el sistema de archivos.
    pub fn validate_format(&self, identifier: &str) -> bool {
        Path::new(identifier).extension()
                             .and_then(|e| e.to_str())
                             .map(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
                             .unwrap_or(false)
    }

    /// Nombre base sin extensión.
    pub fn ligand_name(identifier: &str) -> String {
        Path::new(identifier).file_stem()
                             .and_then(|s| s.to_str())
                             .map(str::to_string)
                             .unwrap_or_else(|| identifier.to_string())
    }

    /// Valida la extensión, lee el archivo y extrae las poses.
    pub fn parse(&self, identifier: &str) -> Result<ParsedLigand, InputError> {
        if !self.validate_format(identifier) {
            return Err(InputError::UnsupportedExtension(identifier.to_string()));
        }
        let content = std::fs::read_to_string(identifier).map_err(|e| match e.kind() {
                                                               ErrorKind::NotFound => {
                                                                   InputError::NotFound(identifier.to_string())
                                                               }
                                                               _ => InputError::Unreadable { path: identifier.to_string(),
                                                                                             reason: e.to_string() },
                                                           })?;
        self.parse_content(identifier, &content)
    }

    /// Extrae poses de un contenido ya cargado en memoria.
    pub fn parse_content(&self, identifier: &str, content: &str) -> Result<ParsedLigand, InputError> {
        if !self.validate_format(identifier) {
            return Err(InputError::UnsupportedExtension(identifier.to_string()));
        }
        let (format, poses) = match extract_tabular(content) {
            poses if !poses.is_empty() => (PoseFormat::TabularLog, poses),
            _ => (PoseFormat::StructuredRecord, extract_structured(content)),
        };
        if poses.is_empty() {
            return Err(InputError::NoPoses(identifier.to_string()));
        }
        debug!("parsed {} pose(s) from {} ({:?})", poses.len(), identifier, format);
        Ok(ParsedLigand::new(Self::ligand_name(identifier), identifier, format, poses))
    }
}

fn extract_tabular(content: &str) -> Vec<Pose> {
    content.lines()
           .filter_map(|line| TABULAR_LINE.captures(line))
           .filter_map(|caps| {
               let index = caps[1].parse::<u32>().ok()?;
               let affinity = caps[2].parse::<f64>().ok()?;
               Some(Pose::new(index, affinity))
           })
           .collect()
}

fn extract_structured(content: &str) -> Vec<Pose> {
    let mut poses = Vec::new();
    for line in content.lines() {
        let Some(caps) = VINA_RESULT.captures(line) else { continue };
        // Tokens como "-" o "1.2.3" no son números; se ignoran.
        if let Ok(affinity) = caps[1].parse::<f64>() {
            poses.push(Pose::new(poses.len() as u32 + 1, affinity));
        }
    }
    poses
}
