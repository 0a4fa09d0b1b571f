//! Modelo normalizado de resultados de docking.
use serde::{Deserialize, Serialize};

/// Formato textual del que se extrajeron las poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseFormat {
    /// Tabla de modos del log de Vina (`modo afinidad rmsd_lb rmsd_ub`).
    TabularLog,
    /// Líneas `REMARK VINA RESULT:` de un PDBQT; índices asignados en orden.
    StructuredRecord,
}

/// Una colocación candidata del ligando con su afinidad (kcal/mol).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Índice de la pose, empieza en 1.
    pub pose_index: u32,
    /// Más negativo = interacción predicha más fuerte.
    pub binding_affinity: f64,
}

impl Pose {
    pub fn new(pose_index: u32, binding_affinity: f64) -> Self {
        Self { pose_index, binding_affinity }
    }
}

/// Resultado de extraer un archivo de entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLigand {
    /// Derivado del nombre del archivo, nunca del contenido.
    pub ligand_name: String,
    /// Identificador original del input (ruta).
    pub source: String,
    pub format: PoseFormat,
    pub poses: Vec<Pose>,
}

/// Metadatos resumidos de un ligando parseado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigandInfo {
    pub ligand_name: String,
    pub source: String,
    pub pose_count: usize,
}

impl ParsedLigand {
    pub fn new(ligand_name: impl Into<String>, source: impl Into<String>, format: PoseFormat, poses: Vec<Pose>) -> Self {
        Self { ligand_name: ligand_name.into(),
               source: source.into(),
               format,
               poses }
    }

    /// Un `ParsedLigand` sin poses no es rankeable.
    pub fn is_valid(&self) -> bool {
        !self.poses.is_empty()
    }

    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    /// Pares (índice, afinidad) en el orden original del archivo.
    pub fn binding_scores(&self) -> Vec<(u32, f64)> {
        self.poses.iter().map(|p| (p.pose_index, p.binding_affinity)).collect()
    }

    pub fn summary(&self) -> LigandInfo {
        LigandInfo { ligand_name: self.ligand_name.clone(),
                     source: self.source.clone(),
                     pose_count: self.poses.len() }
    }
}

/// Resumen competitivo de un ligando: su mejor pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLigand {
    pub ligand_name: String,
    pub source: String,
    pub best_affinity: f64,
    pub best_pose_index: u32,
    pub total_pose_count: usize,
}
