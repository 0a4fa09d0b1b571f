//! Visualización de poses (sólo planificación de salidas).
//!
//! El render real de imágenes queda fuera de alcance; `PlaceholderVisualizer`
//! produce nombres de archivo deterministas y valida que la fuente de la pose
//! siga existiendo.
use std::path::{Path, PathBuf};

use dock_core::{VisualizationKind, VisualizationRef};
use dock_domain::RankedLigand;
use log::debug;

use crate::error::VisualizationError;

pub trait Visualizer {
    /// Imagen de la mejor pose de un ligando.
    fn render_binding_pose(&self, ligand: &RankedLigand) -> Result<VisualizationRef, VisualizationError>;
    /// Gráfico comparativo de afinidades sobre el ranking completo.
    fn render_comparison_chart(&self, ranked: &[RankedLigand]) -> Result<VisualizationRef, VisualizationError>;
}

#[derive(Debug, Clone)]
pub struct PlaceholderVisualizer {
    output_dir: PathBuf,
}

impl PlaceholderVisualizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn output_path(&self, file_name: &str) -> String {
        self.output_dir.join(file_name).to_string_lossy().into_owned()
    }
}

/// `<nombre_saneado>_pose<k>_<tipo>.png`
pub fn binding_pose_filename(ligand_name: &str, pose_index: u32) -> String {
    let safe: String = ligand_name.chars()
                                  .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
                                  .collect();
    format!("{safe}_pose{pose_index}_binding_pose.png")
}

pub const COMPARISON_CHART_FILENAME: &str = "ligand_comparison_chart.png";

impl Visualizer for PlaceholderVisualizer {
    fn render_binding_pose(&self, ligand: &RankedLigand) -> Result<VisualizationRef, VisualizationError> {
        if !Path::new(&ligand.source).exists() {
            return Err(VisualizationError::PoseFileMissing(ligand.source.clone()));
        }
        let path = self.output_path(&binding_pose_filename(&ligand.ligand_name, ligand.best_pose_index));
        debug!("planned binding pose image {} for {}", path, ligand.ligand_name);
        Ok(VisualizationRef { kind: VisualizationKind::BindingPose,
                              output_path: path,
                              ligand_name: Some(ligand.ligand_name.clone()),
                              pose_index: Some(ligand.best_pose_index) })
    }

    fn render_comparison_chart(&self, ranked: &[RankedLigand]) -> Result<VisualizationRef, VisualizationError> {
        if ranked.is_empty() {
            return Err(VisualizationError::NothingToRender);
        }
        Ok(VisualizationRef { kind: VisualizationKind::ComparisonChart,
                              output_path: self.output_path(COMPARISON_CHART_FILENAME),
                              ligand_name: None,
                              pose_index: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(source: &str) -> RankedLigand {
        RankedLigand { ligand_name: "my ligand/1".into(),
                       source: source.into(),
                       best_affinity: -8.0,
                       best_pose_index: 2,
                       total_pose_count: 3 }
    }

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(binding_pose_filename("my ligand/1", 2), "my_ligand_1_pose2_binding_pose.png");
    }

    #[test]
    fn missing_source_is_reported() {
        let v = PlaceholderVisualizer::new("out");
        let err = v.render_binding_pose(&ranked("/nope/x.log")).unwrap_err();
        assert_eq!(err, VisualizationError::PoseFileMissing("/nope/x.log".into()));
    }

    #[test]
    fn existing_source_yields_reference() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let v = PlaceholderVisualizer::new("out/viz");
        let r = v.render_binding_pose(&ranked(&file.path().to_string_lossy())).unwrap();
        assert_eq!(r.kind, VisualizationKind::BindingPose);
        assert!(r.output_path.ends_with("my_ligand_1_pose2_binding_pose.png"));
        assert_eq!(r.pose_index, Some(2));
    }

    #[test]
    fn comparison_chart_needs_ligands() {
        let v = PlaceholderVisualizer::new("out");
        assert_eq!(v.render_comparison_chart(&[]).unwrap_err(), VisualizationError::NothingToRender);
        let chart = v.render_comparison_chart(&[ranked("x")]).unwrap();
        assert!(chart.output_path.ends_with(COMPARISON_CHART_FILENAME));
    }
}
