use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    BindingPose,
    ComparisonChart,
}

/// Referencia a una salida de visualización (la ruta, no la imagen).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationRef {
    pub kind: VisualizationKind,
    pub output_path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ligand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pose_index: Option<u32>,
}
