//! Composición del reporte científico.
//!
//! `MarkdownReportComposer` no incluye timestamps ni datos no deterministas:
//! el mismo ranking produce siempre el mismo texto y, por lo tanto, el mismo
//! `report_hash`.
use std::fmt::Write;

use dock_core::{InteractionMap, VisualizationKind, VisualizationRef};
use dock_domain::RankedLigand;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_ligands: usize,
    pub input_count: usize,
    pub pipeline_version: String,
}

/// Todo lo que el compositor recibe del run.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub ranked: &'a [RankedLigand],
    pub interactions: &'a InteractionMap,
    pub visualizations: &'a [VisualizationRef],
    pub metadata: &'a ReportMetadata,
}

pub trait ReportComposer {
    fn compose(&self, input: &ReportInput<'_>) -> Result<String, ReportError>;
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownReportComposer;

impl MarkdownReportComposer {
    pub fn new() -> Self {
        Self
    }

    fn write_report(&self, input: &ReportInput<'_>, out: &mut String) -> std::fmt::Result {
        let top = &input.ranked[0];
        writeln!(out, "# Molecular Docking Analysis Report")?;
        writeln!(out)?;
        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out,
                 "{} ligand(s) from {} input file(s) were ranked by predicted binding affinity.",
                 input.metadata.total_ligands, input.metadata.input_count)?;
        writeln!(out,
                 "The strongest predicted binder is **{}** at {:.2} kcal/mol (pose {}).",
                 top.ligand_name, top.best_affinity, top.best_pose_index)?;
        writeln!(out)?;

        writeln!(out, "## Ranking")?;
        writeln!(out)?;
        writeln!(out, "| Rank | Ligand | Best affinity (kcal/mol) | Best pose | Poses |")?;
        writeln!(out, "|---:|---|---:|---:|---:|")?;
        for (i, r) in input.ranked.iter().enumerate() {
            writeln!(out,
                     "| {} | {} | {:.2} | {} | {} |",
                     i + 1,
                     r.ligand_name,
                     r.best_affinity,
                     r.best_pose_index,
                     r.total_pose_count)?;
        }
        writeln!(out)?;

        writeln!(out, "## Interactions")?;
        writeln!(out)?;
        if input.interactions.is_empty() {
            writeln!(out, "Interaction analysis was not performed for this run.")?;
        } else {
            for (ligand, profile) in input.interactions {
                writeln!(out, "- {ligand}: {profile}")?;
            }
        }
        writeln!(out)?;

        if !input.visualizations.is_empty() {
            writeln!(out, "## Visualizations")?;
            writeln!(out)?;
            for v in input.visualizations {
                let label = match (v.kind, &v.ligand_name) {
                    (VisualizationKind::BindingPose, Some(name)) => format!("Binding pose of {name}"),
                    (VisualizationKind::BindingPose, None) => "Binding pose".to_string(),
                    (VisualizationKind::ComparisonChart, _) => "Affinity comparison chart".to_string(),
                };
                writeln!(out, "- {label}: `{}`", v.output_path)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## Methods")?;
        writeln!(out)?;
        writeln!(out,
                 "Poses were parsed from AutoDock Vina output. Each ligand is represented by its minimum-energy pose \
                  (ties resolved by pose order) and ligands are sorted ascending by that score ({}).",
                 input.metadata.pipeline_version)?;
        writeln!(out)?;
        writeln!(out,
                 "_Docking scores are computational predictions and require experimental validation._")?;
        Ok(())
    }
}

impl ReportComposer for MarkdownReportComposer {
    fn compose(&self, input: &ReportInput<'_>) -> Result<String, ReportError> {
        if input.ranked.is_empty() {
            return Err(ReportError::EmptyRanking);
        }
        let mut out = String::new();
        self.write_report(input, &mut out)
            .map_err(|e| ReportError::Compose(e.to_string()))?;
        Ok(out)
    }
}
