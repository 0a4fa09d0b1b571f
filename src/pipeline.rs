//! Orquestador del análisis de docking.
//!
//! Ejecuta las etapas en orden fijo sobre un `AnalysisRun`:
//! validación → parsing → ranking → visualización → reporte → atestación.
//! Parsing y ranking son obligatorios: cualquier error ahí lleva el run a
//! `failed`. Visualización, reporte y atestación sólo registran sus errores.

use dock_adapters::{AttestationError, AttestationPayload, AttestationSubmitter, DryRunSubmitter, MarkdownReportComposer,
                    PlaceholderVisualizer, ReportComposer, ReportInput, ReportMetadata, Visualizer};
use dock_core::constants::{DEFAULT_TOP_N, PIPELINE_VERSION};
use dock_core::hashing::hash_inputs_detailed;
use dock_core::{hash_report, AnalysisRun, AttestationRecord, Stage};
use dock_domain::{DockingParser, LigandRanker};
use log::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::result::AnalysisResult;

pub const NO_INPUT_MESSAGE: &str = "No docking input provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub top_n: usize,
    pub attestation_enabled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N,
               attestation_enabled: true }
    }
}

pub struct DockingAnalysisPipeline {
    parser: DockingParser,
    ranker: LigandRanker,
    visualizer: Box<dyn Visualizer>,
    composer: Box<dyn ReportComposer>,
    submitter: Box<dyn AttestationSubmitter>,
    options: PipelineOptions,
}

impl DockingAnalysisPipeline {
    pub fn new(visualizer: Box<dyn Visualizer>,
               composer: Box<dyn ReportComposer>,
               submitter: Box<dyn AttestationSubmitter>,
               options: PipelineOptions)
               -> Self {
        Self { parser: DockingParser::new(),
               ranker: LigandRanker::new(),
               visualizer,
               composer,
               submitter,
               options }
    }

    /// Colaboradores por defecto construidos desde la configuración.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Box::new(PlaceholderVisualizer::new(config.visualization_dir.clone())),
                  Box::new(MarkdownReportComposer::new()),
                  Box::new(DryRunSubmitter::new(config.network.clone())),
                  PipelineOptions { top_n: config.top_n,
                                    attestation_enabled: config.attestation_enabled })
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Ejecuta un run nuevo sobre `inputs`.
    pub fn run<S: AsRef<str>>(&self, inputs: &[S]) -> AnalysisResult {
        self.run_with(AnalysisRun::new(), inputs)
    }

    /// Ejecuta sobre un run recién creado (identidad fija en tests).
    pub fn run_with<S: AsRef<str>>(&self, mut run: AnalysisRun, inputs: &[S]) -> AnalysisResult {
        let uploaded: Vec<String> = inputs.iter().map(|s| s.as_ref().to_string()).collect();
        info!("run {}: starting analysis over {} input(s)", run.run_id(), uploaded.len());
        self.execute(&mut run, &uploaded);
        AnalysisResult::from_run(&run, &uploaded)
    }

    fn execute(&self, run: &mut AnalysisRun, inputs: &[String]) {
        if !self.validate_inputs(run, inputs) {
            error!("run {}: no acceptable input; {} error(s)", run.run_id(), run.validation_errors().len());
            return;
        }
        if !self.parse_inputs(run) || !self.rank(run) {
            self.fail(run);
            return;
        }
        self.visualize(run);
        if !run.transition(Stage::Reporting) {
            run.add_validation_error(format!("Cannot enter reporting from {}", run.stage()));
        } else {
            self.compose_report(run);
            self.attest(run);
        }
        if !run.transition(Stage::Complete) {
            run.add_validation_error(format!("Cannot complete analysis from stage {}", run.stage()));
            self.fail(run);
            return;
        }
        info!("run {}: complete ({} ligands, {} warning(s))",
              run.run_id(),
              run.ranked_ligands().len(),
              run.validation_errors().len());
    }

    fn fail(&self, run: &mut AnalysisRun) {
        let from = run.stage();
        if !run.transition(Stage::Failed) {
            warn!("run {}: cannot mark failed from {}", run.run_id(), from);
        }
        error!("run {}: failed at {} with {} error(s)", run.run_id(), from, run.validation_errors().len());
    }

    /// Acepta o rechaza cada input antes de leer nada. `false` si no hay
    /// inputs aceptados; el run queda en `initialized`.
    fn validate_inputs(&self, run: &mut AnalysisRun, inputs: &[String]) -> bool {
        if inputs.is_empty() {
            run.add_validation_error(NO_INPUT_MESSAGE);
            return false;
        }
        for input in inputs {
            if !self.parser.validate_format(input) {
                run.add_validation_error(format!("Unsupported file format: {input}"));
                continue;
            }
            if let Err(e) = run.add_raw_input(input.clone()) {
                run.add_validation_error(e.to_string());
            }
        }
        !run.raw_inputs().is_empty()
    }

    fn parse_inputs(&self, run: &mut AnalysisRun) -> bool {
        if !run.transition(Stage::Parsing) {
            run.add_validation_error(format!("Cannot start parsing from stage {}", run.stage()));
            return false;
        }
        let accepted = run.raw_inputs().to_vec();
        for input in &accepted {
            match self.parser.parse(input) {
                Ok(parsed) => {
                    debug!("run {}: parsed {} ({} poses)", run.run_id(), parsed.ligand_name, parsed.pose_count());
                    if let Err(e) = run.add_parsed_result(parsed) {
                        run.add_validation_error(e.to_string());
                    }
                }
                Err(e) => {
                    warn!("run {}: {}", run.run_id(), e);
                    run.add_validation_error(e.to_string());
                }
            }
        }
        if run.has_errors() {
            return false;
        }
        run.transition(Stage::Parsed)
    }

    fn rank(&self, run: &mut AnalysisRun) -> bool {
        if !run.transition(Stage::Ranking) {
            run.add_validation_error(format!("Cannot start ranking from stage {}", run.stage()));
            return false;
        }
        let outcome = self.ranker.rank(run.parsed_results());
        for dropped in &outcome.dropped {
            warn!("run {}: {}", run.run_id(), dropped.message());
            run.add_validation_error(dropped.message());
        }
        if let Some(err) = &outcome.error {
            run.add_validation_error(err.to_string());
            return false;
        }
        match run.set_ranked_ligands(outcome.ranked) {
            Ok(()) => true,
            Err(e) => {
                run.add_validation_error(e.to_string());
                false
            }
        }
    }

    /// Imágenes de pose para el top-N y gráfico comparativo de todo el ranking.
    /// Siempre termina en `visualized` para que el reporte sea alcanzable.
    fn visualize(&self, run: &mut AnalysisRun) {
        if !run.transition(Stage::Visualizing) {
            run.add_validation_error(format!("Skipping visualization from stage {}", run.stage()));
            return;
        }
        let ranked = run.ranked_ligands().to_vec();
        let mut rendered = Vec::new();
        for ligand in ranked.iter().take(self.options.top_n) {
            match self.visualizer.render_binding_pose(ligand) {
                Ok(reference) => rendered.push(reference),
                Err(e) => {
                    warn!("run {}: visualization for {} failed: {}", run.run_id(), ligand.ligand_name, e);
                    run.add_validation_error(e.to_string());
                }
            }
        }
        match self.visualizer.render_comparison_chart(&ranked) {
            Ok(reference) => rendered.push(reference),
            Err(e) => run.add_validation_error(format!("Comparison chart failed: {e}")),
        }
        for reference in rendered {
            if let Err(e) = run.add_visualization(reference) {
                run.add_validation_error(e.to_string());
            }
        }
        if !run.transition(Stage::Visualized) {
            warn!("run {}: cannot leave visualizing", run.run_id());
        }
    }

    fn compose_report(&self, run: &mut AnalysisRun) {
        let metadata = ReportMetadata { total_ligands: run.ranked_ligands().len(),
                                        input_count: run.raw_inputs().len(),
                                        pipeline_version: PIPELINE_VERSION.to_string() };
        let input = ReportInput { ranked: run.ranked_ligands(),
                                  interactions: run.interactions(),
                                  visualizations: run.visualization_refs(),
                                  metadata: &metadata };
        let composed = self.composer.compose(&input);
        match composed {
            Ok(text) => {
                if let Err(e) = run.set_report(text) {
                    run.add_validation_error(e.to_string());
                }
            }
            Err(e) => {
                warn!("run {}: report generation failed: {}", run.run_id(), e);
                run.add_validation_error(format!("Report generation failed: {e}"));
            }
        }
    }

    /// Registro opcional del par de hashes. Nunca falla el run.
    fn attest(&self, run: &mut AnalysisRun) {
        if !self.options.attestation_enabled {
            debug!("run {}: attestation disabled", run.run_id());
            return;
        }
        let Some(report) = run.report_text().map(str::to_string) else {
            warn!("run {}: no report, skipping attestation", run.run_id());
            run.add_validation_error(AttestationError::NoReport.to_string());
            return;
        };
        if !run.transition(Stage::Attesting) {
            run.add_validation_error(AttestationError::StateRejected.to_string());
            return;
        }

        let inputs = hash_inputs_detailed(run.raw_inputs());
        for missing in &inputs.unreadable {
            run.add_validation_error(format!("Input unreadable at hash time, identifier used instead: {missing}"));
        }
        let payload = AttestationPayload { analysis_id: run.analysis_id(),
                                           input_hash: inputs.digest,
                                           report_hash: hash_report(&report) };

        match self.submitter.submit(&payload) {
            Ok(outcome) => {
                let record = AttestationRecord { analysis_id: payload.analysis_id,
                                                 input_hash: payload.input_hash,
                                                 report_hash: payload.report_hash,
                                                 transaction_ref: outcome.transaction_ref,
                                                 network: outcome.network };
                match run.set_attestation(record) {
                    Ok(()) => {
                        if !run.transition(Stage::Attested) {
                            warn!("run {}: cannot mark attested from {}", run.run_id(), run.stage());
                        }
                    }
                    Err(e) => run.add_validation_error(e.to_string()),
                }
            }
            Err(e) => {
                warn!("run {}: attestation failed: {}", run.run_id(), e);
                run.add_validation_error(format!("Attestation failed: {e}"));
            }
        }
    }
}
