//! 解析ドキュメントの組み立てとJSON出力。
//!
//! 出力は { landmarks, metrics, calibration } の3キー。
//! landmarks は検出器の出力をそのまま保持し、検出失敗ビューは null。

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calibration::CalibrationRecord;
use crate::metrics::MetricsReport;
use crate::pose::ViewSet;

pub const ANALYSIS_FILE_NAME: &str = "analysis.json";

/// 1回の解析の出力ドキュメント
#[derive(Debug, Serialize)]
pub struct AnalysisDocument<'a> {
    pub landmarks: &'a ViewSet,
    pub metrics: &'a MetricsReport,
    pub calibration: &'a CalibrationRecord,
}

impl AnalysisDocument<'_> {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// output_dir/analysis.json に保存し、保存先パスを返す
    pub fn save<P: AsRef<Path>>(&self, output_dir: P, pretty: bool) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        let path = output_dir.join(ANALYSIS_FILE_NAME);
        fs::write(&path, self.to_json(pretty)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
