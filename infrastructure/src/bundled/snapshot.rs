//! Question snapshot source
//!
//! The file is a JSON array of `{ id, texto, opcoes: [{ id, texto, perfis }] }`.

use dpc_application::{QuestionSnapshotSource, SnapshotError};
use dpc_domain::{Question, QuestionOption};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

const EMBEDDED: &str = include_str!("../../data/perguntas_dpc_33.json");

#[derive(Deserialize)]
struct SnapshotQuestion {
    id: String,
    texto: String,
    #[serde(default)]
    opcoes: Vec<SnapshotOption>,
}

#[derive(Deserialize)]
struct SnapshotOption {
    id: String,
    texto: String,
    #[serde(default)]
    perfis: Vec<String>,
}

impl From<SnapshotQuestion> for Question {
    fn from(q: SnapshotQuestion) -> Self {
        q.opcoes.into_iter().fold(Question::new(q.id, q.texto), |question, o| {
            question.with_option(QuestionOption::new(o.id, o.texto, o.perfis))
        })
    }
}

/// Snapshot embedded at build time, optionally replaced by a file on disk
#[derive(Debug, Clone, Default)]
pub struct BundledSnapshot {
    path: Option<PathBuf>,
}

impl BundledSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the snapshot from `path` instead of the embedded copy
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn parse(json: &str) -> Result<Vec<Question>, SnapshotError> {
        let questions: Vec<SnapshotQuestion> =
            serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        Ok(questions.into_iter().map(Question::from).collect())
    }
}

impl QuestionSnapshotSource for BundledSnapshot {
    fn load(&self) -> Result<Vec<Question>, SnapshotError> {
        match &self.path {
            Some(path) => {
                debug!("Loading question snapshot from {}", path.display());
                let json = std::fs::read_to_string(path).map_err(|e| {
                    SnapshotError::Unavailable(format!("{}: {}", path.display(), e))
                })?;
                Self::parse(&json)
            }
            None => Self::parse(EMBEDDED),
        }
    }
}
