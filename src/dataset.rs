use crate::error::{CalibrationError, Result};
use crate::types::{QuestionRecord, ResultRecord};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;

/// Loads questions from a JSON array, or from JSON Lines (one object per line).
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<QuestionRecord>> {
    let path = path.as_ref();
    let raw = read(path)?;
    let questions: Vec<QuestionRecord> = if raw.trim_start().starts_with('[') {
        serde_json::from_str(&raw).map_err(|source| CalibrationError::Json {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        })?
    } else {
        parse_lines(path, &raw)?
    };
    tracing::info!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

pub fn write_results(path: impl AsRef<Path>, results: &[ResultRecord]) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| CalibrationError::Io { path: path.to_path_buf(), source };
    let mut out = std::io::BufWriter::new(std::fs::File::create(path).map_err(io_err)?);
    for r in results {
        let line = serde_json::to_string(r)
            .map_err(|source| CalibrationError::Json { path: path.to_path_buf(), line: 0, source })?;
        writeln!(out, "{line}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    tracing::info!(path = %path.display(), count = results.len(), "wrote results");
    Ok(())
}

pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>> {
    let path = path.as_ref();
    parse_lines(path, &read(path)?)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CalibrationError::Io { path: path.to_path_buf(), source })
}

fn parse_lines<T: DeserializeOwned>(path: &Path, raw: &str) -> Result<Vec<T>> {
    raw.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            serde_json::from_str(l).map_err(|source| CalibrationError::Json {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}
