//! File intake
//!
//! Validates a picked selection against the aggregate size ceiling and
//! keeps only the first file; the rest of the selection is ignored, not
//! queued. The decision logic is pure so it can be tested without a
//! filesystem; a thin loader stats picked paths into candidates.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::session::SelectedFile;

/// Aggregate upload ceiling over the whole selection
pub const MAX_TOTAL_SIZE_MB: u64 = 20;
pub const MAX_TOTAL_SIZE_BYTES: u64 = MAX_TOTAL_SIZE_MB * 1024 * 1024;

/// A picked file before validation
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Result of validating one picker selection
#[derive(Debug)]
pub enum IntakeOutcome {
    /// Nothing was picked; the session stays untouched
    Empty,
    /// Selection accepted: keep the first file, report how many more
    /// were ignored
    Accepted { file: SelectedFile, ignored: usize },
    /// Aggregate size over the ceiling: the whole selection is refused
    RejectedTooLarge { total_bytes: u64 },
}

/// Validate a selection and pick the file to retain.
pub fn evaluate_selection(candidates: Vec<Candidate>) -> IntakeOutcome {
    let total_bytes: u64 = candidates.iter().map(|c| c.size_bytes).sum();
    if total_bytes > MAX_TOTAL_SIZE_BYTES {
        return IntakeOutcome::RejectedTooLarge { total_bytes };
    }

    let ignored = candidates.len().saturating_sub(1);
    match candidates.into_iter().next() {
        Some(first) => IntakeOutcome::Accepted {
            file: into_selected(first),
            ignored,
        },
        None => IntakeOutcome::Empty,
    }
}

fn into_selected(candidate: Candidate) -> SelectedFile {
    let name = candidate
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    SelectedFile {
        path: candidate.path,
        name,
        size_bytes: candidate.size_bytes,
    }
}

/// Stat picked paths into candidates. Any unreadable path fails the
/// whole selection.
pub fn load_candidates(paths: &[PathBuf]) -> Result<Vec<Candidate>> {
    paths
        .iter()
        .map(|path| {
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("failed to read metadata for {}", path.display()))?;
            Ok(Candidate {
                path: path.clone(),
                size_bytes: metadata.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MB: u64 = 1024 * 1024;

    fn candidate(name: &str, size_bytes: u64) -> Candidate {
        Candidate {
            path: PathBuf::from(name),
            size_bytes,
        }
    }

    #[test]
    fn empty_selection_changes_nothing() {
        assert!(matches!(
            evaluate_selection(Vec::new()),
            IntakeOutcome::Empty
        ));
    }

    #[test]
    fn single_file_under_ceiling_is_accepted() {
        let outcome = evaluate_selection(vec![candidate("scan.png", 2 * MB)]);
        match outcome {
            IntakeOutcome::Accepted { file, ignored } => {
                assert_eq!(file.name, "scan.png");
                assert_eq!(file.size_bytes, 2 * MB);
                assert_eq!(ignored, 0);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn only_the_first_of_multiple_files_is_retained() {
        let outcome = evaluate_selection(vec![
            candidate("a.png", 3 * MB),
            candidate("b.png", 4 * MB),
            candidate("c.png", 5 * MB),
        ]);
        match outcome {
            IntakeOutcome::Accepted { file, ignored } => {
                assert_eq!(file.name, "a.png");
                assert_eq!(ignored, 2);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn oversized_pair_is_rejected_whole() {
        // 25 MB across two files against a 20 MB ceiling.
        let outcome = evaluate_selection(vec![
            candidate("a.jpg", 12 * MB),
            candidate("b.jpg", 13 * MB),
        ]);
        match outcome {
            IntakeOutcome::RejectedTooLarge { total_bytes } => {
                assert_eq!(total_bytes, 25 * MB);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn single_oversized_file_is_rejected_too() {
        assert!(matches!(
            evaluate_selection(vec![candidate("huge.tiff", 21 * MB)]),
            IntakeOutcome::RejectedTooLarge { .. }
        ));
    }

    #[test]
    fn exactly_at_the_ceiling_passes() {
        assert!(matches!(
            evaluate_selection(vec![candidate("edge.png", MAX_TOTAL_SIZE_BYTES)]),
            IntakeOutcome::Accepted { .. }
        ));
        assert!(matches!(
            evaluate_selection(vec![candidate("edge.png", MAX_TOTAL_SIZE_BYTES + 1)]),
            IntakeOutcome::RejectedTooLarge { .. }
        ));
    }

    #[test]
    fn load_candidates_stats_real_files() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"pretend this is a JPEG").unwrap();

        let candidates = load_candidates(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].size_bytes, 22);
    }

    #[test]
    fn load_candidates_fails_on_missing_path() {
        let result = load_candidates(&[PathBuf::from("/nonexistent/image.png")]);
        assert!(result.is_err());
    }
}
