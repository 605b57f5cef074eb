//! Directory-tree corpus loader.
//!
//! Expected layout, one UTF-8 document per `.txt` file:
//!
//! ```text
//! <root>/train/pos/0.txt
//! <root>/train/neg/1.txt
//! <root>/dev/...          (optional)
//! <root>/test/pos/...
//! <root>/test/neg/...
//! ```
//!
//! Label directory names are parsed as integer labels, with `pos` and
//! `neg` accepted as aliases for 1 and 0. Missing split directories yield
//! empty splits. Files are visited in sorted order, so a given corpus
//! always loads into the same `Dataset`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::{SimpleTokenizer, Tokenizer};
use crate::dataset::{DataLabel, Dataset, Sample};
use crate::error::{KategoriaError, Result};
use crate::progress::{NoProgress, ProgressReporter};

const SPLIT_NAMES: [&str; 3] = ["train", "dev", "test"];

/// Loads a labeled corpus from a directory tree into a [`Dataset`].
pub struct CorpusLoader {
    root: PathBuf,
    tokenizer: Arc<dyn Tokenizer>,
    limit: Option<usize>,
}

impl CorpusLoader {
    /// Create a loader for the given corpus root, tokenizing with
    /// [`SimpleTokenizer`] by default.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        CorpusLoader {
            root: root.into(),
            tokenizer: Arc::new(SimpleTokenizer::new()),
            limit: None,
        }
    }

    /// Use the given tokenizer instead of the default.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Cap each split at `limit` documents, spread as evenly as possible
    /// across the split's label directories.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Load the corpus.
    pub fn load(&self) -> Result<Dataset> {
        self.load_with_progress(&NoProgress)
    }

    /// Load the corpus, reporting one step per file read and one per
    /// document tokenized.
    pub fn load_with_progress(&self, progress: &dyn ProgressReporter) -> Result<Dataset> {
        if !self.root.is_dir() {
            return Err(KategoriaError::corpus(format!(
                "corpus root {} is not a directory",
                self.root.display()
            )));
        }

        // Enumerate every file first so progress totals are exact.
        let mut split_files: [Vec<(DataLabel, PathBuf)>; 3] = [vec![], vec![], vec![]];
        for (split_index, split_name) in SPLIT_NAMES.iter().enumerate() {
            split_files[split_index] = self.split_files(&self.root.join(split_name))?;
        }

        let file_count: usize = split_files.iter().map(Vec::len).sum();
        progress.start(file_count * 2);

        // Phase 1: read raw documents.
        let mut split_raw: [Vec<(DataLabel, String)>; 3] = [vec![], vec![], vec![]];
        for (split_index, files) in split_files.iter().enumerate() {
            for (label, path) in files {
                let text = fs::read_to_string(path)?;
                split_raw[split_index].push((*label, text));
                progress.step();
            }
        }

        // Phase 2: tokenize.
        let mut splits: [Vec<Sample>; 3] = [vec![], vec![], vec![]];
        for (split_index, raw) in split_raw.iter().enumerate() {
            for (label, text) in raw {
                let tokens = self.tokenizer.tokenize(text)?;
                splits[split_index].push(Sample {
                    tokens,
                    label: *label,
                });
                progress.step();
            }
        }

        progress.finish();

        let [train, dev, test] = splits;
        log::debug!(
            "loaded corpus from {}: {} train, {} dev, {} test",
            self.root.display(),
            train.len(),
            dev.len(),
            test.len()
        );

        Ok(Dataset::new(train, dev, test))
    }

    /// Collect the (label, path) pairs of one split directory, in sorted
    /// label and file order, with the split limit applied.
    fn split_files(&self, split_dir: &Path) -> Result<Vec<(DataLabel, PathBuf)>> {
        if !split_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut label_dirs: Vec<(DataLabel, PathBuf)> = Vec::new();
        for entry in fs::read_dir(split_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let name = entry.file_name().to_string_lossy().to_string();
                label_dirs.push((parse_label(&name)?, entry.path()));
            }
        }
        label_dirs.sort_by_key(|(_, path)| path.clone());

        // Per-label quota: limit / k each, remainder to the first dirs.
        let quotas: Vec<Option<usize>> = match self.limit {
            Some(limit) => {
                let dirs = label_dirs.len().max(1);
                (0..label_dirs.len())
                    .map(|i| Some(limit / dirs + usize::from(i < limit % dirs)))
                    .collect()
            }
            None => vec![None; label_dirs.len()],
        };

        let mut files = Vec::new();
        for ((label, dir), quota) in label_dirs.into_iter().zip(quotas) {
            let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
                .collect::<std::io::Result<Vec<_>>>()?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().is_some_and(|ext| ext == "txt")
                })
                .collect();
            paths.sort();

            if let Some(quota) = quota {
                paths.truncate(quota);
            }
            files.extend(paths.into_iter().map(|path| (label, path)));
        }

        Ok(files)
    }
}

/// Parse a label directory name: `pos` and `neg` are aliases for 1 and 0,
/// anything else must be a plain non-negative integer.
fn parse_label(name: &str) -> Result<DataLabel> {
    match name {
        "pos" => Ok(1),
        "neg" => Ok(0),
        other => other.parse::<DataLabel>().map_err(|_| {
            KategoriaError::corpus(format!(
                "label directory {other:?} is neither pos/neg nor an integer"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::Write;

    use tempfile::TempDir;

    fn write_doc(root: &Path, split: &str, label: &str, name: &str, text: &str) {
        let dir = root.join(split).join(label);
        fs::create_dir_all(&dir).unwrap();
        let mut file = File::create(dir.join(name)).unwrap();
        write!(file, "{text}").unwrap();
    }

    fn sample_corpus() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_doc(root, "train", "pos", "0.txt", "a good movie");
        write_doc(root, "train", "pos", "1.txt", "great film");
        write_doc(root, "train", "neg", "0.txt", "a bad movie");
        write_doc(root, "train", "neg", "1.txt", "awful film");
        write_doc(root, "test", "pos", "0.txt", "good film");
        write_doc(root, "test", "neg", "0.txt", "bad film");
        tmp
    }

    #[test]
    fn test_load_sample_corpus() {
        let tmp = sample_corpus();
        let dataset = CorpusLoader::new(tmp.path()).load().unwrap();

        assert_eq!(dataset.train_size(), 4);
        assert_eq!(dataset.dev_size(), 0);
        assert_eq!(dataset.test_size(), 2);

        // neg sorts before pos, and files sort within each label.
        assert_eq!(dataset.train_labels(), vec![0, 0, 1, 1]);
        assert_eq!(dataset.train()[2].tokens, vec!["a", "good", "movie"]);
    }

    #[test]
    fn test_limit_splits_evenly() {
        let tmp = sample_corpus();
        let dataset = CorpusLoader::new(tmp.path()).with_limit(2).load().unwrap();

        assert_eq!(dataset.train_size(), 2);
        assert_eq!(dataset.train_labels(), vec![0, 1]);
    }

    #[test]
    fn test_odd_limit_remainder_goes_to_first_label() {
        let tmp = sample_corpus();
        let dataset = CorpusLoader::new(tmp.path()).with_limit(3).load().unwrap();

        assert_eq!(dataset.train_size(), 3);
        assert_eq!(dataset.train_labels(), vec![0, 0, 1]);
    }

    #[test]
    fn test_integer_label_directories() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "train", "2", "0.txt", "middling movie");
        let dataset = CorpusLoader::new(tmp.path()).load().unwrap();

        assert_eq!(dataset.train_labels(), vec![2]);
    }

    #[test]
    fn test_unknown_label_directory_fails() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "train", "positive", "0.txt", "good");
        let result = CorpusLoader::new(tmp.path()).load();

        assert!(matches!(result, Err(KategoriaError::CorpusFormat(_))));
    }

    #[test]
    fn test_non_txt_files_are_ignored() {
        let tmp = sample_corpus();
        write_doc(tmp.path(), "train", "pos", "README.md", "not a doc");
        let dataset = CorpusLoader::new(tmp.path()).load().unwrap();

        assert_eq!(dataset.train_size(), 4);
    }

    #[test]
    fn test_missing_root_fails() {
        let result = CorpusLoader::new("/nonexistent/corpus").load();
        assert!(matches!(result, Err(KategoriaError::CorpusFormat(_))));
    }
}
