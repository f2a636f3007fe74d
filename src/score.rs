/// Best-effort high-score persistence.
///
/// The file holds one integer per line in any order. A missing or
/// unreadable file is an empty list; a failed write is logged and
/// otherwise ignored so the game never stalls on disk trouble.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub const MAX_SCORES: usize = 5;

#[derive(Clone, Debug)]
pub struct ScoreStore {
    path: Option<PathBuf>,
    scores: Vec<u32>,
}

impl ScoreStore {
    /// Load the list kept at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = Self::load(&path);
        ScoreStore {
            path: Some(path),
            scores,
        }
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        ScoreStore {
            path: None,
            scores: Vec::new(),
        }
    }

    /// Top scores at `path`, best first. Any problem yields an empty list.
    pub fn load(path: &Path) -> Vec<u32> {
        match fs::read_to_string(path) {
            Ok(text) => match parse(&text) {
                Some(scores) => scores,
                None => {
                    warn!("[Scores] Ignoring corrupt score file {}", path.display());
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!("[Scores] Could not read {}: {}", path.display(), err);
                Vec::new()
            }
        }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Returns `true` and persists when `score` beats the current best (or
    /// the list is empty); anything else leaves the list untouched.
    pub fn record(&mut self, score: u32) -> bool {
        if self.best().is_some_and(|best| score <= best) {
            return false;
        }

        self.scores.push(score);
        rank(&mut self.scores);
        info!("[Scores] New high score {}", score);

        if let Some(path) = &self.path {
            if let Err(err) = save(path, &self.scores) {
                warn!("[Scores] Could not save {}: {}", path.display(), err);
            }
        }
        true
    }
}

fn rank(scores: &mut Vec<u32>) {
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(MAX_SCORES);
}

fn parse(text: &str) -> Option<Vec<u32>> {
    let mut scores = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.parse().ok())
        .collect::<Option<Vec<u32>>>()?;
    rank(&mut scores);
    Some(scores)
}

fn save(path: &Path, scores: &[u32]) -> io::Result<()> {
    let body: String = scores.iter().map(|s| format!("{s}\n")).collect();
    fs::write(path, body)
}
