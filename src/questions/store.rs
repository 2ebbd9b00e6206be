// src/questions/store.rs
// =============================================================================
// Question model plus an in-memory source that can be seeded from JSON.
//
// File format (a JSON array):
//   [
//     { "id": 1, "question_text": "What's new?", "pub_date": "2024-05-01T12:00:00Z" }
//   ]
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum QuestionsError {
    #[error("could not read questions file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed questions file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Data access for questions. Implementations must be shareable across
/// request handlers.
pub trait QuestionSource: Send + Sync {
    /// Up to `limit` already-published questions, newest first.
    fn latest(&self, limit: usize) -> Vec<Question>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestions {
    questions: Vec<Question>,
}

impl InMemoryQuestions {
    pub fn new(questions: Vec<Question>) -> Self {
        InMemoryQuestions { questions }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, QuestionsError> {
        let content = fs::read_to_string(path).map_err(|source| QuestionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let questions: Vec<Question> =
            serde_json::from_str(&content).map_err(|source| QuestionsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(count = questions.len(), path = %path.display(), "loaded questions");
        Ok(InMemoryQuestions::new(questions))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    // Split out so tests can pin "now"
    fn latest_as_of(&self, now: DateTime<Utc>, limit: usize) -> Vec<Question> {
        let mut published: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| q.pub_date <= now)
            .cloned()
            .collect();

        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        published.truncate(limit);
        published
    }
}

impl QuestionSource for InMemoryQuestions {
    fn latest(&self, limit: usize) -> Vec<Question> {
        self.latest_as_of(Utc::now(), limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn question(id: u64, text: &str, day: u32) -> Question {
        Question {
            id,
            question_text: text.to_string(),
            pub_date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_latest_orders_newest_first_and_limits() {
        let store = InMemoryQuestions::new(vec![
            question(1, "oldest", 1),
            question(2, "newest", 9),
            question(3, "middle", 5),
        ]);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let latest = store.latest_as_of(now, 2);

        let texts: Vec<&str> = latest.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "middle"]);
    }

    #[test]
    fn test_latest_hides_future_questions() {
        let store = InMemoryQuestions::new(vec![question(1, "past", 1), question(2, "future", 20)]);
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();

        let latest = store.latest_as_of(now, 5);

        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].question_text, "past");
    }

    #[test]
    fn test_same_date_ties_break_by_id() {
        let store = InMemoryQuestions::new(vec![question(4, "a", 3), question(7, "b", 3)]);
        let latest = store.latest(5);
        assert_eq!(latest[0].id, 7);
        assert_eq!(latest[1].id, 4);
    }

    #[test]
    fn test_load_from_json_file() {
        let path = std::env::temp_dir()
            .join(format!("cyberapp-questions-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"id": 1, "question_text": "What's up?", "pub_date": "2024-05-01T12:00:00Z"}]"#,
        )
        .unwrap();

        let store = InMemoryQuestions::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.latest(5)[0].question_text, "What's up?");
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let missing = Path::new("/definitely/not/here/questions.json");
        assert!(matches!(
            InMemoryQuestions::from_json_file(missing),
            Err(QuestionsError::Io { .. })
        ));

        let path = std::env::temp_dir().join(format!("cyberapp-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = InMemoryQuestions::from_json_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(QuestionsError::Parse { .. })));
    }
}
