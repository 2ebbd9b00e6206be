// src/questions/mod.rs
// =============================================================================
// The questions shown on the index page, and where they come from.
//
// The web layer never reaches into storage directly. It asks a
// QuestionSource for the latest questions, so the storage behind it can
// change without touching the handlers.
// =============================================================================

mod store;

pub use store::{InMemoryQuestions, Question, QuestionSource, QuestionsError};
