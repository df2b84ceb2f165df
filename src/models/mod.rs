pub mod loaders;
pub mod quantities;
pub mod question;

pub use loaders::{load_all_job_files, load_toml_to_job, GenerationJob};
pub use quantities::Quantities;
pub use question::{
    Flashcard, FillInBlanksQuestion, MatchingQuestion, Mcq, QuestionSet, TrueFalseQuestion,
};
