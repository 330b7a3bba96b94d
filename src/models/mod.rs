pub mod lenient;
pub mod manifest;
pub mod question_type;
pub mod report;

pub use manifest::{AssetManifest, MaterializedAsset};
pub use question_type::QuestionType;
pub use report::{CorrectAnswerInfo, Exam, Item, Part, Question, StudentAnswer};
