pub mod asset_namer;
pub mod latex_emitter;
pub mod markdown_emitter;
pub mod question_writer;

pub use asset_namer::{
    image_extension, is_downloadable, option_display_text, option_label, plan_images,
    ImageReference, ImageSlot, OptionLabel,
};
pub use latex_emitter::render_latex;
pub use markdown_emitter::render_markdown;
pub use question_writer::{render_question_text, QUESTION_TEXT_FILE};
