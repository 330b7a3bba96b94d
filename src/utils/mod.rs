pub mod fs;
pub mod html;
pub mod latex;
pub mod logging;

pub use fs::sanitize_filename;
pub use html::{clean_text, extract_image_urls, first_paragraph_text};
pub use latex::{escape_latex, escape_paragraphs};
pub use logging::truncate_text;
