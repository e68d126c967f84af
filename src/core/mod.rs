//! The render pipeline.
//!
//! - `options`: lazy option evaluation
//! - `source`: template source loading
//! - `helpers`: `render`/`translate` template helpers
//! - `render`: per-translation render orchestration
//! - `writer`: persisting rendered outputs
//! - `translations`: translation tables and locale message files

pub mod error;
pub mod helpers;
pub mod options;
pub mod render;
pub mod source;
pub mod translations;
pub mod writer;

pub use error::RenderError;
pub use helpers::{HelperContext, RenderHook, bind};
pub use options::{OptionValue, Options, Thunk, evaluate};
pub use render::{DEST_PLACEHOLDER, RenderOptions, RenderOutput, destination, render, template};
pub use source::TemplateSpec;
pub use translations::{
    DEFAULT_LANGUAGE, TranslationSet, TranslationTable, default_translation_set,
    scan_message_files,
};
pub use writer::{FileWriter, MemoryWriter, OutputWriter, SUCCESS_MARK};
