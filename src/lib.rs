//! glot-render - render templates once per locale
//!
//! glot-render is a CLI tool and library that renders one or more template
//! sources into one output file per translation set. Templates are
//! interpolated with [minijinja](https://docs.rs/minijinja) and get two
//! helpers: `render("partial.html")` for nested partials and
//! `translate("key")` for lookups in the active locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Render pipeline (option evaluation, source loading, helpers,
//!   orchestration, output writing)
//!
//! ## Example
//!
//! ```no_run
//! use glot_render::core::{FileWriter, Options, RenderOptions, TemplateSpec, template};
//!
//! let options = RenderOptions::new()
//!     .with_data(Options::new().with("title", "Docs"))
//!     .with_cwd("templates/partials");
//! template(
//!     &TemplateSpec::from("templates/index.html"),
//!     "dist/%.html",
//!     options,
//!     &mut FileWriter::stdout(),
//! )?;
//! # Ok::<(), glot_render::core::RenderError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
