//! File and template utilities for generating Verilator C++ simulation
//! harnesses: whole-file reads with a typed error taxonomy, resolution of the
//! toolkit's installation directory, harness template rendering, and the
//! stat/digest helpers the generator uses to leave unchanged outputs alone.

pub mod digest;
pub mod error;
pub mod file_reader;
pub mod generator;
pub mod metadata;
pub mod script_dir;
pub mod template;

pub use error::FileError;
pub use file_reader::{read_file_as_binary, read_file_as_text, read_file_or_exit};
pub use generator::{write_harness, GenerateError, Outcome};
pub use metadata::{stat_glob, stat_path, FileMetadata};
pub use script_dir::ScriptDir;
pub use template::{HarnessKind, HarnessParams, HarnessTemplate, TemplateError, TraceParams};
