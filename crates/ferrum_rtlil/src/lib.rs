//! RTLIL backend for the Ferrum HDL toolchain.
//!
//! Lowers a prepared [`Design`] into the textual intermediate language read by
//! Yosys. Every fragment of the hierarchy becomes one module; children are
//! emitted before their parents and instantiated as cells.
//!
//! # Usage
//!
//! ```ignore
//! use ferrum_rtlil::{convert, ConvertOptions};
//! let rtlil = convert(design, &ConvertOptions::default())?;
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod convert;
pub mod error;
pub mod namer;
pub mod text;
pub mod value;

pub use convert::{convert_fragment, PortMap};
pub use error::{ConvertError, ConvertResult};

use builder::Builder;
use ferrum_hdl::{Design, Prepare};

/// Settings for [`convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Name of the outermost module.
    pub name: String,
    /// Value of the `generator` attribute on every module.
    pub generator: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            name: "top".to_string(),
            generator: "Ferrum".to_string(),
        }
    }
}

/// Prepares `design` and lowers it to RTLIL text.
pub fn convert(design: impl Prepare, options: &ConvertOptions) -> ConvertResult<String> {
    let design: Design = design.prepare()?;
    tracing::debug!(
        signals = design.signals.len(),
        top = %options.name,
        "converting design"
    );
    let mut builder = Builder::new(options.generator.as_str());
    convert_fragment(
        &mut builder,
        &design,
        &design.top,
        Some(options.name.as_str()),
        true,
    )?;
    Ok(builder.finish())
}
