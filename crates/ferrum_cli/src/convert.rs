//! The `ferrum convert` command: JSON design graph to RTLIL.

use std::path::{Path, PathBuf};

use ferrum_common::ContentHash;
use ferrum_config::{load_config, resolve_paths, validate_top};
use ferrum_hdl::Design;
use ferrum_rtlil::ConvertOptions;

use crate::pipeline::{resolve_project_root, write_output};
use crate::{ConvertArgs, GlobalArgs};

/// Everything a conversion needs, after merging flags with `ferrum.toml`.
#[derive(Debug, PartialEq, Eq)]
struct ConvertJob {
    design: PathBuf,
    output: Option<PathBuf>,
    options: ConvertOptions,
}

/// Runs the `ferrum convert` command.
pub fn run(args: &ConvertArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let job = plan(args, global, &cwd)?;

    if !global.quiet {
        eprintln!("  Converting {}", job.design.display());
    }

    let json = std::fs::read_to_string(&job.design)
        .map_err(|e| format!("cannot read design `{}`: {e}", job.design.display()))?;
    let design: Design = serde_json::from_str(&json)
        .map_err(|e| format!("malformed design `{}`: {e}", job.design.display()))?;
    tracing::debug!(signals = design.signals.len(), "loaded design");

    let text = ferrum_rtlil::convert(design, &job.options)?;
    let hash = ContentHash::of_text(&text);
    write_output(&text, job.output.as_deref())?;

    if !global.quiet {
        match job.output {
            Some(ref path) => eprintln!("       Wrote {} ({hash})", path.display()),
            None => eprintln!("    Finished ({hash})"),
        }
    }
    Ok(0)
}

/// Decides the input, output and options of a conversion.
///
/// An explicit design path needs no project file unless `--config` names
/// one. Without it, the design is taken from the nearest `ferrum.toml`.
/// Command-line flags override configured values.
fn plan(
    args: &ConvertArgs,
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<ConvertJob, Box<dyn std::error::Error>> {
    let mut job = match args.design {
        Some(ref design) if global.config.is_none() => ConvertJob {
            design: cwd.join(design),
            output: None,
            options: ConvertOptions::default(),
        },
        _ => {
            let root = resolve_project_root(global, cwd)?;
            let config = load_config(&root)?;
            let paths = resolve_paths(&config, &root);
            ConvertJob {
                design: match args.design {
                    Some(ref design) => cwd.join(design),
                    None => paths.design,
                },
                output: paths.output,
                options: ConvertOptions {
                    name: config.rtlil.top,
                    generator: config.rtlil.generator,
                },
            }
        }
    };
    if let Some(ref output) = args.output {
        job.output = Some(cwd.join(output));
    }
    if let Some(ref top) = args.top {
        validate_top(top)?;
        job.options.name = top.clone();
    }
    Ok(job)
}
