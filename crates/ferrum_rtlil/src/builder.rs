//! Structural RTLIL builders.
//!
//! The builders mirror the nesting of the RTLIL grammar:
//!
//! ```text
//! Builder
//! └── ModuleBuilder        wire, connect, cell
//!     └── ProcessBuilder
//!         ├── CaseBuilder  assign
//!         │   └── SwitchBuilder ── CaseBuilder ...
//!         └── SyncBuilder  update
//! ```
//!
//! Modules and processes are opened with `begin_*` and closed with `end_*`,
//! which flushes their text into the enclosing scope. They own their buffers,
//! so cells created while a process is open are emitted ahead of it, as RTLIL
//! requires. Switches close themselves when dropped.

use crate::namer::Namer;
use crate::text::{render_value, Emitter};
use ferrum_hdl::{AttrValue, PortDirection, SrcLoc};
use std::fmt;

/// The root of an RTLIL document.
#[derive(Debug)]
pub struct Builder {
    namer: Namer,
    text: Emitter,
    generator: String,
}

impl Builder {
    /// Creates an empty document whose modules carry `generator` as their
    /// generator attribute.
    pub fn new(generator: impl Into<String>) -> Self {
        Self {
            namer: Namer::new(),
            text: Emitter::new(),
            generator: generator.into(),
        }
    }

    /// Opens a module. The name is made unique among the document's modules.
    pub fn begin_module(&mut self, name: &str, attrs: &[(&str, AttrValue)]) -> ModuleBuilder {
        let name = self.namer.make_name(Some(name), false);
        let mut text = Emitter::new();
        text.attribute(0, "generator", &AttrValue::from(self.generator.as_str()));
        for (attr, value) in attrs {
            text.attribute(0, attr, value);
        }
        text.line(0, format_args!("module {name}"));
        ModuleBuilder {
            name,
            namer: Namer::new(),
            text,
        }
    }

    /// Closes a module and appends its text to the document.
    pub fn end_module(&mut self, mut module: ModuleBuilder) {
        module.text.line(0, format_args!("end"));
        self.text.append(module.text);
    }

    /// Returns the document text.
    pub fn finish(self) -> String {
        self.text.into_string()
    }
}

/// An open `module`.
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    namer: Namer,
    text: Emitter,
}

impl ModuleBuilder {
    /// The module's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits an attribute that applies to the next declaration.
    pub fn attribute(&mut self, name: &str, value: &AttrValue) {
        self.text.attribute(1, name, value);
    }

    /// Declares a wire and returns its unique name.
    pub fn wire(
        &mut self,
        width: u32,
        port: Option<(u32, PortDirection)>,
        name: Option<&str>,
        src: Option<&SrcLoc>,
    ) -> String {
        self.text.src(1, src);
        let name = self.namer.make_name(name, false);
        match port {
            Some((id, dir)) => self.text.line(
                1,
                format_args!("wire width {width} {} {id} {name}", dir.keyword()),
            ),
            None => self.text.line(1, format_args!("wire width {width} {name}")),
        }
        name
    }

    /// Connects two signal specifications.
    pub fn connect(&mut self, lhs: &str, rhs: &str) {
        self.text.line(1, format_args!("connect {lhs} {rhs}"));
    }

    /// Emits a cell and returns its unique name.
    ///
    /// Parameter names get a `\` prefix; port names are used verbatim.
    pub fn cell(
        &mut self,
        kind: &str,
        name: Option<&str>,
        params: &[(&str, AttrValue)],
        ports: &[(&str, &str)],
        src: Option<&SrcLoc>,
    ) -> String {
        self.text.src(1, src);
        let name = self.namer.make_name(name, true);
        self.text.line(1, format_args!("cell {kind} {name}"));
        for (param, value) in params {
            self.text
                .line(2, format_args!("parameter \\{param} {}", render_value(value)));
        }
        for (port, wire) in ports {
            self.text.line(2, format_args!("connect {port} {wire}"));
        }
        self.text.line(1, format_args!("end"));
        name
    }

    /// Opens a process.
    pub fn begin_process(&mut self) -> ProcessBuilder {
        let name = self.namer.make_name(None, true);
        let mut text = Emitter::new();
        text.line(1, format_args!("process {name}"));
        ProcessBuilder { name, text }
    }

    /// Closes a process and appends its text to the module.
    pub fn end_process(&mut self, mut process: ProcessBuilder) {
        process.text.line(1, format_args!("end"));
        self.text.append(process.text);
    }
}

/// An open `process`.
#[derive(Debug)]
pub struct ProcessBuilder {
    name: String,
    text: Emitter,
}

impl ProcessBuilder {
    /// The process's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root case of the process.
    pub fn case(&mut self) -> CaseBuilder<'_> {
        CaseBuilder {
            text: &mut self.text,
            indent: 2,
        }
    }

    /// Opens a `sync` block.
    pub fn sync(&mut self, trigger: &SyncTrigger) -> SyncBuilder<'_> {
        self.text.line(2, format_args!("sync {trigger}"));
        SyncBuilder {
            text: &mut self.text,
        }
    }
}

/// A case body: assignments and nested switches.
#[derive(Debug)]
pub struct CaseBuilder<'p> {
    text: &'p mut Emitter,
    indent: usize,
}

impl CaseBuilder<'_> {
    /// Emits `assign lhs rhs`.
    pub fn assign(&mut self, lhs: &str, rhs: &str) {
        self.text
            .line(self.indent, format_args!("assign {lhs} {rhs}"));
    }

    /// Opens a `switch` on `cond`.
    pub fn switch(&mut self, cond: &str) -> SwitchBuilder<'_> {
        self.text.line(self.indent, format_args!("switch {cond}"));
        SwitchBuilder {
            text: &mut *self.text,
            indent: self.indent,
        }
    }
}

/// An open `switch`. Emits its `end` when dropped.
#[derive(Debug)]
pub struct SwitchBuilder<'p> {
    text: &'p mut Emitter,
    indent: usize,
}

impl SwitchBuilder<'_> {
    /// Opens a case matching `pattern`, or the default case for `None`.
    pub fn case(&mut self, pattern: Option<&str>) -> CaseBuilder<'_> {
        match pattern {
            Some(bits) => self
                .text
                .line(self.indent + 1, format_args!("case {}'{bits}", bits.len())),
            None => self.text.line(self.indent + 1, format_args!("case")),
        }
        CaseBuilder {
            text: &mut *self.text,
            indent: self.indent + 2,
        }
    }
}

impl Drop for SwitchBuilder<'_> {
    fn drop(&mut self) {
        self.text.line(self.indent, format_args!("end"));
    }
}

/// What fires a `sync` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncTrigger {
    /// Initial values.
    Init,
    /// Any change of the inputs.
    Always,
    /// Rising edge of the named wire.
    Posedge(String),
    /// Falling edge of the named wire.
    Negedge(String),
}

impl fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncTrigger::Init => write!(f, "init"),
            SyncTrigger::Always => write!(f, "always"),
            SyncTrigger::Posedge(wire) => write!(f, "posedge {wire}"),
            SyncTrigger::Negedge(wire) => write!(f, "negedge {wire}"),
        }
    }
}

/// An open `sync` block.
#[derive(Debug)]
pub struct SyncBuilder<'p> {
    text: &'p mut Emitter,
}

impl SyncBuilder<'_> {
    /// Emits `update lhs rhs`.
    pub fn update(&mut self, lhs: &str, rhs: &str) {
        self.text.line(3, format_args!("update {lhs} {rhs}"));
    }
}
