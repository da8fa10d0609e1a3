//! The `ferrum demo` command: bundled example designs.

use std::path::Path;

use ferrum_common::ContentHash;
use ferrum_hdl::{
    BinaryOp, ClockDomain, Design, PortDirection, Shape, Signal, Statement, SwitchCase, Value,
};
use ferrum_rtlil::ConvertOptions;

use crate::pipeline::write_output;
use crate::{DemoArgs, DemoDesign, GlobalArgs};

/// Runs the `ferrum demo` command.
pub fn run(args: &DemoArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = match args.design {
        DemoDesign::Counter => counter(args.width),
    };
    let text = render(design, args.json)?;
    write_output(&text, args.output.as_deref().map(Path::new))?;

    if !global.quiet {
        if let Some(ref output) = args.output {
            eprintln!("       Wrote {output} ({})", ContentHash::of_text(&text));
        }
    }
    Ok(0)
}

/// Renders a demo design as RTLIL, or as its JSON graph when `json` is set.
fn render(design: Design, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        let mut text = serde_json::to_string_pretty(&design)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(ferrum_rtlil::convert(design, &ConvertOptions::default())?)
    }
}

/// A `width`-bit register that resets to all ones and counts up on every
/// rising edge of `clk`. Its top bit drives the output `o`.
pub fn counter(width: u32) -> Design {
    let mut design = Design::new();
    let ones = (1i64 << width) - 1;
    let v = design.add_signal(Signal::new("v", Shape::unsigned(width)).with_reset(ones));
    let o = design.add_signal(Signal::new("o", Shape::unsigned(1)));
    let clk = design.add_signal(Signal::new("clk", Shape::unsigned(1)));
    let rst = design.add_signal(Signal::new("rst", Shape::unsigned(1)));

    let top = &mut design.top;
    top.add_port(o, PortDirection::Output);
    top.add_port(clk, PortDirection::Input);
    top.add_port(rst, PortDirection::Input);
    top.add_domain(ClockDomain::new("sync", clk, Some(rst)));
    top.add_driver(v, Some("sync"));
    top.add_driver(o, None);

    let next = Value::binary(
        BinaryOp::Add,
        v.into(),
        Value::constant(1, Shape::unsigned(1)),
        Shape::unsigned(width + 1),
    );
    top.add_statements([
        Statement::assign(v, next),
        Statement::assign(o, Value::bit(v.into(), width - 1)),
        Statement::switch(
            rst,
            vec![SwitchCase::new(
                "1",
                vec![Statement::assign(v, Value::constant(ones, Shape::unsigned(width)))],
            )],
        ),
    ]);
    design
}
