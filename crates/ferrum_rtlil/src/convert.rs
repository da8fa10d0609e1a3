//! Lowering of fragments to RTLIL modules.
//!
//! [`convert_fragment`] lowers one fragment, recursing into its children
//! first so that every child module is emitted ahead of its parent. For each
//! fragment it:
//!
//! 1. registers the driven signals, which decides who gets a `$next` wire;
//! 2. declares ports, then the clocks and resets of the domains in use, so
//!    they keep their plain names;
//! 3. lowers each child and instantiates it, naming the parent-side wires
//!    created for the instance after the child;
//! 4. emits one process: default assignments, the statement tree, initial
//!    values, and one `sync` block per trigger copying next into current.

use crate::builder::{Builder, CaseBuilder, ProcessBuilder, SyncTrigger};
use crate::error::{ConvertError, ConvertResult};
use crate::value::{render_const, ValueCompilerState};
use ferrum_hdl::{
    AttrValue, ClockDomain, ClockEdge, Const, Design, Fragment, Shape, SignalId, Statement,
    SwitchCase, Value,
};

/// Port wire names of a lowered module, in port order, with the signal each
/// one carries.
pub type PortMap = Vec<(String, SignalId)>;

/// Lowers `fragment` and its children into `builder`.
///
/// Returns the unique name given to the fragment's module and its port map.
/// The module is closed even when lowering fails, so the accumulated text
/// stays well-formed.
#[tracing::instrument(level = "debug", skip_all, fields(name = name.unwrap_or("anonymous"), top = top))]
pub fn convert_fragment(
    builder: &mut Builder,
    design: &Design,
    fragment: &Fragment,
    name: Option<&str>,
    top: bool,
) -> ConvertResult<(String, PortMap)> {
    let attrs = if top {
        vec![("top", AttrValue::Int(1))]
    } else {
        Vec::new()
    };
    let module = builder.begin_module(name.unwrap_or("anonymous"), &attrs);
    let mut state = ValueCompilerState::new(module, design);
    let result = lower_fragment(builder, &mut state, fragment);
    let module = state.into_module();
    let module_name = module.name().to_string();
    builder.end_module(module);
    let port_map = result?;
    tracing::debug!(module = %module_name, ports = port_map.len(), "lowered fragment");
    Ok((module_name, port_map))
}

fn lower_fragment(
    builder: &mut Builder,
    state: &mut ValueCompilerState<'_>,
    fragment: &Fragment,
) -> ConvertResult<PortMap> {
    for (domain, signal) in fragment.iter_drivers() {
        state.add_driven(signal, domain.is_some());
    }

    for &(signal, direction) in &fragment.ports {
        state.add_port(signal, direction);
        state.resolve_curr(signal, None);
    }

    for (domain, _) in fragment.iter_sync() {
        let cd = lookup_domain(fragment, domain)?;
        state.resolve_curr(cd.clk, None);
        if let Some(rst) = cd.rst {
            state.resolve_curr(rst, None);
        }
    }

    for sub in &fragment.subfragments {
        let (sub_name, sub_ports) = convert_fragment(
            builder,
            state.design(),
            &sub.fragment,
            sub.name.as_deref(),
            false,
        )?;
        state.hierarchy(&sub_name, |s| -> ConvertResult<()> {
            let mut conns = Vec::with_capacity(sub_ports.len());
            for (port, signal) in &sub_ports {
                conns.push((port.as_str(), s.rhs().compile(&Value::Signal(*signal))?));
            }
            let ports: Vec<(&str, &str)> = conns.iter().map(|(p, w)| (*p, w.as_str())).collect();
            s.module().cell(&sub_name, Some(sub_name.as_str()), &[], &ports, None);
            Ok(())
        })?;
    }

    let mut process = state.module().begin_process();
    let result = lower_process(state, &mut process, fragment);
    state.module().end_process(process);
    result?;

    Ok(fragment
        .ports
        .iter()
        .map(|&(signal, _)| (state.resolve_curr(signal, None), signal))
        .collect())
}

fn lower_process(
    state: &mut ValueCompilerState<'_>,
    process: &mut ProcessBuilder,
    fragment: &Fragment,
) -> ConvertResult<()> {
    let design = state.design();

    {
        let mut case = process.case();
        // Combinational signals fall back to their reset value, registers
        // hold their current value.
        for (domain, signal) in fragment.iter_drivers() {
            let prev = match domain {
                None => Value::Const(reset_const(design, signal)),
                Some(_) => Value::Signal(signal),
            };
            let lhs = state.lhs().compile(&Value::Signal(signal))?;
            let rhs = state.rhs().compile(&prev)?;
            case.assign(&lhs, &rhs);
        }
        lower_stmts(state, &mut case, &fragment.statements)?;
    }

    {
        let mut sync = process.sync(&SyncTrigger::Init);
        for (_, signal) in fragment.iter_sync() {
            let curr = state.resolve_curr(signal, None);
            sync.update(&curr, &render_const(&reset_const(design, signal)));
        }
    }

    for group in &fragment.drivers {
        let triggers = match &group.domain {
            None => vec![SyncTrigger::Always],
            Some(domain) => {
                let cd = lookup_domain(fragment, domain)?;
                domain_triggers(state, cd)
            }
        };
        for trigger in &triggers {
            let mut sync = process.sync(trigger);
            for &signal in &group.signals {
                let next = state.lhs().compile(&Value::Signal(signal))?;
                let curr = state.resolve_curr(signal, None);
                sync.update(&curr, &next);
            }
        }
    }
    Ok(())
}

fn lower_stmts(
    state: &mut ValueCompilerState<'_>,
    case: &mut CaseBuilder<'_>,
    stmts: &[Statement],
) -> ConvertResult<()> {
    let design = state.design();
    for stmt in stmts {
        match stmt {
            Statement::Assign { lhs, rhs } => {
                let lhs_shape = lhs.shape(design);
                let rhs_shape = rhs.shape(design);
                // Both sides of an RTLIL assignment must have the same width.
                let rhs_spec = if lhs_shape.width == rhs_shape.width {
                    state.rhs().compile(rhs)?
                } else {
                    state.rhs().match_shape(rhs, lhs_shape)?
                };
                let lhs_spec = state.lhs().compile(lhs)?;
                case.assign(&lhs_spec, &rhs_spec);
            }
            Statement::Switch { test, cases } => {
                let test_spec = state.rhs().compile(test)?;
                let (labeled, default) = order_cases(cases)?;
                let mut switch = case.switch(&test_spec);
                for branch in labeled {
                    let mut nested = switch.case(branch.pattern.as_deref());
                    lower_stmts(state, &mut nested, &branch.body)?;
                }
                let mut nested = switch.case(None);
                if let Some(default) = default {
                    lower_stmts(state, &mut nested, &default.body)?;
                }
            }
        }
    }
    Ok(())
}

/// Splits switch branches into the labeled ones, in order, and the single
/// optional default.
fn order_cases(cases: &[SwitchCase]) -> ConvertResult<(Vec<&SwitchCase>, Option<&SwitchCase>)> {
    let mut labeled = Vec::with_capacity(cases.len());
    let mut default = None;
    for case in cases {
        match &case.pattern {
            Some(pattern) => {
                if pattern.is_empty() || !pattern.chars().all(|c| matches!(c, '0' | '1' | '-')) {
                    return Err(ConvertError::Structural(format!(
                        "invalid case pattern `{pattern}`"
                    )));
                }
                labeled.push(case);
            }
            None if default.is_some() => {
                return Err(ConvertError::Structural(
                    "more than one default case".to_string(),
                ));
            }
            None => default = Some(case),
        }
    }
    Ok((labeled, default))
}

fn domain_triggers(state: &mut ValueCompilerState<'_>, cd: &ClockDomain) -> Vec<SyncTrigger> {
    let clk = state.resolve_curr(cd.clk, None);
    let mut triggers = vec![match cd.clk_edge {
        ClockEdge::Pos => SyncTrigger::Posedge(clk),
        ClockEdge::Neg => SyncTrigger::Negedge(clk),
    }];
    if cd.is_async_reset() {
        if let Some(rst) = cd.rst {
            triggers.push(SyncTrigger::Posedge(state.resolve_curr(rst, None)));
        }
    }
    triggers
}

fn lookup_domain<'f>(fragment: &'f Fragment, name: &str) -> ConvertResult<&'f ClockDomain> {
    fragment
        .domain(name)
        .ok_or_else(|| ConvertError::UnknownDomain(name.to_string()))
}

fn reset_const(design: &Design, signal: SignalId) -> Const {
    let sig = design.signal(signal);
    Const::new(sig.reset, Shape::unsigned(sig.width()))
}
