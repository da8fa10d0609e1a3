//! Statements.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A statement in a fragment body.
///
/// Statements only nest inside the branches of a [`Statement::Switch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// `lhs = rhs`.
    Assign {
        /// The assigned expression, normally a signal reference.
        lhs: Value,
        /// The assigned value.
        rhs: Value,
    },
    /// A multi-way branch on `test`.
    Switch {
        /// The tested expression.
        test: Value,
        /// Branches in priority order.
        cases: Vec<SwitchCase>,
    },
}

/// One branch of a [`Statement::Switch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Bit pattern over `0`, `1` and `-`, most significant bit first, or
    /// `None` for the default branch.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Statements executed when the branch is taken.
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl SwitchCase {
    /// A branch taken when the test matches `pattern`.
    pub fn new(pattern: impl Into<String>, body: Vec<Statement>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            body,
        }
    }

    /// The default branch.
    pub fn default_case(body: Vec<Statement>) -> Self {
        Self {
            pattern: None,
            body,
        }
    }
}

impl Statement {
    /// An assignment.
    pub fn assign(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Self {
        Statement::Assign {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// A switch over `test`.
    pub fn switch(test: impl Into<Value>, cases: Vec<SwitchCase>) -> Self {
        Statement::Switch {
            test: test.into(),
            cases,
        }
    }

    /// Calls `f` on every expression root in this statement and the
    /// statements nested inside it.
    pub fn for_each_value(&self, f: &mut impl FnMut(&Value)) {
        match self {
            Statement::Assign { lhs, rhs } => {
                f(lhs);
                f(rhs);
            }
            Statement::Switch { test, cases } => {
                f(test);
                for case in cases {
                    for stmt in &case.body {
                        stmt.for_each_value(f);
                    }
                }
            }
        }
    }
}
