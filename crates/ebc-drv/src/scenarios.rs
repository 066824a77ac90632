//! The built-in scenario suite run by `ebc --test`: each scenario is a
//! short Eightebed program with an expected outcome, exercised against
//! the full pipeline exactly as a real invocation would.

use ebc_util::{CompileError, FileId};

use crate::session::compile_to_c;

pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
    pub expect: Expect,
}

pub enum Expect {
    Compiles,
    SafetyError,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "allocate-guard-print-free",
            source: r#"
                type node struct { int value; ptr to node next; };
                var ptr to node jim;
                { jim = malloc node;
                  if valid jim { [@jim].value = (1 + 4); print [@jim].value; }
                  free jim; }
            "#,
            expect: Expect::Compiles,
        },
        Scenario {
            name: "unguarded-dereference-rejected",
            source: r#"
                type node struct { int v; };
                var ptr to node p;
                { p = malloc node; [@p].v = 1; }
            "#,
            expect: Expect::SafetyError,
        },
        Scenario {
            name: "alias-invalidation",
            source: r#"
                type node struct { int v; ptr to node next; };
                var ptr to node a; var ptr to node b;
                { a = malloc node;
                  if valid a { b = a; }
                  free a;
                  if valid b { print [@b].v; } else { print 0; } }
            "#,
            expect: Expect::Compiles,
        },
        Scenario {
            name: "assignment-terminates-safe-start",
            source: r#"
                type node struct { int v; };
                var ptr to node p; var int x;
                { p = malloc node;
                  if valid p { x = 1; [@p].v = 2; } }
            "#,
            expect: Expect::SafetyError,
        },
        Scenario {
            name: "equality-vs-assignment",
            source: r#"
                var int a; var int b;
                { a = 1; b = (a = 1); print b; }
            "#,
            expect: Expect::Compiles,
        },
        Scenario {
            name: "cycle-safety",
            source: r#"
                type node struct { int v; ptr to node next; };
                var ptr to node x; var ptr to node y;
                { x = malloc node; y = malloc node;
                  if valid x { if valid y { [@x].next = y; } }
                  if valid y { if valid x { [@y].next = x; } }
                  free x; }
            "#,
            expect: Expect::Compiles,
        },
    ]
}

/// Run every scenario, printing a pass/fail line for each. Returns `true`
/// iff all scenarios matched their expected outcome.
pub fn run_all() -> bool {
    let mut all_passed = true;
    for scenario in scenarios() {
        let result = compile_to_c(scenario.source, FileId::DUMMY);
        let passed = match (&scenario.expect, &result) {
            (Expect::Compiles, Ok(_)) => true,
            (Expect::SafetyError, Err(CompileError::Safety { .. })) => true,
            _ => false,
        };
        println!("{} ... {}", scenario.name, if passed { "ok" } else { "FAILED" });
        all_passed &= passed;
    }
    all_passed
}
