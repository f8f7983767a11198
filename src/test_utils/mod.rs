//! Shared test utilities for skillcat.

pub mod fixtures;

#[cfg(test)]
pub mod arbitrary;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

impl<I, E> TestCase<I, E> {
    pub fn new(name: &'static str, input: I, expected: E) -> Self {
        Self {
            name,
            input,
            expected,
        }
    }
}

/// Run every case and report all failures together.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F)
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(&I) -> E,
{
    let failures: Vec<String> = cases
        .iter()
        .filter_map(|case| {
            let actual = test_fn(&case.input);
            (actual != case.expected).then(|| {
                format!(
                    "[{}] input {:?}: expected {:?}, got {:?}",
                    case.name, case.input, case.expected, actual
                )
            })
        })
        .collect();

    assert!(
        failures.is_empty(),
        "{} of {} case(s) failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
