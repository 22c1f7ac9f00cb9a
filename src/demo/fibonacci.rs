//! Fibonacci providers and the suite that checks them across a matrix of
//! implementations (`fib`) and enhancements (`enhancement`).

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::dimension::Dimension;
use crate::core::fixture::{Fixture, Teardown};
use crate::core::matrix::Matrix;
use crate::core::scenario::Scenario;
use crate::core::supervisor::Supervisor;
use crate::infra::host::{Host, TestContext};
use crate::infra::lock;

/// A provider of a Fibonacci function.
pub trait Provider: Send + Sync {
    fn fib(&self, n: u64) -> u64;
}

/// Gets Fibonacci numbers the hard way.
pub struct Recursive;

impl Provider for Recursive {
    fn fib(&self, n: u64) -> u64 {
        if n < 2 {
            return n;
        }
        self.fib(n - 1) + self.fib(n - 2)
    }
}

/// Gets Fibonacci numbers without burning the stack.
pub struct Iterative;

impl Provider for Iterative {
    fn fib(&self, n: u64) -> u64 {
        if n < 2 {
            return n;
        }
        let (mut acc, mut last) = (1u64, 1u64);
        for _ in 2..n {
            (acc, last) = (acc + last, acc);
        }
        acc
    }
}

/// Remembers the results of the provider it wraps.
pub struct Memoized {
    results: Mutex<HashMap<u64, u64>>,
    provider: Box<dyn Provider>,
}

impl Memoized {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            provider,
        }
    }

    pub fn cached(&self) -> usize {
        lock(&self.results).len()
    }
}

impl Provider for Memoized {
    fn fib(&self, n: u64) -> u64 {
        if let Some(result) = lock(&self.results).get(&n) {
            return *result;
        }
        let result = self.provider.fib(n);
        lock(&self.results).insert(n, result);
        result
    }
}

/// Value type of the `fib` dimension: builds a fresh provider.
#[derive(Clone, Copy)]
pub struct ProviderFactory(pub fn() -> Box<dyn Provider>);

/// Value type of the `enhancement` dimension: decorates a provider.
#[derive(Clone, Copy)]
pub struct Enhancer(pub fn(Box<dyn Provider>) -> Box<dyn Provider>);

pub fn recursive() -> Box<dyn Provider> {
    Box::new(Recursive)
}

pub fn iterative() -> Box<dyn Provider> {
    Box::new(Iterative)
}

pub fn memoized_recursive() -> Box<dyn Provider> {
    Box::new(Memoized::new(recursive()))
}

fn plain(provider: Box<dyn Provider>) -> Box<dyn Provider> {
    provider
}

fn memoize(provider: Box<dyn Provider>) -> Box<dyn Provider> {
    Box::new(Memoized::new(provider))
}

/// The full demo matrix. Always returns a fresh matrix so tests never share
/// references.
pub fn matrix() -> Result<Matrix> {
    Matrix::new([
        Dimension::new("fib", "fibonacci func")
            .value("recur", ProviderFactory(recursive))
            .value("iter", ProviderFactory(iterative)),
        Dimension::new("enhancement", "which enhancement to use")
            .value("plain", Enhancer(plain))
            .value("memoized", Enhancer(memoize)),
    ])
}

/// Desired initial conditions of a [`FibFixture`].
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    pub prewarm: Vec<u64>,
}

impl FixtureConfig {
    pub fn prewarmed(values: &[u64]) -> Self {
        Self {
            prewarm: values.to_vec(),
        }
    }

    /// Realizes the fixture for `scenario`. A scenario without an
    /// `enhancement` binding uses its `fib` provider as is.
    pub fn init(&self, t: &TestContext, scenario: &Scenario) -> FibFixture {
        let make = scenario.value::<ProviderFactory>("fib");
        let provider = match scenario.try_value::<Enhancer>("enhancement") {
            Some(enhance) => (enhance.0)((make.0)()),
            None => (make.0)(),
        };
        for &n in &self.prewarm {
            provider.fib(n);
        }
        if !self.prewarm.is_empty() {
            t.log(format!("prewarmed {:?}", self.prewarm));
        }
        FibFixture {
            provider,
            prewarmed: self.prewarm.clone(),
        }
    }

    pub fn factory(self) -> impl Fn(&TestContext, &Scenario) -> FibFixture + Send + Sync + 'static {
        move |t: &TestContext, s: &Scenario| self.init(t, s)
    }
}

/// A fully realized fixture, generated from a [`FixtureConfig`] and a scenario.
pub struct FibFixture {
    provider: Box<dyn Provider>,
    prewarmed: Vec<u64>,
}

impl FibFixture {
    pub fn fib(&self, n: u64) -> u64 {
        self.provider.fib(n)
    }
}

impl Teardown for FibFixture {
    fn teardown(&mut self, t: &TestContext) {
        t.log(format!("discarding {} prewarmed values", self.prewarmed.len()));
        self.prewarmed.clear();
    }
}

impl Fixture for FibFixture {
    fn as_teardown(&mut self) -> Option<&mut dyn Teardown> {
        if self.prewarmed.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

const SEQUENCE: [u64; 11] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];

/// Checks the first Fibonacci numbers, one sequential sub-test per input.
pub fn check_sequence(t: &TestContext, f: &FibFixture) {
    for (n, want) in SEQUENCE.iter().copied().enumerate() {
        let n = n as u64;
        t.run(&n.to_string(), |t| {
            let got = f.fib(n);
            if got != want {
                t.error(format!("Fib({}) == {}; want {}", n, got, want));
            }
        });
    }
}

/// Declares the demo's top-level tests.
pub fn register(supervisor: &Arc<Supervisor>, host: &mut Host) -> Result<()> {
    let full = matrix()?;
    let iterative_only = full.fixed_dimension("fib", "iter")?;

    let sup = Arc::clone(supervisor);
    host.test("TestFib", move |t| {
        let runner = sup.new_runner(t, &full);
        runner.run("sequence", FixtureConfig::default().factory(), check_sequence);
        runner.run(
            "prewarmed",
            FixtureConfig::prewarmed(&[5, 10]).factory(),
            check_sequence,
        );
    });

    let sup = Arc::clone(supervisor);
    host.test("TestFibLarge", move |t| {
        let runner = sup.new_runner(t, &iterative_only);
        runner.run("ninety", FixtureConfig::default().factory(), |t, f| {
            let got = f.fib(90);
            if got != 2_880_067_194_370_816_120 {
                t.error(format!("Fib(90) == {}", got));
            }
        });
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers_agree() {
        let providers: Vec<Box<dyn Provider>> = vec![recursive(), iterative(), memoized_recursive()];
        for provider in &providers {
            let got: Vec<u64> = (0..11).map(|n| provider.fib(n)).collect();
            assert_eq!(got, SEQUENCE);
        }
    }

    #[test]
    fn test_memoized_caches_results() {
        let memo = Memoized::new(iterative());
        assert_eq!(memo.fib(20), 6765);
        assert_eq!(memo.fib(20), 6765);
        assert_eq!(memo.cached(), 1);
    }

    #[test]
    fn test_matrix_paths() {
        let paths: Vec<String> = matrix().unwrap().scenarios().iter().map(|s| s.path()).collect();
        assert_eq!(
            paths,
            vec!["iter/memoized", "iter/plain", "recur/memoized", "recur/plain"]
        );
    }
}
