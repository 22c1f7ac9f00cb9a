//! End-to-end run of a complete suite, outside libtest.
//!
//! The harness owns the process here exactly as a real suite would: one
//! supervisor, one host, one summary, and the exit code taken from the host.

use matrix_harness::demo::fibonacci::{ProviderFactory, iterative, memoized_recursive, recursive};
use matrix_harness::{Dimension, HarnessConfig, Host, Matrix, Supervisor};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let config = HarnessConfig {
        quiet: true,
        ..HarnessConfig::default()
    };

    let matrix = Matrix::new([Dimension::new("fib", "fibonacci func")
        .value("recur", ProviderFactory(recursive))
        .value("memo", ProviderFactory(memoized_recursive))
        .value("iter", ProviderFactory(iterative))])
    .expect("valid matrix");

    let paths: Vec<String> = matrix.scenarios().iter().map(|s| s.path()).collect();
    assert_eq!(paths, vec!["iter", "memo", "recur"]);

    let supervisor = Supervisor::new(config.clone()).expect("first supervisor");
    let mut host = Host::new(&config).expect("runtime");

    let sup = Arc::clone(&supervisor);
    host.test("TestFib", move |t| {
        let runner = sup.new_runner(t, &matrix);
        runner.run(
            "identity",
            |_, scenario| Arc::new((scenario.value::<ProviderFactory>("fib").0)()),
            |t, provider| {
                // F(n + 1) * F(n - 1) - F(n)^2 == (-1)^n
                for n in 1..20u64 {
                    let lhs = (provider.fib(n + 1) * provider.fib(n - 1)) as i64;
                    let rhs = (provider.fib(n) * provider.fib(n)) as i64;
                    let sign = if n % 2 == 0 { 1 } else { -1 };
                    if lhs - rhs != sign {
                        t.error(format!("Cassini's identity fails at n = {}", n));
                    }
                }
            },
        );
    });

    let report = host.run();
    let summary = supervisor.print_summary();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.missing, 0);
    assert!(report.outcome("TestFib/memo/identity").is_some());

    report.exit_code()
}
