//! # Host Module / 宿主模块
//!
//! The host is the sub-test scheduler the harness rides on. It offers the
//! capability set the core needs and nothing more: declare a named sub-test
//! (sequential or parallel-eligible), log, fail, skip, abort fatally, and
//! report the final disposition of each test.
//!
//! Test bodies are plain synchronous closures executed on tokio's blocking
//! pool. A parent test is only finished once all of its parallel children
//! have finished, and a failing child marks every ancestor failed.
//!
//! 宿主是测试工具所依赖的子测试调度器。它只提供核心所需的能力集合：
//! 声明命名子测试（顺序或可并行）、记录日志、失败、跳过、致命中止，以及报告每个测试的最终状态。
//!
//! 测试体是在 tokio 阻塞线程池上执行的普通同步闭包。
//! 只有当所有并行子测试都结束后，父测试才算结束；子测试失败会将所有祖先标记为失败。

use anyhow::{Context, Result};
use colored::*;
use futures::future::join_all;
use serde::Serialize;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use crate::core::config::HarnessConfig;
use crate::core::models::TestStatus;
use crate::infra::{lock, t};

/// Unwind payload used by [`TestContext::fatal`] and [`TestContext::skip`].
/// The status flags are already set when it is raised, so catching it needs
/// no further reporting.
enum Abort {
    Fatal,
    Skip,
}

type TestBody = Box<dyn FnOnce(&TestContext) + Send + 'static>;

/// The recorded outcome of one host test.
/// 单个宿主测试的记录结果。
#[derive(Debug, Clone, Serialize)]
pub struct TestOutcome {
    /// Full `/`-separated test name / 完整的以 `/` 分隔的测试名称
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
}

/// Everything the host observed during [`Host::run`].
/// 宿主在 [`Host::run`] 期间观察到的全部结果。
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostReport {
    /// Outcomes in completion order / 按完成顺序排列的结果
    pub outcomes: Vec<TestOutcome>,
}

impl HostReport {
    pub fn outcome(&self, name: &str) -> Option<&TestOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == TestStatus::Failed)
    }

    /// `true` when no test failed. Skipped tests do not fail a run.
    pub fn success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// The process exit code matching this report.
    pub fn exit_code(&self) -> ExitCode {
        if self.success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

struct Shared {
    runtime: Handle,
    limiter: Arc<Semaphore>,
    outcomes: Mutex<Vec<TestOutcome>>,
    verbose: bool,
}

struct Inner {
    name: String,
    parent: Option<TestContext>,
    failed: AtomicBool,
    skipped: AtomicBool,
    /// Set once nothing may change this test's disposition any more.
    /// Guards every flag update so none can land after [`TestContext::abandon`].
    abandoned: Mutex<bool>,
    children: Mutex<Vec<JoinHandle<()>>>,
    shared: Arc<Shared>,
}

/// The handle a test body uses to talk to the host, the counterpart of a
/// test framework's per-test object. Cheap to clone; clones refer to the
/// same test.
///
/// 测试体与宿主交互所用的句柄。克隆开销很小；克隆体指向同一个测试。
#[derive(Clone)]
pub struct TestContext {
    inner: Arc<Inner>,
}

impl TestContext {
    fn new(name: String, parent: Option<TestContext>, shared: Arc<Shared>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                parent,
                failed: AtomicBool::new(false),
                skipped: AtomicBool::new(false),
                abandoned: Mutex::new(false),
                children: Mutex::new(Vec::new()),
                shared,
            }),
        }
    }

    fn child(&self, name: &str) -> Self {
        Self::new(
            format!("{}/{}", self.name(), name),
            Some(self.clone()),
            self.inner.shared.clone(),
        )
    }

    /// The full name of this test, e.g. `TestFib/iter/plain/sequence`.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log(&self, message: impl Display) {
        eprintln!("    {}: {}", self.name(), message);
    }

    /// Logs `message` and marks this test failed; the body keeps running.
    pub fn error(&self, message: impl Display) {
        self.log(message.to_string().red());
        self.fail();
    }

    /// Marks this test, and every test enclosing it, failed.
    ///
    /// Has no effect once this context has been abandoned.
    pub fn fail(&self) {
        let abandoned = lock(&self.inner.abandoned);
        if *abandoned {
            return;
        }
        let mut current = Some(self);
        while let Some(ctx) = current {
            ctx.inner.failed.store(true, Ordering::SeqCst);
            current = ctx.inner.parent.as_ref();
        }
    }

    pub fn failed(&self) -> bool {
        self.inner.failed.load(Ordering::SeqCst)
    }

    pub fn skipped(&self) -> bool {
        self.inner.skipped.load(Ordering::SeqCst)
    }

    /// Logs `message`, marks this test failed and stops the current body.
    pub fn fatal(&self, message: impl Display) -> ! {
        self.error(message);
        panic::resume_unwind(Box::new(Abort::Fatal))
    }

    /// Logs `message`, marks this test skipped and stops the current body.
    pub fn skip(&self, message: impl Display) -> ! {
        self.log(message);
        if !*lock(&self.inner.abandoned) {
            self.inner.skipped.store(true, Ordering::SeqCst);
        }
        panic::resume_unwind(Box::new(Abort::Skip))
    }

    /// Runs `f`, isolating this test from aborts and panics raised inside it.
    ///
    /// Returns `None` if `f` did not return normally. A [`fatal`](Self::fatal)
    /// or [`skip`](Self::skip) has already updated the status; any other
    /// panic is reported as a failure of this test.
    pub fn catch<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Some(value),
            Err(payload) => {
                if !(*payload).is::<Abort>() {
                    self.error(t!("host.panicked", message = panic_message(&*payload)));
                }
                None
            }
        }
    }

    /// Runs `body` as a sequential sub-test named `<this test>/<name>` and
    /// returns whether it passed.
    pub fn run<F>(&self, name: &str, body: F) -> bool
    where
        F: FnOnce(&TestContext),
    {
        let child = self.child(name);
        child.execute(body, None);
        !child.failed()
    }

    /// Declares a sub-test named `<this test>/<name>` that may run
    /// concurrently with its siblings. It is scheduled when a job slot is
    /// free, and this test does not finish before it does.
    pub fn run_parallel<F>(&self, name: &str, body: F)
    where
        F: FnOnce(&TestContext) + Send + 'static,
    {
        let child = self.child(name);
        let parent = self.clone();
        let limiter = self.inner.shared.limiter.clone();

        let handle = self.runtime().spawn(async move {
            // The semaphore is never closed, so a permit is always granted.
            let permit = limiter.acquire_owned().await.ok();
            let task = tokio::task::spawn_blocking(move || child.execute(body, permit));
            if let Err(error) = task.await {
                parent.error(t!("host.join_failed", name = parent.name(), error = error));
            }
        });
        lock(&self.inner.children).push(handle);
    }

    /// Detaches this context from the test it belongs to: from now on
    /// `fail`, `error` and `skip` only log. Used for work left running after
    /// its test has been given up on, such as an overrunning teardown.
    pub(crate) fn abandon(&self) {
        *lock(&self.inner.abandoned) = true;
    }

    pub(crate) fn runtime(&self) -> &Handle {
        &self.inner.shared.runtime
    }

    /// Runs a test body to completion, waits for its parallel children and
    /// records its outcome. The job permit is released before waiting so that
    /// children can take it.
    fn execute<F>(&self, body: F, permit: Option<OwnedSemaphorePermit>)
    where
        F: FnOnce(&TestContext),
    {
        let started = Instant::now();
        self.catch(|| body(self));
        drop(permit);
        self.wait_children();
        self.finish(started.elapsed());
    }

    fn wait_children(&self) {
        loop {
            let handles = std::mem::take(&mut *lock(&self.inner.children));
            if handles.is_empty() {
                return;
            }
            for result in self.runtime().block_on(join_all(handles)) {
                if let Err(error) = result {
                    self.error(t!("host.join_failed", name = self.name(), error = error));
                }
            }
        }
    }

    fn finish(&self, duration: Duration) {
        let status = TestStatus::from_flags(self.failed(), self.skipped());
        let shared = &self.inner.shared;

        if status == TestStatus::Failed || shared.verbose {
            let line = t!(
                "host.result_line",
                status = status.label(),
                name = self.name(),
                duration = format!("{:.2?}", duration)
            );
            match status {
                TestStatus::Passed => println!("{}", line.green()),
                TestStatus::Skipped => println!("{}", line.dimmed()),
                TestStatus::Failed => println!("{}", line.red()),
            }
        }

        lock(&shared.outcomes).push(TestOutcome {
            name: self.name().to_string(),
            status,
            duration,
        });
    }
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Owns the runtime and the declared top-level tests.
///
/// ```no_run
/// use matrix_harness::{HarnessConfig, Host};
///
/// let mut host = Host::new(&HarnessConfig::default())?;
/// host.test("TestAddition", |t| {
///     if 1 + 1 != 2 {
///         t.error("arithmetic is broken");
///     }
/// });
/// let report = host.run();
/// assert!(report.success());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Host {
    runtime: Runtime,
    shared: Arc<Shared>,
    tests: Vec<(String, TestBody)>,
}

impl Host {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .build()
            .context(t!("host.runtime_failed"))?;

        let shared = Arc::new(Shared {
            runtime: runtime.handle().clone(),
            limiter: Arc::new(Semaphore::new(config.jobs())),
            outcomes: Mutex::new(Vec::new()),
            verbose: config.verbose,
        });

        Ok(Self {
            runtime,
            shared,
            tests: Vec::new(),
        })
    }

    /// Declares a top-level test. Top-level tests run concurrently once
    /// [`Host::run`] is called.
    pub fn test<F>(&mut self, name: impl Into<String>, body: F) -> &mut Self
    where
        F: FnOnce(&TestContext) + Send + 'static,
    {
        self.tests.push((name.into(), Box::new(body)));
        self
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Runs every declared test and its sub-tests to completion.
    ///
    /// The runtime is shut down without waiting for detached work, so a
    /// teardown abandoned after its timeout can never keep the process alive.
    pub fn run(self) -> HostReport {
        let Host {
            runtime,
            shared,
            tests,
        } = self;

        let handles: Vec<_> = tests
            .into_iter()
            .map(|(name, body)| {
                let ctx = TestContext::new(name, None, shared.clone());
                runtime.spawn_blocking(move || ctx.execute(body, None))
            })
            .collect();

        for result in runtime.block_on(join_all(handles)) {
            if let Err(error) = result {
                eprintln!("{}", error.to_string().red());
            }
        }

        let outcomes = std::mem::take(&mut *lock(&shared.outcomes));
        runtime.shutdown_background();
        HostReport { outcomes }
    }
}
