//! # Fixture Module / 夹具模块
//!
//! A fixture is the test-ready object a fixture factory builds for one
//! scenario. The test body receives it ready-made; once the body has returned
//! (or aborted), the runner tears it down if, and only if, the fixture exposes
//! the optional [`Teardown`] capability.
//!
//! 夹具是夹具工厂为单个场景构建的、可直接用于测试的对象。
//! 测试体直接接收构建好的夹具；测试体返回（或中止）后，
//! 仅当夹具提供可选的 [`Teardown`] 能力时，运行器才会对其进行清理。

use crate::infra::host::TestContext;

/// Something that must be cleaned up after the test that used it.
///
/// Teardown runs on its own unit of work, raced against the runner's teardown
/// timeout. If the timeout wins, the teardown keeps running in the background
/// and its outcome no longer affects the recorded test status.
///
/// 测试结束后必须清理的对象。
pub trait Teardown: Send {
    fn teardown(&mut self, t: &TestContext);
}

/// A per-scenario test fixture.
///
/// Fixtures that need no cleanup implement this trait with an empty body.
/// Fixtures that do override [`Fixture::as_teardown`]:
///
/// ```
/// use matrix_harness::{Fixture, Teardown, TestContext};
///
/// struct Server;
///
/// impl Teardown for Server {
///     fn teardown(&mut self, t: &TestContext) {
///         t.log("stopping server");
///     }
/// }
///
/// impl Fixture for Server {
///     fn as_teardown(&mut self) -> Option<&mut dyn Teardown> {
///         Some(self)
///     }
/// }
/// ```
pub trait Fixture: Send + 'static {
    /// The teardown capability of this fixture, if any.
    fn as_teardown(&mut self) -> Option<&mut dyn Teardown> {
        None
    }
}

impl Fixture for () {}

impl<T: Send + Sync + ?Sized + 'static> Fixture for std::sync::Arc<T> {}
