//! # Scenario Module / 场景模块
//!
//! A scenario is one point of the Cartesian product of a matrix: exactly one
//! binding per dimension, in the matrix's declared dimension order.
//!
//! 场景是矩阵笛卡尔积中的一个点：按矩阵声明的维度顺序，每个维度恰好一个绑定。

use std::any::{type_name, Any};
use std::fmt;

use crate::core::dimension::Value;

/// A named value belonging to a particular dimension.
///
/// 属于某个特定维度的命名取值。
#[derive(Debug, Clone)]
pub struct Binding {
    /// Name of the dimension this binding belongs to / 绑定所属维度的名称
    pub dimension: String,
    /// Name of the chosen value, used as a sub-test path segment / 所选取值的名称，作为子测试路径的一段
    pub name: String,
    /// The chosen value itself / 所选取值本身
    pub value: Value,
}

/// A single combination of values from a matrix.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    bindings: Vec<Binding>,
}

impl Scenario {
    /// Returns this scenario with `binding` appended.
    pub(crate) fn extended(&self, binding: Binding) -> Self {
        let mut bindings = Vec::with_capacity(self.bindings.len() + 1);
        bindings.extend(self.bindings.iter().cloned());
        bindings.push(binding);
        Self { bindings }
    }

    /// The sub-test path of this scenario, e.g. `dim1ValueName/dim2ValueName`.
    ///
    /// This string is the literal name the host uses to address the generated
    /// sub-test, so both the `/` separator and the order are fixed.
    pub fn path(&self) -> String {
        self.bindings
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn binding(&self, dimension: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.dimension == dimension)
    }

    /// The name of the value chosen for `dimension`.
    ///
    /// # Panics
    /// If this scenario has no binding for `dimension`.
    pub fn value_name(&self, dimension: &str) -> &str {
        &self.expect_binding(dimension).name
    }

    /// Returns the value bound to `dimension`, if present and of type `T`.
    pub fn try_value<T: Any>(&self, dimension: &str) -> Option<&T> {
        self.binding(dimension)?.value.downcast_ref::<T>()
    }

    /// Returns the value bound to `dimension` as a `T`.
    ///
    /// # Panics
    /// Looking up a dimension that was never part of the matrix that produced
    /// this scenario, or asking for a type other than the one registered, is a
    /// programming error and panics.
    pub fn value<T: Any>(&self, dimension: &str) -> &T {
        let binding = self.expect_binding(dimension);
        match binding.value.downcast_ref::<T>() {
            Some(value) => value,
            None => panic!(
                "value {:?} of dimension {:?} is not a {}",
                binding.name,
                dimension,
                type_name::<T>()
            ),
        }
    }

    fn expect_binding(&self, dimension: &str) -> &Binding {
        match self.binding(dimension) {
            Some(binding) => binding,
            None => panic!("scenario contains no value for dimension {:?}", dimension),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
