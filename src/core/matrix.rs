//! # Matrix Module / 矩阵模块
//!
//! The matrix holds an ordered set of dimensions and expands them into the
//! full Cartesian product of scenarios. Declaration order is significant: it
//! decides both the nesting order of generated sub-test names and which
//! dimension varies slowest in the product.
//!
//! 矩阵持有一组有序维度，并将其展开为场景的完整笛卡尔积。
//! 声明顺序很重要：它决定生成的子测试名称的嵌套顺序，以及乘积中哪个维度变化最慢。

use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;

use crate::core::dimension::Dimension;
use crate::core::scenario::{Binding, Scenario};
use crate::infra::t;

/// Diagnostic description of one dimension, as shown by dimension listing.
///
/// 单个维度的诊断描述，用于维度列表输出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionInfo {
    pub name: String,
    pub description: String,
    /// Value names in sorted order / 按顺序排列的取值名称
    pub values: Vec<String>,
}

/// A compiled, ordered set of named dimensions.
/// Every combination of a single value from each dimension forms a [`Scenario`],
/// and each test run through a runner executes once per scenario.
///
/// 一组已编译的有序命名维度。
/// 每个维度各取一个值的每种组合构成一个 [`Scenario`]，
/// 通过运行器执行的每个测试都会针对每个场景运行一次。
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    dimensions: Vec<Dimension>,
}

impl Matrix {
    /// Builds a matrix from dimensions in declaration order.
    ///
    /// With dimensions `a`, `b`, `c` and a test named `sub`, a sub-test run with
    /// values `x`, `y`, `z` is named `<root>/x/y/z/sub`.
    ///
    /// # Errors
    /// Fails on a duplicate dimension name or a dimension without values.
    pub fn new(dimensions: impl IntoIterator<Item = Dimension>) -> Result<Self> {
        let mut matrix = Self::default();
        for dimension in dimensions {
            matrix.add_dimension(dimension)?;
        }
        Ok(matrix)
    }

    /// Appends a dimension to the declared order.
    ///
    /// # Errors
    /// Fails if a dimension with the same name already exists, or if the
    /// dimension has no values.
    pub fn add_dimension(&mut self, dimension: Dimension) -> Result<()> {
        if self.dimension(dimension.name()).is_some() {
            bail!(t!("matrix.duplicate_dimension", name = dimension.name()));
        }
        if dimension.is_empty() {
            bail!(t!("matrix.empty_dimension", name = dimension.name()));
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Number of scenarios [`Matrix::scenarios`] would return.
    pub fn scenario_count(&self) -> usize {
        self.dimensions.iter().map(Dimension::len).product()
    }

    /// Computes the full Cartesian product of this matrix.
    ///
    /// Each dimension contributes one single-binding partial scenario per
    /// value, sorted by value name; those lists are then joined pairwise from
    /// the first declared dimension to the last, so the first dimension varies
    /// slowest. A matrix without dimensions has exactly one, empty, scenario.
    pub fn scenarios(&self) -> Vec<Scenario> {
        self.dimensions
            .iter()
            .map(|dimension| {
                dimension
                    .values()
                    .iter()
                    .map(|(name, value)| Binding {
                        dimension: dimension.name().to_string(),
                        name: name.clone(),
                        value: value.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .fold(vec![Scenario::default()], |acc, bindings| {
                acc.iter()
                    .flat_map(|partial| bindings.iter().map(|b| partial.extended(b.clone())))
                    .collect()
            })
    }

    /// Returns a new matrix with `dimension_name` restricted to `value_name`.
    /// This is useful for top-level tests where only one value of a dimension
    /// makes sense. `self` is left untouched.
    ///
    /// # Errors
    /// Fails if there is no such dimension, or the dimension has no such value.
    pub fn fixed_dimension(&self, dimension_name: &str, value_name: &str) -> Result<Self> {
        let Some(dimension) = self.dimension(dimension_name) else {
            bail!(t!("matrix.unknown_dimension", name = dimension_name));
        };
        let Some(restricted) = dimension.restricted_to(value_name) else {
            bail!(t!(
                "matrix.unknown_value",
                dimension = dimension_name,
                value = value_name
            ));
        };

        let dimensions = self
            .dimensions
            .iter()
            .map(|d| {
                if d.name() == dimension_name {
                    restricted.clone()
                } else {
                    d.clone()
                }
            })
            .collect();
        Ok(Self { dimensions })
    }

    /// Lists every dimension with its description and sorted value names.
    pub fn list_dimensions(&self) -> Vec<DimensionInfo> {
        self.dimensions
            .iter()
            .map(|d| DimensionInfo {
                name: d.name().to_string(),
                description: d.description().to_string(),
                values: d.value_names().map(str::to_string).collect(),
            })
            .collect()
    }
}

/// Renders the dimensions as a tab-separated table: one column per dimension
/// in declared order, a header row, a `-` divider, then the sorted value names.
/// Shorter columns are padded with empty cells.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<Vec<&str>> = self
            .dimensions
            .iter()
            .map(|d| {
                let mut column = vec![d.name(), "-"];
                column.extend(d.value_names());
                column
            })
            .collect();
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        for row in 0..rows {
            for column in &columns {
                write!(f, "{}\t", column.get(row).copied().unwrap_or(""))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
