//! # Dimension Module / 维度模块
//!
//! A dimension is one named axis of test variation: a name, a description
//! used in help output, and a set of named values. Values are type-erased so
//! that a single matrix can mix function pointers, strategy objects and plain
//! data across its dimensions.
//!
//! 维度是测试变化的一个命名轴：名称、用于帮助输出的描述以及一组命名取值。
//! 取值是类型擦除的，因此一个矩阵的不同维度可以混合函数指针、策略对象和普通数据。

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An opaque, cheaply clonable dimension value.
///
/// Consumers get the payload back with [`Value::downcast_ref`] using the same
/// type it was registered with.
///
/// 不透明且可廉价克隆的维度取值。
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

impl Value {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the payload if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Value(..)")
    }
}

/// Represents one dimension of a test matrix.
/// The value names form part of every generated sub-test path, so they are
/// kept sorted: iteration order is lexicographic by value name.
///
/// 表示测试矩阵的一个维度。
/// 取值名称构成每个生成的子测试路径的一部分，因此保持有序：按取值名称的字典序迭代。
#[derive(Debug, Clone)]
pub struct Dimension {
    name: String,
    description: String,
    values: BTreeMap<String, Value>,
}

impl Dimension {
    /// Creates a dimension with no values yet. Add values with [`Dimension::value`].
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            values: BTreeMap::new(),
        }
    }

    /// Creates a dimension from already type-erased values.
    pub fn with_values<K, I>(name: impl Into<String>, description: impl Into<String>, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Adds a named value. A later value with the same name replaces the earlier one.
    pub fn value<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.values.insert(name.into(), Value::new(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value names in sorted order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Returns a copy of this dimension holding only `value_name`, or `None`
    /// when the dimension has no such value.
    pub(crate) fn restricted_to(&self, value_name: &str) -> Option<Self> {
        let value = self.values.get(value_name)?;
        Some(Self {
            name: self.name.clone(),
            description: self.description.clone(),
            values: BTreeMap::from([(value_name.to_string(), value.clone())]),
        })
    }
}
