//! # Matrix Module Unit Tests / Matrix 模块单元测试
//!
//! Tests the Cartesian-product engine: scenario counts and ordering, path
//! naming, configuration errors, restriction to a fixed value and the
//! dimension listing.
//!
//! 测试笛卡尔积引擎：场景数量与顺序、路径命名、配置错误、固定维度值以及维度列表。

use matrix_harness::{Dimension, Matrix, Value};

fn fib_size_matrix() -> Matrix {
    Matrix::new([
        Dimension::new("fib", "fibonacci func")
            .value("recur", 1u32)
            .value("iter", 2u32),
        Dimension::new("size", "input size")
            .value("small", 10u64)
            .value("large", 90u64),
    ])
    .unwrap()
}

fn paths(matrix: &Matrix) -> Vec<String> {
    matrix.scenarios().iter().map(|s| s.path()).collect()
}

#[cfg(test)]
mod scenario_generation_tests {
    use super::*;

    #[test]
    fn test_scenario_count_is_product_of_value_counts() {
        let matrix = Matrix::new([
            Dimension::with_values(
                "a",
                "",
                [("1", Value::new(1)), ("2", Value::new(2)), ("3", Value::new(3))],
            ),
            Dimension::with_values("b", "", [("x", Value::new('x')), ("y", Value::new('y'))]),
            Dimension::with_values("c", "", [("only", Value::new(()))]),
        ])
        .unwrap();

        let scenarios = matrix.scenarios();
        assert_eq!(scenarios.len(), 6);
        assert_eq!(matrix.scenario_count(), 6);
        for scenario in &scenarios {
            let dims: Vec<&str> = scenario
                .bindings()
                .iter()
                .map(|b| b.dimension.as_str())
                .collect();
            assert_eq!(dims, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_paths_are_sorted_and_first_dimension_varies_slowest() {
        assert_eq!(
            paths(&fib_size_matrix()),
            vec!["iter/large", "iter/small", "recur/large", "recur/small"]
        );
    }

    #[test]
    fn test_declaration_order_drives_nesting() {
        let matrix = Matrix::new([
            Dimension::new("size", "").value("small", ()).value("large", ()),
            Dimension::new("fib", "").value("recur", ()).value("iter", ()),
        ])
        .unwrap();

        assert_eq!(
            paths(&matrix),
            vec!["large/iter", "large/recur", "small/iter", "small/recur"]
        );
    }

    #[test]
    fn test_zero_dimensions_yield_one_empty_scenario() {
        let matrix = Matrix::default();
        let scenarios = matrix.scenarios();

        assert!(matrix.is_empty());
        assert_eq!(scenarios.len(), 1);
        assert!(scenarios[0].is_empty());
        assert_eq!(scenarios[0].path(), "");
    }

    #[test]
    fn test_scenarios_are_recomputed_identically() {
        let matrix = fib_size_matrix();
        assert_eq!(paths(&matrix), paths(&matrix));
    }

    #[test]
    fn test_bound_values_are_typed() {
        let matrix = fib_size_matrix();
        let first = &matrix.scenarios()[0];

        assert_eq!(*first.value::<u32>("fib"), 2);
        assert_eq!(*first.value::<u64>("size"), 90);
        assert_eq!(first.value_name("size"), "large");
        assert!(first.try_value::<String>("fib").is_none());
    }
}

#[cfg(test)]
mod configuration_error_tests {
    use super::*;

    #[test]
    fn test_duplicate_dimension_is_rejected() {
        let err = Matrix::new([
            Dimension::new("fib", "first").value("iter", ()),
            Dimension::new("fib", "second").value("recur", ()),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("fib"));
    }

    #[test]
    fn test_empty_dimension_is_rejected() {
        let mut matrix = Matrix::default();
        let err = matrix
            .add_dimension(Dimension::new("nothing", "no values"))
            .unwrap_err();

        assert!(err.to_string().contains("nothing"));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_add_dimension_appends_in_order() {
        let mut matrix = Matrix::default();
        matrix
            .add_dimension(Dimension::new("b", "").value("1", ()))
            .unwrap();
        matrix
            .add_dimension(Dimension::new("a", "").value("1", ()))
            .unwrap();

        let names: Vec<&str> = matrix.dimensions().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}

#[cfg(test)]
mod fixed_dimension_tests {
    use super::*;

    #[test]
    fn test_fixed_dimension_restricts_only_the_derived_matrix() {
        let matrix = fib_size_matrix();
        let fixed = matrix.fixed_dimension("fib", "iter").unwrap();

        assert_eq!(paths(&fixed), vec!["iter/large", "iter/small"]);
        assert!(
            fixed
                .scenarios()
                .iter()
                .all(|s| s.value_name("fib") == "iter")
        );
        assert_eq!(matrix.scenario_count(), 4);
        assert_eq!(
            paths(&matrix),
            vec!["iter/large", "iter/small", "recur/large", "recur/small"]
        );
    }

    #[test]
    fn test_fixed_dimension_keeps_the_value_payload() {
        let fixed = fib_size_matrix().fixed_dimension("size", "small").unwrap();
        let scenarios = fixed.scenarios();

        assert_eq!(scenarios.len(), 2);
        assert!(scenarios.iter().all(|s| *s.value::<u64>("size") == 10));
    }

    #[test]
    fn test_fixed_dimension_unknown_names_are_errors() {
        let matrix = fib_size_matrix();

        assert!(matrix.fixed_dimension("colour", "red").is_err());
        assert!(matrix.fixed_dimension("fib", "memo").is_err());
    }
}

#[cfg(test)]
mod listing_tests {
    use super::*;

    #[test]
    fn test_list_dimensions() {
        let dims = fib_size_matrix().list_dimensions();

        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].name, "fib");
        assert_eq!(dims[0].description, "fibonacci func");
        assert_eq!(dims[0].values, vec!["iter", "recur"]);
        assert_eq!(dims[1].values, vec!["large", "small"]);
    }

    #[test]
    fn test_table_pads_ragged_columns() {
        let matrix = Matrix::new([
            Dimension::new("fib", "")
                .value("recur", ())
                .value("iter", ())
                .value("memo", ()),
            Dimension::new("size", "").value("small", ()),
        ])
        .unwrap();

        let expected = "fib\tsize\t\n\
                        -\t-\t\n\
                        iter\tsmall\t\n\
                        memo\t\t\n\
                        recur\t\t\n";
        assert_eq!(matrix.to_string(), expected);
    }

    #[test]
    fn test_empty_matrix_renders_nothing() {
        assert_eq!(Matrix::default().to_string(), "");
    }
}
