//! Gradient boosting regressor schemas
//!
//! The worked operator definition: a base document describing scikit-learn
//! 0.20's GradientBoostingRegressor, plus the version-gated customization
//! layers that track the estimator through 0.22, 0.24, and 1.0.

use semver::Version;
use serde_json::{json, Value};

use crate::customize::{Customization, CustomizationChain};
use crate::error::Result;
use crate::operator::{OperatorDocument, Tags};
use crate::schema::{
    AllOf, AnyOf, Array, Bool, Distribution, Enum, Float, Int, Json, Null, Object, Str,
};

/// The ratio-or-count pattern shared by several tree parameters: an integer
/// count (not searchable) or a searchable fraction.
fn count_or_fraction(max_fraction: f64, default: Value, desc: &str) -> AnyOf {
    AnyOf::new()
        .with_variant(Int::new().not_for_optimizer())
        .with_variant(
            Float::new()
                .with_minimum_for_optimizer(0.01)
                .with_maximum_for_optimizer(max_fraction)
                .with_distribution(Distribution::Uniform),
        )
        .with_default(default)
        .with_desc(desc)
}

/// A fragment validated only by the wrapped library's own type tag,
/// e.g. a numpy random generator instance.
fn type_tagged(tag: &str) -> Json {
    let mut map = serde_json::Map::new();
    map.insert("laleType".into(), Value::String(tag.into()));
    Json::from_map(map)
}

fn hyperparams_schema() -> AllOf {
    let params = Object::new()
        .with_required([
            "loss",
            "learning_rate",
            "n_estimators",
            "subsample",
            "criterion",
            "min_samples_split",
            "min_samples_leaf",
            "min_weight_fraction_leaf",
            "max_depth",
            "min_impurity_decrease",
            "min_impurity_split",
            "init",
            "random_state",
            "max_features",
            "alpha",
            "verbose",
            "max_leaf_nodes",
            "warm_start",
            "presort",
            "validation_fraction",
            "n_iter_no_change",
            "tol",
        ])
        .with_relevant_to_optimizer([
            "loss",
            "n_estimators",
            "min_samples_split",
            "min_samples_leaf",
            "max_depth",
            "max_features",
            "alpha",
            "presort",
        ])
        .with_additional_properties(false)
        .with_prop(
            "loss",
            Enum::new(["ls", "lad", "huber", "quantile"])
                .with_default("ls")
                .with_desc("Loss function to be optimized"),
        )
        .with_prop(
            "learning_rate",
            Float::new()
                .with_default(0.1)
                .with_desc("Learning rate shrinks the contribution of each tree"),
        )
        .with_prop(
            "n_estimators",
            Int::new()
                .with_minimum_for_optimizer(10)
                .with_maximum_for_optimizer(100)
                .with_distribution(Distribution::Uniform)
                .with_default(100)
                .with_desc("The number of boosting stages to perform"),
        )
        .with_prop(
            "subsample",
            Float::new()
                .with_default(1.0)
                .with_desc("The fraction of samples used for fitting the individual base learners"),
        )
        .with_prop(
            "criterion",
            // The published base fragment carries no forOptimizer key;
            // search relevance is governed by the relevantToOptimizer
            // list, which does not include criterion.
            Str::new()
                .for_optimizer()
                .with_default("friedman_mse")
                .with_desc("The function to measure the quality of a split"),
        )
        .with_prop(
            "min_samples_split",
            count_or_fraction(
                0.5,
                json!(2),
                "The minimum number of samples required to split an internal node",
            ),
        )
        .with_prop(
            "min_samples_leaf",
            count_or_fraction(
                0.5,
                json!(1),
                "The minimum number of samples required to be at a leaf node",
            ),
        )
        .with_prop(
            "min_weight_fraction_leaf",
            Float::new()
                .with_default(0.0)
                .with_desc("The minimum weighted fraction of the sum total of weights required at a leaf node"),
        )
        .with_prop(
            "max_depth",
            Int::new()
                .with_minimum_for_optimizer(3)
                .with_maximum_for_optimizer(5)
                .with_distribution(Distribution::Uniform)
                .with_default(3)
                .with_desc("Maximum depth of the individual regression estimators"),
        )
        .with_prop(
            "min_impurity_decrease",
            Float::new()
                .with_default(0.0)
                .with_desc("A node will be split if the split decreases impurity by at least this value"),
        )
        .with_prop(
            "min_impurity_split",
            AnyOf::new()
                .with_variant(Float::new())
                .with_variant(Null::new())
                .with_default(Value::Null)
                .with_desc("Threshold for early stopping in tree growth"),
        )
        .with_prop(
            "init",
            Enum::new([Value::Null])
                .with_default(Value::Null)
                .with_desc("An estimator object used to compute the initial predictions"),
        )
        .with_prop(
            "random_state",
            AnyOf::new()
                .with_variant(Int::new())
                .with_variant(type_tagged("numpy.random.RandomState"))
                .with_variant(Null::new())
                .with_default(Value::Null)
                .with_desc("Seed, generator instance, or none for the global generator"),
        )
        .with_prop(
            "max_features",
            AnyOf::new()
                .with_variant(Int::new().not_for_optimizer())
                .with_variant(
                    Float::new()
                        .with_minimum_for_optimizer(0.01)
                        .with_maximum_for_optimizer(1.0)
                        .with_distribution(Distribution::Uniform),
                )
                .with_variant(Str::new())
                .with_variant(Null::new())
                .with_default(Value::Null)
                .with_desc("The number of features to consider when looking for the best split"),
        )
        .with_prop(
            "alpha",
            Float::new()
                .with_minimum_for_optimizer(1e-10)
                .with_maximum_for_optimizer(1.0)
                .with_distribution(Distribution::LogUniform)
                .with_default(0.9)
                .with_desc("The alpha-quantile of the huber and quantile loss functions"),
        )
        .with_prop(
            "verbose",
            Int::new().with_default(0).with_desc("Enable verbose output"),
        )
        .with_prop(
            "max_leaf_nodes",
            AnyOf::new()
                .with_variant(Int::new())
                .with_variant(Null::new())
                .with_default(Value::Null)
                .with_desc("Grow trees with max_leaf_nodes in best-first fashion"),
        )
        .with_prop(
            "warm_start",
            Bool::new()
                .with_default(false)
                .with_desc("Reuse the solution of the previous call to fit and add more estimators"),
        )
        .with_prop(
            "presort",
            Enum::new(["auto"])
                .with_default("auto")
                .with_desc("Whether to presort the data to speed up the finding of best splits"),
        )
        .with_prop(
            "validation_fraction",
            Float::new()
                .with_default(0.1)
                .with_desc("The proportion of training data set aside as validation set for early stopping"),
        )
        .with_prop(
            "n_iter_no_change",
            AnyOf::new()
                .with_variant(Int::new())
                .with_variant(Null::new())
                .with_default(Value::Null)
                .with_desc("Iterations without improvement before early stopping terminates training"),
        )
        .with_prop(
            "tol",
            Float::new()
                .with_default(0.0001)
                .with_desc("Tolerance for the early stopping"),
        );

    let alpha_constraint = AnyOf::new()
        .with_variant(Object::new().with_prop("alpha", Enum::new([0.9])))
        .with_variant(Object::new().with_prop("loss", Enum::new(["huber", "quantile"])))
        .with_desc("alpha, only if loss='huber' or loss='quantile'");

    AllOf::new()
        .with_branch(params)
        .with_branch(alpha_constraint)
        .with_desc("Gradient Boosting for regression")
}

fn samples_schema() -> Array {
    Array::new(Array::new(Float::new())).with_desc("The input samples")
}

/// The 0.20 base document.
pub fn base_document() -> OperatorDocument {
    OperatorDocument::new("GradientBoostingRegressor")
        .with_desc("Combined schema for expected data and hyperparameters.")
        .with_documentation_url(
            "https://scikit-learn.org/0.20/modules/generated/sklearn.ensemble.GradientBoostingRegressor",
        )
        .with_import_from("sklearn.ensemble")
        .with_tags(Tags::op(["estimator", "regressor"]))
        .with_hyperparams(hyperparams_schema())
        .with_input_fit(
            Object::new()
                .with_required(["X", "y"])
                .with_desc("Fit the gradient boosting model.")
                .with_prop("X", samples_schema())
                .with_prop(
                    "y",
                    Array::new(Float::new()).with_desc("Target values"),
                )
                .with_prop(
                    "sample_weight",
                    AnyOf::new()
                        .with_variant(Array::new(Float::new()))
                        .with_variant(Null::new())
                        .with_desc("Sample weights"),
                ),
        )
        .with_input_apply(
            Object::new()
                .with_required(["X"])
                .with_desc("Predict regression target for X.")
                .with_prop("X", samples_schema()),
        )
        .with_output_apply(Array::new(Float::new()).with_desc("The predicted values."))
}

/// The customization layers tracking scikit-learn releases past 0.20.
pub fn customizations() -> Result<CustomizationChain> {
    CustomizationChain::new()
        .layer(
            Version::new(0, 22, 0),
            Customization::new()
                .set_prop(
                    "presort",
                    AnyOf::new()
                        .with_variant(Bool::new())
                        .with_variant(Enum::new(["deprecated", "auto"]))
                        .with_default("deprecated")
                        .with_desc("This parameter is deprecated and will be removed in v0.24."),
                )
                .set_prop(
                    "ccp_alpha",
                    Float::new()
                        .with_default(0.0)
                        .not_for_optimizer()
                        .with_minimum(0.0)
                        .with_maximum_for_optimizer(0.1)
                        .with_desc("Complexity parameter used for minimal cost-complexity pruning."),
                )
                .set_as_available(true),
        )?
        .layer(
            Version::new(0, 24, 0),
            Customization::new()
                .remove_prop("presort")
                .set_prop(
                    "criterion",
                    AnyOf::new()
                        .with_variant(Enum::new(["mse", "friedman_mse"]))
                        .with_variant(
                            Enum::new(["mae"])
                                .with_desc("Deprecated since version 0.24.")
                                .not_for_optimizer(),
                        )
                        .with_default("friedman_mse")
                        .with_desc("Function to measure the quality of a split."),
                )
                .set_as_available(true),
        )?
        .layer(
            Version::new(1, 0, 0),
            Customization::new()
                .set_prop(
                    "loss",
                    AnyOf::new()
                        .with_variant(Enum::new([
                            "squared_error",
                            "absolute_error",
                            "huber",
                            "quantile",
                        ]))
                        .with_variant(
                            Enum::new(["ls", "lad"])
                                .with_desc("Deprecated since version 1.0")
                                .not_for_optimizer(),
                        )
                        .with_default("squared_error")
                        .with_desc("Loss function to be optimized."),
                )
                .set_prop(
                    "criterion",
                    AnyOf::new()
                        .with_variant(Enum::new(["squared_error", "friedman_mse"]))
                        .with_variant(
                            Enum::new(["mae", "mse"])
                                .with_desc("Deprecated since version 0.24 and 1.0.")
                                .not_for_optimizer(),
                        )
                        .with_default("friedman_mse")
                        .with_desc("Function to measure the quality of a split."),
                )
                .remove_prop("min_impurity_split")
                .set_as_available(true),
        )
}

/// The document matching `version`: the base document with every layer at
/// or below `version` folded in.
pub fn document_for(version: &Version) -> Result<OperatorDocument> {
    customizations()?.apply(&base_document(), version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_document_lists_all_params() {
        let doc = base_document();
        let object = &doc.hyperparams()["allOf"][0];
        let properties = object["properties"].as_object().unwrap();
        let required = object["required"].as_array().unwrap();
        assert_eq!(
            properties.len(),
            required.len(),
            "every declared parameter is required"
        );
        for name in required {
            assert!(
                properties.contains_key(name.as_str().unwrap()),
                "required name {name} must have a property schema"
            );
        }
    }

    #[test]
    fn test_base_criterion_is_a_plain_string_fragment() {
        let doc = base_document();
        let criterion = &doc.hyperparams()["allOf"][0]["properties"]["criterion"];
        assert_eq!(criterion["type"], serde_json::json!("string"));
        assert!(
            criterion.get("forOptimizer").is_none(),
            "the base fragment carries no relevance key"
        );
    }

    #[test]
    fn test_relevance_list_subset_of_properties() {
        let doc = base_document();
        let object = &doc.hyperparams()["allOf"][0];
        let properties = object["properties"].as_object().unwrap();
        for name in object["relevantToOptimizer"].as_array().unwrap() {
            assert!(properties.contains_key(name.as_str().unwrap()));
        }
    }
}
