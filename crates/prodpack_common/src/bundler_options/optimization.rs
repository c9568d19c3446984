use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{MinimizerDirective, SplitChunksOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOptions {
  pub split_chunks: SplitChunksOptions,
  pub minimizer: Vec<MinimizerDirective>,
}
