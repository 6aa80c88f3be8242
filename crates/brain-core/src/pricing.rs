//! Token pricing used to estimate request cost.
//!
//! The estimate is derived from reported token counts, never queried from the
//! provider, so it can drift from the actual invoice.

use serde::{Deserialize, Serialize};

use crate::message::TokenUsage;

/// USD prices per 1000 tokens for the two token categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl PriceTable {
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Published gpt-4o-mini pricing.
    pub const fn gpt_4o_mini() -> Self {
        Self::new(0.00015, 0.0006)
    }

    /// Estimated cost in USD for the given token counts.
    pub fn cost(&self, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        (prompt_tokens as f64 / 1000.0) * self.input_per_1k
            + (completion_tokens as f64 / 1000.0) * self.output_per_1k
    }

    pub fn cost_of(&self, usage: &TokenUsage) -> f64 {
        self.cost(usage.prompt_tokens, usage.completion_tokens)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::gpt_4o_mini()
    }
}
