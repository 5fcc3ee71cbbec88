//! Cost mapping: parsed resources -> priced cost lines.
//!
//! Provider detection is prefix-based over a closed set (AWS, Azure, GCP).
//! Resources whose type matches no known prefix are dropped. Declared
//! instance types missing from the price table degrade to the provider's
//! default type and are marked as estimates. This mapping never fails.

use serde::{Deserialize, Serialize};

use crate::parser::ParsedResource;
use crate::prices::{
    price_of, AWS_PRICES, AZURE_PRICES, DEFAULT_AWS_TYPE, DEFAULT_AZURE_TYPE, DEFAULT_GCP_TYPE,
    GCP_PRICES,
};

/// Supported cloud providers, inferred from a resource's type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
    #[serde(rename = "GCP")]
    Gcp,
}

impl Provider {
    /// Detect the provider from a resource type tag. Precedence: AWS, then
    /// Azure, then GCP. `None` means the resource is dropped from pricing.
    pub fn from_resource_type(resource_type: &str) -> Option<Self> {
        if resource_type.starts_with("aws") {
            Some(Provider::Aws)
        } else if resource_type.starts_with("azurerm") {
            Some(Provider::Azure)
        } else if resource_type.starts_with("google") {
            Some(Provider::Gcp)
        } else {
            None
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
            Provider::Gcp => "GCP",
        }
    }

    /// Property key holding the declared instance/size/machine type.
    pub(crate) fn type_key(&self) -> &'static str {
        match self {
            Provider::Aws => "instance_type",
            Provider::Azure => "size",
            Provider::Gcp => "machine_type",
        }
    }

    /// Default type substituted when the declared type is absent or unpriced.
    /// Guaranteed present in this provider's table (checked in prices tests).
    pub(crate) fn default_type(&self) -> &'static str {
        match self {
            Provider::Aws => DEFAULT_AWS_TYPE,
            Provider::Azure => DEFAULT_AZURE_TYPE,
            Provider::Gcp => DEFAULT_GCP_TYPE,
        }
    }

    pub(crate) fn price_table(&self) -> &'static [(&'static str, f64)] {
        match self {
            Provider::Aws => AWS_PRICES,
            Provider::Azure => AZURE_PRICES,
            Provider::Gcp => GCP_PRICES,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One priced resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub resource_name: String,
    /// Resolved type identifier, suffixed with `" (?)"` when the price came
    /// from the provider default instead of an exact table entry.
    pub instance_type: String,
    pub monthly_cost: f64,
    pub is_estimate: bool,
    pub provider: Provider,
}

/// Map resources to cost lines. Order-preserving; resources with an
/// unrecognized type are dropped, so output length <= input length.
pub fn calculate_costs(resources: &[ParsedResource]) -> Vec<CostLine> {
    resources
        .iter()
        .filter_map(|resource| {
            let provider = Provider::from_resource_type(&resource.resource_type)?;
            let table = provider.price_table();

            let declared = resource
                .properties
                .get(provider.type_key())
                .map(String::as_str)
                .unwrap_or_else(|| provider.default_type());

            let (instance_type, monthly_cost, is_estimate) = match price_of(table, declared) {
                Some(price) => (declared.to_string(), price, false),
                None => {
                    let default = provider.default_type();
                    let price = price_of(table, default).unwrap_or_default();
                    (format!("{} (?)", default), price, true)
                }
            };

            Some(CostLine {
                resource_name: resource.name.clone(),
                instance_type,
                monthly_cost,
                is_estimate,
                provider,
            })
        })
        .collect()
}

/// Sum of monthly costs over the given lines. 0.0 for an empty slice.
pub fn total_cost(lines: &[CostLine]) -> f64 {
    lines.iter().map(|line| line.monthly_cost).sum()
}
