//! Terraform resource extraction
//!
//! A deliberately narrow HCL scanner: it recognizes top-level
//! `resource "<type>" "<name>" { ... }` blocks for the supported compute
//! types and captures their top-level `key = "value"` assignments. It is not
//! a configuration-language parser - no expression evaluation, variable
//! interpolation, modules, or functions. Malformed input degrades to fewer
//! (possibly zero) records; extraction never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// One detected infrastructure declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResource {
    /// `"<type>.<name>"`, or a synthetic id for fuzzy-scan records.
    pub id: String,
    pub name: String,
    /// Declaration type tag, e.g. `aws_instance`. Drives provider detection.
    pub resource_type: String,
    /// Top-level `key = "value"` assignments, later keys overwrite earlier.
    pub properties: HashMap<String, String>,
    /// 1-based line where the declaration began. None for fuzzy-scan records.
    pub source_line: Option<usize>,
}

/// Resource types the scanner opens blocks for. Anything else is skipped
/// without nesting tracking (see note on `parse_terraform`).
const SUPPORTED_TYPES: &[&str] = &[
    "aws_instance",
    "azurerm_linux_virtual_machine",
    "azurerm_windows_virtual_machine",
    "azurerm_virtual_machine", // older azurerm
    "google_compute_instance",
];

// Matches: resource "type" "name" { (trailing brace optional)
static RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^resource\s+"([^"]+)"\s+"([^"]+)"\s*\{?$"#).expect("static pattern")
});

// Naive key="value" capture, first occurrence per line only.
static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([a-zA-Z0-9_]+)\s*=\s*"([^"]+)""#).expect("static pattern"));

static AWS_FUZZY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"instance_type\s*=\s*"([^"]+)""#).expect("static pattern"));

static GCP_FUZZY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"machine_type\s*=\s*"([^"]+)""#).expect("static pattern"));

/// Extract compute resource declarations from raw Terraform text.
///
/// Primary pass is a line-oriented state machine (searching / in-block) with
/// an integer brace depth. If it finds nothing, a fuzzy rescan of the whole
/// input looks for bare `instance_type` / `machine_type` assignments and
/// synthesizes records for them (Azure's `size` key is too generic to fuzzy
/// match without false positives, so it is excluded).
///
/// Known limitation: an unrecognized resource type is skipped without
/// tracking its nesting, so braces inside its body are never counted. A
/// recognized `resource` line appearing before such a block closes will open
/// a new block mid-body. Inputs like that are already outside the narrow
/// grammar this scanner supports.
pub fn parse_terraform(content: &str) -> Vec<ParsedResource> {
    let mut resources: Vec<ParsedResource> = Vec::new();

    let mut current: Option<ParsedResource> = None;
    let mut brace_depth: i32 = 0;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();

        if current.is_none() {
            if let Some(caps) = RESOURCE_RE.captures(line) {
                let resource_type = &caps[1];
                let name = &caps[2];

                if SUPPORTED_TYPES.contains(&resource_type) {
                    current = Some(ParsedResource {
                        id: format!("{}.{}", resource_type, name),
                        name: name.to_string(),
                        resource_type: resource_type.to_string(),
                        properties: HashMap::new(),
                        source_line: Some(index + 1),
                    });
                    brace_depth = if line.ends_with('{') { 1 } else { 0 };
                } else {
                    debug!("skipping unsupported resource type: {}", resource_type);
                }
            }
        } else {
            // Brace tracking and property capture are independent checks on
            // the same line: a property line containing braces counts for both.
            if line.contains('{') {
                brace_depth += 1;
            }
            if line.contains('}') {
                brace_depth -= 1;
            }

            if let (Some(block), Some(caps)) = (current.as_mut(), PROPERTY_RE.captures(line)) {
                block
                    .properties
                    .insert(caps[1].to_string(), caps[2].to_string());
            }

            if brace_depth == 0 && line.ends_with('}') {
                if let Some(block) = current.take() {
                    resources.push(block);
                }
            }
        }
    }

    // Fuzzy fallback: only when block parsing found nothing at all (e.g.
    // strange formatting). Full independent rescan, no partial reuse.
    if resources.is_empty() {
        for (i, caps) in AWS_FUZZY_RE.captures_iter(content).enumerate() {
            resources.push(ParsedResource {
                id: format!("unknown_aws_{}", i),
                name: format!("Detected AWS Instance {}", i + 1),
                resource_type: "aws_instance".to_string(),
                properties: HashMap::from([("instance_type".to_string(), caps[1].to_string())]),
                source_line: None,
            });
        }

        for (i, caps) in GCP_FUZZY_RE.captures_iter(content).enumerate() {
            resources.push(ParsedResource {
                id: format!("unknown_gcp_{}", i),
                name: format!("Detected GCP Instance {}", i + 1),
                resource_type: "google_compute_instance".to_string(),
                properties: HashMap::from([("machine_type".to_string(), caps[1].to_string())]),
                source_line: None,
            });
        }
    }

    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_aws_instance() {
        let content = r#"
resource "aws_instance" "web" {
  ami           = "ami-0c55b159cbfafe1f0"
  instance_type = "t2.micro"
}
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "aws_instance.web");
        assert_eq!(resources[0].name, "web");
        assert_eq!(resources[0].resource_type, "aws_instance");
        assert_eq!(
            resources[0].properties.get("instance_type"),
            Some(&"t2.micro".to_string())
        );
        assert_eq!(resources[0].source_line, Some(2));
    }

    #[test]
    fn test_parse_unsupported_type_skipped() {
        let content = r#"
resource "aws_s3_bucket" "logs" {
  bucket = "my-logs"
}
resource "aws_instance" "web" {
  instance_type = "t3.small"
}
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "web");
    }

    #[test]
    fn test_parse_opening_brace_on_next_line() {
        let content = "resource \"aws_instance\" \"web\"\n{\n  instance_type = \"t2.micro\"\n}\n";
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(
            resources[0].properties.get("instance_type"),
            Some(&"t2.micro".to_string())
        );
    }

    #[test]
    fn test_parse_nested_block_depth() {
        let content = r#"
resource "google_compute_instance" "vm" {
  machine_type = "e2-small"
  boot_disk {
    initialize_params {
      image = "debian-cloud/debian-11"
    }
  }
  zone = "us-central1-a"
}
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        let props = &resources[0].properties;
        assert_eq!(props.get("machine_type"), Some(&"e2-small".to_string()));
        assert_eq!(props.get("zone"), Some(&"us-central1-a".to_string()));
        assert_eq!(props.get("image"), Some(&"debian-cloud/debian-11".to_string()));
    }

    #[test]
    fn test_parse_duplicate_key_overwrites() {
        let content = r#"
resource "aws_instance" "web" {
  instance_type = "t2.micro"
  instance_type = "t2.large"
}
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(
            resources[0].properties.get("instance_type"),
            Some(&"t2.large".to_string())
        );
    }

    #[test]
    fn test_parse_multiple_resources() {
        let content = r#"
resource "aws_instance" "web" {
  instance_type = "t2.micro"
}
resource "azurerm_linux_virtual_machine" "app" {
  size = "Standard_B2s"
}
resource "google_compute_instance" "db" {
  machine_type = "n1-standard-2"
}
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].resource_type, "aws_instance");
        assert_eq!(resources[1].resource_type, "azurerm_linux_virtual_machine");
        assert_eq!(resources[2].resource_type, "google_compute_instance");
    }

    #[test]
    fn test_fuzzy_fallback_aws_and_gcp() {
        // No resource blocks at all - fuzzy scan kicks in.
        let content = "instance_type = \"t3.medium\"\nmachine_type = \"e2-micro\"\n";
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id, "unknown_aws_0");
        assert_eq!(resources[0].name, "Detected AWS Instance 1");
        assert_eq!(resources[0].source_line, None);
        assert_eq!(resources[1].id, "unknown_gcp_0");
        assert_eq!(
            resources[1].properties.get("machine_type"),
            Some(&"e2-micro".to_string())
        );
    }

    #[test]
    fn test_fuzzy_fallback_excludes_azure() {
        let content = "size = \"Standard_B1s\"\n";
        assert!(parse_terraform(content).is_empty());
    }

    #[test]
    fn test_fuzzy_fallback_not_triggered_by_partial_success() {
        // One recognized block plus a stray assignment: the stray line must
        // not produce a synthetic record.
        let content = r#"
resource "aws_instance" "web" {
  instance_type = "t2.micro"
}
machine_type = "e2-micro"
"#;
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, "aws_instance.web");
    }

    #[test]
    fn test_parse_empty_and_garbage_input() {
        assert!(parse_terraform("").is_empty());
        assert!(parse_terraform("this is not terraform at all { } }{").is_empty());
    }

    #[test]
    fn test_parse_idempotent() {
        let content = r#"
resource "aws_instance" "web" {
  instance_type = "t2.micro"
  tags = "prod"
}
"#;
        assert_eq!(parse_terraform(content), parse_terraform(content));
    }

    #[test]
    fn test_first_property_per_line_only() {
        let content = "resource \"aws_instance\" \"w\" {\n  a = \"1\" b = \"2\"\n}\n";
        let resources = parse_terraform(content);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].properties.get("a"), Some(&"1".to_string()));
        assert_eq!(resources[0].properties.get("b"), None);
    }
}
