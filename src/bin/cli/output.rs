//! Output formatting for command results
//!
//! Formats results as human-readable text or JSON

use serde_json::{json, Value};
use std::path::PathBuf;

use chainspec::ContractSpec;

use crate::OutputFormat;

/// Result of a single `generate` run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub contract: String,
    pub template: String,
    pub digest: String,
    pub contract_path: Option<PathBuf>,
    pub record_path: Option<PathBuf>,
}

/// One file of a batch run
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub file: PathBuf,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Generated {
        contract: String,
        template: String,
        contract_path: PathBuf,
        record_path: PathBuf,
    },
    Failed {
        error: String,
    },
}

/// Format a parsed record
pub fn format_spec(spec: &ContractSpec, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Human => Ok(format_spec_human(spec)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(spec)?)),
    }
}

fn format_spec_human(spec: &ContractSpec) -> String {
    let mut output = String::new();
    output.push_str(&format!("Contract: {}\n", spec.contract_name));
    output.push_str(&format!("  Functions: {}\n", spec.functions.len()));
    for func in &spec.functions {
        output.push_str(&format!("    - {}({})\n", func.name, func.parameter_list()));
    }
    output.push_str(&format!("  State Variables: {}\n", spec.state_variables.len()));
    output.push_str(&format!("  Events: {}\n", spec.events.len()));
    output.push_str(&format!(
        "  Security Requirements: {}\n",
        spec.security_requirements.len()
    ));
    output.push_str(&format!("  State Invariants: {}\n", spec.state_invariants.len()));
    output
}

/// Format a generation report
pub fn format_generation(report: &GenerationReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Human => {
            let mut output = String::new();
            output.push_str(&format!(
                "{} -> {} ({})\n",
                report.source.display(),
                report.contract,
                report.template
            ));
            if let Some(path) = &report.contract_path {
                output.push_str(&format!("  Contract: {}\n", path.display()));
            }
            if let Some(path) = &report.record_path {
                output.push_str(&format!("  Record: {}\n", path.display()));
            }
            output.push_str(&format!("  SHA-256: {}\n", report.digest));
            Ok(output)
        }
        OutputFormat::Json => {
            let mut obj = json!({
                "source": report.source.to_string_lossy(),
                "contract": report.contract,
                "templateUsed": report.template,
                "digest": report.digest,
            });
            if let Some(path) = &report.contract_path {
                obj["savedPath"] = json!(path.to_string_lossy());
            }
            if let Some(path) = &report.record_path {
                obj["recordPath"] = json!(path.to_string_lossy());
            }
            Ok(format!("{}\n", serde_json::to_string_pretty(&obj)?))
        }
    }
}

/// Format batch results
pub fn format_batch(entries: &[BatchEntry], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Human => Ok(format_batch_human(entries)),
        OutputFormat::Json => format_batch_json(entries),
    }
}

fn count_failed(entries: &[BatchEntry]) -> usize {
    entries
        .iter()
        .filter(|e| matches!(e.outcome, BatchOutcome::Failed { .. }))
        .count()
}

fn format_batch_human(entries: &[BatchEntry]) -> String {
    let mut output = String::new();

    for entry in entries {
        output.push_str(&format!("{}\n", entry.file.display()));
        match &entry.outcome {
            BatchOutcome::Generated {
                contract,
                template,
                contract_path,
                record_path,
            } => {
                output.push_str(&format!("  ✅ {} ({})\n", contract, template));
                output.push_str(&format!("    Contract: {}\n", contract_path.display()));
                output.push_str(&format!("    Record: {}\n", record_path.display()));
            }
            BatchOutcome::Failed { error } => {
                output.push_str("  ❌ FAILED\n");
                output.push_str(&format!("    Reason: {}\n", error));
            }
        }
    }

    let failed = count_failed(entries);
    output.push_str(&format!(
        "\nbatch result: {}. {} generated; {} failed\n",
        if failed > 0 { "FAILED" } else { "ok" },
        entries.len() - failed,
        failed
    ));
    output
}

fn format_batch_json(entries: &[BatchEntry]) -> serde_json::Result<String> {
    let results: Vec<Value> = entries
        .iter()
        .map(|entry| {
            let mut obj = json!({ "file": entry.file.to_string_lossy() });
            match &entry.outcome {
                BatchOutcome::Generated {
                    contract,
                    template,
                    contract_path,
                    record_path,
                } => {
                    obj["status"] = json!("generated");
                    obj["contract"] = json!(contract);
                    obj["templateUsed"] = json!(template);
                    obj["savedPath"] = json!(contract_path.to_string_lossy());
                    obj["recordPath"] = json!(record_path.to_string_lossy());
                }
                BatchOutcome::Failed { error } => {
                    obj["status"] = json!("failed");
                    obj["error"] = json!(error);
                }
            }
            obj
        })
        .collect();

    let failed = count_failed(entries);
    let output = json!({
        "summary": {
            "total": entries.len(),
            "generated": entries.len() - failed,
            "failed": failed,
        },
        "results": results,
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
}

/// List template names with their source
pub fn format_templates(names: &[String], source: &str) -> String {
    let mut output = format!("Templates ({}):\n", source);
    for name in names {
        output.push_str(&format!("  {}\n", name));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<BatchEntry> {
        vec![
            BatchEntry {
                file: PathBuf::from("specs/01_erc20.md"),
                outcome: BatchOutcome::Generated {
                    contract: "MyToken".to_string(),
                    template: "ERC20_Template".to_string(),
                    contract_path: PathBuf::from("contracts/generated/MyToken.sol"),
                    record_path: PathBuf::from("output/MyToken.json"),
                },
            },
            BatchEntry {
                file: PathBuf::from("specs/02_broken.md"),
                outcome: BatchOutcome::Failed {
                    error: "Template not found: Missing".to_string(),
                },
            },
        ]
    }

    #[test]
    fn test_batch_human_summary() {
        let out = format_batch(&entries(), OutputFormat::Human).unwrap();
        assert!(out.contains("✅ MyToken (ERC20_Template)"));
        assert!(out.contains("Reason: Template not found: Missing"));
        assert!(out.ends_with("batch result: FAILED. 1 generated; 1 failed\n"));
    }

    #[test]
    fn test_batch_json_summary() {
        let out = format_batch(&entries(), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["results"][0]["status"], "generated");
        assert_eq!(value["results"][1]["status"], "failed");
    }

    #[test]
    fn test_spec_human() {
        let spec = chainspec::parse("## Contract Name\nMy Token\n## Function: mint(address to)\n");
        let out = format_spec(&spec, OutputFormat::Human).unwrap();
        assert!(out.starts_with("Contract: My_Token\n"));
        assert!(out.contains("    - mint(address to)\n"));
    }

    #[test]
    fn test_generation_json_fields() {
        let report = GenerationReport {
            source: PathBuf::from("a.md"),
            contract: "A".to_string(),
            template: "ERC20_Template".to_string(),
            digest: "00".to_string(),
            contract_path: Some(PathBuf::from("out/A.sol")),
            record_path: None,
        };
        let value: Value =
            serde_json::from_str(&format_generation(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value["templateUsed"], "ERC20_Template");
        assert_eq!(value["savedPath"], "out/A.sol");
        assert!(value.get("recordPath").is_none());
    }
}
