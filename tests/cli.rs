//! End-to-end tests for the strata binary.
//!
//! Tests cover:
//! 1. VCF annotation from a file and from stdin
//! 2. Region sizes output
//! 3. Exit status and messages on invalid input

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

/// Helper to create a temporary file with the given suffix.
fn create_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Helper to run strata and return output.
fn run_strata(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_strata"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run strata")
}

/// Helper to run strata with `input` piped to stdin.
fn run_strata_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_strata"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn strata");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn spec(label: &str, file: &NamedTempFile) -> String {
    format!("{}:{}", label, file.path().display())
}

// =============================================================================
// Test fixtures
// =============================================================================

fn sorted_vcf() -> &'static str {
    "##fileformat=VCFv4.2\n\
     #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
     chr1\t16\t.\tA\tG\t.\tPASS\tDP=3\n\
     chr1\t26\t.\tA\tG\t.\tPASS\t.\n\
     chr2\t5\t.\tC\tT\t.\tPASS\t.\n"
}

fn conf_bed() -> &'static str {
    "chr1\t10\t20\nchr1\t30\t40\n"
}

// =============================================================================
// Annotate
// =============================================================================

#[test]
fn test_annotate_file() {
    let conf = create_file(".bed", conf_bed());
    let ts = create_file(".bed", "1\t0\t100\texome\n");
    let vcf = create_file(".vcf", sorted_vcf());
    let conf_spec = spec("CONF", &conf);
    let ts_spec = spec("TS", &ts);

    let output = run_strata(&[
        "annotate",
        "-r",
        &conf_spec,
        "-r",
        &ts_spec,
        "--fixchr",
        "-i",
        vcf.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].starts_with("##INFO=<ID=Regions,"));
    assert!(lines[3].ends_with("\tDP=3;Regions=CONF,TS,TS_exome"));
    assert!(lines[4].ends_with("\tRegions=TS,TS_exome"));
    assert!(lines[5].ends_with("\tPASS\t."));
}

#[test]
fn test_annotate_stdin_with_stats() {
    let conf = create_file(".bed", conf_bed());
    let conf_spec = spec("CONF", &conf);

    let output = run_strata_stdin(&["annotate", "-r", &conf_spec, "--stats"], sorted_vcf());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Records: 3, Annotated: 1, Without regions: 1"));
}

#[test]
fn test_annotate_unsorted_fails() {
    let conf = create_file(".bed", conf_bed());
    let conf_spec = spec("CONF", &conf);
    let vcf = "chr1\t100\t.\tA\tG\t.\tPASS\t.\nchr1\t50\t.\tA\tG\t.\tPASS\t.\n";

    let output = run_strata_stdin(&["annotate", "-r", &conf_spec], vcf);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error: Variants out of order"));
}

#[test]
fn test_annotate_missing_region_file_fails() {
    let output = run_strata(&["annotate", "-r", "CONF:/nonexistent/conf.bed"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("/nonexistent/conf.bed"));
}

#[test]
fn test_empty_label_rejected() {
    let output = run_strata(&["sizes", "-r", ":regions.bed"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("empty label"));
}

// =============================================================================
// Sizes
// =============================================================================

#[test]
fn test_sizes_output() {
    let conf = create_file(".bed", conf_bed());
    let ts = create_file(".bed", "chr1\t0\t5\tb\nchr1\t10\t15\ta\n");
    let conf_spec = spec("CONF", &conf);
    let ts_spec = spec("TS", &ts);

    let output = run_strata(&["sizes", "-r", &ts_spec, "-r", &conf_spec]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "CONF\t20\nTS\t10\nTS_a\t5\nTS_b\t5\n");
}

#[test]
fn test_load_summary_printed_by_default() {
    let conf = create_file(".bed", conf_bed());
    let conf_spec = spec("CONF", &conf);

    let output = run_strata(&["sizes", "-r", &conf_spec]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Added region file"));
    assert!(stderr(&output).contains("as 'CONF' (2 intervals)"));
}

#[test]
fn test_sizes_warns_on_bad_lines() {
    let conf = create_file(".bed", "chr1\t10\t20\nchr1\tbad\t20\n");
    let conf_spec = spec("CONF", &conf);

    let output = run_strata(&["sizes", "-r", &conf_spec]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "CONF\t10\n");
    assert!(stderr(&output).contains("ignoring"));
}
