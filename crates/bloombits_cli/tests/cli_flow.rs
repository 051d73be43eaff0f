use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bloombits_cli"))
}

fn bloom_hex(bits: &[usize]) -> String {
    let mut bytes = [0u8; 256];
    for &i in bits {
        bytes[255 - i / 8] |= 1 << (i % 8);
    }
    hex::encode(bytes)
}

#[test]
fn rotate_eight_blocks() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("blooms.txt");
    let mut lines = Vec::new();
    for k in 0..8 {
        lines.push(if k == 3 { bloom_hex(&[5]) } else { bloom_hex(&[]) });
    }
    fs::write(&input, lines.join("\n")).unwrap();

    cli_cmd()
        .args(["rotate", "--input", input.to_str().unwrap(), "--sections", "8", "--bits", "4,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"bit":5,"hex":"10"}"#))
        .stdout(predicate::str::contains(r#"{"bit":4,"hex":"00"}"#));
}

#[test]
fn rotate_reads_section_size_from_config() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("blooms.txt");
    let cfg = tmp.path().join("section.json");
    let lines: Vec<String> = (0..16).map(|k| bloom_hex(&[k])).collect();
    fs::write(&input, lines.join("\n")).unwrap();
    fs::write(&cfg, r#"{"sections": 16}"#).unwrap();

    cli_cmd()
        .args(["rotate", "--input", input.to_str().unwrap(), "--config", cfg.to_str().unwrap(), "--bits", "0,15"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""sections":16"#))
        .stdout(predicate::str::contains(r#"{"bit":0,"hex":"8000"}"#))
        .stdout(predicate::str::contains(r#"{"bit":15,"hex":"0001"}"#));
}

#[test]
fn short_input_fails() {
    let tmp = tempdir().expect("tempdir");
    let input = tmp.path().join("blooms.txt");
    fs::write(&input, bloom_hex(&[1])).unwrap();

    cli_cmd()
        .args(["rotate", "--input", input.to_str().unwrap(), "--sections", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("section needs 8 blooms"));
}

#[test]
fn config_rejects_unaligned_sections() {
    cli_cmd()
        .args(["config", "--sections", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not multiple of 8"));

    cli_cmd()
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4096"));
}
