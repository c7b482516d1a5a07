//! Integration tests for the metafeta command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{metafeta_cmd, write_metadata};

const ANIMAL: &str = r#"
[[tag_attribute]]
attributes = ["colour", "hair_type", "snout_length"]
as = ["external_features", "identifying_features"]
"#;

const DOG: &str = r#"
[[tag_attribute]]
attributes = ["bark"]
as = "identifying_features"

[[tag_attribute]]
attributes = ["temperament"]
as = "behavioural_features"
"#;

#[test]
fn test_show_root_type() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("show")
        .arg("Animal")
        .assert()
        .success()
        .stdout(predicate::str::contains("Animal\n"))
        .stdout(predicate::str::contains(
            "  external_features: colour, hair_type, snout_length",
        ))
        .stdout(predicate::str::contains(
            "  identifying_features: colour, hair_type, snout_length",
        ));
}

#[test]
fn test_show_type_without_file() {
    let temp = TempDir::new().unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("show")
        .arg("Cat")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_show_subtype_merges_inherited_tags() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);
    write_metadata(temp.path(), "dog.toml", DOG);

    let output = metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("show")
        .arg("Dog")
        .arg("--extends")
        .arg("Animal")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Dog < Animal",
            "  behavioural_features: temperament",
            "  external_features: colour, hair_type, snout_length",
            "  identifying_features: colour, hair_type, snout_length, bark",
        ]
    );
}

#[test]
fn test_attrs_lists_in_tagging_order() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);

    let output = metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("attrs")
        .arg("Animal")
        .arg("identifying_features")
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["colour", "hair_type", "snout_length"]);
}

#[test]
fn test_attrs_unknown_tag() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("attrs")
        .arg("Animal")
        .arg("behavioural_features")
        .assert()
        .success()
        .stdout(predicate::str::contains("No attributes found"));
}

#[test]
fn test_attrs_after_clearing_inherited_tag() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);
    write_metadata(
        temp.path(),
        "puppy.toml",
        "clear = [\"identifying_features\"]\n\n[[tag_attribute]]\nattributes = [\"milk_teeth\"]\nas = \"identifying_features\"\n",
    );

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("attrs")
        .arg("Puppy")
        .arg("identifying_features")
        .arg("--extends")
        .arg("Dog")
        .arg("--extends")
        .arg("Animal")
        .assert()
        .success()
        .stdout("milk_teeth\n");
}

#[test]
fn test_check_tagged_and_untagged() {
    let temp = TempDir::new().unwrap();
    write_metadata(temp.path(), "animal.toml", ANIMAL);
    write_metadata(temp.path(), "dog.toml", DOG);

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["check", "Dog", "colour", "identifying_features", "-e", "Animal"])
        .assert()
        .success()
        .stdout("yes\n");

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["check", "Animal", "bark", "identifying_features"])
        .assert()
        .code(5)
        .stdout("no\n");
}

#[test]
fn test_missing_tags_in_file_fails() {
    let temp = TempDir::new().unwrap();
    write_metadata(
        temp.path(),
        "dog.toml",
        "[[tag_attribute]]\nattributes = [\"colour\", \"hair_type\"]\n",
    );

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .arg("show")
        .arg("Dog")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No tags specified"))
        .stderr(predicate::str::contains("dog.toml"));
}

#[test]
fn test_config_file_changes_metadata_dir() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("defs")).unwrap();
    fs::write(
        temp.path().join("metafeta.toml"),
        "metadata_dir = \"defs\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("defs").join("animal.toml"), ANIMAL).unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["check", "Animal", "colour", "external_features"])
        .assert()
        .success();
}

#[test]
fn test_env_overrides_metadata_dir() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::write(elsewhere.path().join("animal.toml"), ANIMAL).unwrap();

    metafeta_cmd()
        .env("METAFETA_DIR", elsewhere.path())
        .arg("--dir")
        .arg(temp.path())
        .args(["check", "Animal", "colour", "external_features"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("metafeta.toml"), "unknown_key = 1\n").unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["show", "Animal"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("metafeta.toml"));
}

#[test]
fn test_self_extension_rejected() {
    let temp = TempDir::new().unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["show", "Dog", "--extends", "Dog"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot extend itself"));
}

#[test]
fn test_path_command() {
    let temp = TempDir::new().unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["path", "zoo::DogA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dog_a.toml"));
}

#[test]
fn test_path_command_stays_in_metadata_dir() {
    let temp = TempDir::new().unwrap();

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["path", "../../escape"])
        .assert()
        .success()
        .stdout(predicate::str::contains("escape.toml"))
        .stdout(predicate::str::contains("..").not());

    metafeta_cmd()
        .arg("--dir")
        .arg(temp.path())
        .args(["path", "../.."])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}
