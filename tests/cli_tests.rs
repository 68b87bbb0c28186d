mod common;

use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use common::repo::{build_linear_history, build_merge_history, empty_repository};
use predicates::prelude::*;
use rstest::rstest;
use std::process::Command;

type TestRepo = (assert_fs::TempDir, revlist::areas::repository::Repository);

#[test]
fn new_repository_initiated_with_git_directory() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut sut = Command::cargo_bin("revlist")?;

    sut.arg("init").arg(dir.path());

    sut.assert()
        .success()
        .stdout(predicate::str::contains("Initialized git directory at"));

    Ok(())
}

#[rstest]
fn log_shows_commits_newest_first(empty_repository: TestRepo) {
    let (dir, repository) = empty_repository;
    build_linear_history(&repository, 3);

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");
    let output = sut
        .current_dir(dir.path())
        .arg("log")
        .arg("--time")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).expect("utf-8 output");
    let newest = stdout.find("commit 2").expect("newest commit shown");
    let oldest = stdout.find("commit 0").expect("oldest commit shown");
    assert!(newest < oldest);
    assert!(stdout.contains("Author: Test Author <test@example.com>"));
}

#[rstest]
fn log_limits_output_with_max_count(empty_repository: TestRepo) {
    let (dir, repository) = empty_repository;
    build_linear_history(&repository, 3);

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");

    sut.current_dir(dir.path())
        .arg("log")
        .arg("--time")
        .arg("-n")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit 2"))
        .stdout(predicate::str::contains("commit 0").not());
}

#[rstest]
fn log_filters_commits_by_path(empty_repository: TestRepo) {
    let (dir, repository) = empty_repository;
    build_merge_history(&repository);

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");

    sut.current_dir(dir.path())
        .arg("log")
        .arg("--path")
        .arg("file2")
        .assert()
        .success()
        .stdout(predicate::str::contains("add file2"))
        .stdout(predicate::str::contains("add file1").not())
        .stdout(predicate::str::contains("merge unrelated branch").not());
}

#[rstest]
fn log_marks_merge_commits(empty_repository: TestRepo) {
    let (dir, repository) = empty_repository;
    build_merge_history(&repository);

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");

    sut.current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge: "));
}

#[rstest]
fn contributions_prints_one_line_per_commit(empty_repository: TestRepo) {
    let (dir, repository) = empty_repository;
    build_linear_history(&repository, 2);

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");
    let output = sut
        .current_dir(dir.path())
        .arg("contributions")
        .arg("--time")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Author <test@example.com>"));

    let stdout = String::from_utf8(output.get_output().stdout.clone()).expect("utf-8 output");
    assert_eq!(stdout.lines().count(), 2);
}

#[rstest]
fn log_in_an_empty_repository_prints_nothing(empty_repository: TestRepo) {
    let (dir, _repository) = empty_repository;

    let mut sut = Command::cargo_bin("revlist").expect("revlist binary");

    sut.current_dir(dir.path())
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn log_outside_a_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = assert_fs::TempDir::new()?;
    let mut sut = Command::cargo_bin("revlist")?;

    sut.current_dir(dir.path())
        .arg("log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid repository"));

    Ok(())
}
