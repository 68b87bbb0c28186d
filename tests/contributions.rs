mod common;

use assert_fs::TempDir;
use common::repo::{
    build_linear_history, empty_repository, named_author_at, set_head, store_commit,
    store_flat_tree,
};
use pretty_assertions::assert_eq;
use revlist::areas::repository::Repository;
use revlist::{SortMode, contributions};
use rstest::rstest;

#[rstest]
fn columns_are_parallel_with_one_row_per_commit(empty_repository: (TempDir, Repository)) {
    let (_dir, repository) = empty_repository;
    build_linear_history(&repository, 4);

    let result = contributions(&repository, SortMode::TIME).unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result.when.len(), 4);
    assert_eq!(result.author.len(), 4);
    assert_eq!(result.email.len(), 4);
}

#[rstest]
fn when_folds_the_utc_offset_into_the_timestamp(empty_repository: (TempDir, Repository)) {
    let (_dir, repository) = empty_repository;

    let tree = store_flat_tree(&repository, &[("file.txt", "content")]);
    let author = named_author_at("Offset Author", "offset@example.com", 1_000_000, 120);
    let commit = store_commit(&repository, vec![], tree, author, "offset commit");
    set_head(&repository, &commit);

    let result = contributions(&repository, SortMode::empty()).unwrap();

    // epoch seconds plus 120 offset minutes folded in as seconds
    assert_eq!(result.when, vec![1_000_000.0 + 120.0 * 60.0]);
    assert_eq!(result.author, vec!["Offset Author".to_string()]);
    assert_eq!(result.email, vec!["offset@example.com".to_string()]);
}

#[rstest]
fn rows_follow_the_requested_ordering(empty_repository: (TempDir, Repository)) {
    let (_dir, repository) = empty_repository;

    let first_tree = store_flat_tree(&repository, &[("file.txt", "first")]);
    let first = store_commit(
        &repository,
        vec![],
        first_tree,
        named_author_at("First", "first@example.com", 1_000, 0),
        "first",
    );
    let second_tree = store_flat_tree(&repository, &[("file.txt", "second")]);
    let second = store_commit(
        &repository,
        vec![first],
        second_tree,
        named_author_at("Second", "second@example.com", 2_000, 0),
        "second",
    );
    set_head(&repository, &second);

    let newest_first = contributions(&repository, SortMode::TIME).unwrap();
    let oldest_first =
        contributions(&repository, SortMode::TIME | SortMode::REVERSE).unwrap();

    assert_eq!(newest_first.author, vec!["Second", "First"]);
    assert_eq!(oldest_first.author, vec!["First", "Second"]);
}

#[rstest]
fn empty_repository_has_no_rows(empty_repository: (TempDir, Repository)) {
    let (_dir, repository) = empty_repository;

    let result = contributions(&repository, SortMode::TIME).unwrap();

    assert!(result.is_empty());
}
