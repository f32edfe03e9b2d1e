use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn library(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("library").unwrap();
    cmd.env("LIBRARY_CLI_DATA_DIR", dir.path());
    cmd
}

fn seed(dir: &TempDir) {
    library(dir)
        .args(["book", "add", "Dune", "Frank Herbert", "B001", "--quantity", "2"])
        .assert()
        .success();
    library(dir)
        .args(["user", "add", "Alice", "--id", "U001"])
        .assert()
        .success();
}

#[test]
fn test_init_creates_catalog_files() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert_eq!(fs::read_to_string(dir.path().join("data/books.txt")).unwrap(), "");
    assert_eq!(fs::read_to_string(dir.path().join("data/users.txt")).unwrap(), "");
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("books.txt"))
        .stdout(predicate::str::contains("User ID prefix: U"));
}

#[test]
fn test_borrow_and_return_round_trip() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    library(&dir)
        .args(["borrow", "U001", "B001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice borrowed Dune"))
        .stdout(predicate::str::contains("Copies left: 1"));

    assert_eq!(
        fs::read_to_string(dir.path().join("data/books.txt")).unwrap(),
        "Dune;Frank Herbert;B001;1\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("data/users.txt")).unwrap(),
        "Alice;U001;B001\n"
    );

    library(&dir)
        .args(["return", "U001", "B001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copies available: 2"));

    assert_eq!(
        fs::read_to_string(dir.path().join("data/users.txt")).unwrap(),
        "Alice;U001;\n"
    );
}

#[test]
fn test_borrow_failures_exit_nonzero() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    library(&dir)
        .args(["borrow", "U404", "B001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: U404"));

    library(&dir)
        .args(["borrow", "U001", "B404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book not found: B404"));
}

#[test]
fn test_last_copy() {
    let dir = TempDir::new().unwrap();
    library(&dir)
        .args(["book", "add", "Solo Copy", "Someone", "B001"])
        .assert()
        .success();
    library(&dir)
        .args(["user", "add", "Tom", "--id", "U100"])
        .assert()
        .success();

    library(&dir).args(["borrow", "U100", "B001"]).assert().success();
    library(&dir)
        .args(["borrow", "U100", "B001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No copies available for book: B001"));
}

#[test]
fn test_book_listing_and_search() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    library(&dir)
        .args(["book", "add", "Foundation", "Isaac Asimov", "B003"])
        .assert()
        .success();

    library(&dir)
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Foundation"))
        .stdout(predicate::str::contains("Total: 2 books"));

    library(&dir)
        .args(["book", "search", "--author", "Isaac Asimov"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B003"))
        .stdout(predicate::str::contains("Dune").not());

    library(&dir)
        .args(["book", "search", "--title", "dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching books."));
}

#[test]
fn test_duplicate_book_rejected() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    library(&dir)
        .args(["book", "add", "Dune", "Frank Herbert", "B001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book already exists: B001"));
}

#[test]
fn test_reserved_characters_rejected() {
    let dir = TempDir::new().unwrap();

    library(&dir)
        .args(["book", "add", "Dune;Messiah", "Frank Herbert", "B002"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_user_show_lists_borrowed_titles() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    library(&dir).args(["borrow", "U001", "B001"]).assert().success();

    library(&dir)
        .args(["user", "show", "U001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune by Frank Herbert (B001)"));
}

#[test]
fn test_hand_edited_files_load() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("books.txt"),
        "Dune;Frank Herbert;B001;2\nbroken line\nFoundation;Isaac Asimov;B003;-1\n",
    )
    .unwrap();
    fs::write(data.join("users.txt"), "Alice;U001\n").unwrap();

    library(&dir)
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 books"));

    library(&dir)
        .args(["user", "show", "U001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrowed:   none"));
}

#[test]
fn test_audit_log() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    library(&dir).args(["borrow", "U001", "B001"]).assert().success();

    library(&dir)
        .args(["audit", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BORROW User U001 (Alice) book B001"))
        .stdout(predicate::str::contains("CREATE").not());
}

#[test]
fn test_book_search_requires_exactly_one_option() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    library(&dir)
        .args(["book", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--title"));

    library(&dir)
        .args(["book", "search", "--title", "Dune", "--isbn", "B001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
