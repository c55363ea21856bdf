use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

const TEXT: &[u8] = br#"
    It was the best of times, it was the worst of times, it was the age of wisdom, it was the
    age of foolishness, it was the epoch of belief, it was the epoch of incredulity, it was the
    season of Light, it was the season of Darkness, it was the spring of hope, it was the winter
    of despair.
"#;

fn test_input(dir: &Path) -> PathBuf {
    let path = dir.join("dickens.txt");
    fs::write(&path, TEXT.repeat(200)).unwrap();
    path
}

fn test_tree(dir: &Path) -> PathBuf {
    let root = dir.join("tree");
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("top.txt"), TEXT).unwrap();
    fs::write(root.join("a/one.bin"), [0u8, 1, 2, 3, 255]).unwrap();
    fs::write(root.join("a/b/c/deep.txt"), TEXT.repeat(3)).unwrap();
    fs::write(root.join("a/b/zero"), b"").unwrap();
    root
}

fn files_below(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.push((rel, fs::read(&path).unwrap()));
            }
        }
    }

    let mut files = vec![];
    walk(root, root, &mut files);
    files.sort();
    files
}

fn compress(source: &Path, archive: &Path) -> String {
    let out = cargo_bin_cmd!("zarc")
        .arg("compress")
        .arg(source)
        .arg(archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(out).unwrap()
}

fn extract(archive: &Path, destination: &Path) -> String {
    let out = cargo_bin_cmd!("zarc")
        .arg("extract")
        .arg(archive)
        .arg(destination)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(out).unwrap()
}

#[test]
fn cycle_file() {
    let dir = TempDir::new().unwrap();
    let input = test_input(dir.path());
    let archive = dir.path().join("dickens.txt.zst");

    let out = compress(&input, &archive);
    assert_eq!(out, format!("Created zst archive: {}\n", archive.display()));

    let dest = dir.path().join("out");
    fs::create_dir(&dest).unwrap();
    let out = extract(&archive, &dest);

    let restored = dest.join("dickens.txt");
    assert_eq!(out, format!("Extracted file to: {}\n", restored.display()));
    assert_eq!(fs::read(&input).unwrap(), fs::read(&restored).unwrap());
}

#[test]
fn cycle_file_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let input = test_input(dir.path());
    let archive = dir.path().join("notes.zst");
    compress(&input, &archive);

    let target = dir.path().join("new/parent/restored.txt");
    extract(&archive, &target);

    assert_eq!(fs::read(&input).unwrap(), fs::read(&target).unwrap());
}

#[test]
fn cycle_directory() {
    let dir = TempDir::new().unwrap();
    let root = test_tree(dir.path());
    let archive = dir.path().join("tree.zst");

    let out = compress(&root, &archive);
    assert_eq!(out, format!("Created tar+zst archive: {}\n", archive.display()));

    let dest = dir.path().join("restore");
    let out = extract(&archive, &dest);
    assert_eq!(
        out,
        format!("Extracted tar+zst archive into directory: {}\n", dest.display())
    );

    assert_eq!(files_below(&root), files_below(&dest.join("tree")));
    // Only files are archived
    assert!(!dest.join("tree/empty").exists());
}

#[test]
fn cycle_directory_into_archive_inside_it() {
    let dir = TempDir::new().unwrap();
    let root = test_tree(dir.path());
    fs::write(root.join("big.txt"), TEXT.repeat(5000)).unwrap();
    let expected = files_below(&root);
    let archive = root.join("tree.zst");

    let out = compress(&root, &archive);
    assert_eq!(out, format!("Created tar+zst archive: {}\n", archive.display()));

    let dest = dir.path().join("restore");
    let out = extract(&archive, &dest);
    assert_eq!(
        out,
        format!("Extracted tar+zst archive into directory: {}\n", dest.display())
    );

    assert_eq!(files_below(&dest.join("tree")), expected);
    assert!(!dest.join("tree/tree.zst").exists());
}

#[test]
fn extract_defaults_to_current_dir() {
    let dir = TempDir::new().unwrap();
    let input = test_input(dir.path());
    let archive = dir.path().join("notes.zst");
    compress(&input, &archive);

    let work = dir.path().join("work");
    fs::create_dir(&work).unwrap();
    cargo_bin_cmd!("zarc")
        .current_dir(&work)
        .arg("extract")
        .arg(&archive)
        .assert()
        .success();

    assert_eq!(fs::read(&input).unwrap(), fs::read(work.join("notes")).unwrap());
}

#[test]
fn benchmark_only_adds_timing_line() {
    let dir = TempDir::new().unwrap();
    let input = test_input(dir.path());
    let plain = dir.path().join("plain.zst");
    let timed = dir.path().join("timed.zst");

    compress(&input, &plain);
    let out = cargo_bin_cmd!("zarc")
        .arg("compress")
        .arg(&input)
        .arg(&timed)
        .arg("--benchmark")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<_> = out.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("Created zst archive: {}", timed.display()));
    assert!(lines[1].starts_with("Elapsed time: "));
    assert!(lines[1].ends_with(" s"));
    assert_eq!(fs::read(&plain).unwrap(), fs::read(&timed).unwrap());

    let restored = dir.path().join("restored.txt");
    cargo_bin_cmd!("zarc")
        .arg("extract")
        .arg("-b")
        .arg(&timed)
        .arg(&restored)
        .assert()
        .success();
    assert_eq!(fs::read(&input).unwrap(), fs::read(&restored).unwrap());
}

#[test]
fn directory_archive_bytes_do_not_depend_on_benchmark() {
    let dir = TempDir::new().unwrap();
    let root = test_tree(dir.path());
    let plain = dir.path().join("plain.zst");
    let timed = dir.path().join("timed.zst");

    compress(&root, &plain);
    cargo_bin_cmd!("zarc")
        .arg("compress")
        .arg("-b")
        .arg(&root)
        .arg(&timed)
        .assert()
        .success();

    assert_eq!(fs::read(&plain).unwrap(), fs::read(&timed).unwrap());
}

#[test]
fn bad_extension_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let input = test_input(dir.path());
    let archive = dir.path().join("out.tar");

    cargo_bin_cmd!("zarc")
        .arg("compress")
        .arg(&input)
        .arg(&archive)
        .assert()
        .failure()
        .code(1);

    assert!(!archive.exists());
}

#[test]
fn do_not_create_archive_if_source_does_not_exist() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("a.zst");

    cargo_bin_cmd!("zarc")
        .arg("compress")
        .arg(dir.path().join("nope.txt"))
        .arg(&archive)
        .assert()
        .failure()
        .code(1);

    assert!(!archive.exists());
}

#[test]
fn missing_archive_fails() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("zarc")
        .arg("extract")
        .arg(dir.path().join("gone.zst"))
        .arg(dir.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn corrupt_archive_fails() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("corrupt.zst");
    fs::write(&archive, b"definitely not zstd").unwrap();

    cargo_bin_cmd!("zarc")
        .arg("extract")
        .arg(&archive)
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cargo_bin_cmd!("zarc")
        .arg("list")
        .arg("a.zst")
        .assert()
        .failure()
        .code(2);
}
