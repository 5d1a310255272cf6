use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;
use tempfile::TempDir;

fn appcast_gen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appcast-gen"))
        .current_dir(dir)
        .args(["--version", "2.1.0", "--release-notes-url", "https://x/y"])
        .args(args)
        .output()
        .expect("Cannot run appcast-gen.")
}

#[test]
fn writes_default_output_file() {
    let dir = TempDir::new().unwrap();
    let output = appcast_gen(
        dir.path(),
        &[
            "--win-url",
            "https://a/b.exe",
            "--win-signature",
            "SIG",
            "--win-length",
            "100",
        ],
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Appcast written to: appcast.xml"
    );
    let appcast = fs::read_to_string(dir.path().join("appcast.xml")).unwrap();
    assert!(appcast.contains("<title>Version 2.1.0</title>"));
    assert!(appcast.contains("url=\"https://a/b.exe\""));
    assert!(
        appcast.find("<sparkle:releaseNotesLink>").unwrap() < appcast.find("<enclosure").unwrap()
    );
    assert!(appcast.contains("sparkle:edSignature=\"SIG\""));
    assert!(appcast.contains("length=\"100\""));
    assert!(appcast.contains("type=\"application/octet-stream\""));
    assert!(
        appcast.contains("<sparkle:releaseNotesLink>https://x/y</sparkle:releaseNotesLink>")
    );
}

#[test]
fn writes_to_stdout_for_dash() {
    let dir = TempDir::new().unwrap();
    let output = appcast_gen(
        dir.path(),
        &[
            "-o",
            "-",
            "--mac-url",
            "https://a/b.dmg",
            "--mac-signature",
            "SIG",
            "--title",
            "Beta Updates",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<title>Beta Updates</title>"));
    assert!(stdout.contains("sparkle:os=\"macos\""));
    assert!(!stdout.contains("sparkle:os=\"windows\""));
    assert!(!dir.path().join("appcast.xml").exists());
}

#[test]
fn fails_without_complete_platform() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("feed.xml");
    fs::write(&target, "previous").unwrap();

    let output = appcast_gen(
        dir.path(),
        &["-o", "feed.xml", "--win-url", "https://a/b.exe", "--mac-signature", "SIG"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr
        .contains("At least one platform (Windows or macOS) must have both URL and signature"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "previous");
}

#[test]
fn rejects_non_integer_length() {
    let dir = TempDir::new().unwrap();
    let output = appcast_gen(
        dir.path(),
        &["--win-url", "https://a/b.exe", "--win-signature", "SIG", "--win-length", "lots"],
    );

    assert!(!output.status.success());
    assert!(!dir.path().join("appcast.xml").exists());
}

#[test]
fn reports_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let output = appcast_gen(
        dir.path(),
        &[
            "-o",
            "missing/appcast.xml",
            "--win-url",
            "https://a/b.exe",
            "--win-signature",
            "SIG",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing/appcast.xml"));
}
