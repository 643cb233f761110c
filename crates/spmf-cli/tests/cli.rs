//! Integration tests driving the `spmf` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;

use tempfile::TempDir;

// Forks only happen under this lock, so a freshly written script is never
// held open by another child when it is executed.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn spmf(dir: &Path, args: &[&str]) -> Output {
    let _lock = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    Command::new(env!("CARGO_BIN_EXE_spmf"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run spmf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

const SEQUENCES_CSV: &str = "ID,Time Points,Items\n\
S1,0,1\n\
S1,1,1\n\
S1,1,2\n\
S1,2,1\n";

#[test]
fn lists_algorithms() {
    let dir = TempDir::new().expect("temp dir");
    let output = spmf(dir.path(), &["--color", "never", "algorithms"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    for name in ["PrefixSpan", "SPADE", "VMSP", "TKE", "EMMA", "AFEM", "TKERules"] {
        assert!(text.contains(name), "missing {name}");
    }
}

#[test]
fn encodes_sequences_with_symbol_table() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "events.csv", SEQUENCES_CSV);
    let output = spmf(
        dir.path(),
        &["encode", "events.csv", "--output", "coded/input.txt"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let text = fs::read_to_string(dir.path().join("coded/input.txt")).expect("encoded text");
    insta::assert_snapshot!(text, @"1 -1 1 2 -1 1 -1 -2");
    let codec = fs::read_to_string(dir.path().join("coded/input.txt.codec.json"))
        .expect("symbol table");
    assert!(codec.contains("\"1\""));
    assert!(stdout(&output).contains("Encoded 4 records (2 distinct items)"));
}

#[test]
fn decodes_with_symbol_table_to_csv() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "events.csv",
        "ID,Time Points,Items\nS1,0,apple\nS1,1,pear\n",
    );
    let encoded = spmf(dir.path(), &["encode", "events.csv", "-o", "input.txt"]);
    assert!(encoded.status.success(), "{}", stderr(&encoded));
    write(dir.path(), "raw.txt", "1 -1 #SUP: 1\n1 -1 2 -1 #SUP: 1\n");

    let output = spmf(
        dir.path(),
        &[
            "decode",
            "raw.txt",
            "--codec",
            "input.txt.codec.json",
            "--output",
            "patterns.csv",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let csv = fs::read_to_string(dir.path().join("patterns.csv")).expect("csv");
    insta::assert_snapshot!(csv.trim_end(), @r"
    Frequent sequential pattern,Support
    apple,1
    apple -> pear,1
    ");
}

#[test]
fn decodes_rules_without_symbol_table() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "rules.txt", "1 ==> 2 #SUP: 2 #CONF: 0.4\n");
    let output = spmf(
        dir.path(),
        &["decode", "rules.txt", "--shape", "rule", "-o", "rules.csv"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let csv = fs::read_to_string(dir.path().join("rules.csv")).expect("csv");
    insta::assert_snapshot!(csv.trim_end(), @r"
    Episode rule,Support,Confidence
    1 ==> 2,2,0.4
    ");
}

#[test]
fn malformed_output_fails() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "raw.txt", "1 -1 no support\n");
    let output = spmf(dir.path(), &["decode", "raw.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: decode raw.txt"));
}

#[test]
fn prints_command_with_config_and_overrides() {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "spmf.toml",
        "launcher = \"/usr/bin/java\"\nexecutable_path = \"/opt/spmf.jar\"\n",
    );
    let output = spmf(
        dir.path(),
        &[
            "episodes",
            "stream.csv",
            "--k",
            "6",
            "--max-window",
            "2",
            "--memory",
            "2048",
            "--print-command",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    insta::assert_snapshot!(
        stdout(&output).trim(),
        @"/usr/bin/java -Xmx2048m -jar /opt/spmf.jar run TKE <input> <output> 6 2 false"
    );
}

#[test]
fn custom_algorithm_passes_parameters_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let output = spmf(
        dir.path(),
        &[
            "rules",
            "stream.csv",
            "--no-timestamps",
            "--custom",
            "EMMARules",
            "--param",
            "2",
            "--param",
            "3",
            "--param",
            "0.6",
            "--print-command",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).trim().ends_with("run EMMARules <input> <output> 2 3 0.6"));
}

#[test]
fn invalid_parameters_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let output = spmf(
        dir.path(),
        &["sequences", "events.csv", "--min-support", "1.5"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("min_support"));
}

#[cfg(unix)]
#[test]
fn mines_sequences_through_the_launcher() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "events.csv", SEQUENCES_CSV);
    let script = {
        let _lock = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let script = write(
            dir.path(),
            "fake-java.sh",
            "#!/bin/sh\necho '1 -1 1 2 -1 #SUP: 3' > \"$7\"\n",
        );
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        script
    };

    let output = spmf(
        dir.path(),
        &[
            "sequences",
            "events.csv",
            "--java",
            script.to_str().expect("utf-8 path"),
            "--output",
            "patterns.csv",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let csv = fs::read_to_string(dir.path().join("patterns.csv")).expect("csv");
    insta::assert_snapshot!(csv.trim_end(), @r"
    Frequent sequential pattern,Support
    1 -> 1 2,3
    ");
}
