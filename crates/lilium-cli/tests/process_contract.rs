use std::path::Path;
use std::process::{Command, Output};
use std::{env, path::PathBuf};

use tempfile::tempdir;

fn cli_bin_path() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_lilium-cli") {
        return PathBuf::from(path);
    }
    if let Ok(path) = env::var("CARGO_BIN_EXE_lilium_cli") {
        return PathBuf::from(path);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("workspace root");
    let bin_name = if cfg!(windows) {
        "lilium-cli.exe"
    } else {
        "lilium-cli"
    };
    let fallback = workspace_root.join("target").join("debug").join(bin_name);
    assert!(
        fallback.exists(),
        "lilium-cli binary not found at {}",
        fallback.display()
    );
    fallback
}

const LILIUM_ENV_VARS: [&str; 5] = [
    "LILIUM_RESULT_LIMIT",
    "LILIUM_CANDIDATE_LIMIT",
    "LILIUM_SOCKET",
    "LILIUM_CONTROL_TIMEOUT_MS",
    "LILIUM_LOG",
];

fn cli_command() -> Command {
    let mut command = Command::new(cli_bin_path());
    for name in LILIUM_ENV_VARS {
        command.env_remove(name);
    }
    command
}

fn run_cli(args: &[&str]) -> Output {
    run_cli_with_env(args, &[])
}

fn run_cli_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    cli_command()
        .args(args)
        .envs(vars.iter().copied())
        .output()
        .expect("run lilium-cli")
}

fn seed(db: &Path) {
    let output = run_cli(&["seed", db.to_str().expect("db path")]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("seed json");
    assert_eq!(report["notes"], 12);
}

#[test]
fn search_process_contract_returns_ranked_json_paths() {
    // Pseudocode:
    // Given a freshly seeded notes database
    // When running `lilium-cli --db <db> search ref --limit 2`
    // Then process succeeds and prints the two best reference notes in order.
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("notes.db");
    seed(&db);

    let output = run_cli(&[
        "--db",
        db.to_str().expect("db path"),
        "search",
        "ref",
        "--limit",
        "2",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let notes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).expect("json");
    let paths = notes
        .iter()
        .map(|note| note["full_path"].as_str().expect("full_path"))
        .collect::<Vec<_>>();
    assert_eq!(
        paths,
        vec!["reference/git-commands.md", "reference/sql-reference.md"]
    );
}

#[test]
fn search_link_output_prints_markdown_reference_links() {
    // Pseudocode:
    // Given a seeded database
    // When searching with `--link path`
    // Then each stdout line is a `[title][full_path]` markdown link.
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("notes.db");
    seed(&db);

    let output = run_cli(&[
        "--db",
        db.to_str().expect("db path"),
        "search",
        "cli",
        "--link",
        "path",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[cli-tool][projects/rust/cli-tool.md]\n"
    );
}

#[test]
fn blank_search_process_contract_prints_empty_array() {
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("notes.db");
    seed(&db);

    let output = run_cli(&["--db", db.to_str().expect("db path"), "search", "   "]);
    assert!(output.status.success());
    let notes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).expect("json");
    assert!(notes.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty query"));
}

#[test]
fn missing_database_process_contract_emits_json_error_payload() {
    // Pseudocode:
    // Given no database file
    // When running search with `--json-errors`
    // Then process exits non-zero and stderr carries a NOT_FOUND payload.
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("absent.db");

    let output = run_cli(&[
        "--json-errors",
        "--db",
        db.to_str().expect("db path"),
        "search",
        "ab",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let payload: serde_json::Value =
        serde_json::from_str(stderr.lines().last().expect("payload line")).expect("json");
    assert_eq!(payload["code"], "NOT_FOUND");
    assert_eq!(payload["operation"], "search");
    assert_eq!(payload["query"], "ab");
}

#[test]
fn negative_limit_process_contract_is_rejected() {
    let output = run_cli(&["search", "ab", "--limit", "-3"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid limit"));
}

#[test]
fn malformed_search_limits_do_not_block_other_commands() {
    // Pseudocode:
    // Given LILIUM_RESULT_LIMIT=-1 and LILIUM_CANDIDATE_LIMIT=lots in the environment
    // When running `seed` and a `search` that overrides both limits with flags
    // Then both succeed, while a plain `search` reports INVALID_LIMIT.
    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("notes.db");
    let db_arg = db.to_str().expect("db path");
    let bad_env = [
        ("LILIUM_RESULT_LIMIT", "-1"),
        ("LILIUM_CANDIDATE_LIMIT", "lots"),
    ];

    let seeded = run_cli_with_env(&["seed", db_arg], &bad_env);
    assert!(
        seeded.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&seeded.stderr)
    );

    let overridden = run_cli_with_env(
        &[
            "--db",
            db_arg,
            "search",
            "cli",
            "--limit",
            "5",
            "--candidate-limit",
            "50",
        ],
        &bad_env,
    );
    assert!(
        overridden.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&overridden.stderr)
    );
    let notes: Vec<serde_json::Value> = serde_json::from_slice(&overridden.stdout).expect("json");
    assert_eq!(notes.len(), 1);

    let plain = run_cli_with_env(
        &["--json-errors", "--db", db_arg, "search", "cli"],
        &bad_env,
    );
    assert!(!plain.status.success());
    let stderr = String::from_utf8_lossy(&plain.stderr);
    let payload: serde_json::Value =
        serde_json::from_str(stderr.lines().last().expect("payload line")).expect("json");
    assert_eq!(payload["code"], "INVALID_LIMIT");
}

#[cfg(unix)]
#[test]
fn malformed_search_limits_do_not_block_control_clients() {
    let temp = tempdir().expect("tempdir");
    let socket = temp.path().join("palette.sock");

    let output = run_cli_with_env(
        &["--socket", socket.to_str().expect("socket path"), "status"],
        &[("LILIUM_RESULT_LIMIT", "-1")],
    );
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["running"], false);
    assert!(String::from_utf8_lossy(&output.stderr).contains("is the server running?"));
}

#[cfg(unix)]
#[test]
fn status_without_server_returns_non_zero() {
    // Pseudocode:
    // Given a socket path nobody listens on
    // When running `lilium-cli status`
    // Then process reports `running: false` and exits non-zero.
    let temp = tempdir().expect("tempdir");
    let socket = temp.path().join("palette.sock");

    let output = run_cli(&["--socket", socket.to_str().expect("socket path"), "status"]);
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["running"], false);
    assert!(String::from_utf8_lossy(&output.stderr).contains("is the server running?"));
}

#[cfg(unix)]
#[test]
fn serve_process_contract_answers_clients_until_stop() {
    // Pseudocode:
    // Given a seeded database and a running `lilium-cli serve`
    // When clients send toggle, status and stop
    // Then each client succeeds and the server exits with the final visibility.
    use std::process::Stdio;
    use std::thread;
    use std::time::{Duration, Instant};

    let temp = tempdir().expect("tempdir");
    let db = temp.path().join("notes.db");
    let socket = temp.path().join("palette.sock");
    seed(&db);

    let socket_arg = socket.to_str().expect("socket path");
    let server = cli_command()
        .args([
            "--db",
            db.to_str().expect("db path"),
            "--socket",
            socket_arg,
            "serve",
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn serve");

    let deadline = Instant::now() + Duration::from_secs(10);
    while !run_cli(&["--socket", socket_arg, "status"]).status.success() {
        assert!(Instant::now() < deadline, "server did not come up");
        thread::sleep(Duration::from_millis(50));
    }

    assert!(run_cli(&["--socket", socket_arg, "toggle"]).status.success());
    assert!(run_cli(&["--socket", socket_arg, "stop"]).status.success());

    let output = server.wait_with_output().expect("wait serve");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["visible"], true);
    assert_eq!(report["notes"], 12);
    assert!(!socket.exists());
}
