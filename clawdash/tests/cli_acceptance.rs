use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write_config(&self, body: &str) -> PathBuf {
        let path = self.xdg_config.join("clawdash/config.toml");
        fs::create_dir_all(path.parent().expect("missing config parent"))
            .expect("failed to create config dir");
        fs::write(&path, body).expect("failed to write config");
        path
    }
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("clawdash"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("CLAWDASH_TOKEN")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute clawdash: {e}"))
}

#[test]
fn help_lists_connection_flags() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--url"));
    assert!(stdout.contains("--token"));
    assert!(stdout.contains("--config"));
}

#[test]
fn missing_token_fails_before_touching_terminal() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Token required"),
        "expected token error, got:\n{stderr}"
    );
}

#[test]
fn blank_config_token_counts_as_missing() {
    let env = CliTestEnv::new();
    env.write_config("[gateway]\ntoken = \"   \"\n");
    let output = run_bin(&env, &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Token required"));
}

#[test]
fn invalid_url_is_rejected() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["--url", "ftp://gateway", "--token", "t"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gateway.url"), "got:\n{stderr}");
}

#[test]
fn alternate_config_file_is_validated() {
    let env = CliTestEnv::new();
    let path = env.xdg_config.join("other.toml");
    fs::write(&path, "[logs]\ncapacity = 0\n").expect("failed to write config");

    let output = run_bin(&env, &["--config", path.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("logs.capacity"));
}
