mod common;

use common::{NativeCompProcess, fixture_path, stderr, stdout, write_tree};

fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

// ============================================================================
// version command
// ============================================================================

#[test]
fn version_human() {
    let output = NativeCompProcess::spawn_command(&["version"]);
    assert!(
        output.status.success(),
        "version should exit 0: {}",
        stderr(&output)
    );

    let stdout = stdout(&output);
    assert!(
        stdout.contains("nativecomp"),
        "version output should contain 'nativecomp': {stdout}"
    );
    assert!(
        stdout.contains('.'),
        "version output should contain a version number: {stdout}"
    );
}

#[test]
fn version_json() {
    let output = NativeCompProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "nativecomp");
    assert!(parsed.get("version").is_some());
}

// ============================================================================
// completions command
// ============================================================================

#[test]
fn completions_bash() {
    let output = NativeCompProcess::spawn_command(&["completions", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.starts_with("declare -A __nativecomp__comp_subcmds"));
    assert!(stdout.contains(r#"__nativecomp__comp_subcmds["nativecomp generate"]"#));
    assert!(stdout.trim_end().ends_with("complete -F __nativecomp__comp_bash nativecomp"));
}

#[test]
fn completions_zsh() {
    let output = NativeCompProcess::spawn_command(&["completions", "zsh"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.starts_with("#compdef nativecomp\n"));
    assert!(stdout.contains("__nativecomp__comp_cmd_nativecomp_generate() {"));
    assert!(stdout.trim_end().ends_with("compdef __nativecomp__comp_cmd_nativecomp nativecomp"));
}

#[test]
fn completions_unknown_shell_falls_back_to_bash() {
    let output = NativeCompProcess::spawn_command(&["completions", "fish"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("declare -A "));
}

#[test]
fn completions_shell_from_env_hint() {
    let output =
        NativeCompProcess::spawn_command_with_env(&["completions"], &[("SHELL", "/usr/bin/zsh")]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("#compdef nativecomp"));
}

// ============================================================================
// generate command
// ============================================================================

#[test]
fn generate_bash_to_stdout() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&["generate", &tree, "--shell", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.contains(r#"__gitlike__comp_subcmds["gitlike"]="commit remote""#));
    assert!(stdout.contains(r#"__gitlike__comp_subcmds["gitlike remote"]="add remove""#));
    assert!(
        stdout.contains(r#"__gitlike__comp_opt_choices["gitlike commit --cleanup"]="strip whitespace verbatim""#)
    );
    assert!(!stdout.contains("gitlike gc"), "hidden command leaked: {stdout}");
}

#[test]
fn generate_zsh_to_stdout() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&["generate", &tree, "--shell", "zsh"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.starts_with("#compdef gitlike\n"));
    assert!(stdout.contains("__gitlike__comp_cmd_gitlike_remote_add() {"));
    assert!(stdout.contains(r#""commit:Record changes to the repository""#));
    assert!(stdout.contains(r#""(-h --help - :)-h[Show help and exit]""#));
    assert!(stdout.contains(r#""*-m+[Use the given message]: :( )""#));
}

#[test]
fn generate_json_tree() {
    let tree = fixture("git_like.json");
    let output = NativeCompProcess::spawn_command(&["generate", &tree, "--shell", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains(r#"__gitlike__comp_subcmds["gitlike"]="commit""#));
}

#[test]
fn generate_name_override() {
    let tree = fixture("git_like.yaml");
    let output =
        NativeCompProcess::spawn_command(&["generate", &tree, "--shell", "bash", "--name", "g-l"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("declare -A __g_l__comp_subcmds"));
    assert!(stdout.trim_end().ends_with("complete -F __g_l__comp_bash g-l"));
}

#[test]
fn generate_shell_from_env() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command_with_env(
        &["generate", &tree],
        &[("NATIVECOMP_SHELL", "zsh")],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("#compdef gitlike"));
}

#[test]
fn generate_eager_exit_override() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&[
        "generate",
        &tree,
        "--shell",
        "zsh",
        "--eager-exit",
        "-C",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains(r#""(-C - :)-C+[Run as if started in PATH]: :( )""#));
    assert!(stdout.contains(r#""(-h --help -)-h[Show help and exit]""#));
}

#[test]
fn generate_to_file() {
    let tree = fixture("git_like.yaml");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gitlike.bash");
    let out_str = out.display().to_string();

    let output = NativeCompProcess::spawn_command(&[
        "generate", &tree, "--shell", "bash", "--output", &out_str,
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("declare -A __gitlike__comp_subcmds"));
    assert!(written.ends_with("complete -F __gitlike__comp_bash gitlike\n"));
}

#[test]
fn generate_without_name_fails() {
    let tree = write_tree("help: nameless\ncommands:\n  sub: {}\n", "yaml");
    let path = tree.path().display().to_string();
    let output = NativeCompProcess::spawn_command(&["generate", &path, "--shell", "bash"]);
    assert_eq!(output.status.code(), Some(10), "{}", stderr(&output));
    assert!(stderr(&output).contains("command name is set"));
}

#[test]
fn generate_without_name_succeeds_with_override() {
    let tree = write_tree("help: nameless\ncommands:\n  sub: {}\n", "yaml");
    let path = tree.path().display().to_string();
    let output = NativeCompProcess::spawn_command(&[
        "generate", &path, "--shell", "bash", "--name", "tool",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains(r#"__tool__comp_subcmds["tool"]="sub""#));
}

#[test]
fn generate_missing_file() {
    let output = NativeCompProcess::spawn_command(&["generate", "/nonexistent/tree.yaml"]);
    assert_eq!(output.status.code(), Some(3), "{}", stderr(&output));
}

#[test]
fn generate_invalid_tree() {
    let tree = fixture("invalid.yaml");
    let output = NativeCompProcess::spawn_command(&["generate", &tree]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr(&output);
    assert!(stderr.contains("validation failed"), "{stderr}");
    assert!(stderr.contains("options[0].flags[0]"), "{stderr}");
}

// ============================================================================
// validate command
// ============================================================================

#[test]
fn validate_valid_tree() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&["validate", &tree]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("git_like.yaml: ok"), "{stdout}");
    assert!(stdout.contains("1 valid, 0 invalid"), "{stdout}");
}

#[test]
fn validate_invalid_tree() {
    let tree = fixture("invalid.yaml");
    let output = NativeCompProcess::spawn_command(&["validate", &tree]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = stdout(&output);
    assert!(stdout.contains("invalid.yaml: invalid"), "{stdout}");
    assert!(stdout.contains("flag 'verbose' must start with '-'"), "{stdout}");
    assert!(stdout.contains("option has no flags"), "{stdout}");
    assert!(stdout.contains("choices require an option that takes a value"), "{stdout}");
}

#[test]
fn validate_json_output() {
    let good = fixture("git_like.yaml");
    let bad = fixture("invalid.yaml");
    let output = NativeCompProcess::spawn_command(&["validate", &good, &bad, "--format", "json"]);
    assert_eq!(output.status.code(), Some(2));

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("validate JSON should be valid");
    assert_eq!(parsed["summary"]["total"], 2);
    assert_eq!(parsed["summary"]["valid"], 1);
    assert_eq!(parsed["summary"]["invalid"], 1);
    assert_eq!(parsed["files"][0]["valid"], true);
    assert_eq!(parsed["files"][1]["valid"], false);
    assert_eq!(parsed["files"][1]["errors"][0]["severity"], "error");
}

#[test]
fn validate_warnings_pass_unless_strict() {
    let tree = fixture("warnings.yaml");
    let output = NativeCompProcess::spawn_command(&["validate", &tree]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("empty choices list"));

    let strict = NativeCompProcess::spawn_command(&["validate", &tree, "--strict"]);
    assert_eq!(strict.status.code(), Some(2));
}

#[test]
fn validate_parse_error() {
    let tree = write_tree("name: [unclosed\n", "yaml");
    let path = tree.path().display().to_string();
    let output = NativeCompProcess::spawn_command(&["validate", &path]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("parse error"));
}

#[test]
fn validate_missing_file() {
    let output = NativeCompProcess::spawn_command(&["validate", "/nonexistent/tree.yaml"]);
    assert_eq!(output.status.code(), Some(3));
}

// ============================================================================
// simulate command
// ============================================================================

fn simulate_json(line: &str) -> serde_json::Value {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&[
        "simulate", &tree, "--line", line, "--format", "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    serde_json::from_str(&stdout(&output)).expect("simulate JSON should be valid")
}

#[test]
fn simulate_subcommand_prefix() {
    let result = simulate_json("gitlike re");
    assert_eq!(result["curcmd"], "gitlike");
    assert_eq!(result["word"], "re");
    assert_eq!(result["candidates"], serde_json::json!(["remote"]));
}

#[test]
fn simulate_nested_group() {
    let result = simulate_json("gitlike remote ");
    assert_eq!(result["curcmd"], "gitlike remote");
    assert_eq!(result["candidates"], serde_json::json!(["add", "remove"]));
}

#[test]
fn simulate_option_choices() {
    let result = simulate_json("gitlike commit --cleanup ");
    assert_eq!(result["curcmd"], "gitlike commit");
    assert_eq!(result["curopt"], "--cleanup");
    assert_eq!(result["toskip"], 1);
    assert_eq!(
        result["candidates"],
        serde_json::json!(["strip", "whitespace", "verbatim"])
    );
}

#[test]
fn simulate_options() {
    let result = simulate_json("gitlike -");
    assert_eq!(
        result["candidates"],
        serde_json::json!(["-h", "--help", "-C", "-v", "--verbose"])
    );
}

#[test]
fn simulate_option_value_skipped() {
    let result = simulate_json("gitlike -C /tmp rem");
    assert_eq!(result["curcmd"], "gitlike");
    assert_eq!(result["candidates"], serde_json::json!(["remote"]));
}

#[test]
fn simulate_human_output() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&["simulate", &tree, "--line", "gitlike "]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("command: gitlike\n"), "{stdout}");
    assert!(stdout.contains("  commit\n"), "{stdout}");
    assert!(stdout.contains("  remote\n"), "{stdout}");
}

#[test]
fn simulate_unbalanced_quotes() {
    let tree = fixture("git_like.yaml");
    let output =
        NativeCompProcess::spawn_command(&["simulate", &tree, "--line", "gitlike 'oops"]);
    assert_eq!(output.status.code(), Some(64));
}

// ============================================================================
// global flags
// ============================================================================

#[test]
fn quiet_suppresses_logs() {
    let tree = fixture("warnings.yaml");
    let output = NativeCompProcess::spawn_command(&["-q", "validate", &tree]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[test]
fn verbose_json_logs() {
    let tree = fixture("git_like.yaml");
    let output = NativeCompProcess::spawn_command(&[
        "-v",
        "--log-format",
        "json",
        "--color",
        "never",
        "validate",
        &tree,
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stderr = stderr(&output);
    let first = stderr.lines().next().expect("expected at least one log line");
    let parsed: serde_json::Value = serde_json::from_str(first).expect("log line should be JSON");
    assert!(parsed.get("level").is_some());
}
