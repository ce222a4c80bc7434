use super::common::{DEFAULT_INSTALL, TestEnv};

#[test]
fn test_config_show_defaults() {
  let env = TestEnv::empty();

  let config = env.run_json(&["config", "show", "-o", "json"]);
  assert_eq!(config["target_architecture"], "sparc");
  assert_eq!(config["target_bsp"], "gr740");
  assert_eq!(config["is_smp"], true);
  assert_eq!(config["config_variant"], "sparc-gr740-smp");
  assert_eq!(config["deployment_directory"], "/opt/rtems-6-sparc-gr740-smp-5");
  assert_eq!(config["selected_steps"].as_array().unwrap().len(), 7);
}

#[test]
fn test_config_show_uses_found_install() {
  let env = TestEnv::with_default_install();

  let config = env.run_json(&["config", "show", "-o", "json"]);
  let expected = env.install_root().join(DEFAULT_INSTALL);
  assert_eq!(config["deployment_directory"], expected.to_str().unwrap());
}

#[test]
fn test_config_set_persists_between_runs() {
  let env = TestEnv::empty();

  env.run(&["config", "set", "--bsp", "leon3", "--smp", "false"]);
  assert!(env.session_file().exists());

  let config = env.run_json(&["config", "show", "-o", "json"]);
  assert_eq!(config["target_bsp"], "leon3");
  assert_eq!(config["is_smp"], false);
  assert_eq!(config["config_variant"], "sparc-leon3-uni");
}

#[test]
fn test_config_set_drops_unknown_steps() {
  let env = TestEnv::empty();

  let reply = env.run_json(&[
    "config",
    "set",
    "--steps",
    "steps/build-bsp,steps/bogus,steps/build-bsp",
    "-o",
    "json",
  ]);
  assert_eq!(reply["kind"], "configuration-updated");
  assert_eq!(reply["outcome"]["status"], "persisted");
  assert_eq!(reply["config"]["selected_steps"], serde_json::json!(["steps/build-bsp"]));
  assert_eq!(reply["rejected_steps"], serde_json::json!(["steps/bogus"]));
}

#[test]
fn test_config_set_warns_on_unknown_step() {
  let env = TestEnv::empty();

  let output = env
    .qdp_cmd()
    .args(["config", "set", "--steps", "steps/bogus"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Unknown build step ignored: steps/bogus"));
}

#[test]
fn test_config_set_without_fields_changes_nothing() {
  let env = TestEnv::empty();

  let stdout = env.run(&["config", "set"]);
  assert!(stdout.contains("Nothing to change"));
  assert!(!env.session_file().exists());
}

#[test]
fn test_config_reset_restores_defaults() {
  let env = TestEnv::empty();

  env.run(&["config", "set", "--arch", "arm", "--build-dir", "custom"]);
  env.run(&["config", "reset"]);

  let config = env.run_json(&["config", "show", "-o", "json"]);
  assert_eq!(config["target_architecture"], "sparc");
  assert_eq!(config["build_directory"], "build-sparc-gr740-smp-user-qual");
}

#[test]
fn test_corrupt_session_falls_back_to_defaults() {
  let env = TestEnv::empty();
  env.write_file("config/session.json", "{ not json");

  let config = env.run_json(&["config", "show", "-o", "json"]);
  assert_eq!(config["target_bsp"], "gr740");
}

#[test]
fn test_unwritable_session_keeps_change_in_memory() {
  let env = TestEnv::empty();
  // A directory where the session file should be makes every save fail.
  std::fs::create_dir_all(env.session_file()).unwrap();

  let reply = env.run_json(&["config", "set", "--bsp", "leon3", "-o", "json"]);
  assert_eq!(reply["outcome"]["status"], "in-memory-only");
  assert_eq!(reply["config"]["target_bsp"], "leon3");
}
