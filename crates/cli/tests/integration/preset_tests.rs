use super::common::TestEnv;

#[test]
fn test_preset_list_empty() {
  let env = TestEnv::empty();

  let stdout = env.run(&["preset", "list"]);
  assert!(stdout.contains("No presets found"));
}

#[test]
fn test_preset_init_installs_builtins() {
  let env = TestEnv::empty();

  let stdout = env.run(&["preset", "init"]);
  assert!(stdout.contains("default, minimal, full"));
  assert!(env.presets_dir().join("minimal.yml").exists());

  let presets = env.run_json(&["preset", "list", "-o", "json"]);
  let names: Vec<&str> = presets
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["default", "minimal", "full"]);
  assert!(presets.as_array().unwrap().iter().all(|p| p["protected"] == true));

  let stdout = env.run(&["preset", "init"]);
  assert!(stdout.contains("already present"));
}

#[test]
fn test_preset_init_keeps_edited_builtin() {
  let env = TestEnv::empty();
  env.write_file("presets/default.yml", "name: default\nsteps: [steps/build-bsp]\n");

  env.run(&["preset", "init"]);

  let record = env.run_json(&["preset", "show", "default", "-o", "json"]);
  assert_eq!(record["steps"], serde_json::json!(["steps/build-bsp"]));
}

#[test]
fn test_preset_save_and_load() {
  let env = TestEnv::empty();

  env.run(&["config", "set", "--steps", "steps/build-ddf-sdd,steps/build-djf-svr"]);
  let stdout = env.run(&["preset", "save", "docs", "-d", "documents only"]);
  assert!(stdout.contains("Saved preset 'docs'"));

  let record = env.run_json(&["preset", "show", "docs", "-o", "json"]);
  assert_eq!(record["name"], "docs");
  assert_eq!(record["description"], "documents only");

  env.run(&["config", "reset"]);
  let stdout = env.run(&["preset", "load", "docs"]);
  assert!(stdout.contains("Loaded preset 'docs'"));

  let config = env.run_json(&["config", "show", "-o", "json"]);
  assert_eq!(
    config["selected_steps"],
    serde_json::json!(["steps/build-ddf-sdd", "steps/build-djf-svr"])
  );
}

#[test]
fn test_preset_list_orders_user_presets_after_builtins() {
  let env = TestEnv::empty();
  env.run(&["preset", "init"]);
  env.run(&["preset", "save", "zeta"]);
  env.run(&["preset", "save", "alpha"]);

  let stdout = env.run(&["preset", "list"]);
  let lines: Vec<&str> = stdout.lines().collect();
  assert_eq!(
    &lines[..5],
    [
      "default (built-in)",
      "minimal (built-in)",
      "full (built-in)",
      "alpha",
      "zeta"
    ]
  );
}

#[test]
fn test_preset_load_missing_fails() {
  let env = TestEnv::empty();

  env
    .qdp_cmd()
    .args(["preset", "load", "nope"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("preset 'nope' not found"));
}

#[test]
fn test_preset_save_rejects_path_like_name() {
  let env = TestEnv::empty();

  env
    .qdp_cmd()
    .args(["preset", "save", "../escape"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("invalid preset name"));
}

#[test]
fn test_preset_delete_protected_fails() {
  let env = TestEnv::empty();
  env.run(&["preset", "init"]);

  env
    .qdp_cmd()
    .args(["preset", "delete", "full", "--force"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("built in and cannot be deleted"));
  assert!(env.presets_dir().join("full.yml").exists());
}

#[test]
fn test_preset_delete_requires_confirmation() {
  let env = TestEnv::empty();
  env.run(&["preset", "save", "mine"]);

  env
    .qdp_cmd()
    .args(["preset", "delete", "mine"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("--force"));
  assert!(env.presets_dir().join("mine.yml").exists());
}

#[test]
fn test_preset_delete_with_force() {
  let env = TestEnv::empty();
  env.run(&["preset", "save", "mine"]);

  let stdout = env.run(&["preset", "delete", "mine", "--force"]);
  assert!(stdout.contains("Deleted preset 'mine'"));
  assert!(!env.presets_dir().join("mine.yml").exists());

  env
    .qdp_cmd()
    .args(["preset", "delete", "mine", "--force"])
    .assert()
    .failure()
    .stderr(predicates::str::contains("not found"));
}
