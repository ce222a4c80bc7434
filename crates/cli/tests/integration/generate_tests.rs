use super::common::{DEFAULT_INSTALL, TestEnv};

#[test]
fn test_generate_prints_yaml() {
  let env = TestEnv::with_default_install();

  let stdout = env.run(&["generate"]);
  assert!(stdout.starts_with("build-directory: build-sparc-gr740-smp-user-qual\n"));
  assert!(stdout.contains("post-process-items:"));
  assert!(stdout.contains("/params/sis-cpus"));
  assert!(stdout.contains("spec-paths:"));
}

#[test]
fn test_generate_is_deterministic() {
  let env = TestEnv::with_default_install();

  assert_eq!(env.run(&["generate"]), env.run(&["generate"]));
}

#[test]
fn test_generate_leon3_has_no_gr740_extras() {
  let env = TestEnv::empty();
  env.run(&["config", "set", "--bsp", "leon3"]);

  let stdout = env.run(&["generate"]);
  assert!(stdout.contains("leon3"));
  assert!(!stdout.contains("sis-cpus"));
  assert!(!stdout.contains("/enabled[0]"));
}

#[test]
fn test_generate_json() {
  let env = TestEnv::with_default_install();

  let document = env.run_json(&["generate", "-o", "json"]);
  assert_eq!(document["build-directory"], "build-sparc-gr740-smp-user-qual");
  let items = document["post-process-items"].as_array().unwrap();
  assert_eq!(items[0]["uid"], "/variant");
  assert_eq!(items[0]["path"], "/prefix-directory");
  assert_eq!(items[0]["value"], env.install_root().to_str().unwrap());
  assert!(items.iter().all(|item| item["action"] == "set"));
}

#[test]
fn test_generate_write_into_install() {
  let env = TestEnv::with_default_install();

  let stdout = env.run(&["generate", "--write"]);
  let target = env
    .install_root()
    .join(DEFAULT_INSTALL)
    .join("qual-tool/config-variants/build-sparc-gr740-smp-user-qual.yml");
  assert!(stdout.contains("Wrote"));
  assert!(target.exists());

  let written = std::fs::read_to_string(&target).unwrap();
  assert_eq!(written, env.run(&["generate"]));
}

#[test]
fn test_generate_write_without_install_fails() {
  let env = TestEnv::empty();

  env
    .qdp_cmd()
    .args(["generate", "--write"])
    .assert()
    .failure()
    .stderr(predicates::str::contains(
      "no RTEMS install matching 'rtems-6-sparc-gr740-smp-5' found",
    ));
}

#[test]
fn test_generate_to_file() {
  let env = TestEnv::empty();
  let target = env.temp.path().join("out").join("patch.yml");

  env.run(&["generate", "--file", target.to_str().unwrap()]);

  let written = std::fs::read_to_string(&target).unwrap();
  assert!(written.starts_with("build-directory: "));
  assert!(!env.temp.path().join("out").join("patch.yml.tmp").exists());
}

#[test]
fn test_generate_json_to_file() {
  let env = TestEnv::with_default_install();
  let target = env.temp.path().join("patch.json");

  env.run(&["generate", "-o", "json", "--file", target.to_str().unwrap()]);

  let written = std::fs::read_to_string(&target).unwrap();
  let document: serde_json::Value = serde_json::from_str(&written).unwrap();
  assert_eq!(document["build-directory"], "build-sparc-gr740-smp-user-qual");
  assert_eq!(document, env.run_json(&["generate", "-o", "json"]));
}

#[test]
fn test_generate_write_conflicts_with_file() {
  let env = TestEnv::empty();

  env
    .qdp_cmd()
    .args(["generate", "--write", "--file", "x.yml"])
    .assert()
    .failure();
}
