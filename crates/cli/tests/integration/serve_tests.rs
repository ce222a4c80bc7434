use serde_json::Value;

use super::common::TestEnv;

/// Feed `input` to `qdp serve` and parse one JSON reply per output line.
fn serve(env: &TestEnv, input: &str) -> Vec<Value> {
  let output = env.qdp_cmd().arg("serve").write_stdin(input).output().unwrap();
  assert!(
    output.status.success(),
    "serve failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  String::from_utf8_lossy(&output.stdout)
    .lines()
    .map(|line| serde_json::from_str(line).unwrap())
    .collect()
}

#[test]
fn test_serve_answers_each_line() {
  let env = TestEnv::with_default_install();

  let replies = serve(
    &env,
    "{\"kind\":\"get-configuration\"}\n\n{\"kind\":\"get-presets\"}\n{\"kind\":\"get-build-step-metadata\"}\n",
  );
  assert_eq!(replies.len(), 3);
  assert_eq!(replies[0]["kind"], "configuration");
  assert_eq!(replies[0]["config"]["target_bsp"], "gr740");
  assert_eq!(replies[1]["kind"], "presets");
  assert_eq!(replies[1]["protected"], serde_json::json!(["default", "minimal", "full"]));
  assert_eq!(replies[2]["kind"], "build-step-metadata");
}

#[test]
fn test_serve_continues_after_bad_request() {
  let env = TestEnv::empty();

  let replies = serve(&env, "garbage\n{\"kind\":\"launch\"}\n{\"kind\":\"get-configuration\"}\n");
  assert_eq!(replies.len(), 3);
  assert_eq!(replies[0]["kind"], "error");
  assert!(replies[0]["message"].as_str().unwrap().starts_with("invalid request"));
  assert_eq!(replies[1]["kind"], "error");
  assert_eq!(replies[2]["kind"], "configuration");
}

#[test]
fn test_serve_protected_delete() {
  let env = TestEnv::empty();

  let replies = serve(&env, "{\"kind\":\"delete-preset\",\"name\":\"default\"}\n");
  assert_eq!(
    replies[0],
    serde_json::json!({
      "kind": "error",
      "message": "delete-preset: preset 'default' is built in and cannot be deleted"
    })
  );
}

#[test]
fn test_serve_update_then_generate() {
  let env = TestEnv::empty();

  let replies = serve(
    &env,
    concat!(
      "{\"kind\":\"update-configuration\",\"update\":{\"target_bsp\":\"leon3\",\"deployment_directory\":\"/x\"}}\n",
      "{\"kind\":\"generate-patch-document\"}\n",
    ),
  );
  assert_eq!(replies[0]["kind"], "configuration-updated");
  assert_eq!(replies[0]["config"]["target_bsp"], "leon3");
  assert_eq!(replies[0]["config"]["deployment_directory"], "/opt/rtems-6-sparc-gr740-smp-5");

  assert_eq!(replies[1]["kind"], "patch-document");
  let yaml = replies[1]["yaml"].as_str().unwrap();
  assert!(yaml.contains("leon3"));
  assert!(!yaml.contains("sis-cpus"));
}

#[test]
fn test_serve_state_survives_restart() {
  let env = TestEnv::empty();

  serve(
    &env,
    "{\"kind\":\"update-configuration\",\"update\":{\"is_smp\":false}}\n",
  );
  let replies = serve(&env, "{\"kind\":\"get-configuration\"}\n");
  assert_eq!(replies[0]["config"]["config_variant"], "sparc-gr740-uni");
}
