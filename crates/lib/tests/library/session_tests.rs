//! End-to-end session scenarios through the public API, backed by real files.

use std::path::PathBuf;

use qdp_lib::patch::PatchDocument;
use qdp_lib::protocol::{Request, Response, Session};
use qdp_lib::settings::{Settings, SettingsOverrides};
use qdp_lib::steps::StepSource;
use qdp_lib::variant::VariantUpdate;
use tempfile::TempDir;

fn settings_in(temp: &TempDir) -> Settings {
  Settings {
    presets_dir: temp.path().join("presets"),
    steps: StepSource::Embedded,
    install_root: temp.path().join("opt"),
    session_file: temp.path().join("session.json"),
  }
}

fn add_install(temp: &TempDir, name: &str) -> PathBuf {
  let path = temp.path().join("opt").join(name);
  std::fs::create_dir_all(&path).unwrap();
  path
}

#[tokio::test]
async fn configuration_survives_reopen() {
  let temp = TempDir::new().unwrap();
  let settings = settings_in(&temp);

  let mut session = Session::open(&settings).await;
  session
    .handle(Request::UpdateConfiguration {
      update: VariantUpdate {
        target_bsp: Some("leon3".to_string()),
        is_smp: Some(false),
        ..Default::default()
      },
    })
    .await
    .unwrap();
  drop(session);

  let mut reopened = Session::open(&settings).await;
  let config = reopened.config_mut().current().await;
  assert_eq!(config.target_bsp, "leon3");
  assert_eq!(config.config_variant, "sparc-leon3-uni");
}

#[tokio::test]
async fn builtin_preset_drives_generation() {
  let temp = TempDir::new().unwrap();
  let settings = settings_in(&temp);
  add_install(&temp, "rtems-6-sparc-gr740-smp-5");

  let mut session = Session::open(&settings).await;
  session.presets().seed_builtins().await.unwrap();
  session
    .handle(Request::LoadPreset {
      name: "minimal".to_string(),
    })
    .await
    .unwrap();

  let document = session.generate_document().await;
  let yaml = document.to_yaml().unwrap();
  let parsed: PatchDocument = serde_yaml::from_str(&yaml).unwrap();
  assert_eq!(parsed, document);

  let links = document
    .post_process_items
    .iter()
    .find(|item| item.uid == "/package-build" && item.path == "/links")
    .unwrap();
  let linked: Vec<&str> = links
    .value
    .as_sequence()
    .unwrap()
    .iter()
    .map(|link| link["uid"].as_str().unwrap())
    .collect();
  assert_eq!(
    linked,
    [
      "steps/build-bsp",
      "steps/build-bsp-qual-only",
      "steps/run-local-target-qual-only"
    ]
  );
}

#[tokio::test]
async fn written_document_lands_in_first_matching_install_by_name() {
  let temp = TempDir::new().unwrap();
  let settings = settings_in(&temp);
  let first = add_install(&temp, "rtems-6-sparc-gr740-smp-5-a");
  add_install(&temp, "rtems-6-sparc-gr740-smp-5-b");

  let mut session = Session::open(&settings).await;
  let Response::PatchDocumentWritten { path } = session.handle(Request::WritePatchDocument).await.unwrap() else {
    panic!("expected patch-document-written");
  };
  assert!(path.starts_with(&first));
  assert!(std::fs::read_to_string(&path).unwrap().contains("gr740"));
}

#[tokio::test]
async fn custom_descriptor_limits_selection() {
  let temp = TempDir::new().unwrap();
  let descriptor = temp.path().join("steps.yml");
  std::fs::write(
    &descriptor,
    "build-steps:\n  - uid: steps/only\n    is_default: true\n",
  )
  .unwrap();
  let settings = Settings {
    steps: StepSource::File(descriptor),
    ..settings_in(&temp)
  };

  let mut session = Session::open(&settings).await;
  let Response::ConfigurationUpdated {
    config, rejected_steps, ..
  } = session
    .handle(Request::UpdateConfiguration {
      update: VariantUpdate {
        selected_steps: Some(vec!["steps/only".to_string(), "steps/build-bsp".to_string()]),
        ..Default::default()
      },
    })
    .await
    .unwrap()
  else {
    panic!("expected configuration-updated");
  };
  assert_eq!(config.selected_steps, vec!["steps/only"]);
  assert_eq!(rejected_steps, vec!["steps/build-bsp"]);
}

#[test]
fn overrides_resolve_without_environment_lookup() {
  let settings = Settings::resolve(SettingsOverrides {
    presets_dir: Some(PathBuf::from("/p")),
    steps_file: Some(PathBuf::from("/s.yml")),
    install_root: Some(PathBuf::from("/i")),
    session_file: Some(PathBuf::from("/f.json")),
  });
  assert_eq!(settings.presets_dir, PathBuf::from("/p"));
  assert_eq!(settings.steps, StepSource::File(PathBuf::from("/s.yml")));
  assert_eq!(settings.install_root, PathBuf::from("/i"));
  assert_eq!(settings.session_file, PathBuf::from("/f.json"));
}
