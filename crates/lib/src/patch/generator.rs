//! Turns a [`VariantConfig`] into patch items.
//!
//! The output is a fixed pipeline of producers concatenated in order. Values
//! may contain `${<uid>:<path>}` references; they are resolved by the
//! downstream consumer and emitted verbatim here.

use serde_yaml::{Mapping, Value};

use crate::variant::VariantConfig;

use super::bsp::extra_items;
use super::types::{PatchItem, PatchList};

pub const VARIANT_UID: &str = "/variant";
pub const DJF_SVR_STEP_UID: &str = "/steps/build-djf-svr";
pub const DJF_SVR_DEPLOY_UID: &str = "/dirs/djf-svr-deploy/dir";
pub const DDF_SDD_DEPLOY_UID: &str = "/dirs/ddf-sdd-deploy/dir";
pub const QUAL_ONLY_RUN_UID: &str = "/steps/run-local-target-qual-only";
pub const QUAL_ONLY_COVERAGE_RUN_UID: &str = "/steps/run-local-target-qual-only-coverage";
pub const PACKAGE_BUILD_UID: &str = "/package-build";

/// Config file used by the SVR step.
pub const DJF_SVR_CONFIG_FILE: &str = "rtems/djf/svr/config_user.yml";

/// Role of every link from the package build to a selected step.
pub const BUILD_STEP_ROLE: &str = "build-step";

const RTEMS_TEST: &str = "${../variant:/deployment-directory}/bin/rtems-test";

/// Build the complete, ordered item list for `config`.
pub fn generate(config: &VariantConfig) -> Vec<PatchItem> {
  let mut items = PatchList::new();
  items.extend(variant_items(config));
  items.extend(arch_bsp_items(config));
  items.push(test_log_files_item(config));
  items.extend(deploy_items());
  items.push(djf_svr_config_item());
  items.push(test_command_item(QUAL_ONLY_RUN_UID, config, false));
  items.push(test_command_item(QUAL_ONLY_COVERAGE_RUN_UID, config, true));
  items.push(package_build_links_item(config));
  items.into_vec()
}

/// Strip the last segment of a `/`-separated path.
///
/// A path with a single segment (`/opt`, `opt`) is returned unchanged.
pub fn parent_directory(path: &str) -> String {
  let trimmed = path.trim_end_matches('/');
  if trimmed.split('/').filter(|s| !s.is_empty()).count() < 2 {
    return path.to_string();
  }
  match trimmed.rfind('/') {
    Some(i) => trimmed[..i].trim_end_matches('/').to_string(),
    None => path.to_string(),
  }
}

fn variant_items(config: &VariantConfig) -> Vec<PatchItem> {
  vec![PatchItem::set(
    VARIANT_UID,
    "/prefix-directory",
    parent_directory(&config.deployment_directory),
  )]
}

fn arch_bsp_items(config: &VariantConfig) -> Vec<PatchItem> {
  let mut items = vec![
    PatchItem::set(VARIANT_UID, "/arch", config.target_architecture.as_str()),
    PatchItem::set(VARIANT_UID, "/bsp", config.target_bsp.as_str()),
  ];
  items.extend(extra_items(VARIANT_UID, &config.target_bsp));
  items
}

fn report_log(platform: &str, coverage: bool) -> String {
  let suffix = if coverage { "-cov" } else { "" };
  format!(
    "${{../variant:/build-directory}}/test-reports/log-run-rtems-qual-only-{}{}.yaml",
    platform, suffix
  )
}

fn test_log_files_item(config: &VariantConfig) -> PatchItem {
  let mut entry = Mapping::new();
  entry.insert("platform-description".into(), config.platform.description.as_str().into());
  entry.insert("platform-name".into(), config.platform.name.as_str().into());
  entry.insert("standard-log".into(), report_log(&config.platform.name, false).into());
  entry.insert("coverage-log".into(), report_log(&config.platform.name, true).into());

  PatchItem::set(
    DJF_SVR_STEP_UID,
    "/test-log-files",
    Value::Sequence(vec![Value::Mapping(entry)]),
  )
}

fn deploy_items() -> [PatchItem; 2] {
  [
    PatchItem::set(
      DJF_SVR_DEPLOY_UID,
      "/directory",
      "${/variant:/deployment-directory}/user_doc/djf/svr",
    ),
    PatchItem::set(
      DDF_SDD_DEPLOY_UID,
      "/directory",
      "${/variant:/deployment-directory}/user_doc/ddf/sdd",
    ),
  ]
}

fn djf_svr_config_item() -> PatchItem {
  PatchItem::set(DJF_SVR_STEP_UID, "/config-file", DJF_SVR_CONFIG_FILE)
}

fn test_command_item(uid: &str, config: &VariantConfig, coverage: bool) -> PatchItem {
  let suffix = if coverage { "-cov" } else { "" };
  let report_path = format!(
    "--report-path=${{.:executables-directory}}/log-run-rtems-qual-only-{}{}",
    config.platform.name, suffix
  );
  let command: Vec<Value> = [
    RTEMS_TEST,
    "--user-config=${.:config-directory}/${.:config-file}",
    "--rtems-bsp=${.:config-variant}",
    ".",
    "--log-mode=all",
    "--jobs=1",
    "--timeout=7200",
    "--report-format=yaml",
  ]
  .into_iter()
  .map(Value::from)
  .chain(std::iter::once(Value::from(report_path)))
  .collect();

  PatchItem::set(uid, "/commands", Value::Sequence(vec![Value::Sequence(command)]))
}

fn package_build_links_item(config: &VariantConfig) -> PatchItem {
  let links = config
    .selected_steps
    .iter()
    .map(|step| {
      let mut link = Mapping::new();
      link.insert("role".into(), BUILD_STEP_ROLE.into());
      link.insert("uid".into(), step.as_str().into());
      Value::Mapping(link)
    })
    .collect();

  PatchItem::set(PACKAGE_BUILD_UID, "/links", Value::Sequence(links))
}
