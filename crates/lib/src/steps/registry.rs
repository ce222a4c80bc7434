use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use super::source::StepSource;
use super::types::{BuildStepDescriptor, CategoryDescriptor, RawCategory, RawDescriptor, RawStep, StepError, Validation};

/// Indexed build-step and category metadata.
///
/// Steps and categories keep the order in which the descriptor lists them. A
/// uid (or category id) listed twice keeps its first position and takes the
/// later record's contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registry {
  #[serde(rename = "build_steps")]
  steps: Vec<BuildStepDescriptor>,
  categories: Vec<CategoryDescriptor>,
  default_build_steps: Vec<String>,
  #[serde(skip)]
  step_index: HashMap<String, usize>,
  #[serde(skip)]
  category_index: HashMap<String, usize>,
}

impl Registry {
  /// Parse a descriptor document.
  ///
  /// Never fails: a document that cannot be parsed yields an empty registry,
  /// which disables step selection without breaking configuration loading.
  pub fn parse(text: &str) -> Self {
    match serde_yaml::from_str::<RawDescriptor>(text) {
      Ok(raw) => Self::from_raw(raw),
      Err(e) => {
        warn!(error = %e, "failed to parse build-step descriptor, continuing with no steps");
        Self::default()
      }
    }
  }

  /// Load from `source`; see [`StepSource::load`].
  pub async fn load(source: &StepSource) -> Self {
    source.load().await
  }

  fn from_raw(raw: RawDescriptor) -> Self {
    let mut registry = Self::default();

    for value in raw.build_steps.unwrap_or_default() {
      match serde_yaml::from_value::<RawStep>(value) {
        Ok(step) => {
          if let Some(step) = step.into_descriptor() {
            registry.insert_step(step);
          }
        }
        Err(e) => warn!(error = %e, "skipping malformed build step"),
      }
    }
    for value in raw.categories.unwrap_or_default() {
      match serde_yaml::from_value::<RawCategory>(value) {
        Ok(category) => {
          if let Some(category) = category.into_descriptor() {
            registry.insert_category(category);
          }
        }
        Err(e) => warn!(error = %e, "skipping malformed category"),
      }
    }
    registry.default_build_steps = raw.default_build_steps.unwrap_or_default();

    debug!(
      steps = registry.steps.len(),
      categories = registry.categories.len(),
      "loaded build-step registry"
    );
    registry
  }

  fn insert_step(&mut self, step: BuildStepDescriptor) {
    match self.step_index.get(&step.uid) {
      Some(&i) => self.steps[i] = step,
      None => {
        self.step_index.insert(step.uid.clone(), self.steps.len());
        self.steps.push(step);
      }
    }
  }

  fn insert_category(&mut self, category: CategoryDescriptor) {
    match self.category_index.get(&category.id) {
      Some(&i) => self.categories[i] = category,
      None => {
        self.category_index.insert(category.id.clone(), self.categories.len());
        self.categories.push(category);
      }
    }
  }

  /// True when no steps were loaded (missing or corrupt descriptor).
  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  /// All steps in descriptor order.
  pub fn steps(&self) -> impl Iterator<Item = &BuildStepDescriptor> {
    self.steps.iter()
  }

  /// All categories in descriptor order.
  pub fn categories(&self) -> impl Iterator<Item = &CategoryDescriptor> {
    self.categories.iter()
  }

  pub fn lookup(&self, uid: &str) -> Option<&BuildStepDescriptor> {
    self.step_index.get(uid).map(|&i| &self.steps[i])
  }

  /// Like [`Registry::lookup`], for callers that report a miss to a user.
  pub fn require(&self, uid: &str) -> Result<&BuildStepDescriptor, StepError> {
    self.lookup(uid).ok_or_else(|| StepError::NotFound(uid.to_string()))
  }

  /// Category metadata, synthesized from the id when no descriptor exists.
  pub fn category(&self, id: &str) -> Cow<'_, CategoryDescriptor> {
    match self.category_index.get(id) {
      Some(&i) => Cow::Borrowed(&self.categories[i]),
      None => Cow::Owned(CategoryDescriptor::fallback(id)),
    }
  }

  /// Steps grouped by category id, each group sorted by display name.
  pub fn steps_by_category(&self) -> BTreeMap<&str, Vec<&BuildStepDescriptor>> {
    let mut grouped: BTreeMap<&str, Vec<&BuildStepDescriptor>> = BTreeMap::new();
    for step in &self.steps {
      grouped.entry(step.category.as_str()).or_default().push(step);
    }
    for group in grouped.values_mut() {
      group.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uid.cmp(&b.uid)));
    }
    grouped
  }

  /// The explicit default list, or every step flagged `is_default` when the
  /// explicit list is empty or absent.
  pub fn default_steps(&self) -> Vec<String> {
    if !self.default_build_steps.is_empty() {
      return self.default_build_steps.clone();
    }
    self
      .steps
      .iter()
      .filter(|step| step.is_default)
      .map(|step| step.uid.clone())
      .collect()
  }

  /// Split candidates into known and unknown uids, keeping input order.
  pub fn validate<S: AsRef<str>>(&self, candidates: &[S]) -> Validation {
    let mut validation = Validation::default();
    for candidate in candidates {
      let uid = candidate.as_ref();
      if self.step_index.contains_key(uid) {
        validation.valid.push(uid.to_string());
      } else {
        validation.invalid.push(uid.to_string());
      }
    }
    validation
  }
}
