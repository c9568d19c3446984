mod diagnostic;

use std::ops::{Deref, DerefMut};

pub use crate::diagnostic::ConfigDiagnostic;

/// Every problem found while processing a configuration, in discovery order.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns `Ok(())` when nothing was collected.
  pub fn into_result(self) -> BuildResult<()> {
    if self.0.is_empty() { Ok(()) } else { Err(self) }
  }

  pub fn diagnostics(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
    self.0.iter().filter_map(|error| error.downcast_ref::<ConfigDiagnostic>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<ConfigDiagnostic> for BuildError {
  fn from(diagnostic: ConfigDiagnostic) -> Self {
    Self(vec![diagnostic.into()])
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

impl std::error::Error for BuildError {}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_collects_diagnostics() {
  let mut errors = BuildError(vec![]);
  assert!(BuildError(vec![]).into_result().is_ok());

  errors.push(ConfigDiagnostic::EmptyEntries.into());
  errors.push(anyhow::anyhow!("unrelated"));
  errors.push(ConfigDiagnostic::DuplicatePlugin { kind: "clean-output".to_string() }.into());

  assert_eq!(errors.len(), 3);
  assert_eq!(errors.diagnostics().count(), 2);
  assert_eq!(
    errors.to_string(),
    "No entry points are declared\nunrelated\nPlugin `clean-output` is declared more than once"
  );
  assert!(errors.into_result().is_err());
}
