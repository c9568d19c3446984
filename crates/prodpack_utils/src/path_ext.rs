use std::path::{Path, PathBuf};

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_slash(&self) -> String;

  /// Joins `segment` onto `self` and normalizes the result, dropping any
  /// trailing separator the segment carried (`styles/` becomes `styles`).
  fn join_normalized(&self, segment: &str) -> PathBuf;
}

impl PathExt for Path {
  fn expect_to_slash(&self) -> String {
    self
      .to_slash()
      .unwrap_or_else(|| panic!("Failed to convert {:?} to slash str", self.display()))
      .into_owned()
  }

  fn join_normalized(&self, segment: &str) -> PathBuf {
    self.join(segment.trim_end_matches(['/', '\\'])).normalize()
  }
}

#[test]
fn test_join_normalized() {
  let root = Path::new("/project");
  assert_eq!(root.join_normalized("styles/").expect_to_slash(), "/project/styles");
  assert_eq!(root.join_normalized("./src").expect_to_slash(), "/project/src");
  assert_eq!(root.join_normalized("a/../node_modules").expect_to_slash(), "/project/node_modules");
}
