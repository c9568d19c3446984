use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ESTarget {
  Es5,
  Es2015,
  Es2016,
  Es2017,
  Es2018,
  Es2019,
  Es2020,
  Es2021,
  Es2022,
  Es2023,
  Es2024,
  #[default]
  EsNext,
}

impl ESTarget {
  /// The edition number minifiers take as `ecma` (`es2017` is `8`).
  pub fn edition(self) -> Option<u16> {
    match self {
      Self::Es5 => Some(5),
      Self::Es2015 => Some(6),
      Self::Es2016 => Some(7),
      Self::Es2017 => Some(8),
      Self::Es2018 => Some(9),
      Self::Es2019 => Some(10),
      Self::Es2020 => Some(11),
      Self::Es2021 => Some(12),
      Self::Es2022 => Some(13),
      Self::Es2023 => Some(14),
      Self::Es2024 => Some(15),
      Self::EsNext => None,
    }
  }

  /// Inverse of [`ESTarget::edition`], also accepting the year form (`2017`).
  pub fn from_edition(edition: u16) -> Option<Self> {
    Some(match edition {
      5 => Self::Es5,
      6 | 2015 => Self::Es2015,
      7 | 2016 => Self::Es2016,
      8 | 2017 => Self::Es2017,
      9 | 2018 => Self::Es2018,
      10 | 2019 => Self::Es2019,
      11 | 2020 => Self::Es2020,
      12 | 2021 => Self::Es2021,
      13 | 2022 => Self::Es2022,
      14 | 2023 => Self::Es2023,
      15 | 2024 => Self::Es2024,
      _ => return None,
    })
  }
}

impl FromStr for ESTarget {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "es5" => Ok(Self::Es5),
      "es2015" => Ok(Self::Es2015),
      "es2016" => Ok(Self::Es2016),
      "es2017" => Ok(Self::Es2017),
      "es2018" => Ok(Self::Es2018),
      "es2019" => Ok(Self::Es2019),
      "es2020" => Ok(Self::Es2020),
      "es2021" => Ok(Self::Es2021),
      "es2022" => Ok(Self::Es2022),
      "es2023" => Ok(Self::Es2023),
      "es2024" => Ok(Self::Es2024),
      "esnext" => Ok(Self::EsNext),
      _ => Err(format!("Invalid target \"{s}\".")),
    }
  }
}

impl Display for ESTarget {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Es5 => "es5",
      Self::Es2015 => "es2015",
      Self::Es2016 => "es2016",
      Self::Es2017 => "es2017",
      Self::Es2018 => "es2018",
      Self::Es2019 => "es2019",
      Self::Es2020 => "es2020",
      Self::Es2021 => "es2021",
      Self::Es2022 => "es2022",
      Self::Es2023 => "es2023",
      Self::Es2024 => "es2024",
      Self::EsNext => "esnext",
    };
    f.write_str(name)
  }
}

#[test]
fn test_es_target() {
  assert_eq!("es2017".parse::<ESTarget>(), Ok(ESTarget::Es2017));
  assert_eq!(ESTarget::Es2017.edition(), Some(8));
  assert_eq!(ESTarget::EsNext.edition(), None);
  assert_eq!(ESTarget::from_edition(8), Some(ESTarget::Es2017));
  assert_eq!(ESTarget::from_edition(2017), Some(ESTarget::Es2017));
  assert_eq!(ESTarget::from_edition(3), None);
  assert_eq!(ESTarget::Es2017.to_string(), "es2017");
  assert!("es7".parse::<ESTarget>().is_err());
  assert!(ESTarget::Es5 < ESTarget::EsNext);
}
