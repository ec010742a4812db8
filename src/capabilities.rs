//! Concrete capabilities bound into the registry by the backend profiles.
//!
//! Types generic over [`ModelTraits`] are instantiated once per backend, so the same
//! registry name maps to a distinct product type for each model.

pub mod covariance;
pub mod localization;
pub mod model;
pub mod observation;

use anyhow::{bail, ensure, Result};
use serde_json::Value;
use std::fmt;

/// Compile-time description of a numerical model backend.
pub trait ModelTraits: fmt::Debug + Send + Sync + 'static {
    const BACKEND: &'static str;
}

/// Configuration section a capability forwards untouched to its numerical
/// implementation. Only the selector key is interpreted on this side.
#[derive(Debug, Clone, PartialEq)]
pub struct Params(Value);

impl Params {
    pub fn new(section: &Value) -> Result<Self> {
        ensure!(section.is_object(), "parameters must be a JSON object");
        Ok(Self(section.clone()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Accepts ISO 8601 durations such as `PT1H` or `P1DT6H30M`.
pub(crate) fn check_duration(field: &str, value: &str) -> Result<()> {
    let Some(body) = value.strip_prefix('P') else {
        bail!("{field} \"{value}\" must be an ISO 8601 duration starting with 'P'");
    };
    ensure!(!body.is_empty(), "{field} \"{value}\" has no components");

    let (date, time) = match body.split_once('T') {
        Some((date, time)) => {
            ensure!(!time.is_empty(), "{field} \"{value}\" has an empty time part");
            (date, time)
        }
        None => (body, ""),
    };
    check_components(field, value, date, &['Y', 'M', 'W', 'D'])?;
    check_components(field, value, time, &['H', 'M', 'S'])?;
    Ok(())
}

fn check_components(field: &str, value: &str, part: &str, designators: &[char]) -> Result<()> {
    let mut digits = 0usize;
    for ch in part.chars() {
        if ch.is_ascii_digit() {
            digits += 1;
        } else if designators.contains(&ch) && digits > 0 {
            digits = 0;
        } else {
            bail!("{field} \"{value}\" is not a valid ISO 8601 duration");
        }
    }
    ensure!(
        digits == 0,
        "{field} \"{value}\" ends with a number missing its unit"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn durations() {
        for ok in ["PT1H", "PT30M", "P1D", "P1DT6H30M", "PT900S"] {
            check_duration("window length", ok).unwrap_or_else(|err| panic!("{ok}: {err}"));
        }
        for bad in ["1H", "P", "PT", "PTH", "PT1", "PT1X", "P1H"] {
            assert!(check_duration("window length", bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn params_keep_unknown_keys() {
        let params = Params::new(&json!({
            "name": "FV3LM",
            "tstep": "PT1H",
            "some future option": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(params.get("tstep"), Some(&json!("PT1H")));
        assert_eq!(params.get("some future option"), Some(&json!([1, 2, 3])));
        assert!(Params::new(&json!("FV3LM")).is_err());
    }
}
