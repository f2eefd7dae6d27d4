use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::scoring::ColorBucket;

/// One exoplanet row from the catalog.
///
/// Input fields mirror the archive column names on the wire (`pl_name`,
/// `pl_orbsmax`, ...). Numeric inputs are parsed leniently: numbers, numeric
/// strings, `null` and `""` are all accepted, and anything that is not a
/// finite number becomes `None`. Columns without a typed field are kept in
/// [`metadata`](Self::metadata) untouched.
///
/// `snr`, `is_habitable` and `color` are derived by the pipeline and are
/// `None` on freshly ingested records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanetRecord {
    /// Planet name. Not unique across the catalog.
    #[serde(rename = "pl_name", default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Host star name.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Orbital period in days.
    #[serde(rename = "pl_orbper", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbital_period: Option<f64>,
    /// Orbital semi-major axis in AU.
    #[serde(rename = "pl_orbsmax", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(rename = "pl_rade", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_radius: Option<f64>,
    /// Stellar radius in solar radii.
    #[serde(rename = "st_rad", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stellar_radius: Option<f64>,
    /// Stellar effective temperature in kelvin.
    #[serde(rename = "st_teff", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stellar_teff: Option<f64>,
    /// Distance to the system in parsecs.
    #[serde(rename = "sy_dist", default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_distance: Option<f64>,
    /// Right ascension in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ra: Option<f64>,
    /// Declination in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec: Option<f64>,

    /// Signal-to-noise under the current instrument settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f64>,
    /// Habitable-zone flag; absent unless habitability is enabled and the
    /// inputs are valid.
    #[serde(rename = "isHabitable", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_habitable: Option<bool>,
    /// Display bucket derived from `snr`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorBucket>,

    /// Remaining catalog columns.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PlanetRecord {
    /// Record with just a name; all measurements missing.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether semi-major axis, stellar temperature and stellar radius are
    /// all finite and positive, the precondition for the habitability check.
    #[must_use]
    pub fn has_habitability_inputs(&self) -> bool {
        let valid =
            |field: Option<f64>| field.is_some_and(|v| v.is_finite() && v > 0.0);
        valid(self.semi_major_axis)
            && valid(self.stellar_teff)
            && valid(self.stellar_radius)
    }

    /// Copy of this record with every derived field cleared.
    #[must_use]
    pub fn without_derived(&self) -> Self {
        Self {
            snr: None,
            is_habitable: None,
            color: None,
            ..self.clone()
        }
    }
}

/// Interpret a JSON value as a finite number.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(numeric_value))
}

fn lenient_opt_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_string(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_strings_and_nulls() {
        let json = r#"{
            "pl_name": "Kepler-22 b",
            "pl_orbper": 289.86,
            "pl_orbsmax": "0.812",
            "pl_rade": null,
            "st_rad": "",
            "st_teff": "abc",
            "sy_dist": 195
        }"#;
        let rec: PlanetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.name, "Kepler-22 b");
        assert_eq!(rec.orbital_period, Some(289.86));
        assert_eq!(rec.semi_major_axis, Some(0.812));
        assert_eq!(rec.planet_radius, None);
        assert_eq!(rec.stellar_radius, None);
        assert_eq!(rec.stellar_teff, None);
        assert_eq!(rec.system_distance, Some(195.0));
    }

    #[test]
    fn unknown_columns_land_in_metadata() {
        let json = r#"{"pl_name": "b", "disc_year": 2011, "discoverymethod": "Transit"}"#;
        let rec: PlanetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.metadata["disc_year"], Value::from(2011));
        assert_eq!(rec.metadata["discoverymethod"], Value::from("Transit"));
        assert!(!rec.metadata.contains_key("pl_name"));
    }

    #[test]
    fn non_finite_strings_are_missing() {
        let json = r#"{"pl_name": "x", "pl_rade": "inf", "st_rad": "NaN"}"#;
        let rec: PlanetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.planet_radius, None);
        assert_eq!(rec.stellar_radius, None);
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let rec: PlanetRecord = serde_json::from_str("{}").unwrap();
        assert!(rec.name.is_empty());
        assert!(!rec.has_habitability_inputs());
    }

    #[test]
    fn derived_fields_serialize_under_wire_names() {
        let mut rec = PlanetRecord::named("p");
        rec.snr = Some(12.5);
        rec.is_habitable = Some(true);
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["pl_name"], Value::from("p"));
        assert_eq!(value["snr"], Value::from(12.5));
        assert_eq!(value["isHabitable"], Value::from(true));
        assert!(value.get("pl_rade").is_none());

        let cleared = rec.without_derived();
        assert_eq!(cleared.snr, None);
        assert_eq!(cleared.is_habitable, None);
        assert_eq!(cleared.name, "p");
    }
}
