//! Address normalization
//!
//! Turns the address components of a reverse-geocoding result into a flat
//! [`AddressRecord`] with one field per recognized component type.

use serde::{Deserialize, Serialize};

/// One labeled fragment of a geocoded address, as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Full text of the component (e.g. "Galle Road")
    pub long_name: String,

    /// Abbreviated text of the component (e.g. "LK")
    #[serde(default)]
    pub short_name: String,

    /// Type identifiers, most specific first
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Create a component with a long name and its type list
    pub fn new(long_name: impl Into<String>, types: &[&str]) -> Self {
        let long_name = long_name.into();
        Self {
            short_name: long_name.clone(),
            long_name,
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// The type the normalizer keys on
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }
}

/// Component types that have a field in [`AddressRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKey {
    StreetNumber,
    Route,
    Political,
    Locality,
    #[serde(rename = "administrative_area_level_2")]
    AdministrativeAreaLevel2,
    #[serde(rename = "administrative_area_level_1")]
    AdministrativeAreaLevel1,
    Country,
    PostalCode,
    PlusCode,
    Subpremise,
    Premise,
}

impl AddressKey {
    /// Every recognized key, in record field order
    pub const ALL: [AddressKey; 11] = [
        AddressKey::StreetNumber,
        AddressKey::Route,
        AddressKey::Political,
        AddressKey::Locality,
        AddressKey::AdministrativeAreaLevel2,
        AddressKey::AdministrativeAreaLevel1,
        AddressKey::Country,
        AddressKey::PostalCode,
        AddressKey::PlusCode,
        AddressKey::Subpremise,
        AddressKey::Premise,
    ];

    /// The provider type string for this key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreetNumber => "street_number",
            Self::Route => "route",
            Self::Political => "political",
            Self::Locality => "locality",
            Self::AdministrativeAreaLevel2 => "administrative_area_level_2",
            Self::AdministrativeAreaLevel1 => "administrative_area_level_1",
            Self::Country => "country",
            Self::PostalCode => "postal_code",
            Self::PlusCode => "plus_code",
            Self::Subpremise => "subpremise",
            Self::Premise => "premise",
        }
    }
}

impl std::fmt::Display for AddressKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AddressKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "street_number" => Ok(Self::StreetNumber),
            "route" => Ok(Self::Route),
            "political" => Ok(Self::Political),
            "locality" => Ok(Self::Locality),
            "administrative_area_level_2" => Ok(Self::AdministrativeAreaLevel2),
            "administrative_area_level_1" => Ok(Self::AdministrativeAreaLevel1),
            "country" => Ok(Self::Country),
            "postal_code" => Ok(Self::PostalCode),
            "plus_code" => Ok(Self::PlusCode),
            "subpremise" => Ok(Self::Subpremise),
            "premise" => Ok(Self::Premise),
            _ => Err(format!("Unrecognized address component type: {}", s)),
        }
    }
}

/// Flat address record sent to the backend
///
/// Unset fields serialize as `null`, so the JSON form always carries the
/// same twelve keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub street_number: Option<String>,
    pub route: Option<String>,
    pub political: Option<String>,
    pub locality: Option<String>,
    pub administrative_area_level_2: Option<String>,
    pub administrative_area_level_1: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub plus_code: Option<String>,
    pub subpremise: Option<String>,
    pub premise: Option<String>,
    pub formatted_address: Option<String>,
}

impl AddressRecord {
    /// Get the value stored for a component key
    pub fn get(&self, key: AddressKey) -> Option<&str> {
        self.field(key).as_deref()
    }

    /// Set the value stored for a component key
    pub fn set(&mut self, key: AddressKey, value: impl Into<String>) {
        *self.field_mut(key) = Some(value.into());
    }

    /// True when no component key is set (`formatted_address` is not counted)
    pub fn is_empty(&self) -> bool {
        AddressKey::ALL.iter().all(|k| self.field(*k).is_none())
    }

    /// Set component keys with their values, in field order
    pub fn iter(&self) -> impl Iterator<Item = (AddressKey, &str)> + '_ {
        AddressKey::ALL
            .into_iter()
            .filter_map(move |k| self.get(k).map(|v| (k, v)))
    }

    fn field(&self, key: AddressKey) -> &Option<String> {
        match key {
            AddressKey::StreetNumber => &self.street_number,
            AddressKey::Route => &self.route,
            AddressKey::Political => &self.political,
            AddressKey::Locality => &self.locality,
            AddressKey::AdministrativeAreaLevel2 => &self.administrative_area_level_2,
            AddressKey::AdministrativeAreaLevel1 => &self.administrative_area_level_1,
            AddressKey::Country => &self.country,
            AddressKey::PostalCode => &self.postal_code,
            AddressKey::PlusCode => &self.plus_code,
            AddressKey::Subpremise => &self.subpremise,
            AddressKey::Premise => &self.premise,
        }
    }

    fn field_mut(&mut self, key: AddressKey) -> &mut Option<String> {
        match key {
            AddressKey::StreetNumber => &mut self.street_number,
            AddressKey::Route => &mut self.route,
            AddressKey::Political => &mut self.political,
            AddressKey::Locality => &mut self.locality,
            AddressKey::AdministrativeAreaLevel2 => &mut self.administrative_area_level_2,
            AddressKey::AdministrativeAreaLevel1 => &mut self.administrative_area_level_1,
            AddressKey::Country => &mut self.country,
            AddressKey::PostalCode => &mut self.postal_code,
            AddressKey::PlusCode => &mut self.plus_code,
            AddressKey::Subpremise => &mut self.subpremise,
            AddressKey::Premise => &mut self.premise,
        }
    }
}

/// Build an [`AddressRecord`] from provider components
///
/// Each component is keyed on its first type only. Unrecognized types are
/// skipped, and a later component overwrites an earlier one with the same
/// key. `formatted_address` is always taken from the argument.
pub fn normalize(components: &[AddressComponent], formatted_address: &str) -> AddressRecord {
    let mut record = AddressRecord::default();

    for component in components {
        let key = component
            .primary_type()
            .and_then(|t| t.parse::<AddressKey>().ok());
        if let Some(key) = key {
            record.set(key, component.long_name.as_str());
        }
    }

    record.formatted_address = Some(formatted_address.to_string());
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        let record = normalize(&[], "X");

        assert!(record.is_empty());
        assert_eq!(record.formatted_address.as_deref(), Some("X"));
        for key in AddressKey::ALL {
            assert_eq!(record.get(key), None);
        }
    }

    #[test]
    fn test_normalize_street_and_locality() {
        let components = vec![
            AddressComponent::new("12", &["street_number"]),
            AddressComponent::new("Colombo", &["locality", "political"]),
        ];

        let record = normalize(&components, "12, Colombo");

        let expected = AddressRecord {
            street_number: Some("12".to_string()),
            locality: Some("Colombo".to_string()),
            formatted_address: Some("12, Colombo".to_string()),
            ..Default::default()
        };
        assert_eq!(record, expected);
    }

    #[test]
    fn test_normalize_last_write_wins() {
        let components = vec![
            AddressComponent::new("A", &["country"]),
            AddressComponent::new("B", &["country"]),
        ];

        let record = normalize(&components, "");
        assert_eq!(record.country.as_deref(), Some("B"));
    }

    #[test]
    fn test_normalize_ignores_unknown_type() {
        let components = vec![AddressComponent::new("Somewhere", &["unknown_type"])];

        let record = normalize(&components, "Somewhere");

        assert!(record.is_empty());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("unknown_type"));
        assert_eq!(json.matches("Somewhere").count(), 1);
    }

    #[test]
    fn test_normalize_uses_first_type_only() {
        // "political" is recognized, but only when it comes first
        let components = vec![AddressComponent::new(
            "Western Province",
            &["administrative_area_level_1", "political"],
        )];

        let record = normalize(&components, "");

        assert_eq!(record.administrative_area_level_1.as_deref(), Some("Western Province"));
        assert_eq!(record.political, None);
    }

    #[test]
    fn test_normalize_component_without_types() {
        let components = vec![AddressComponent {
            long_name: "orphan".to_string(),
            short_name: String::new(),
            types: Vec::new(),
        }];

        let record = normalize(&components, "Y");
        assert!(record.is_empty());
        assert_eq!(record.formatted_address.as_deref(), Some("Y"));
    }

    #[test]
    fn test_formatted_address_not_taken_from_components() {
        let components = vec![
            AddressComponent::new("bogus", &["formatted_address"]),
            AddressComponent::new("Sri Lanka", &["country", "political"]),
        ];

        let record = normalize(&components, "Colombo, Sri Lanka");

        assert_eq!(record.formatted_address.as_deref(), Some("Colombo, Sri Lanka"));
        assert_eq!(record.country.as_deref(), Some("Sri Lanka"));
    }

    #[test]
    fn test_empty_formatted_address() {
        let record = normalize(&[], "");
        assert_eq!(record.formatted_address.as_deref(), Some(""));
    }

    #[test]
    fn test_serialized_keys_are_fixed() {
        let components = vec![
            AddressComponent::new("42", &["street_number"]),
            AddressComponent::new("extra", &["neighborhood"]),
        ];
        let record = normalize(&components, "42 Somewhere");

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 12);
        for key in AddressKey::ALL {
            assert!(object.contains_key(key.as_str()), "missing {}", key);
        }
        assert!(object.contains_key("formatted_address"));
        assert!(object["route"].is_null());
        assert_eq!(object["street_number"], "42");
    }

    #[test]
    fn test_record_deserializes_with_missing_keys() {
        let record: AddressRecord =
            serde_json::from_str(r#"{"country": "Sri Lanka", "formatted_address": "Sri Lanka"}"#)
                .unwrap();

        assert_eq!(record.country.as_deref(), Some("Sri Lanka"));
        assert_eq!(record.locality, None);
    }

    #[test]
    fn test_address_key_parsing() {
        for key in AddressKey::ALL {
            assert_eq!(key.as_str().parse::<AddressKey>(), Ok(key));
        }

        assert!("formatted_address".parse::<AddressKey>().is_err());
        assert!("Country".parse::<AddressKey>().is_err());
        assert!("".parse::<AddressKey>().is_err());
    }

    #[test]
    fn test_address_key_serde_matches_as_str() {
        for key in AddressKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_record_iter_in_field_order() {
        let mut record = AddressRecord::default();
        record.set(AddressKey::Country, "Sri Lanka");
        record.set(AddressKey::Route, "Galle Road");

        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (AddressKey::Route, "Galle Road"),
                (AddressKey::Country, "Sri Lanka"),
            ]
        );
    }

    #[test]
    fn test_component_deserialization() {
        let json = r#"{
            "long_name": "Colombo",
            "short_name": "CMB",
            "types": ["locality", "political"]
        }"#;

        let component: AddressComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.primary_type(), Some("locality"));
        assert_eq!(component.short_name, "CMB");
    }
}
