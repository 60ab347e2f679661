//! Configuration validation implementation

use common::config::ConfigValidation;
use common::error::ConfigurationError;

use super::InjectorConfig;
use crate::identity::http::SUBJECT_PLACEHOLDER;
use crate::model::MAX_VALIDITY_YEARS;

impl ConfigValidation for InjectorConfig {
    type Error = ConfigurationError;

    fn validate(&self) -> Result<(), Self::Error> {
        self.logging.validate()?;

        if self.expiry.validity_years == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "expiry.validity_years".to_string(),
                value: "0".to_string(),
                reason: "records must expire in the future".to_string(),
            });
        }

        if self.expiry.validity_years > MAX_VALIDITY_YEARS {
            return Err(ConfigurationError::InvalidValue {
                key: "expiry.validity_years".to_string(),
                value: self.expiry.validity_years.to_string(),
                reason: format!("at most {MAX_VALIDITY_YEARS} years is supported"),
            });
        }

        let validation = &self.validation;
        for (key, template) in [
            ("validation.name_endpoint", &validation.name_endpoint),
            ("validation.identifier_endpoint", &validation.identifier_endpoint),
        ] {
            if !template.contains(SUBJECT_PLACEHOLDER) {
                return Err(ConfigurationError::InvalidValue {
                    key: key.to_string(),
                    value: template.clone(),
                    reason: format!("endpoint must contain the {SUBJECT_PLACEHOLDER} placeholder"),
                });
            }
        }

        if validation.timeout_secs == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "validation.timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "lookups need a bounded, non-zero timeout".to_string(),
            });
        }

        if validation.max_identifier_attempts == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "validation.max_identifier_attempts".to_string(),
                value: "0".to_string(),
                reason: "at least one lookup is required".to_string(),
            });
        }

        if validation.absent_status.contains(&validation.present_status) {
            return Err(ConfigurationError::InvalidValue {
                key: "validation.present_status".to_string(),
                value: validation.present_status.to_string(),
                reason: "a status code cannot mean both present and absent".to_string(),
            });
        }

        if self.names.default_file_name.trim().is_empty() {
            return Err(ConfigurationError::MissingRequired {
                key: "names.default_file_name".to_string(),
            });
        }

        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = self.logging.warnings();

        if self.validation.enabled {
            for endpoint in [
                &self.validation.name_endpoint,
                &self.validation.identifier_endpoint,
            ] {
                if !endpoint.starts_with("https://") {
                    warnings.push(format!("Validation endpoint {endpoint} does not use HTTPS"));
                }
            }
        }

        if self.expiry.validity_years > 100 {
            warnings.push(format!(
                "Expiry of {} years is unusually long",
                self.expiry.validity_years
            ));
        }

        warnings
    }
}
